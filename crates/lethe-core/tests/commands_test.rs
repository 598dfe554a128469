//! End-to-end command tests against the in-memory object store.

use std::sync::Arc;

use serde_json::{Value, json};

use lethe_core::command::ForgottenEngine;
use lethe_core::config::ForgottenConfig;
use lethe_core::signing::Sha256UrlSigner;
use lethe_core::storage::ObjectStore;
use lethe_core::storage::memory::InMemoryObjectStore;

fn create_engine() -> (Arc<InMemoryObjectStore>, ForgottenEngine) {
    let store = Arc::new(InMemoryObjectStore::new());
    let engine = ForgottenEngine::new(
        store.clone(),
        Arc::new(Sha256UrlSigner::new("test-secret")),
        ForgottenConfig::default(),
    );
    (store, engine)
}

async fn seed(store: &InMemoryObjectStore, doc_ids: &[&str]) {
    for doc_id in doc_ids {
        store
            .put(&format!("{doc_id}/output.docx"), b"forgotten test file")
            .await
            .unwrap();
    }
}

async fn dispatch(engine: &ForgottenEngine, body: Value) -> Value {
    engine.dispatch(&body).await.unwrap()
}

/// Drop the signature query string so URLs compare deterministically.
fn url_paths(response: &Value) -> Vec<String> {
    response["url"]
        .as_array()
        .expect("url array")
        .iter()
        .map(|u| u.as_str().unwrap().split('?').next().unwrap().to_string())
        .collect()
}

fn expected_url(doc_id: &str) -> String {
    format!("http://localhost:8000/cache/files/forgotten/{doc_id}/output.docx/output.docx")
}

// ---------------------------------------------------------------------------
// Key format validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_invalid_key_shapes_rejected_for_batch_commands() {
    let (_store, engine) = create_engine();

    let invalid_shapes = [
        json!(true),
        json!("someKey"),
        json!([]),
        json!({}),
        json!(1),
        json!(1.1),
        json!(null),
    ];

    for command in ["getForgotten", "deleteForgotten"] {
        for shape in &invalid_shapes {
            let actual = dispatch(&engine, json!({ "c": command, "key": shape })).await;
            assert_eq!(
                actual,
                json!({ "key": shape, "error": 1 }),
                "{command} with key {shape} must echo the key and fail"
            );
        }

        // Missing field: no echo at all.
        let actual = dispatch(&engine, json!({ "c": command })).await;
        assert_eq!(actual, json!({ "error": 1 }));
    }
}

#[tokio::test]
async fn test_list_command_ignores_key_field() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-list"]).await;

    let bodies = [
        json!({ "c": "getForgottenList" }),
        json!({ "c": "getForgottenList", "key": null }),
        json!({ "c": "getForgottenList", "key": true }),
        json!({ "c": "getForgottenList", "key": ["doc-list"] }),
    ];

    for body in bodies {
        let actual = dispatch(&engine, body).await;
        assert_eq!(actual, json!({ "error": 0, "keys": ["doc-list"] }));
    }
}

#[tokio::test]
async fn test_mixed_batch_rejected_without_partial_processing() {
    let (store, engine) = create_engine();
    seed(&store, &["real-key", "other-key"]).await;

    let key = json!([1, "real-key", null, "other-key"]);

    let actual = dispatch(&engine, json!({ "c": "getForgotten", "key": &key })).await;
    assert_eq!(actual, json!({ "key": &key, "error": 1, "url": [] }));

    let actual = dispatch(&engine, json!({ "c": "deleteForgotten", "key": &key })).await;
    assert_eq!(actual, json!({ "key": &key, "error": 1, "deleted": [] }));

    // Nothing was removed for the valid string elements either.
    assert_eq!(store.list("").await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// getForgotten
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_forgotten_round_trip() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-get"]).await;

    let actual = dispatch(&engine, json!({ "c": "getForgotten", "key": ["doc-get"] })).await;

    assert_eq!(actual["key"], json!(["doc-get"]));
    assert_eq!(actual["error"], 0);
    assert_eq!(url_paths(&actual), vec![expected_url("doc-get")]);

    // A token query string is attached.
    let full = actual["url"][0].as_str().unwrap();
    assert!(full.contains("?token=") && full.contains("expires="), "unsigned url: {full}");
}

#[tokio::test]
async fn test_get_forgotten_multiple_keys_in_order() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a", "doc-b", "doc-c"]).await;

    let actual = dispatch(
        &engine,
        json!({ "c": "getForgotten", "key": ["doc-c", "doc-a", "doc-b"] }),
    )
    .await;

    assert_eq!(actual["error"], 0);
    assert_eq!(
        url_paths(&actual),
        vec![expected_url("doc-c"), expected_url("doc-a"), expected_url("doc-b")]
    );
}

#[tokio::test]
async fn test_get_forgotten_partial_results_on_missing_key() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a", "doc-b"]).await;

    let actual = dispatch(
        &engine,
        json!({ "c": "getForgotten", "key": ["doc-a", "--not-existed--", "doc-b"] }),
    )
    .await;

    // One missing key flips the verdict but survivors are still returned,
    // order preserved.
    assert_eq!(actual["error"], 1);
    assert_eq!(url_paths(&actual), vec![expected_url("doc-a"), expected_url("doc-b")]);
}

#[tokio::test]
async fn test_get_forgotten_all_missing() {
    let (_store, engine) = create_engine();

    let actual = dispatch(
        &engine,
        json!({ "c": "getForgotten", "key": ["--not-existed--"] }),
    )
    .await;

    assert_eq!(actual, json!({ "key": ["--not-existed--"], "error": 1, "url": [] }));
}

// ---------------------------------------------------------------------------
// deleteForgotten
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_forgotten_single_key() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-del", "doc-keep"]).await;

    let actual = dispatch(&engine, json!({ "c": "deleteForgotten", "key": ["doc-del"] })).await;

    assert_eq!(
        actual,
        json!({ "key": ["doc-del"], "error": 0, "deleted": ["doc-del"] })
    );
    assert_eq!(store.list("").await.unwrap(), vec!["doc-keep/output.docx"]);
}

#[tokio::test]
async fn test_delete_forgotten_removes_every_object_of_a_doc() {
    let (store, engine) = create_engine();
    store.put("doc-multi/output.docx", b"a").await.unwrap();
    store.put("doc-multi/output.pdf", b"b").await.unwrap();

    let actual = dispatch(&engine, json!({ "c": "deleteForgotten", "key": ["doc-multi"] })).await;

    assert_eq!(actual["error"], 0);
    assert!(store.list("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_forgotten_is_atomic_on_missing_key() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a", "doc-b"]).await;

    let actual = dispatch(
        &engine,
        json!({ "c": "deleteForgotten", "key": ["--not-existed--", "doc-a", "doc-b"] }),
    )
    .await;

    assert_eq!(
        actual,
        json!({
            "key": ["--not-existed--", "doc-a", "doc-b"],
            "error": 1,
            "deleted": []
        })
    );

    // Every existing artifact of the rejected batch is intact.
    assert_eq!(
        store.list("").await.unwrap(),
        vec!["doc-a/output.docx", "doc-b/output.docx"]
    );
}

#[tokio::test]
async fn test_delete_forgotten_multiple_keys() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-1", "doc-2", "doc-3"]).await;

    let actual = dispatch(
        &engine,
        json!({ "c": "deleteForgotten", "key": ["doc-1", "doc-3"] }),
    )
    .await;

    assert_eq!(actual["error"], 0);
    assert_eq!(actual["deleted"], json!(["doc-1", "doc-3"]));
    assert_eq!(store.list("").await.unwrap(), vec!["doc-2/output.docx"]);
}

#[tokio::test]
async fn test_delete_forgotten_duplicate_keys_in_batch() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-dup"]).await;

    let actual = dispatch(
        &engine,
        json!({ "c": "deleteForgotten", "key": ["doc-dup", "doc-dup"] }),
    )
    .await;

    assert_eq!(actual["error"], 0);
    assert_eq!(actual["deleted"], json!(["doc-dup", "doc-dup"]));
    assert!(store.list("").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// getForgottenList
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_reports_distinct_doc_ids() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a", "doc-b"]).await;
    // A second object under an existing docId must not duplicate the entry.
    store.put("doc-a/output.pdf", b"x").await.unwrap();

    let actual = dispatch(&engine, json!({ "c": "getForgottenList" })).await;

    assert_eq!(actual, json!({ "error": 0, "keys": ["doc-a", "doc-b"] }));
}

#[tokio::test]
async fn test_list_is_idempotent_without_mutation() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a", "doc-b", "doc-c"]).await;

    let first = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    let second = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_reflects_new_and_deleted_docs() {
    let (store, engine) = create_engine();
    seed(&store, &["doc-a"]).await;

    let before = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    assert_eq!(before["keys"], json!(["doc-a"]));

    seed(&store, &["doc-b"]).await;
    let after_put = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    assert_eq!(after_put["keys"], json!(["doc-a", "doc-b"]));

    dispatch(&engine, json!({ "c": "deleteForgotten", "key": ["doc-a"] })).await;
    let after_delete = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    assert_eq!(after_delete["keys"], json!(["doc-b"]));
}

#[tokio::test]
async fn test_list_on_empty_namespace() {
    let (_store, engine) = create_engine();
    let actual = dispatch(&engine, json!({ "c": "getForgottenList" })).await;
    assert_eq!(actual, json!({ "error": 0, "keys": [] }));
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_command() {
    let (_store, engine) = create_engine();
    let actual = dispatch(&engine, json!({ "c": "dropEverything", "key": ["x"] })).await;
    assert_eq!(actual, json!({ "error": 1 }));
}

#[tokio::test]
async fn test_body_without_command_name() {
    let (_store, engine) = create_engine();
    assert_eq!(dispatch(&engine, json!({ "key": ["x"] })).await, json!({ "error": 1 }));
    assert_eq!(dispatch(&engine, json!({ "c": 7 })).await, json!({ "error": 1 }));
    assert_eq!(dispatch(&engine, json!("not an object")).await, json!({ "error": 1 }));
}
