use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::command::ForgottenEngine;
use crate::command::key_field::KeyField;
use crate::command::resolve::resolve;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct DeleteForgottenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    pub error: u8,
    /// On success, echoes the key batch; on any failure of an array-shaped
    /// request, an empty array. Absent when the field was not an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Value>,
}

/// All-or-nothing deletion of a key batch.
///
/// The whole batch is resolved before anything is removed; a single
/// malformed or unresolved key rejects the batch with no delete call issued.
/// There is no lock between the resolution and deletion phases, so a
/// concurrent writer can invalidate the verdict before the deletes land.
pub async fn execute(
    engine: &ForgottenEngine,
    raw_key: Option<&Value>,
) -> Result<DeleteForgottenResponse> {
    let echo = raw_key.cloned();

    let keys = match KeyField::classify(raw_key) {
        KeyField::Batch(keys) => keys,
        KeyField::MixedBatch => {
            return Ok(DeleteForgottenResponse {
                key: echo,
                error: 1,
                deleted: Some(Value::Array(Vec::new())),
            });
        }
        KeyField::Absent | KeyField::Invalid => {
            return Ok(DeleteForgottenResponse {
                key: echo,
                error: 1,
                deleted: None,
            });
        }
    };

    let resolved = resolve(engine.storage.as_ref(), &keys).await?;

    if resolved.iter().any(|artifact| !artifact.found()) {
        tracing::debug!(batch = keys.len(), "deleteForgotten batch rejected, nothing removed");
        return Ok(DeleteForgottenResponse {
            key: echo,
            error: 1,
            deleted: Some(Value::Array(Vec::new())),
        });
    }

    // The batch may name the same docId twice; each object is removed once.
    let objects: BTreeSet<&str> = resolved
        .iter()
        .flat_map(|artifact| artifact.objects.iter().map(String::as_str))
        .collect();

    for object in &objects {
        engine.storage.delete(object).await?;
    }

    tracing::info!(
        docs = keys.len(),
        objects = objects.len(),
        "deleted forgotten artifacts"
    );

    Ok(DeleteForgottenResponse {
        key: echo.clone(),
        error: 0,
        deleted: echo,
    })
}
