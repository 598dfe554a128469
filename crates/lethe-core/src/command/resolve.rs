//! Multi-key resolution against the object store.

use crate::error::{Error, Result};
use crate::storage::ObjectStore;

/// One key's resolution verdict: the docId together with every object key
/// stored under its `{docId}/` prefix.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub doc_id: String,
    pub objects: Vec<String>,
}

impl ResolvedArtifact {
    pub fn found(&self) -> bool {
        !self.objects.is_empty()
    }

    /// The retrievable storage location: the first object under the prefix.
    /// `objects` is sorted, so this is stable across calls.
    pub fn location(&self) -> Option<&str> {
        self.objects.first().map(String::as_str)
    }
}

/// Check every key in the batch for stored content, in input order.
///
/// Lookups for independent keys run concurrently; the verdict is produced
/// only after all lookups complete. A storage failure on any lookup aborts
/// the whole resolution with no verdict.
pub async fn resolve(store: &dyn ObjectStore, keys: &[String]) -> Result<Vec<ResolvedArtifact>> {
    let lookups = keys.iter().map(|key| async move {
        let mut objects = store.list(&format!("{key}/")).await?;
        objects.sort();
        Ok::<_, Error>(ResolvedArtifact {
            doc_id: key.clone(),
            objects,
        })
    });

    futures::future::try_join_all(lookups).await
}
