//! Object-store gateway for the forgotten-files namespace.
//!
//! Keys are hierarchical strings relative to the namespace root. The first
//! path segment is the docId; everything belonging to one forgotten document
//! lives under `{docId}/{artifactName}.{ext}`.
//!
//! The [`ObjectStore`] trait defines the contract for any backend. An
//! [`memory::InMemoryObjectStore`] implementation is provided for testing
//! without touching disk or network; [`disk::DiskObjectStore`] serves
//! single-node deployments, and an S3-compatible backend is available behind
//! the `s3` Cargo feature.

pub mod disk;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

use crate::error::Result;

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any previous content under `key`.
    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// List all object keys starting with `prefix`, relative to the
    /// namespace root. An empty prefix lists the whole namespace. Order is
    /// backend-defined; callers needing determinism must sort.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Delete a single object. Deleting a missing key is an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
