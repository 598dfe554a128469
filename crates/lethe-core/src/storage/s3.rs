//! S3-compatible object store backend.
//!
//! Available behind the `s3` Cargo feature. Object keys are stored under a
//! configurable bucket prefix, so several services can share one bucket.

use crate::error::{Error, Result};
use crate::storage::ObjectStore;

/// Configuration for the S3 backend.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3 bucket name.
    pub bucket: String,
    /// Key prefix for the forgotten-files namespace.
    pub prefix: String,
    /// Endpoint URL (for S3-compatible services like MinIO).
    pub endpoint: Option<String>,
    /// AWS region.
    pub region: String,
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    config: S3Config,
}

impl S3ObjectStore {
    /// Create a new S3 object store.
    ///
    /// Loads AWS credentials from the default provider chain. When
    /// `config.endpoint` is set the client targets that URL instead of the
    /// real AWS endpoint, which is useful for MinIO or LocalStack.
    pub async fn new(config: S3Config) -> Self {
        let mut aws_cfg_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref endpoint) = config.endpoint {
            aws_cfg_loader = aws_cfg_loader.endpoint_url(endpoint);
        }

        let aws_cfg = aws_cfg_loader.load().await;
        let client = aws_sdk_s3::Client::new(&aws_cfg);

        Self { client, config }
    }

    fn full_key(&self, key: &str) -> String {
        if self.config.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.config.prefix, key)
        }
    }

    fn strip_prefix<'a>(&self, full: &'a str) -> Option<&'a str> {
        if self.config.prefix.is_empty() {
            Some(full)
        } else {
            full.strip_prefix(&self.config.prefix)
                .and_then(|rest| rest.strip_prefix('/'))
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(self.full_key(key))
            .body(aws_sdk_s3::primitives::ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 put_object failed: {e}")))?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let full_prefix = self.full_key(prefix);
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.config.bucket)
                .prefix(&full_prefix);

            if let Some(ref token) = continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| Error::Storage(format!("S3 list_objects_v2 failed: {e}")))?;

            for obj in resp.contents() {
                if let Some(full) = obj.key() {
                    if let Some(key) = self.strip_prefix(full) {
                        keys.push(key.to_string());
                    }
                }
            }

            match resp.next_continuation_token() {
                Some(token) if resp.is_truncated() == Some(true) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(self.full_key(key))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 delete_object failed: {e}")))?;

        Ok(())
    }
}
