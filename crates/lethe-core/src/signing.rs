//! Time-limited download URL issuing.
//!
//! The engine never hard-codes a token scheme: anything implementing
//! [`UrlSigner`] can be injected. [`Sha256UrlSigner`] is the default,
//! producing a keyed sha256 digest over the request path and expiry.

use sha2::{Digest, Sha256};

use crate::config::ForgottenConfig;

/// Produces an opaque authorization token for a URL path valid until
/// `expires_at` (unix seconds). The serving layer re-derives and compares
/// the token before streaming the file.
pub trait UrlSigner: Send + Sync {
    fn sign(&self, path: &str, expires_at: i64) -> String;
}

pub struct Sha256UrlSigner {
    secret: String,
}

impl Sha256UrlSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl UrlSigner for Sha256UrlSigner {
    fn sign(&self, path: &str, expires_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(path.as_bytes());
        hasher.update(expires_at.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Build the public download URL for a stored artifact.
///
/// `location` is the object key, `{docId}/{artifactName}.{ext}`. The artifact
/// name appears twice in the path: once as the opaque storage folder and once
/// as the served filename, so the serving layer can set a friendly download
/// name. Deterministic apart from the token query string.
pub fn signed_download_url(
    config: &ForgottenConfig,
    signer: &dyn UrlSigner,
    location: &str,
) -> String {
    let filename = location.rsplit('/').next().unwrap_or(location);
    let path = format!("/cache/files/forgotten/{location}/{filename}");
    let expires_at = chrono::Utc::now().timestamp() + config.token_ttl_seconds as i64;
    let token = signer.sign(&path, expires_at);
    format!("{}{}?token={}&expires={}", config.base_url, path, token, expires_at)
}
