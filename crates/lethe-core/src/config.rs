#[derive(Debug, Clone)]
pub struct ForgottenConfig {
    /// Scheme and host prepended to every issued download URL.
    pub base_url: String,
    /// Validity window for signed-URL tokens, in seconds.
    pub token_ttl_seconds: u64,
}

impl Default for ForgottenConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token_ttl_seconds: 600,
        }
    }
}
