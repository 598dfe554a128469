//! Command dispatch for the forgotten-files service.
//!
//! Three commands are understood: `getForgotten`, `deleteForgotten`, and
//! `getForgottenList`. Every validation outcome — malformed key field,
//! unresolved key, unknown command — is expressed as a normal response with
//! `error: 1`; only storage failures surface as `Err` and belong to the
//! transport layer.

pub mod delete;
pub mod get;
pub mod key_field;
pub mod list;
pub mod resolve;

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::config::ForgottenConfig;
use crate::error::Result;
use crate::signing::UrlSigner;
use crate::storage::ObjectStore;

/// A parsed command envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    /// Command name.
    pub c: String,
    /// Raw `key` field. `None` only when the field was absent from the
    /// request; an explicit JSON `null` parses to `Some(Value::Null)` so the
    /// two cases stay distinguishable for echoing.
    #[serde(default, deserialize_with = "present_value")]
    pub key: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub struct ForgottenEngine {
    pub storage: Arc<dyn ObjectStore>,
    pub signer: Arc<dyn UrlSigner>,
    pub config: ForgottenConfig,
}

impl ForgottenEngine {
    pub fn new(
        storage: Arc<dyn ObjectStore>,
        signer: Arc<dyn UrlSigner>,
        config: ForgottenConfig,
    ) -> Self {
        Self {
            storage,
            signer,
            config,
        }
    }

    pub async fn get_forgotten(&self, raw_key: Option<&Value>) -> Result<get::GetForgottenResponse> {
        get::execute(self, raw_key).await
    }

    pub async fn delete_forgotten(
        &self,
        raw_key: Option<&Value>,
    ) -> Result<delete::DeleteForgottenResponse> {
        delete::execute(self, raw_key).await
    }

    pub async fn get_forgotten_list(&self) -> Result<list::GetForgottenListResponse> {
        list::execute(self).await
    }

    /// Route a raw JSON body to the matching command handler.
    ///
    /// A body that is not a command envelope at all (missing or non-string
    /// `c`) answers `{"error": 1}`, as does an unrecognized command name.
    pub async fn dispatch(&self, body: &Value) -> Result<Value> {
        let request: CommandRequest = match serde_json::from_value(body.clone()) {
            Ok(request) => request,
            Err(_) => return Ok(json!({ "error": 1 })),
        };
        self.dispatch_command(&request).await
    }

    pub async fn dispatch_command(&self, request: &CommandRequest) -> Result<Value> {
        let raw_key = request.key.as_ref();
        let response = match request.c.as_str() {
            "getForgotten" => serde_json::to_value(self.get_forgotten(raw_key).await?)?,
            "deleteForgotten" => serde_json::to_value(self.delete_forgotten(raw_key).await?)?,
            "getForgottenList" => serde_json::to_value(self.get_forgotten_list().await?)?,
            other => {
                tracing::debug!(command = other, "unknown command");
                json!({ "error": 1 })
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_distinguishes_absent_from_null() {
        let absent: CommandRequest =
            serde_json::from_value(json!({ "c": "getForgotten" })).unwrap();
        assert!(absent.key.is_none());

        let null: CommandRequest =
            serde_json::from_value(json!({ "c": "getForgotten", "key": null })).unwrap();
        assert_eq!(null.key, Some(Value::Null));
    }

    #[test]
    fn test_non_envelope_body_fails_parse() {
        assert!(serde_json::from_value::<CommandRequest>(json!({ "key": ["a"] })).is_err());
        assert!(serde_json::from_value::<CommandRequest>(json!({ "c": 5 })).is_err());
    }
}
