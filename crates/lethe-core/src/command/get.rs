use serde::Serialize;
use serde_json::Value;

use crate::command::ForgottenEngine;
use crate::command::key_field::KeyField;
use crate::command::resolve::resolve;
use crate::error::Result;
use crate::signing::signed_download_url;

#[derive(Debug, Serialize)]
pub struct GetForgottenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    pub error: u8,
    /// Signed URLs for the keys that resolved, in input order. Present for
    /// any array-shaped request, even on overall failure; absent when the
    /// field itself was not an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Vec<String>>,
}

pub async fn execute(
    engine: &ForgottenEngine,
    raw_key: Option<&Value>,
) -> Result<GetForgottenResponse> {
    let echo = raw_key.cloned();

    let keys = match KeyField::classify(raw_key) {
        KeyField::Batch(keys) => keys,
        KeyField::MixedBatch => {
            return Ok(GetForgottenResponse {
                key: echo,
                error: 1,
                url: Some(Vec::new()),
            });
        }
        KeyField::Absent | KeyField::Invalid => {
            return Ok(GetForgottenResponse {
                key: echo,
                error: 1,
                url: None,
            });
        }
    };

    let resolved = resolve(engine.storage.as_ref(), &keys).await?;

    let mut urls = Vec::new();
    let mut missing = 0usize;
    for artifact in &resolved {
        match artifact.location() {
            Some(location) => {
                urls.push(signed_download_url(
                    &engine.config,
                    engine.signer.as_ref(),
                    location,
                ));
            }
            None => missing += 1,
        }
    }

    if missing > 0 {
        tracing::debug!(batch = keys.len(), missing, "getForgotten batch incomplete");
    }

    Ok(GetForgottenResponse {
        key: echo,
        error: if missing == 0 { 0 } else { 1 },
        url: Some(urls),
    })
}
