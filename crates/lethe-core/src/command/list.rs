use std::collections::HashSet;

use serde::Serialize;

use crate::command::ForgottenEngine;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct GetForgottenListResponse {
    pub error: u8,
    /// Distinct docIds present in the namespace at the instant of listing,
    /// in first-seen listing order.
    pub keys: Vec<String>,
}

/// The `key` field, if any, is ignored: listing requires no input and has no
/// validation failure path.
pub async fn execute(engine: &ForgottenEngine) -> Result<GetForgottenListResponse> {
    let objects = engine.storage.list("").await?;

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for object in &objects {
        let doc_id = object.split('/').next().unwrap_or(object);
        if seen.insert(doc_id.to_string()) {
            keys.push(doc_id.to_string());
        }
    }

    Ok(GetForgottenListResponse { error: 0, keys })
}
