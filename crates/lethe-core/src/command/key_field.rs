//! Classification of the raw `key` field of a batch command.

use serde_json::Value;

/// Validation outcome for the `key` field, independent of whether any key
/// resolves to stored content.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyField {
    /// No `key` field in the request.
    Absent,
    /// Present but not a usable batch: `null`, bool, number, bare string,
    /// object, or empty array.
    Invalid,
    /// Non-empty array containing at least one non-string element. The
    /// whole batch is rejected no matter how many elements are valid.
    MixedBatch,
    /// Non-empty array of strings. Order and duplicates preserved.
    Batch(Vec<String>),
}

impl KeyField {
    /// Pure classification; no storage access, no side effects.
    pub fn classify(raw: Option<&Value>) -> KeyField {
        match raw {
            None => KeyField::Absent,
            Some(Value::Array(items)) if !items.is_empty() => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => keys.push(s.clone()),
                        _ => return KeyField::MixedBatch,
                    }
                }
                KeyField::Batch(keys)
            }
            Some(_) => KeyField::Invalid,
        }
    }
}
