use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single contact-form submission, keyed by `email` in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub email: String,
    pub name: String,
    pub message: String,
}

impl Submission {
    /// Extract a submission from an already-parsed JSON body. Each field must
    /// be present and a string; anything else is rejected.
    pub fn from_json(data: &Value) -> Result<Self, String> {
        Ok(Submission {
            email: required_string(data, "email")?,
            name: required_string(data, "name")?,
            message: required_string(data, "message")?,
        })
    }
}

fn required_string(data: &Value, key: &str) -> Result<String, String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("Missing or non-string field: {key}"))
}
