//! HTTP request bodies for user endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{RawField, UserCandidate};

/// Body of create and update requests.
///
/// Fields stay untyped so a number or `true` sent as a name is reported as a
/// type error instead of failing JSON decoding.
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

fn raw_field(value: Option<Value>) -> RawField {
    match value {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::String(text)) => RawField::Text(text),
        Some(_) => RawField::NotAString,
    }
}

impl From<UserPayload> for UserCandidate {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: raw_field(payload.name),
            email: raw_field(payload.email),
        }
    }
}
