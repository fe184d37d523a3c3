//! Decoded responses.
//!
//! Every call yields an `ApiResponse` regardless of status. The body is JSON
//! when the service sent JSON and raw text otherwise (the service answers
//! auth failures with an HTML page), so callers match on `ResponseBody`
//! instead of guessing the shape.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::HttpResponse;
use crate::types::{AuthKey, Pet, PetList};

/// Response body: structured JSON, or the raw text when it did not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ResponseBody::Json(Value::Object(map)) => map.get(name),
            _ => None,
        }
    }

    pub fn has_key(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn auth_key(&self) -> Option<AuthKey> {
        self.str_field("key").map(AuthKey::new)
    }

    /// The pet record, when the body is one.
    pub fn pet(&self) -> Option<Pet> {
        self.typed()
    }

    /// The `pets` array of a listing, when the body is one.
    pub fn pets(&self) -> Option<Vec<Pet>> {
        self.typed::<PetList>().map(|list| list.pets)
    }

    fn typed<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value.clone()).ok(),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Status code plus decoded body of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

impl From<HttpResponse> for ApiResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            body: ResponseBody::decode(&response.body),
        }
    }
}
