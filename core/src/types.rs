//! Domain DTOs for the PetFriends API.
//!
//! # Design
//! These types mirror what the service returns but are defined independently
//! of the mock-server crate; the scenario tests catch schema drift. Pet ids
//! are opaque strings assigned by the service. `age` is text because the
//! service echoes whatever was submitted, including `""` and `"-1"`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login pair sent as headers to `GET api/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque token issued by `GET api/key`, sent back as the `auth_key` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    pub key: String,
}

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The same token with its characters in reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            key: self.key.chars().rev().collect(),
        }
    }
}

/// A pet record as the service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "age_as_text")]
    pub age: String,
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `GET api/pets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

/// Which pets `GET api/pets` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetFilter {
    #[default]
    All,
    MyPets,
}

impl PetFilter {
    /// Value of the `filter` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

fn age_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}
