//! Application records and request payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// JSON object a request payload must arrive as.
type JsonObject = Map<String, Value>;

/// Fields shared by the create and update payloads.
#[derive(Deserialize)]
struct PayloadFields {
    #[serde(default, alias = "app_id")]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl TryFrom<JsonObject> for PayloadFields {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        serde_json::from_value(Value::Object(object))
    }
}

/// A stored Application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Application {
    /// Server-assigned identifier, never reused.
    #[serde(alias = "app_id")]
    #[schema(example = 1)]
    pub id: u64,
    /// Display name.
    #[schema(example = "Initial Application")]
    pub name: String,
    /// Application secret.
    #[schema(example = "qkzbmwtrla")]
    pub password: String,
}

/// Payload for creating an Application.
///
/// `id` is assigned by the server; a request that carries one is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "JsonObject")]
pub struct NewApplication {
    /// Must be absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Required display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional secret; generated when missing or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TryFrom<JsonObject> for NewApplication {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let PayloadFields { id, name, password } = object.try_into()?;
        Ok(Self { id, name, password })
    }
}

impl NewApplication {
    /// Create payload with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Partial update for an existing Application.
///
/// Only the fields present are applied. An empty `password` asks the server
/// to generate a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "JsonObject")]
pub struct ApplicationPatch {
    /// When present, must equal the id in the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New secret, or `""` to regenerate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TryFrom<JsonObject> for ApplicationPatch {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let PayloadFields { id, name, password } = object.try_into()?;
        Ok(Self { id, name, password })
    }
}

impl ApplicationPatch {
    /// True when the patch carries none of the known fields.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.password.is_none()
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    /// Always 200.
    #[schema(example = 200)]
    pub status: u16,
    /// Always "deleted".
    #[schema(example = "deleted")]
    pub message: String,
}

impl Default for Deleted {
    fn default() -> Self {
        Self {
            status: 200,
            message: "deleted".to_string(),
        }
    }
}
