//! Request and response bodies of the drinks API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ingredient of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePart {
    /// Ingredient name, only present in the detailed representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub color: String,
    pub parts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

/// Body of `POST /drinks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

/// Body of `PATCH /drinks/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Vec<RecipePart>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DrinksResponse {
    pub success: bool,
    #[serde(default)]
    pub drinks: Vec<Drink>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DrinkResponse {
    pub success: bool,
    #[serde(default)]
    pub drink: Option<Drink>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedResponse {
    pub success: bool,
    #[serde(default)]
    pub drink: Option<Value>,
}

/// Failure body: `{"success": false, "error": 404, "message": "..."}`.
/// `error` is either a status code or a human readable string.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn describe(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        match &self.error {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Render a JSON id (string or number) without quotes
pub(crate) fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
