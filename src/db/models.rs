use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Row of `usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub nombre: String,
    pub apellidos: String,
    pub sexo: String,
    /// Free text, never parsed.
    pub edad: String,
    pub telefono: String,
}

/// Row of `grupos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub nombre: String,
}

/// Body of `POST /usuarios` and `PUT /usuarios/:id`.
///
/// Missing fields are bound as NULL and left for the table's
/// `NOT NULL` constraints to reject.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PersonPayload {
    #[serde(default, deserialize_with = "loose_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub apellidos: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub sexo: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub edad: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub telefono: Option<String>,
}

/// Body of `POST /grupos` and `PUT /grupos/:id`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GroupPayload {
    #[serde(default, deserialize_with = "loose_text")]
    pub nombre: Option<String>,
}

/// Accept strings, numbers and booleans for a text column.
/// `null` maps to `None`; arrays and objects are stored as their JSON text.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
