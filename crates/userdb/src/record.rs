//! Core record types for userdb.
//!
//! A [`Record`] is one user entry. The stored collection is a JSON array of
//! records in insertion order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single user entry.
///
/// Only JSON objects decode into a record. Fields missing from the object
/// decode to their empty values, matching how the stored file has always been
/// read. Field order on output is `id`, `email`, `age`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    /// Unique key within the collection.
    pub id: String,

    /// Contact address. Not validated.
    pub email: String,

    /// Age in years. Not range checked.
    pub age: u64,
}

/// The field decoding behind [`Record`], reached only through an object.
#[derive(Deserialize)]
struct Fields {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    age: u64,
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> serde_json::Result<Self> {
        let Fields { id, email, age } = serde_json::from_value(Value::Object(object))?;
        Ok(Self { id, email, age })
    }
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, age: u64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            age,
        }
    }

    /// Decode a record from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if `item` is not a JSON object of the
    /// expected shape.
    pub fn from_json(item: &str) -> serde_json::Result<Self> {
        serde_json::from_str(item)
    }

    /// Encode this record as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check if this record carries the given id.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}
