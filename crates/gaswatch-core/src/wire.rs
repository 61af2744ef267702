//! Case-insensitive object decoding.
//!
//! Incoming objects match struct fields ignoring ASCII case, so `Name`,
//! `name` and `NAME` all fill the same field. An exact match wins over a
//! folded one. Map-valued fields (prices) keep their keys untouched.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A JSON object awaiting field extraction.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.0.get(name).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, String> {
        let v = self
            .lookup(name)
            .ok_or_else(|| format!("missing field `{name}`"))?;
        T::deserialize(v).map_err(|e| format!("field `{name}`: {e}"))
    }

    /// Absent or `null` yields `T::default()`.
    pub fn optional<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, String> {
        match self.lookup(name) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(v) => T::deserialize(v).map_err(|e| format!("field `{name}`: {e}")),
        }
    }
}
