use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::BlockError;

/// A single application value stored in a block payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Bool(bool),
    Int(i64),
    // Tried before `Float` so integers above i64::MAX keep their exact value.
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<bool> for PayloadValue {
    fn from(v: bool) -> Self {
        PayloadValue::Bool(v)
    }
}

impl From<i32> for PayloadValue {
    fn from(v: i32) -> Self {
        PayloadValue::Int(v.into())
    }
}

impl From<i64> for PayloadValue {
    fn from(v: i64) -> Self {
        PayloadValue::Int(v)
    }
}

impl From<u64> for PayloadValue {
    fn from(v: u64) -> Self {
        PayloadValue::UInt(v)
    }
}

impl From<f64> for PayloadValue {
    fn from(v: f64) -> Self {
        PayloadValue::Float(v)
    }
}

impl From<&str> for PayloadValue {
    fn from(v: &str) -> Self {
        PayloadValue::Text(v.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(v: String) -> Self {
        PayloadValue::Text(v)
    }
}

/// Key/value data attached to a block.
///
/// Backed by a `BTreeMap`, so the JSON encoding always lists keys in
/// sorted order and logically equal payloads hash identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, PayloadValue>);

impl Payload {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, handy for literals.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PayloadValue>,
    ) -> Option<PayloadValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical JSON used in the hash preimage.
    ///
    /// serde_json would silently write NaN/inf as `null`, so non-finite
    /// floats are rejected before encoding.
    pub fn canonical_json(&self) -> Result<String, BlockError> {
        if let Some((key, _)) = self
            .0
            .iter()
            .find(|(_, v)| matches!(v, PayloadValue::Float(f) if !f.is_finite()))
        {
            return Err(BlockError::NonFiniteNumber { key: key.clone() });
        }
        Ok(serde_json::to_string(&self.0)?)
    }
}
