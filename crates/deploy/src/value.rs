//! Typed contract call values and their JSON-safe projection.
//!
//! [`ContractValue`] is what gets passed to a contract method. Its
//! [`Serialize`] impl is the projection persisted in the config file and
//! written to logs:
//!
//! - byte sequences become lowercase hex strings,
//! - integers outside the range a JSON number can hold exactly become decimal strings,
//! - sequences and records are projected element-wise, keeping their order,
//! - strings, booleans and small integers pass through unchanged.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Largest integer a JSON number (IEEE-754 double) represents exactly.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A value passed to a contract method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractValue {
    /// The unit value, projected as `null`.
    Void,
    /// An account (`G...`) or contract (`C...`) address.
    Address(String),
    Bytes(Vec<u8>),
    Bool(bool),
    U32(u32),
    U64(u64),
    U128(u128),
    I128(i128),
    String(String),
    Vec(Vec<ContractValue>),
    /// A record with named fields, in declaration order.
    Map(Vec<(String, ContractValue)>),
}

impl ContractValue {
    /// Build a record value from `(field, value)` pairs.
    pub fn map<K: Into<String>>(fields: impl IntoIterator<Item = (K, ContractValue)>) -> Self {
        ContractValue::Map(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The JSON-safe projection of this value.
    pub fn to_json(&self) -> Value {
        // Serializing into a `Value` cannot fail: keys are strings, no floats.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Rebuild a value from its JSON projection.
    ///
    /// Only the shape is recovered: hex and decimal strings stay strings, and
    /// numbers come back as the narrowest fitting integer variant.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ContractValue::Void,
            Value::Bool(b) => ContractValue::Bool(*b),
            Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => ContractValue::U64(u),
                (None, Some(i)) => ContractValue::I128(i.into()),
                _ => ContractValue::String(n.to_string()),
            },
            Value::String(s) => ContractValue::String(s.clone()),
            Value::Array(items) => ContractValue::Vec(items.iter().map(Self::from_json).collect()),
            Value::Object(fields) => ContractValue::Map(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render this value as a single command-line argument.
    ///
    /// Scalars are written raw, composites as compact JSON.
    pub fn to_cli_arg(&self) -> String {
        match self.to_json() {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

fn serialize_unsigned<S: Serializer>(value: u128, serializer: S) -> Result<S::Ok, S::Error> {
    if value <= MAX_SAFE_INTEGER as u128 {
        serializer.serialize_u64(value as u64)
    } else {
        serializer.collect_str(&value)
    }
}

impl Serialize for ContractValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContractValue::Void => serializer.serialize_unit(),
            ContractValue::Address(s) | ContractValue::String(s) => serializer.serialize_str(s),
            ContractValue::Bytes(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            ContractValue::Bool(b) => serializer.serialize_bool(*b),
            ContractValue::U32(n) => serializer.serialize_u32(*n),
            ContractValue::U64(n) => serialize_unsigned(*n as u128, serializer),
            ContractValue::U128(n) => serialize_unsigned(*n, serializer),
            ContractValue::I128(n) if *n >= 0 => serialize_unsigned(*n as u128, serializer),
            ContractValue::I128(n) => {
                if n.unsigned_abs() <= MAX_SAFE_INTEGER as u128 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.collect_str(n)
                }
            }
            ContractValue::Vec(items) => serializer.collect_seq(items),
            ContractValue::Map(fields) => {
                serializer.collect_map(fields.iter().map(|(k, v)| (k.as_str(), v)))
            }
        }
    }
}
