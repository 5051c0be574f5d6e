//! JSON encoding of decimal amounts.
//!
//! Amounts are written as JSON numbers and read back from the literal text of
//! the number (serde_json `arbitrary_precision`), so no digits are lost to an
//! `f64` on either side. Quoted decimals are still accepted on input.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number = Number::from_str(&value.to_string()).map_err(ser::Error::custom)?;
    number.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    from_value(Value::deserialize(deserializer)?)
}

fn from_value<E: de::Error>(value: Value) -> Result<BigDecimal, E> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        other => return Err(E::custom(format!("expected a decimal number, found {}", other))),
    };
    BigDecimal::from_str(&text).map_err(|e| E::custom(format!("invalid decimal '{}': {}", text, e)))
}

/// Same encoding for optional fields. `null` and an absent field read as `None`
/// when the field is marked `#[serde(default)]`.
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => from_value(value).map(Some),
        }
    }
}
