// SPDX-License-Identifier: Apache-2.0

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::binder::Binder;
use crate::record::{Bind, FieldType, Incoming, Scalar};
use crate::shared::PullParser;
use crate::BindError;

pub type Map = BTreeMap<String, Value>;

/// A number too large for `i64`/`f64`, kept as its exact JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BigNumber(String);

impl BigNumber {
    pub fn new(text: impl Into<String>) -> Self {
        BigNumber(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parses the text into any `FromStr` type, such as `u128` or an
    /// arbitrary-precision type from another crate.
    pub fn parse<T: core::str::FromStr>(&self) -> Result<T, T::Err> {
        self.0.parse()
    }
}

impl core::fmt::Display for BigNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Bind for BigNumber {
    fn declared() -> FieldType {
        FieldType::BigNumber
    }

    fn construct() -> Result<Self, BindError> {
        Ok(BigNumber::default())
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        match value {
            Incoming::Scalar(Scalar::BigNumber(text)) => self.0 = text,
            Incoming::Scalar(Scalar::Integer(v)) => self.0 = v.to_string(),
            other => return binder.mismatch(FieldType::BigNumber, other),
        }
        Ok(true)
    }
}

/// Any JSON value, for slots declared without a specific type.
///
/// Built by the same binders as records, so object keys whose value is
/// `null` are left out and nested arrays inside an array are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    BigNumber(BigNumber),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Decimals as-is, integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Decimal(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => Value::String(s),
            Scalar::Integer(v) => Value::Integer(v),
            Scalar::Decimal(v) => Value::Decimal(v),
            Scalar::BigNumber(text) => Value::BigNumber(BigNumber(text)),
            Scalar::Bool(v) => Value::Bool(v),
        }
    }
}

impl Bind for Value {
    fn declared() -> FieldType {
        FieldType::Any
    }

    fn construct() -> Result<Self, BindError> {
        Ok(Value::Null)
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        *self = match value {
            Incoming::Scalar(scalar) => Value::from(scalar),
            Incoming::Null => Value::Null,
            Incoming::Object => {
                let mut map = Map::new();
                binder.bind_object(&mut map)?;
                Value::Object(map)
            }
            Incoming::Array => {
                let mut items = Vec::new();
                binder.bind_array(&mut items)?;
                Value::Array(items)
            }
        };
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_str;
    use test_log::test;

    #[test]
    fn test_value_document() {
        let value: Value = from_str(
            r#"{"name": "pico", "size": 3, "ratio": 0.5, "ok": true,
                "gone": null, "tags": ["a", null, ["dropped"], 1],
                "huge": 123456789012345678901234567890}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(value.get("name").and_then(Value::as_str), Some("pico"));
        assert_eq!(value.get("size").and_then(Value::as_i64), Some(3));
        assert_eq!(value.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(value.get("ok").and_then(Value::as_bool), Some(true));
        assert!(value.get("gone").is_none());
        assert_eq!(
            value.get("tags").and_then(Value::as_array),
            Some(
                &[
                    Value::String("a".into()),
                    Value::Null,
                    Value::Integer(1)
                ][..]
            )
        );
        assert_eq!(
            value.get("huge"),
            Some(&Value::BigNumber(BigNumber::new(
                "123456789012345678901234567890"
            )))
        );
    }

    #[test]
    fn test_accessors_on_wrong_variant() {
        assert_eq!(Value::Integer(1).as_str(), None);
        assert_eq!(Value::String("1".into()).as_i64(), None);
        assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
        assert!(Value::default().is_null());
        assert_eq!(Value::Null.get("x"), None);
    }

    #[test]
    fn test_big_number_parse() {
        let n = BigNumber::new("340282366920938463463374607431768211455");
        assert_eq!(n.parse::<u128>(), Ok(u128::MAX));
        assert!(n.parse::<u64>().is_err());
        assert_eq!(n.to_string(), n.as_str());
    }
}
