//! Typed Value Module
//!
//! Arguments and results crossing the dispatch surface. The JSON shape is
//! adjacently tagged: `{"type": "uint", "value": 1}`, `{"type": "none"}`.

use crate::{
    error::LedgerError, Batch, BatchStep, Certifier, Ingredient, Principal, QualityTest,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    #[serde(rename = "uint")]
    UInt(u64),
    #[serde(rename = "bool")]
    Bool(bool),
    #[serde(rename = "string-utf8")]
    StringUtf8(String),
    #[serde(rename = "principal")]
    Principal(Principal),
    #[serde(rename = "list")]
    List(Vec<Value>),
    #[serde(rename = "tuple")]
    Tuple(BTreeMap<String, Value>),
    /// Successful outcome of a fallible mutation
    #[serde(rename = "ok")]
    OkResponse(Box<Value>),
    /// Domain failure carrying the error ordinal
    #[serde(rename = "err")]
    ErrResponse(Box<Value>),
    #[serde(rename = "some")]
    SomeValue(Box<Value>),
    #[serde(rename = "none")]
    NoneValue,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::StringUtf8(s.into())
    }

    pub fn ok(inner: Value) -> Self {
        Value::OkResponse(Box::new(inner))
    }

    pub fn err(error: LedgerError) -> Self {
        Value::ErrResponse(Box::new(Value::UInt(error.code())))
    }

    /// `some`/`none` wrapper used by lookups
    pub fn optional(inner: Option<Value>) -> Self {
        match inner {
            Some(v) => Value::SomeValue(Box::new(v)),
            None => Value::NoneValue,
        }
    }

    /// Maps a domain result onto `ok`/`err`
    pub fn response<T>(result: Result<T, LedgerError>, on_ok: impl FnOnce(T) -> Value) -> Self {
        match result {
            Ok(v) => Value::ok(on_ok(v)),
            Err(e) => Value::err(e),
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringUtf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_principal(&self) -> Option<&Principal> {
        match self {
            Value::Principal(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Error category of an `err` response, if this is one
    pub fn error_code(&self) -> Option<u64> {
        match self {
            Value::ErrResponse(inner) => inner.as_uint(),
            _ => None,
        }
    }
}

fn tuple<const N: usize>(fields: [(&str, Value); N]) -> Value {
    Value::Tuple(
        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

impl From<&Ingredient> for Value {
    fn from(i: &Ingredient) -> Self {
        tuple([
            ("name", Value::string(&i.name)),
            ("supplier", Value::string(&i.supplier)),
            ("origin", Value::string(&i.origin)),
            ("harvest-date", Value::UInt(i.harvest_date)),
            ("ingredient-type", Value::string(&i.ingredient_type)),
            ("registered-by", Value::Principal(i.registered_by.clone())),
        ])
    }
}

impl From<&Batch> for Value {
    fn from(b: &Batch) -> Self {
        tuple([
            ("name", Value::string(&b.name)),
            ("brewer", Value::Principal(b.brewer.clone())),
            ("created-at", Value::UInt(b.created_at)),
            (
                "ingredients",
                Value::List(b.ingredients.iter().copied().map(Value::UInt).collect()),
            ),
            ("status", Value::string(&b.status)),
        ])
    }
}

impl From<&BatchStep> for Value {
    fn from(s: &BatchStep) -> Self {
        tuple([
            ("step-name", Value::string(&s.step_name)),
            ("timestamp", Value::UInt(s.timestamp)),
            ("notes", Value::string(&s.notes)),
            ("recorded-by", Value::Principal(s.recorded_by.clone())),
        ])
    }
}

impl From<&QualityTest> for Value {
    fn from(t: &QualityTest) -> Self {
        tuple([
            ("batch-id", Value::UInt(t.batch_id)),
            ("test-type", Value::string(&t.test_type)),
            ("timestamp", Value::UInt(t.timestamp)),
            ("tester", Value::Principal(t.tester.clone())),
            ("results", Value::string(&t.results)),
            ("passed", Value::Bool(t.passed)),
        ])
    }
}

impl From<&Certifier> for Value {
    fn from(c: &Certifier) -> Self {
        tuple([
            ("name", Value::string(&c.name)),
            (
                "certification-types",
                Value::List(c.certification_types.iter().map(Value::string).collect()),
            ),
            ("active", Value::Bool(c.active)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        assert_eq!(
            serde_json::to_value(Value::ok(Value::UInt(1))).unwrap(),
            json!({ "type": "ok", "value": { "type": "uint", "value": 1 } })
        );
        assert_eq!(
            serde_json::to_value(Value::NoneValue).unwrap(),
            json!({ "type": "none" })
        );

        let parsed: Value = serde_json::from_value(json!({
            "type": "list",
            "value": [
                { "type": "string-utf8", "value": "organic" },
                { "type": "principal", "value": "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG" }
            ]
        }))
        .unwrap();
        assert_eq!(
            parsed,
            Value::List(vec![
                Value::string("organic"),
                Value::Principal(Principal::from("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG")),
            ])
        );
    }

    #[test]
    fn test_ingredient_tuple_uses_wire_field_names() {
        let ingredient = Ingredient {
            name: "Cascade Hops".to_string(),
            supplier: "Hop Farms Inc".to_string(),
            origin: "Yakima Valley, WA".to_string(),
            harvest_date: 20230915,
            ingredient_type: "hops".to_string(),
            registered_by: Principal::from("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"),
        };

        assert_eq!(
            serde_json::to_value(Value::from(&ingredient)).unwrap(),
            json!({
                "type": "tuple",
                "value": {
                    "name": { "type": "string-utf8", "value": "Cascade Hops" },
                    "supplier": { "type": "string-utf8", "value": "Hop Farms Inc" },
                    "origin": { "type": "string-utf8", "value": "Yakima Valley, WA" },
                    "harvest-date": { "type": "uint", "value": 20230915 },
                    "ingredient-type": { "type": "string-utf8", "value": "hops" },
                    "registered-by": {
                        "type": "principal",
                        "value": "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"
                    }
                }
            })
        );
    }

    #[test]
    fn test_err_response_carries_code() {
        let v = Value::err(LedgerError::TypeNotAllowed);
        assert_eq!(v.error_code(), Some(LedgerError::TypeNotAllowed.code()));
        assert_eq!(Value::ok(Value::Bool(true)).error_code(), None);
    }
}
