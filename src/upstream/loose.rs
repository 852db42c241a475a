//! Loosely-typed upstream scalars.
//!
//! The provider is inconsistent about types: ids, counters and flags arrive as
//! numbers on one endpoint and as numeric strings on the next, text fields are
//! often blank. `LooseValue` accepts any of them and the accessors coerce on
//! read, so a surprising shape degrades to "absent" instead of a failed parse.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
    Other(Value),
}

/// `Number()` semantics on a trimmed string: finite decimal only
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

impl LooseValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            LooseValue::Number(n) => n.as_f64().filter(|n| n.is_finite()),
            LooseValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        let n = self.as_number()?;
        if n.fract() != 0.0 || n.abs() > i64::MAX as f64 {
            return None;
        }
        Some(n as i64)
    }

    pub fn as_positive_integer(&self) -> Option<i64> {
        self.as_integer().filter(|n| *n >= 1)
    }

    pub fn as_non_negative_integer(&self) -> Option<i64> {
        self.as_integer().filter(|n| *n >= 0)
    }

    /// Trimmed non-empty text; integral numbers render without a fraction (`9.0` is "9")
    pub fn as_text(&self) -> Option<String> {
        match self {
            LooseValue::Text(s) => normalize_text(Some(s)),
            LooseValue::Number(n) => Some(render_number(n)),
            _ => None,
        }
    }

    /// The provider's success flag: exactly `1` or `"1"`
    pub fn is_flag_set(&self) -> bool {
        match self {
            LooseValue::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
            LooseValue::Text(s) => s == "1",
            _ => false,
        }
    }
}

/// Helpers over `Option<LooseValue>` so mapping code reads field-by-field
pub trait LooseField {
    fn number(&self) -> Option<f64>;
    fn integer(&self) -> Option<i64>;
    fn positive_integer(&self) -> Option<i64>;
    fn non_negative_integer(&self) -> Option<i64>;
    fn text(&self) -> Option<String>;
    fn flag(&self) -> bool;
}

impl LooseField for Option<LooseValue> {
    fn number(&self) -> Option<f64> {
        self.as_ref().and_then(LooseValue::as_number)
    }

    fn integer(&self) -> Option<i64> {
        self.as_ref().and_then(LooseValue::as_integer)
    }

    fn positive_integer(&self) -> Option<i64> {
        self.as_ref().and_then(LooseValue::as_positive_integer)
    }

    fn non_negative_integer(&self) -> Option<i64> {
        self.as_ref().and_then(LooseValue::as_non_negative_integer)
    }

    fn text(&self) -> Option<String> {
        self.as_ref().and_then(LooseValue::as_text)
    }

    fn flag(&self) -> bool {
        self.as_ref().map(LooseValue::is_flag_set).unwrap_or(false)
    }
}

pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Member gender code used across the provider: 1 man, 2 woman, 3 couple
pub fn gender_from_code(value: &Option<LooseValue>) -> Option<crate::models::MemberGender> {
    use crate::models::MemberGender;
    match value.integer()? {
        1 => Some(MemberGender::Man),
        2 => Some(MemberGender::Woman),
        3 => Some(MemberGender::Couple),
        _ => None,
    }
}

/// List field where a non-array counts as empty and unreadable entries are skipped
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Object field where anything but an object (`false`, `[]`, `""`) counts as absent
pub fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
