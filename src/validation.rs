//! Request body checks.
//!
//! `BodyCheck` walks a JSON body field by field and collects every problem
//! before failing, so the browser gets the full list of `fields` in one
//! `VALIDATION_ERROR` response.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, FieldError};
use crate::session::parse_leading_int;

pub const REQUIRED: &str = "Required";

pub struct BodyCheck<'a> {
    body: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'a> BodyCheck<'a> {
    pub fn new(body: &'a Value) -> Self {
        match body.as_object() {
            Some(map) => Self { body: Some(map), errors: Vec::new() },
            None => Self {
                body: None,
                errors: vec![FieldError::new("body", "body must be an object")],
            },
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.body?.get(field).filter(|v| !v.is_null())
    }

    fn fail<T>(&mut self, field: &str, message: impl Into<String>) -> Option<T> {
        // A non-object body already carries its single error
        if self.body.is_some() {
            self.errors.push(FieldError::new(field, message));
        }
        None
    }

    fn string_value(&mut self, field: &str) -> Option<Option<&'a str>> {
        match self.get(field) {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s.as_str())),
            Some(other) => self.fail(field, format!("Expected string, received {}", type_name(other))),
        }
    }

    /// Required string; `trim` strips whitespace before the emptiness check and in the result
    pub fn required_string(&mut self, field: &str, trim: bool, empty_message: &str) -> Option<String> {
        let raw = match self.string_value(field)? {
            Some(raw) => raw,
            None => return self.fail(field, REQUIRED),
        };

        let value = if trim { raw.trim() } else { raw };
        if value.is_empty() {
            return self.fail(field, empty_message);
        }
        Some(value.to_string())
    }

    /// Optional string that must not be blank when present
    pub fn optional_nonblank(&mut self, field: &str, blank_message: &str) -> Option<String> {
        let raw = self.string_value(field)??;
        let value = raw.trim();
        if value.is_empty() {
            return self.fail(field, blank_message);
        }
        Some(value.to_string())
    }

    /// Optional string where blank counts as absent
    pub fn optional_trimmed(&mut self, field: &str) -> Option<String> {
        let raw = self.string_value(field)??;
        let value = raw.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.get(field)? {
            Value::Bool(b) => Some(*b),
            other => self.fail(field, format!("Expected boolean, received {}", type_name(other))),
        }
    }

    fn number_value(&mut self, field: &str) -> Option<f64> {
        match self.get(field) {
            None => self.fail(field, REQUIRED),
            Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
            Some(other) => self.fail(field, format!("Expected number, received {}", type_name(other))),
        }
    }

    /// JSON number that is a whole number of at least one
    pub fn positive_int(&mut self, field: &str, message: &str) -> Option<i64> {
        let n = self.number_value(field)?;
        if n.fract() == 0.0 && n >= 1.0 && n <= i64::MAX as f64 {
            Some(n as i64)
        } else {
            self.fail(field, message)
        }
    }

    /// Required JSON number strictly greater than zero
    pub fn positive_number(&mut self, field: &str, message: &str) -> Option<f64> {
        let n = self.number_value(field)?;
        if n.is_finite() && n > 0.0 {
            Some(n)
        } else {
            self.fail(field, message)
        }
    }

    /// Required string drawn from a closed set of values
    pub fn one_of<T>(&mut self, field: &str, allowed: &[&str], parse: fn(&str) -> Option<T>) -> Option<T> {
        let raw = match self.string_value(field)? {
            Some(raw) => raw,
            None => return self.fail(field, REQUIRED),
        };

        match parse(raw) {
            Some(parsed) => Some(parsed),
            None => {
                let expected = allowed
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.fail(field, format!("Invalid enum value. Expected {expected}, received '{raw}'"))
            }
        }
    }

    /// Record a cross-field problem found by the caller
    pub fn reject(&mut self, field: &str, message: &str) {
        let _: Option<()> = self.fail(field, message);
    }

    pub fn raw(&self, field: &str) -> Option<&'a Value> {
        self.get(field)
    }

    pub fn finish(self, message: &str) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_fields(message, self.errors))
        }
    }
}

/// Query-string extractor; a repeated key keeps its first value and an
/// unreadable query is a VALIDATION_ERROR rather than a plain-text 400
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        first_values(parts.uri.query().unwrap_or_default()).map(QueryParams)
    }
}

pub fn first_values<T: DeserializeOwned>(query: &str) -> Result<T, ApiError> {
    let mut map = Map::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        map.entry(key.into_owned())
            .or_insert_with(|| Value::String(value.into_owned()));
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| {
        tracing::warn!(error = %e, "unreadable query string");
        ApiError::validation_error("Invalid query string")
    })
}

/// Optional positive integer from the query string, read with leading-integer
/// semantics ("3abc" is 3). Only an empty value counts as absent.
pub fn query_positive_int(
    value: Option<&str>,
    field: &str,
    field_message: &str,
    message: &str,
) -> Result<Option<i64>, ApiError> {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    match parse_leading_int(raw) {
        Some(n) if n >= 1 => Ok(Some(n)),
        _ => Err(ApiError::validation_fields(message, vec![FieldError::new(field, field_message)])),
    }
}

/// Numbers or numeric strings; anything else is absent
pub fn loose_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Pragmatic address check: one `@`, a non-empty local part and a dotted domain
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(head, tail)| !head.is_empty() && !tail.is_empty() && !tail.ends_with('.'))
            .unwrap_or(false)
        && !domain.contains("..")
}
