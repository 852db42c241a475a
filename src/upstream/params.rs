//! Outbound parameter lists for the upstream provider.

use std::fmt;

/// A scalar as sent on the wire; everything ends up a string eventually
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<&String> for Scalar {
    fn from(v: &String) -> Self {
        Scalar::Text(v.clone())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// Ordered upstream parameters.
///
/// Absent values, empty strings and empty lists are never sent. Setting a
/// scalar key twice keeps the last value; list values expand to one pair per
/// item under the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(self, key: &str, value: impl Into<Scalar>) -> Self {
        self.set_opt(key, Some(value))
    }

    pub fn set_opt<V: Into<Scalar>>(mut self, key: &str, value: Option<V>) -> Self {
        let Some(value) = value.map(Into::into) else {
            return self;
        };

        if matches!(&value, Scalar::Text(s) if s.is_empty()) {
            return self;
        }

        self.entries.retain(|(k, _)| k != key);
        self.entries.push((key.to_string(), ParamValue::One(value)));
        self
    }

    pub fn set_list<V: Into<Scalar>>(mut self, key: &str, values: Option<Vec<V>>) -> Self {
        let values: Vec<Scalar> = values
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        if values.is_empty() {
            return self;
        }

        self.entries.retain(|(k, _)| k != key);
        self.entries.push((key.to_string(), ParamValue::Many(values)));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened `(key, value)` pairs in insertion order, ready for encoding
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                ParamValue::One(v) => pairs.push((key.clone(), v.to_string())),
                ParamValue::Many(items) => {
                    pairs.extend(items.iter().map(|v| (key.clone(), v.to_string())))
                }
            }
        }
        pairs
    }

    /// Pairs safe for logging: session ids masked, api keys hidden
    pub fn sanitized(&self) -> Vec<(String, String)> {
        self.pairs()
            .into_iter()
            .map(|(key, value)| {
                let shown = match key.as_str() {
                    "session_id" => mask_value(&value),
                    "api_key" | "api-key" | "pass" => "***".to_string(),
                    _ => value,
                };
                (key, shown)
            })
            .collect()
    }
}

/// `abc***xyz`, or just `***` for short values
pub fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_and_empty_values() {
        let params = Params::new()
            .set("session_id", "abc")
            .set_opt("contact", None::<String>)
            .set("msg", "")
            .set_list::<i64>("opts_body[]", Some(vec![]))
            .set("page", 2i64);

        assert_eq!(
            params.pairs(),
            vec![
                ("session_id".to_string(), "abc".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn lists_expand_and_scalars_overwrite() {
        let params = Params::new()
            .set("sex", "man")
            .set_list("opts_body[]", Some(vec![3i64, 5]))
            .set("sex", "woman");

        assert_eq!(
            params.pairs(),
            vec![
                ("opts_body[]".to_string(), "3".to_string()),
                ("opts_body[]".to_string(), "5".to_string()),
                ("sex".to_string(), "woman".to_string()),
            ]
        );
    }

    #[test]
    fn masks_secrets_for_logs() {
        let params = Params::new()
            .set("session_id", "0123456789")
            .set("api_key", "secret")
            .set("api-key", "secret")
            .set("id", 9i64);

        let sanitized = params.sanitized();
        assert_eq!(sanitized[0].1, "012***789");
        assert_eq!(sanitized[1].1, "***");
        assert_eq!(sanitized[2].1, "***");
        assert_eq!(sanitized[3].1, "9");
    }

    #[test]
    fn short_values_fully_masked() {
        assert_eq!(mask_value("abcdef"), "***");
        assert_eq!(mask_value("abcdefg"), "abc***efg");
    }

    #[test]
    fn floats_render_like_numbers() {
        let params = Params::new().set("amount", 5.0f64).set("rating", 4.5f64);
        assert_eq!(params.pairs()[0].1, "5");
        assert_eq!(params.pairs()[1].1, "4.5");
    }
}
