use std::{borrow::Cow, error::Error};

use serde_json::{Map, Value};

/// Structured key/value attached to a single log call.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Wraps an error as the `"error"` field.
pub fn error_field<E>(err: &E) -> Field
where
    E: Error + ?Sized,
{
    Field::new("error", err.to_string())
}

/// Renders fields as one JSON object; empty input renders as an empty string.
pub(crate) fn render(fields: &[Field]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let map: Map<String, Value> = fields
        .iter()
        .map(|f| (f.key.to_string(), f.value.clone()))
        .collect();
    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn error_field_uses_error_key_and_display() {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such table");
        let field = error_field(&err);
        assert_eq!(field.key(), "error");
        assert_eq!(field.value(), &Value::from("no such table"));
    }

    #[test]
    fn error_field_accepts_trait_objects() {
        let err: Box<dyn Error + Send + Sync> = "boom".into();
        assert_eq!(error_field(err.as_ref()).value(), &Value::from("boom"));
    }

    #[test]
    fn render_empty_is_blank() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn render_builds_json_object() {
        let out = render(&[
            Field::new("user", "bob"),
            Field::new("attempt", 3),
            Field::new("ok", false),
        ]);
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["user"], "bob");
        assert_eq!(parsed["attempt"], 3);
        assert_eq!(parsed["ok"], false);
    }
}
