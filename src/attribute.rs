//! Attribute containers for resource fields.
//!
//! Every declared field of a resource is wrapped in an [`Attribute`]. Fields
//! start out [`Attribute::NotFetched`] and are overwritten one by one as JSON
//! attribute maps are applied to the owning object.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{GithubError, Result};

/// A single resource field.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<T> {
    /// No value has been received for this field yet.
    NotFetched,
    /// The field holds a value.
    Value(T),
    /// The server sent a value that could not be mapped to the field type.
    Bad {
        /// The raw value as received.
        value: Value,
        /// Human readable name of the expected type.
        expected: &'static str,
    },
}

impl<T> Default for Attribute<T> {
    fn default() -> Self {
        Attribute::NotFetched
    }
}

impl<T> Attribute<T> {
    /// A field with no value yet.
    #[must_use]
    pub const fn not_fetched() -> Self {
        Attribute::NotFetched
    }

    /// A field holding `raw`.
    #[must_use]
    pub const fn value(raw: T) -> Self {
        Attribute::Value(raw)
    }

    /// Returns true if no value has been received yet.
    pub const fn is_not_fetched(&self) -> bool {
        matches!(self, Attribute::NotFetched)
    }

    /// Peek at the value without failing.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Attribute::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Read the value.
    ///
    /// `resource` and `field` only label the error.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::NotPopulated`] when nothing has been assigned,
    /// and [`GithubError::BadAttribute`] when the server sent a value of the
    /// wrong shape.
    pub fn get(&self, resource: &'static str, field: &'static str) -> Result<&T> {
        match self {
            Attribute::Value(v) => Ok(v),
            Attribute::NotFetched => Err(GithubError::NotPopulated { resource, field }),
            Attribute::Bad { value, expected } => Err(GithubError::BadAttribute {
                resource,
                field,
                expected,
                value: value.clone(),
            }),
        }
    }

    /// Mutable variant of [`Attribute::get`].
    ///
    /// # Errors
    ///
    /// Same as [`Attribute::get`].
    pub fn get_mut(&mut self, resource: &'static str, field: &'static str) -> Result<&mut T> {
        match self {
            Attribute::Value(v) => Ok(v),
            Attribute::NotFetched => Err(GithubError::NotPopulated { resource, field }),
            Attribute::Bad { value, expected } => Err(GithubError::BadAttribute {
                resource,
                field,
                expected,
                value: value.clone(),
            }),
        }
    }

    /// Overwrite this field with `f(value)` if `key` is present in `attributes`.
    ///
    /// Absent keys leave the field untouched.
    pub fn assign_with<F>(&mut self, attributes: &Map<String, Value>, key: &str, f: F)
    where
        F: FnOnce(&Value) -> Attribute<T>,
    {
        if let Some(value) = attributes.get(key) {
            *self = f(value);
        }
    }
}

impl<T: DeserializeOwned> Attribute<T> {
    /// Map a raw JSON value into a field, recording mismatches as
    /// [`Attribute::Bad`] instead of failing.
    pub fn from_json(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(v) => Attribute::Value(v),
            Err(_) => Attribute::Bad {
                value: value.clone(),
                expected: std::any::type_name::<T>(),
            },
        }
    }

    /// Overwrite this field from `attributes[key]` if the key is present.
    pub fn assign(&mut self, attributes: &Map<String, Value>, key: &str) {
        self.assign_with(attributes, key, Attribute::from_json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_not_fetched_get_fails() {
        let attr: Attribute<String> = Attribute::not_fetched();
        let err = attr.get("Issue", "title").unwrap_err();
        assert!(matches!(
            err,
            GithubError::NotPopulated {
                resource: "Issue",
                field: "title"
            }
        ));
    }

    #[test]
    fn test_value_get() {
        let attr = Attribute::value(42u64);
        assert_eq!(*attr.get("Issue", "number").unwrap(), 42);
        assert_eq!(attr.as_value(), Some(&42));
        assert!(!attr.is_not_fetched());
    }

    #[test]
    fn test_assign_only_touches_present_keys() {
        let mut title: Attribute<String> = Attribute::value("old".to_string());
        let mut body: Attribute<Option<String>> = Attribute::not_fetched();

        let attributes = attrs(json!({"body": null}));
        title.assign(&attributes, "title");
        body.assign(&attributes, "body");

        assert_eq!(title.as_value().map(String::as_str), Some("old"));
        assert_eq!(body.as_value(), Some(&None));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut number: Attribute<u64> = Attribute::not_fetched();
        let attributes = attrs(json!({"number": 7}));
        number.assign(&attributes, "number");
        number.assign(&attributes, "number");
        assert_eq!(number, Attribute::Value(7));
    }

    #[test]
    fn test_mismatched_type_becomes_bad() {
        let mut number: Attribute<u64> = Attribute::not_fetched();
        number.assign(&attrs(json!({"number": "seven"})), "number");

        let err = number.get("Issue", "number").unwrap_err();
        match err {
            GithubError::BadAttribute { value, field, .. } => {
                assert_eq!(value, json!("seven"));
                assert_eq!(field, "number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_datetime_mapping() {
        let mut created: Attribute<DateTime<Utc>> = Attribute::not_fetched();
        created.assign(&attrs(json!({"created_at": "2024-01-25T10:01:18Z"})), "created_at");
        assert_eq!(
            created.as_value(),
            Some(&Utc.with_ymd_and_hms(2024, 1, 25, 10, 1, 18).unwrap())
        );
    }
}
