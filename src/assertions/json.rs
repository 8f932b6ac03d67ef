//! JSON body assertions
//!
//! Wraps a parsed response body and exposes the presence and shape checks
//! used by the read scenarios.

use serde_json::Value;
use thiserror::Error;

/// Assertion failures on a response body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Missing field '{0}'")]
    MissingField(String),

    #[error("Field '{0}' is not an array")]
    NotAnArray(String),

    #[error("Array '{0}' is empty")]
    EmptyArray(String),

    #[error("Expected a JSON object")]
    NotAnObject,
}

/// A parsed JSON response body
#[derive(Clone, Debug)]
pub struct JsonBody {
    root: Value,
}

impl JsonBody {
    /// Parse response text into a navigable tree
    pub fn parse(text: &str) -> Result<Self, AssertionError> {
        serde_json::from_str(text)
            .map(|root| Self { root })
            .map_err(|e| AssertionError::MalformedJson(e.to_string()))
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Field `name` of the root object
    pub fn require_field(&self, name: &str) -> Result<&Value, AssertionError> {
        if !self.root.is_object() {
            return Err(AssertionError::NotAnObject);
        }
        self.root
            .get(name)
            .ok_or_else(|| AssertionError::MissingField(name.to_string()))
    }

    /// Every one of `names` must be present on the root object
    pub fn require_fields(&self, names: &[&str]) -> Result<(), AssertionError> {
        names
            .iter()
            .try_for_each(|name| self.require_field(name).map(|_| ()))
    }

    /// Field `name` must be an array
    pub fn require_array(&self, name: &str) -> Result<&Vec<Value>, AssertionError> {
        self.require_field(name)?
            .as_array()
            .ok_or_else(|| AssertionError::NotAnArray(name.to_string()))
    }

    /// Field `name` must be an array with at least one element
    pub fn require_non_empty_array(&self, name: &str) -> Result<&Vec<Value>, AssertionError> {
        let items = self.require_array(name)?;
        if items.is_empty() {
            return Err(AssertionError::EmptyArray(name.to_string()));
        }
        Ok(items)
    }

    /// First element of the non-empty array `name`
    pub fn first_element(&self, name: &str) -> Result<JsonBody, AssertionError> {
        let items = self.require_non_empty_array(name)?;
        Ok(JsonBody::from_value(items[0].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_FIELDS: &[&str] = &["age", "gender", "id", "role", "screenName"];

    #[test]
    fn test_malformed_json() {
        let err = JsonBody::parse("{\"players\": [").unwrap_err();
        assert!(matches!(err, AssertionError::MalformedJson(_)));
    }

    #[test]
    fn test_field_presence() {
        let body = JsonBody::parse(
            r#"{"age":1,"gender":"m","id":1,"role":"user","screenName":"x"}"#,
        )
        .unwrap();

        assert!(body.require_fields(PLAYER_FIELDS).is_ok());
        assert_eq!(
            body.require_field("login").unwrap_err(),
            AssertionError::MissingField("login".to_string())
        );
    }

    #[test]
    fn test_players_array() {
        let body = JsonBody::parse(
            r#"{"players":[{"age":1,"gender":"m","id":1,"role":"user","screenName":"x"}]}"#,
        )
        .unwrap();

        let first = body.first_element("players").unwrap();
        assert!(first.require_fields(PLAYER_FIELDS).is_ok());
    }

    #[test]
    fn test_empty_players_array() {
        let body = JsonBody::parse(r#"{"players":[]}"#).unwrap();
        assert!(body.require_array("players").is_ok());
        assert_eq!(
            body.require_non_empty_array("players").unwrap_err(),
            AssertionError::EmptyArray("players".to_string())
        );
    }

    #[test]
    fn test_not_an_array() {
        let body = JsonBody::parse(r#"{"players":{"id":1}}"#).unwrap();
        assert_eq!(
            body.require_array("players").unwrap_err(),
            AssertionError::NotAnArray("players".to_string())
        );
    }

    #[test]
    fn test_root_not_object() {
        let body = JsonBody::parse("[1,2,3]").unwrap();
        assert_eq!(
            body.require_field("players").unwrap_err(),
            AssertionError::NotAnObject
        );
    }
}
