//! The JOSE header of a compact token, as defined in [section 4 of RFC
//! 7515].
//!
//! [section 4 of RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515#section-4>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// An ordered set of header parameters.
///
/// Parameters keep their insertion order when serialized, so the encoded
/// header segment is exactly what the caller built. The header is
/// deserialized only from JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Map<String, Value>);

impl Header {
    /// Creates a header containing only the `alg` parameter.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self::default().with("alg", algorithm.into())
    }

    /// Adds a parameter, replacing any previous value with the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter and returns the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value of the given parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The `alg` parameter, if it is present and a non-empty string.
    pub fn algorithm(&self) -> Option<&str> {
        self.get("alg")
            .and_then(Value::as_str)
            .filter(|alg| !alg.is_empty())
    }

    /// The `typ` parameter, if it is present and a string.
    pub fn media_type(&self) -> Option<&str> {
        self.get("typ").and_then(Value::as_str)
    }

    /// Whether the header declares its payload to be a JSON Web Token.
    pub fn is_jwt(&self) -> bool {
        self.media_type() == Some("JWT")
    }

    /// The parameters of this header.
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Serializes the header to compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if a parameter value cannot be
    /// represented as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.0).map_err(Error::Serialize)
    }
}

impl From<Map<String, Value>> for Header {
    fn from(parameters: Map<String, Value>) -> Self {
        Self(parameters)
    }
}

impl From<Header> for Value {
    fn from(header: Header) -> Self {
        Value::Object(header.0)
    }
}

impl TryFrom<Value> for Header {
    type Error = Value;

    /// Fails with the given value if it is not a JSON object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(parameters) => Ok(Self(parameters)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let header = Header::new("HS256").with("typ", "JWT").with("kid", "a");
        assert_eq!(header.to_json().unwrap(), r#"{"alg":"HS256","typ":"JWT","kid":"a"}"#);
    }

    #[test]
    fn algorithm_must_be_non_empty_string() {
        assert_eq!(Header::new("RS256").algorithm(), Some("RS256"));
        assert_eq!(Header::new("").algorithm(), None);
        assert_eq!(Header::default().with("alg", 5).algorithm(), None);
        assert_eq!(Header::default().algorithm(), None);
    }

    #[test]
    fn jwt_media_type() {
        assert!(Header::new("none").with("typ", "JWT").is_jwt());
        assert!(!Header::new("none").with("typ", "jwt").is_jwt());
        assert!(!Header::new("none").is_jwt());
    }

    #[test]
    fn only_objects_convert() {
        assert!(Header::try_from(json!({"alg": "none"})).is_ok());
        assert_eq!(Header::try_from(json!([1])), Err(json!([1])));
        assert!(serde_json::from_str::<Header>("\"alg\"").is_err());
    }
}
