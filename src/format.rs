//! The building blocks of the compact serialization.
//!
//! A [`Token`] is a [`SecuredInput`] followed by a dot and the signature. A
//! [`Compact`] is the parsed, shape checked view of a token.

mod compact;

use core::fmt;

pub use self::compact::Compact;
use crate::{base64_url, payload::Encoding, Header, Payload, Result};

/// The text a signature is computed over:
/// `base64url(header) "." base64url(payload)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecuredInput(String);

impl SecuredInput {
    /// Encodes `header` and `payload` into a secured input.
    ///
    /// The header is serialized as compact JSON, the payload is converted
    /// into bytes with [`Payload::to_bytes`] using `encoding`.
    ///
    /// # Errors
    ///
    /// Fails if the header can't be serialized, or the payload is not valid
    /// for `encoding`.
    pub fn new(header: &Header, payload: &Payload, encoding: Encoding) -> Result<Self> {
        let header = base64_url::encode(header.to_json()?);
        let payload = base64_url::encode(payload.to_bytes(encoding)?);

        Ok(Self::from_segments(&header, &payload))
    }

    /// Joins two already encoded segments.
    pub(crate) fn from_segments(header: &str, payload: &str) -> Self {
        let mut input = String::with_capacity(header.len() + payload.len() + 1);
        input.push_str(header);
        input.push('.');
        input.push_str(payload);
        Self(input)
    }

    /// The secured input as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecuredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecuredInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A compact serialized token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Appends `signature` to `input`.
    pub fn assemble(input: SecuredInput, signature: &str) -> Self {
        let mut token = input.0;
        token.reserve(signature.len() + 1);
        token.push('.');
        token.push_str(signature);
        Self(token)
    }

    /// The token as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
