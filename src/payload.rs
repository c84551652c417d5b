//! Payloads and the text encodings applied to them before signing.

use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{base64_url, Error, Result};

/// The text encoding used to turn a textual payload into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Encoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// One byte per character, keeping the low eight bits of each code
    /// point. Also known as `binary`.
    Latin1,
    /// Seven bit ASCII. Any other character is rejected.
    Ascii,
    /// UTF-16, little endian. Also known as `ucs2`.
    Utf16Le,
    /// The text is a hexadecimal representation of the bytes.
    Hex,
    /// The text is a base64 (or base64url) representation of the bytes.
    Base64,
}

impl Encoding {
    const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Utf16Le => "utf16le",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }

    /// Converts `text` into bytes using this encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if `text` cannot be represented
    /// in, or is not a valid representation for, this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        let invalid = |reason: &str| Error::InvalidEncoding {
            encoding: self,
            reason: reason.to_owned(),
        };

        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => Ok(text.chars().map(|c| (u32::from(c) & 0xff) as u8).collect()),
            Encoding::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => Err(invalid("contains non ASCII characters")),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Hex => hex::decode(text).map_err(|e| invalid(&e.to_string())),
            Encoding::Base64 => base64_url::decode(text).map_err(|e| invalid(&e.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Encoding::Utf8,
            "latin1" | "binary" => Encoding::Latin1,
            "ascii" => Encoding::Ascii,
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Encoding::Utf16Le,
            "hex" => Encoding::Hex,
            "base64" | "base64url" => Encoding::Base64,
            _ => return Err(Error::UnknownEncoding(s.to_owned())),
        })
    }
}

impl Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = <std::borrow::Cow<'_, str> as Deserialize>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// The content signed by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text, turned into bytes with the chosen [`Encoding`].
    Text(String),
    /// A JSON value.
    ///
    /// Strings and numbers are signed as their plain text, everything else
    /// as compact JSON text.
    Json(Value),
    /// Raw bytes, signed as they are.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Converts this payload into the bytes that get base64url encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the text form of the payload is
    /// not valid for `encoding`, or [`Error::Serialize`] if a JSON value
    /// cannot be serialized.
    pub fn to_bytes(&self, encoding: Encoding) -> Result<Vec<u8>> {
        match self {
            Payload::Text(text) => encoding.encode(text),
            Payload::Json(Value::String(text)) => encoding.encode(text),
            Payload::Json(Value::Number(number)) => encoding.encode(&number.to_string()),
            Payload::Json(value) => {
                encoding.encode(&serde_json::to_string(value).map_err(Error::Serialize)?)
            }
            Payload::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Interprets decoded bytes as text if they are valid UTF-8.
    pub(crate) fn from_decoded(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Payload::Text(text),
            Err(e) => Payload::Bytes(e.into_bytes()),
        }
    }

    /// The payload as text, if it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The payload as JSON, if it was interpreted as such.
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}
