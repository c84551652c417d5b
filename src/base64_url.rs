//! Helpers for base64 urlsafe encoded stuff

use core::{fmt, ops::Deref, str::FromStr};

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error type indicating that one part of a compact token
/// was an invalid Base64Url string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the string is not a valid Base64Url representation")]
pub struct NoBase64UrlString;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Encodes the given bytes as unpadded base64url.
#[inline]
pub fn encode(data: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(data.as_ref())
}

/// Decodes base64url text leniently.
///
/// Standard alphabet symbols (`+`, `/`) are accepted in place of their
/// urlsafe counterparts, padding may be present or absent, and trailing bits
/// that do not make up a whole byte are ignored.
///
/// # Errors
///
/// Returns [`NoBase64UrlString`] if the text contains characters outside of
/// both base64 alphabets.
pub fn decode(text: &str) -> Result<Vec<u8>, NoBase64UrlString> {
    let mut normalized: Vec<u8> = text
        .trim_end_matches('=')
        .bytes()
        .map(|b| match b {
            b'+' => b'-',
            b'/' => b'_',
            b => b,
        })
        .collect();

    // a single dangling symbol holds only six bits
    if normalized.len() % 4 == 1 {
        normalized.pop();
    }

    let mask = match normalized.len() % 4 {
        2 => 0b11_0000,
        3 => 0b11_1100,
        _ => 0b11_1111,
    };
    if let Some(last) = normalized.last_mut() {
        if let Some(index) = ALPHABET.iter().position(|c| c == last) {
            *last = ALPHABET[index & mask];
        }
    }

    Base64UrlUnpadded::decode_vec(core::str::from_utf8(&normalized).map_err(|_| NoBase64UrlString)?)
        .map_err(|_| NoBase64UrlString)
}

/// Decodes unpadded base64url text, accepting only its canonical form.
///
/// Every byte sequence has exactly one text this accepts, so two different
/// strings never decode to the same bytes.
///
/// # Errors
///
/// Returns [`NoBase64UrlString`] on padding, standard alphabet symbols, a
/// dangling symbol or set trailing bits.
pub fn decode_canonical(text: &str) -> Result<Vec<u8>, NoBase64UrlString> {
    Base64UrlUnpadded::decode_vec(text).map_err(|_| NoBase64UrlString)
}

/// A wrapper around a [`String`] that guarantees that the inner string only
/// uses the urlsafe base64 alphabet.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Default)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Base64UrlString(String);

impl<'de> Deserialize<'de> for Base64UrlString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Base64UrlString::from_str(&inner).map_err(D::Error::custom)
    }
}

impl fmt::Display for Base64UrlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Base64UrlString {
    type Err = NoBase64UrlString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.bytes().all(|b| ALPHABET.contains(&b)) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NoBase64UrlString)
        }
    }
}

impl Base64UrlString {
    /// Creates a new, empty Base64Url string.
    #[inline]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Encode the given bytes using Base64Url format.
    #[inline]
    pub fn encode(x: impl AsRef<[u8]>) -> Self {
        Base64UrlString(encode(x))
    }

    /// Decodes this Base64Url string into it's raw byte representation.
    ///
    /// # Errors
    ///
    /// Fails if the string carries a dangling symbol that [`decode`] cannot
    /// make sense of.
    #[inline]
    pub fn decode(&self) -> Result<Vec<u8>, NoBase64UrlString> {
        decode(&self.0)
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Base64UrlString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_urlsafe_alphabet_without_padding() {
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"hi"), "aGk");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn decode_tolerates_padding_and_standard_alphabet() {
        assert_eq!(decode("aGk").unwrap(), b"hi");
        assert_eq!(decode("aGk=").unwrap(), b"hi");
        assert_eq!(decode("-_8").unwrap(), [0xfb, 0xff]);
        assert_eq!(decode("+/8=").unwrap(), [0xfb, 0xff]);
    }

    #[test]
    fn decode_ignores_non_canonical_trailing_bits() {
        // `aGl` carries the same byte as `aGk` plus two set padding bits
        assert_eq!(decode("aGl").unwrap(), b"hi");
        assert_eq!(decode("YR").unwrap(), b"a");
    }

    #[test]
    fn decode_drops_dangling_symbol() {
        assert_eq!(decode("aGkhA").unwrap(), b"hi!");
        assert_eq!(decode("A").unwrap(), b"");
    }

    #[test]
    fn canonical_decoding_accepts_one_text_per_value() {
        assert_eq!(decode_canonical("aGk").unwrap(), b"hi");
        assert_eq!(decode_canonical("").unwrap(), b"");
        assert_eq!(decode_canonical("aGl"), Err(NoBase64UrlString));
        assert_eq!(decode_canonical("YR"), Err(NoBase64UrlString));
        assert_eq!(decode_canonical("aGkhA"), Err(NoBase64UrlString));
        assert_eq!(decode_canonical("aGk="), Err(NoBase64UrlString));
        assert_eq!(decode_canonical("+/8"), Err(NoBase64UrlString));
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        assert_eq!(decode("a*k"), Err(NoBase64UrlString));
        assert_eq!(decode("aG k"), Err(NoBase64UrlString));
    }

    #[test]
    fn string_wrapper_checks_alphabet() {
        assert!("abc-_".parse::<Base64UrlString>().is_ok());
        assert!("".parse::<Base64UrlString>().is_ok());
        assert!("ab+c".parse::<Base64UrlString>().is_err());
        assert_eq!(Base64UrlString::encode(b"hi").decode().unwrap(), b"hi");
    }
}
