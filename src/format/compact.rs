use core::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;

use super::SecuredInput;
use crate::{
    base64_url::Base64UrlString, json, Error, Header, Payload, Result, Segment,
};

static SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$").expect("valid regex pattern")
});

/// The three segments of a token that passed the shape check:
/// two non-empty base64url segments and a possibly empty signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compact {
    header: Base64UrlString,
    payload: Base64UrlString,
    signature: Base64UrlString,
}

impl Compact {
    /// Splits `token` into its segments.
    ///
    /// Returns `None` if `token` doesn't look like a compact token. This is
    /// not an error, since probing arbitrary strings is what it's for.
    pub fn parse(token: &str) -> Option<Self> {
        if !SHAPE.is_match(token) {
            return None;
        }

        let mut parts = token.splitn(3, '.').map(Base64UrlString::from_str);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(header)), Some(Ok(payload)), Some(Ok(signature))) => Some(Self {
                header,
                payload,
                signature,
            }),
            _ => None,
        }
    }

    fn decode_segment(segment: &Base64UrlString) -> Vec<u8> {
        // the shape check leaves only urlsafe symbols, which always decode
        segment.decode().unwrap_or_default()
    }

    fn header_text(&self) -> String {
        String::from_utf8_lossy(&Self::decode_segment(&self.header)).into_owned()
    }

    /// Decodes and parses the header segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] if the segment is not a JSON object.
    pub fn header(&self) -> Result<Header> {
        serde_json::from_str(&self.header_text()).map_err(|e| Error::parse(Segment::Header, e))
    }

    /// Decodes and parses the header segment, returning `None` if it is not
    /// a JSON object.
    pub fn peek_header(&self) -> Option<Header> {
        json::parse(&self.header_text()).and_then(|value| Header::try_from(value).ok())
    }

    /// Decodes the payload segment.
    ///
    /// With `json` set, the payload is parsed as JSON, keeping integers
    /// beyond the safe range as strings. Otherwise it is returned as
    /// [`Payload::Text`], or [`Payload::Bytes`] if it is not UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] if `json` is set and the payload is
    /// not valid JSON.
    pub fn payload(&self, json: bool) -> Result<Payload> {
        let bytes = Self::decode_segment(&self.payload);

        if json {
            let text = String::from_utf8_lossy(&bytes);
            json::parse_preserving_big_integers(&text)
                .map(Payload::Json)
                .map_err(|e| Error::parse(Segment::Payload, e))
        } else {
            Ok(Payload::from_decoded(bytes))
        }
    }

    /// The signature segment, verbatim. Empty for unsigned tokens.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The first two segments joined by a dot, exactly as they were signed.
    pub fn secured_input(&self) -> SecuredInput {
        SecuredInput::from_segments(&self.header, &self.payload)
    }

    /// The `alg` parameter the token claims for itself.
    ///
    /// This is informational only. Verification always uses the algorithm
    /// the caller expects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHeader`] if the header is not a JSON object,
    /// and [`Error::MissingAlgorithm`] if it has no `alg`.
    pub fn embedded_algorithm(&self) -> Result<String> {
        let header = self.peek_header().ok_or_else(|| Error::MissingHeader {
            token: self.to_string(),
        })?;

        match header.algorithm() {
            Some(alg) => Ok(alg.to_owned()),
            None => Err(Error::MissingAlgorithm {
                header: Some(header),
            }),
        }
    }
}

impl FromStr for Compact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::MalformedToken {
            token: s.to_owned(),
        })
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.header, self.payload, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const CUSTOM: &str = "eyJhbGciOiJDVVNUT00ifQ.aGk.SIGNED";

    #[test]
    fn shape_check() {
        assert!(Compact::parse(CUSTOM).is_some());
        assert!(Compact::parse("eyJhbGciOiJub25lIn0.aGk.").is_some());
        assert!(Compact::parse("not.a.token!!").is_none());
        assert!(Compact::parse("plainstring").is_none());
        assert!(Compact::parse("").is_none());
        assert!(Compact::parse("a..c").is_none());
        assert!(Compact::parse("a.b.c.d").is_none());
        assert!(Compact::parse("a.b").is_none());
    }

    #[test]
    fn segments() {
        let compact = Compact::parse(CUSTOM).unwrap();

        assert_eq!(compact.header().unwrap(), Header::new("CUSTOM"));
        assert_eq!(compact.payload(false).unwrap(), Payload::from("hi"));
        assert_eq!(compact.signature(), "SIGNED");
        assert_eq!(compact.secured_input().as_str(), "eyJhbGciOiJDVVNUT00ifQ.aGk");
        assert_eq!(compact.to_string(), CUSTOM);
    }

    #[test]
    fn header_that_is_not_json() {
        // "hi" is base64url `aGk`
        let compact = Compact::parse("aGk.aGk.").unwrap();

        assert!(matches!(
            compact.header(),
            Err(Error::ParseFailure { segment: Segment::Header, .. })
        ));
        assert_eq!(compact.peek_header(), None);
        assert!(matches!(compact.embedded_algorithm(), Err(Error::MissingHeader { .. })));
    }

    #[test]
    fn header_that_is_not_an_object() {
        // `[1]`
        let compact = Compact::parse("WzFd.aGk.").unwrap();
        assert!(compact.header().is_err());
        assert_eq!(compact.peek_header(), None);
    }

    #[test]
    fn payload_as_json() {
        // {"n":9007199254740993}
        let compact = Compact::parse("e30.eyJuIjo5MDA3MTk5MjU0NzQwOTkzfQ.").unwrap();
        assert_eq!(
            compact.payload(true).unwrap(),
            Payload::Json(json!({"n": "9007199254740993"}))
        );

        let compact = Compact::parse(CUSTOM).unwrap();
        assert!(matches!(
            compact.payload(true),
            Err(Error::ParseFailure { segment: Segment::Payload, .. })
        ));
    }

    #[test]
    fn embedded_algorithm() {
        assert_eq!(Compact::parse(CUSTOM).unwrap().embedded_algorithm().unwrap(), "CUSTOM");

        // {}
        let compact = Compact::parse("e30.aGk.").unwrap();
        assert!(matches!(
            compact.embedded_algorithm(),
            Err(Error::MissingAlgorithm { header: Some(_) })
        ));
    }

    #[test]
    fn from_str_reports_malformed_tokens() {
        assert!(matches!(
            "nope".parse::<Compact>(),
            Err(Error::MalformedToken { token }) if token == "nope"
        ));
    }
}
