use tracing::trace;

use crate::{format::Compact, Error, Header, Payload, Result};

/// How [`decode`] interprets the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Parse the payload as JSON even if the header doesn't declare
    /// `"typ": "JWT"`.
    pub json: bool,
}

impl DecodeOptions {
    /// Options that always parse the payload as JSON.
    pub const fn json() -> Self {
        Self { json: true }
    }
}

/// The parts of a decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// The header.
    pub header: Header,
    /// The payload, as JSON if that was requested or implied by the header.
    pub payload: Payload,
    /// The signature segment, verbatim.
    pub signature: String,
}

/// Decodes `token` without checking its signature.
///
/// Returns `Ok(None)` if `token` doesn't have the compact shape or its header
/// is not a JSON object. The payload is parsed as JSON if
/// `options.json` is set or the header has `"typ": "JWT"`; integers
/// beyond `±(2^53 - 1)` then become strings.
///
/// # Errors
///
/// Returns [`Error::ParseFailure`] if the payload has to be JSON but isn't.
pub fn decode(token: &str, options: &DecodeOptions) -> Result<Option<DecodedToken>> {
    let Some(compact) = Compact::parse(token) else {
        trace!("not a compact token");
        return Ok(None);
    };
    let Some(header) = compact.peek_header() else {
        trace!("token header is not a JSON object");
        return Ok(None);
    };

    let payload = compact.payload(options.json || header.is_jwt())?;

    Ok(Some(DecodedToken {
        header,
        payload,
        signature: compact.signature().to_owned(),
    }))
}

/// Whether `token` has the compact shape and a header that is a JSON
/// object. The signature is not checked.
pub fn is_valid(token: &str) -> bool {
    Compact::parse(token).is_some_and(|compact| compact.peek_header().is_some())
}

/// The `alg` parameter `token` claims for itself.
///
/// # Errors
///
/// Returns [`Error::MissingHeader`] if `token` has no parseable header and
/// [`Error::MissingAlgorithm`] if the header has no `alg`.
pub fn embedded_algorithm(token: &str) -> Result<String> {
    Compact::parse(token)
        .ok_or_else(|| Error::MissingHeader {
            token: token.to_owned(),
        })?
        .embedded_algorithm()
}
