//! The error type shared by every operation of the engine.

use core::fmt;

use thiserror::Error;

use crate::{header::Header, registry::PrimitiveError};

/// The result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The segment of a compact token that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The first segment, carrying the JOSE header.
    Header,
    /// The second segment, carrying the payload.
    Payload,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Header => f.write_str("header"),
            Segment::Payload => f.write_str("payload"),
        }
    }
}

/// Everything that can go wrong while signing, verifying or decoding a
/// token.
///
/// Structural problems with untrusted input (a string that is not a token at
/// all) are usually reported as an absent result instead, see
/// [`Jws::decode`](crate::Jws::decode) and
/// [`Jws::verify`](crate::Jws::verify).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A string treated as a token carries no parseable header.
    #[error("no parseable header in token `{token}`")]
    MissingHeader {
        /// The offending token.
        token: String,
    },

    /// The header, or the verify call, lacks an algorithm identifier.
    #[error("missing algorithm")]
    MissingAlgorithm {
        /// The header that was inspected, if there was one.
        header: Option<Header>,
    },

    /// The identifier is not resolvable by the registry or the provider.
    #[error("\"{algorithm}\" is not a valid algorithm")]
    UnknownAlgorithm {
        /// The identifier that failed to resolve.
        algorithm: String,
    },

    /// The input does not have the three segment shape of a compact token.
    #[error("`{token}` is not a compact serialized token")]
    MalformedToken {
        /// The offending input.
        token: String,
    },

    /// The cryptographic primitive rejected its input.
    #[error("{algorithm} operation failed")]
    PrimitiveFailure {
        /// The algorithm whose primitive failed.
        algorithm: String,
        /// The error reported by the primitive.
        #[source]
        source: PrimitiveError,
    },

    /// A segment decoded from base64 but is not the JSON it must be.
    #[error("the {segment} segment is not valid JSON")]
    ParseFailure {
        /// Which segment failed.
        segment: Segment,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The payload cannot be represented in the requested text encoding.
    #[error("payload is not valid {encoding}: {reason}")]
    InvalidEncoding {
        /// The requested encoding.
        encoding: crate::payload::Encoding,
        /// What was wrong with the payload.
        reason: String,
    },

    /// The name does not denote a supported text encoding.
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    /// The header or payload could not be serialized to JSON.
    #[error("failed to serialize to JSON")]
    Serialize(#[source] serde_json::Error),

    /// A write hit a sink that was already closed.
    #[error("the sink is already closed")]
    SinkClosed,

    /// The pipeline was dropped before both of its sinks closed.
    #[error("the pipeline was abandoned before it completed")]
    PipelineAbandoned,
}

impl Error {
    pub(crate) fn primitive(
        algorithm: impl Into<String>,
        source: impl Into<PrimitiveError>,
    ) -> Self {
        Self::PrimitiveFailure {
            algorithm: algorithm.into(),
            source: source.into(),
        }
    }

    pub(crate) const fn parse(segment: Segment, source: serde_json::Error) -> Self {
        Self::ParseFailure { segment, source }
    }
}
