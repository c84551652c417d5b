//! A JSON Web Signature engine for the compact serialization.
//!
//! Tokens have the shape `base64url(header).base64url(payload).signature`.
//! The [`Jws`] engine signs payloads into such tokens, verifies them against
//! the algorithm the caller expects, and decodes them without verification.
//! Algorithms are looked up in an [`AlgorithmRegistry`], which ships with
//! `HS256`/`HS384`/`HS512`, `RS256`/`RS384`/`RS512`, `ES256`/`ES384`/`ES512`
//! and `none`, and can be extended or overridden per call with a
//! [`ProviderOverride`].
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> jws::Result<()> {
//! use jws::{DecodeOptions, Header, Jws, Key, SignOptions};
//! use serde_json::json;
//!
//! let jws = Jws::default();
//! let header = Header::new("HS256").with("typ", "JWT");
//! let token = jws
//!     .sign(SignOptions::new(header, json!({"sub": "1234"}), "secret"))
//!     .await?;
//!
//! assert!(jws.verify(token.as_str(), Some("HS256"), &Key::from("secret")).await?);
//! assert!(!jws.verify(token.as_str(), Some("HS512"), &Key::from("secret")).await?);
//!
//! let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
//! assert_eq!(decoded.payload.as_json(), Some(&json!({"sub": "1234"})));
//! # Ok(())
//! # }
//! ```
//!
//! Payloads and keys that arrive in pieces can be fed through the pipelines
//! of the [`stream`] module.
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod header;
mod key;

pub mod base64_url;
pub mod crypto;
pub mod format;
pub mod json;
pub mod jwa;
pub mod jws;
pub mod payload;
pub mod registry;
pub mod stream;

pub use self::{
    error::{Error, Result, Segment},
    format::{Compact, SecuredInput, Token},
    header::Header,
    jws::{
        decode, embedded_algorithm, is_valid, DecodeOptions, DecodedToken, Jws, SignOptions,
        VerifyOptions,
    },
    key::Key,
    payload::{Encoding, Payload},
    registry::{
        AlgorithmBinding, AlgorithmProvider, AlgorithmRegistry, PrimitiveError, ProviderOverride,
        RegistryBuilder, Signer, Verifier,
    },
};
