//! Implementation of the JSON Web Signature (JWS) compact serialization as
//! defined in [RFC 7515]
//!
//! [RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515>

mod decode;
mod sign;
mod verify;

use std::sync::Arc;

pub use self::{
    decode::{decode, embedded_algorithm, is_valid, DecodeOptions, DecodedToken},
    sign::SignOptions,
    verify::VerifyOptions,
};
use crate::{
    registry::{AlgorithmBinding, AlgorithmRegistry, ProviderOverride},
    Result,
};

/// The signing engine.
///
/// Holds the [`AlgorithmRegistry`] used to resolve algorithm identifiers,
/// and optionally a [`ProviderOverride`] asked before it. Cloning is cheap,
/// the registry is shared.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> jws::Result<()> {
/// use jws::{Jws, Key, SignOptions};
///
/// let jws = Jws::default();
/// let token = jws.sign(SignOptions::with_secret("hello", "secret")).await?;
///
/// assert!(jws.verify(token.as_str(), Some("HS256"), &Key::from("secret")).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Jws {
    registry: Arc<AlgorithmRegistry>,
    provider: Option<ProviderOverride>,
}

impl Default for Jws {
    fn default() -> Self {
        Self::new(Arc::new(AlgorithmRegistry::with_builtins()))
    }
}

impl Jws {
    /// Creates an engine resolving algorithms through `registry`.
    pub const fn new(registry: Arc<AlgorithmRegistry>) -> Self {
        Self {
            registry,
            provider: None,
        }
    }

    /// Sets a provider that is asked before the registry for every
    /// operation that doesn't bring its own.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderOverride) -> Self {
        self.provider = Some(provider);
        self
    }

    /// The registry of this engine.
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Resolves `algorithm`, preferring the per call provider over the
    /// engine wide one.
    fn resolve(
        &self,
        algorithm: &str,
        provider: Option<&ProviderOverride>,
    ) -> Result<AlgorithmBinding> {
        self.registry
            .resolve(algorithm, provider.or(self.provider.as_ref()))
    }

    /// Decodes `token` without checking its signature.
    ///
    /// See [`decode()`] for details.
    ///
    /// # Errors
    ///
    /// Same as [`decode()`].
    pub fn decode(&self, token: &str, options: &DecodeOptions) -> Result<Option<DecodedToken>> {
        decode(token, options)
    }

    /// Whether `token` has the shape of a compact token with a parseable
    /// header. The signature is not checked.
    pub fn is_valid(&self, token: &str) -> bool {
        is_valid(token)
    }
}
