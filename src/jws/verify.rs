use tracing::debug;

use super::Jws;
use crate::{format::Compact, registry::ProviderOverride, Error, Key, Result};

/// Everything a verify operation needs.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// The algorithm the caller expects the token to be signed with.
    pub algorithm: Option<String>,
    /// The secret or public key.
    pub key: Key,
    /// A provider asked before the engine's registry.
    pub provider: Option<ProviderOverride>,
}

impl VerifyOptions {
    /// Verifies with `algorithm` and `key`.
    pub fn new(algorithm: impl Into<String>, key: impl Into<Key>) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            key: key.into(),
            provider: None,
        }
    }

    /// Sets a provider asked before the engine's registry.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderOverride) -> Self {
        self.provider = Some(provider);
        self
    }
}

impl Jws {
    /// Checks the signature of `token` under the expected `algorithm`.
    ///
    /// The `alg` the token claims for itself is never consulted. A token that
    /// doesn't have the compact shape is simply not valid.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingAlgorithm`] if `algorithm` is `None` or empty
    /// - [`Error::UnknownAlgorithm`] if nothing binds it
    /// - [`Error::PrimitiveFailure`] if the verifier rejects the key
    pub async fn verify(&self, token: &str, algorithm: Option<&str>, key: &Key) -> Result<bool> {
        self.verify_inner(token, algorithm, key, None).await
    }

    /// Same as [`verify`](Self::verify), with the inputs bundled up.
    ///
    /// # Errors
    ///
    /// Same as [`verify`](Self::verify).
    pub async fn verify_with(&self, token: &str, options: &VerifyOptions) -> Result<bool> {
        self.verify_inner(
            token,
            options.algorithm.as_deref(),
            &options.key,
            options.provider.as_ref(),
        )
        .await
    }

    pub(crate) async fn verify_inner(
        &self,
        token: &str,
        algorithm: Option<&str>,
        key: &Key,
        provider: Option<&ProviderOverride>,
    ) -> Result<bool> {
        let algorithm = algorithm
            .filter(|alg| !alg.is_empty())
            .ok_or(Error::MissingAlgorithm { header: None })?;

        let Some(compact) = Compact::parse(token) else {
            debug!(algorithm, "rejecting malformed token");
            return Ok(false);
        };

        let binding = self.resolve(algorithm, provider)?;
        let input = compact.secured_input();
        let valid = binding
            .verifier()
            .verify(input.as_str(), compact.signature(), key)
            .await
            .map_err(|e| Error::primitive(algorithm, e))?;

        debug!(algorithm, valid, "verified token");
        Ok(valid)
    }
}
