use tracing::debug;

use super::{Accumulator, DataSink};
use crate::{
    jws::{decode, DecodeOptions, DecodedToken},
    registry::ProviderOverride,
    Jws, Key, Result,
};

/// Configuration of a [`VerifyStream`].
#[derive(Debug, Clone, Default)]
pub struct VerifyStreamOptions {
    /// The algorithm the caller expects the token to be signed with.
    pub algorithm: Option<String>,
    /// Pre-populates the signature sink with a complete token.
    pub signature: Option<String>,
    /// Pre-populates the key sink.
    pub key: Option<Key>,
    /// A provider asked before the engine's registry.
    pub provider: Option<ProviderOverride>,
}

impl VerifyStreamOptions {
    /// Verifies with `algorithm`, streaming both the token and the key.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            ..Self::default()
        }
    }

    /// Pre-populates the token.
    #[must_use]
    pub fn with_signature(mut self, token: impl Into<String>) -> Self {
        self.signature = Some(token.into());
        self
    }

    /// Pre-populates the key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets a provider asked before the engine's registry.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderOverride) -> Self {
        self.provider = Some(provider);
        self
    }
}

/// The outcome of a [`VerifyStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the signature is valid.
    pub valid: bool,
    /// The decoded token, if it could be decoded. Present even if the
    /// signature is not valid.
    pub decoded: Option<DecodedToken>,
}

/// A verifying pipeline fed through a token and a key sink.
#[derive(Debug)]
pub struct VerifyStream {
    signature: DataSink,
    key: DataSink,
    accumulator: Accumulator<Verification>,
}

impl VerifyStream {
    /// The sink collecting the compact token.
    pub const fn signature(&self) -> &DataSink {
        &self.signature
    }

    /// The sink collecting the key material.
    pub const fn key(&self) -> &DataSink {
        &self.key
    }

    /// Whether both sinks are closed and verification has started.
    pub fn has_fired(&self) -> bool {
        self.accumulator.has_fired()
    }

    /// Waits for both sinks, then verifies and decodes the token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PipelineAbandoned`](crate::Error::PipelineAbandoned)
    /// if an open sink is dropped, any error of [`Jws::verify`], and
    /// [`Error::ParseFailure`](crate::Error::ParseFailure) if a JWT payload
    /// is not JSON.
    pub async fn finish(self) -> Result<Verification> {
        let Self {
            signature,
            key,
            accumulator,
        } = self;
        drop((signature, key));
        accumulator.finish().await
    }
}

impl Jws {
    /// Starts a verifying pipeline.
    pub fn create_verify(&self, options: VerifyStreamOptions) -> VerifyStream {
        let VerifyStreamOptions {
            algorithm,
            signature,
            key,
            provider,
        } = options;

        let signature = match signature {
            Some(token) => DataSink::ready(token),
            None => DataSink::new(),
        };
        let key = match key {
            Some(key) => DataSink::ready(key.expose()),
            None => DataSink::new(),
        };

        debug!(
            ?algorithm,
            signature_ready = signature.is_closed(),
            key_ready = key.is_closed(),
            "created verify stream"
        );

        let jws = self.clone();
        let accumulator = Accumulator::new(&signature, &key, move |token, key| async move {
            let token = String::from_utf8_lossy(&token);
            let key = Key::from(key);

            let valid = jws
                .verify_inner(&token, algorithm.as_deref(), &key, provider.as_ref())
                .await?;
            let decoded = decode(&token, &DecodeOptions::default())?;

            Ok(Verification { valid, decoded })
        });

        VerifyStream {
            signature,
            key,
            accumulator,
        }
    }
}
