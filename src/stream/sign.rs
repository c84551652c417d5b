use tracing::debug;

use super::{Accumulator, DataSink};
use crate::{
    format::Token, payload::Encoding, registry::ProviderOverride, Header, Jws, Key, Payload,
    Result, SignOptions,
};

/// Configuration of a [`SignStream`].
#[derive(Debug, Clone, Default)]
pub struct SignStreamOptions {
    /// The header. Must carry an `alg` parameter.
    pub header: Header,
    /// Pre-populates the payload sink.
    pub payload: Option<Payload>,
    /// Pre-populates the key sink.
    pub key: Option<Key>,
    /// How the textual payload becomes bytes. Streamed bytes that form
    /// valid UTF-8 are treated as text, anything else is signed as is.
    pub encoding: Encoding,
    /// A provider asked before the engine's registry.
    pub provider: Option<ProviderOverride>,
}

impl SignStreamOptions {
    /// Streams both the payload and the key.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Pre-populates the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Pre-populates the key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the encoding of the textual payload.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets a provider asked before the engine's registry.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderOverride) -> Self {
        self.provider = Some(provider);
        self
    }
}

/// A signing pipeline fed through a payload and a key sink.
#[derive(Debug)]
pub struct SignStream {
    payload: DataSink,
    key: DataSink,
    accumulator: Accumulator<Token>,
}

impl SignStream {
    /// The sink collecting the payload bytes.
    pub const fn payload(&self) -> &DataSink {
        &self.payload
    }

    /// The sink collecting the key material.
    pub const fn key(&self) -> &DataSink {
        &self.key
    }

    /// Whether both sinks are closed and signing has started.
    pub fn has_fired(&self) -> bool {
        self.accumulator.has_fired()
    }

    /// Waits for both sinks and returns the token.
    ///
    /// The token is the same one-shot [`Jws::sign`] produces for the
    /// collected bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PipelineAbandoned`](crate::Error::PipelineAbandoned)
    /// if an open sink is dropped, and any error of [`Jws::sign`].
    pub async fn finish(self) -> Result<Token> {
        let Self {
            payload,
            key,
            accumulator,
        } = self;
        // handles the caller cloned keep the pipeline alive
        drop((payload, key));
        accumulator.finish().await
    }

    /// Signs and writes the token into `sink`, closing it.
    ///
    /// # Errors
    ///
    /// Same as [`finish`](Self::finish), and
    /// [`Error::SinkClosed`](crate::Error::SinkClosed) if `sink` is closed
    /// already.
    pub async fn pipe_to(self, sink: &DataSink) -> Result<Token> {
        let token = self.finish().await?;
        sink.end(token.as_str())?;
        Ok(token)
    }
}

impl Jws {
    /// Starts a signing pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`](crate::Error::Serialize) if a
    /// pre-populated JSON payload cannot be serialized. A payload that is
    /// not valid for the encoding fails [`SignStream::finish`].
    pub fn create_sign(&self, options: SignStreamOptions) -> Result<SignStream> {
        let SignStreamOptions {
            header,
            payload: prefilled,
            key,
            encoding,
            provider,
        } = options;

        // the sink holds the text, the encoding is applied once when signing
        let payload = match prefilled {
            Some(ref payload) => DataSink::ready(payload.to_bytes(Encoding::Utf8)?),
            None => DataSink::new(),
        };
        let key = match key {
            Some(key) => DataSink::ready(key.expose()),
            None => DataSink::new(),
        };

        debug!(
            payload_ready = payload.is_closed(),
            key_ready = key.is_closed(),
            ?encoding,
            "created sign stream"
        );

        let jws = self.clone();
        let accumulator = Accumulator::new(&payload, &key, move |payload, key| async move {
            let payload = prefilled.unwrap_or_else(|| Payload::from_decoded(payload));
            let mut options = SignOptions::new(header, payload, key).with_encoding(encoding);
            options.provider = provider;
            jws.sign(options).await
        });

        Ok(SignStream {
            payload,
            key,
            accumulator,
        })
    }
}
