use tracing::{debug, trace};

use super::Jws;
use crate::{
    format::{SecuredInput, Token},
    payload::Encoding,
    registry::ProviderOverride,
    Error, Header, Key, Payload, Result,
};

/// Everything a sign operation needs.
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// The header. Must carry an `alg` parameter.
    pub header: Header,
    /// The content to sign.
    pub payload: Payload,
    /// The secret or private key.
    pub key: Key,
    /// How textual payloads become bytes. Defaults to UTF-8.
    pub encoding: Encoding,
    /// A provider asked before the engine's registry.
    pub provider: Option<ProviderOverride>,
}

impl SignOptions {
    /// Signs `payload` under `header` with `key`.
    pub fn new(header: Header, payload: impl Into<Payload>, key: impl Into<Key>) -> Self {
        Self {
            header,
            payload: payload.into(),
            key: key.into(),
            encoding: Encoding::default(),
            provider: None,
        }
    }

    /// Signs `payload` with HS256 and the shared `secret`.
    pub fn with_secret(payload: impl Into<Payload>, secret: impl Into<Key>) -> Self {
        Self::new(Header::new("HS256"), payload, secret)
    }

    /// Sets the encoding of textual payloads.
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

impl Jws {
    /// Signs a payload, producing a compact token.
    ///
    /// The algorithm is taken from the `alg` parameter of the header.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingAlgorithm`] if the header has no `alg`
    /// - [`Error::UnknownAlgorithm`] if nothing binds it
    /// - [`Error::InvalidEncoding`] if the payload doesn't fit the encoding
    /// - [`Error::PrimitiveFailure`] if the signer rejects the key
    pub async fn sign(&self, options: SignOptions) -> Result<Token> {
        let SignOptions {
            header,
            payload,
            key,
            encoding,
            provider,
        } = options;

        let algorithm = match header.algorithm() {
            Some(alg) => alg.to_owned(),
            None => {
                return Err(Error::MissingAlgorithm {
                    header: Some(header),
                })
            }
        };

        let binding = self.resolve(&algorithm, provider.as_ref())?;
        trace!(%algorithm, "resolved signing algorithm");

        let input = SecuredInput::new(&header, &payload, encoding)?;
        let signature = binding
            .signer()
            .sign(input.as_str(), &key)
            .await
            .map_err(|e| Error::primitive(&algorithm, e))?;

        debug!(%algorithm, %encoding, "signed token");
        Ok(Token::assemble(input, &signature))
    }
}
