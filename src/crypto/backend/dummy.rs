//! This backend is a dummy backend, that will return an error for all
//! methods.
//!
//! It is selected when no real backend is enabled, so that algorithms
//! supplied by the caller keep working.

use super::interface;
use crate::{crypto::Result, jwa};

#[derive(Debug, thiserror::Error)]
#[error("the dummy crypto backend does not support any operations")]
pub(crate) struct Error;

/// The dummy backend.
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type EcPrivateKey = DummyKey;
    type EcPublicKey = DummyKey;
    type Error = Error;
    type HmacKey = DummyKey;
    type RsaPrivateKey = DummyKey;
    type RsaPublicKey = DummyKey;
}

/// A key that can never be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DummyKey {
    _private: (),
}

impl interface::hmac::Key for DummyKey {
    type Signature = Vec<u8>;

    fn new(_: jwa::Hmac, _: &[u8]) -> Result<Self> {
        Err(Error.into())
    }

    fn sign(&mut self, _: &[u8]) -> Result<Self::Signature> {
        Err(Error.into())
    }
}

impl interface::rsa::PrivateKey for DummyKey {
    type PublicKey = DummyKey;
    type Signature = Vec<u8>;

    fn from_pem(_: &str) -> Result<Self> {
        Err(Error.into())
    }

    fn to_public_key(&self) -> Self::PublicKey {
        self.clone()
    }

    fn sign(&mut self, _: jwa::RsassaPkcs1V1_5, _: &[u8]) -> Result<Self::Signature> {
        Err(Error.into())
    }
}

impl interface::rsa::PublicKey for DummyKey {
    fn from_pem(_: &str) -> Result<Self> {
        Err(Error.into())
    }

    fn verify(&mut self, _: jwa::RsassaPkcs1V1_5, _: &[u8], _: &[u8]) -> Result<bool> {
        Err(Error.into())
    }
}

impl interface::ec::PrivateKey for DummyKey {
    type PublicKey = DummyKey;
    type Signature = Vec<u8>;

    fn from_pem(_: jwa::EcDSA, _: &str) -> Result<Self> {
        Err(Error.into())
    }

    fn to_public_key(&self) -> Self::PublicKey {
        self.clone()
    }

    fn sign(&mut self, _: &[u8]) -> Result<Self::Signature> {
        Err(Error.into())
    }
}

impl interface::ec::PublicKey for DummyKey {
    fn from_pem(_: jwa::EcDSA, _: &str) -> Result<Self> {
        Err(Error.into())
    }

    fn verify(&mut self, _: &[u8], _: &[u8]) -> Result<bool> {
        Err(Error.into())
    }
}
