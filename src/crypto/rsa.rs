//! The primitives for working with [RSA] signatures.
//!
//! [RSA]: https://en.wikipedia.org/wiki/RSA_cryptosystem

use core::fmt;

use super::backend::{
    interface::{
        self,
        rsa::{PrivateKey as _, PublicKey as _},
    },
    Backend,
};
use crate::{crypto::Result, jwa};

type BackendPublicKey = <Backend as interface::Backend>::RsaPublicKey;
type BackendPrivateKey = <Backend as interface::Backend>::RsaPrivateKey;

/// The returned signature from a sign operation.
#[repr(transparent)]
pub struct Signature {
    inner: <BackendPrivateKey as interface::rsa::PrivateKey>::Signature,
}

impl From<Signature> for Vec<u8> {
    fn from(value: Signature) -> Self {
        value.inner.into()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_ref()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_ref(), f)
    }
}

/// The RSA public key type.
pub struct PublicKey {
    inner: BackendPublicKey,
}

impl PublicKey {
    /// Parses a PEM encoded public key.
    ///
    /// SPKI (`PUBLIC KEY`) and PKCS#1 (`RSA PUBLIC KEY`) are accepted. If
    /// neither matches, the PEM is tried as a private key and its public
    /// half is used.
    ///
    /// # Errors
    ///
    /// Returns an error if `pem` is no RSA key in any of these formats.
    pub fn from_pem(pem: &str) -> Result<Self> {
        match BackendPublicKey::from_pem(pem) {
            Ok(inner) => Ok(Self { inner }),
            Err(err) => PrivateKey::from_pem(pem)
                .map(|key| key.to_public_key())
                .map_err(|_| err),
        }
    }

    /// Verifies `signature` over `msg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to run the check. An
    /// invalid signature is `Ok(false)`.
    pub fn verify(
        &mut self,
        alg: jwa::RsassaPkcs1V1_5,
        msg: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        self.inner.verify(alg, msg, signature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey").finish_non_exhaustive()
    }
}

/// The RSA private key type.
pub struct PrivateKey {
    inner: BackendPrivateKey,
}

impl PrivateKey {
    /// Parses a PEM encoded PKCS#8 (`PRIVATE KEY`) or PKCS#1
    /// (`RSA PRIVATE KEY`) private key.
    ///
    /// # Errors
    ///
    /// Returns an error if `pem` is no RSA private key in these formats.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Ok(Self {
            inner: BackendPrivateKey::from_pem(pem)?,
        })
    }

    /// Returns the public half of this key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    /// Signs `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to sign.
    pub fn sign(&mut self, alg: jwa::RsassaPkcs1V1_5, data: &[u8]) -> Result<Signature> {
        Ok(Signature {
            inner: self.inner.sign(alg, data)?,
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}
