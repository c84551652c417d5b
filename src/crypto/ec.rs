//! The primitives for working with [EC (elliptic curve)](https://en.wikipedia.org/wiki/Elliptic-curve_cryptography)
//! signatures on the NIST curves.

use core::fmt;

use super::backend::{
    interface::{
        self,
        ec::{PrivateKey as _, PublicKey as _},
    },
    Backend,
};
use crate::{crypto::Result, jwa};

type BackendPublicKey = <Backend as interface::Backend>::EcPublicKey;
type BackendPrivateKey = <Backend as interface::Backend>::EcPrivateKey;

/// The returned signature from a sign operation, `r || s`.
#[repr(transparent)]
pub struct Signature {
    inner: <BackendPrivateKey as interface::ec::PrivateKey>::Signature,
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

/// An EC public key on the curve of its algorithm.
#[derive(Clone)]
pub struct PublicKey {
    inner: BackendPublicKey,
    alg: jwa::EcDSA,
}

impl PublicKey {
    /// Parses a PEM encoded SPKI (`PUBLIC KEY`) public key on the curve of
    /// `alg`. A private key is accepted too, in which case its public half
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns an error if `pem` holds no key on that curve.
    pub fn from_pem(alg: jwa::EcDSA, pem: &str) -> Result<Self> {
        Ok(Self {
            inner: BackendPublicKey::from_pem(alg, pem)?,
            alg,
        })
    }

    /// Verifies the `r || s` `signature` over `msg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to run the check. An
    /// invalid or wrongly sized signature is `Ok(false)`.
    pub fn verify(&mut self, msg: &[u8], signature: &[u8]) -> Result<bool> {
        if signature.len() != self.alg.signature_size() {
            return Ok(false);
        }

        self.inner.verify(msg, signature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("curve", &self.alg.curve())
            .finish_non_exhaustive()
    }
}

/// An EC private key on the curve of its algorithm.
#[derive(Clone)]
pub struct PrivateKey {
    inner: BackendPrivateKey,
    alg: jwa::EcDSA,
}

impl PrivateKey {
    /// Parses a PEM encoded PKCS#8 (`PRIVATE KEY`) or SEC1
    /// (`EC PRIVATE KEY`) private key on the curve of `alg`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pem` holds no private key on that curve.
    pub fn from_pem(alg: jwa::EcDSA, pem: &str) -> Result<Self> {
        Ok(Self {
            inner: BackendPrivateKey::from_pem(alg, pem)?,
            alg,
        })
    }

    /// Returns the public half of this key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
            alg: self.alg,
        }
    }

    /// Signs `data` deterministically.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to sign.
    pub fn sign(&mut self, data: &[u8]) -> Result<Signature> {
        Ok(Signature {
            inner: self.inner.sign(data)?,
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.alg.curve())
            .finish_non_exhaustive()
    }
}
