//! The primitives for working with [HMAC] algorithms.
//!
//! [HMAC]: https://en.wikipedia.org/wiki/HMAC

use core::fmt;

use subtle::ConstantTimeEq as _;

use super::{
    backend::{
        interface::{self, hmac::Key as _},
        Backend,
    },
    Result,
};
use crate::jwa;

type BackendHmacKey = <Backend as interface::Backend>::HmacKey;

/// The returned signature from a sign operation.
#[repr(transparent)]
pub struct Signature {
    inner: <BackendHmacKey as interface::hmac::Key>::Signature,
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_ref()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(AsRef::<[u8]>::as_ref(&self.inner), f)
    }
}

/// A key that can be used for signing and verifying HMAC signatures.
pub struct Key {
    inner: BackendHmacKey,
    variant: jwa::Hmac,
}

impl Key {
    /// Creates a key for the given variant from raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend rejects the secret.
    pub fn new(variant: jwa::Hmac, secret: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendHmacKey::new(variant, secret)?,
            variant,
        })
    }

    /// Computes the MAC of `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to compute the MAC.
    pub fn sign(&mut self, data: &[u8]) -> Result<Signature> {
        Ok(Signature {
            inner: self.inner.sign(data)?,
        })
    }

    /// Checks `signature` against the MAC of `data` in constant time.
    ///
    /// # Errors
    ///
    /// Returns an error if the crypto backend failed to compute the MAC.
    pub fn verify(&mut self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let expected = self.sign(data)?;
        Ok(expected.as_ref().ct_eq(signature).into())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("algorithm", &self.variant)
            .finish_non_exhaustive()
    }
}
