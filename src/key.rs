//! Opaque key material handed to signers and verifiers.

use core::fmt;

use secrecy::{ExposeSecret as _, SecretSlice};

/// Key material for a single sign or verify operation.
///
/// What the bytes mean is up to the algorithm: the built-in HMAC family uses
/// them as the raw secret, the RSA and ECDSA families expect PEM text. The
/// material is zeroized on drop and never printed.
#[derive(Clone)]
pub struct Key(SecretSlice<u8>);

impl Key {
    /// Wraps the given bytes.
    pub fn new(material: impl Into<Vec<u8>>) -> Self {
        Self(SecretSlice::from(material.into()))
    }

    /// The absent key.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Exposes the raw key material.
    pub fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }

    /// Whether there is no key material at all.
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.expose().len())
            .finish_non_exhaustive()
    }
}

impl From<&str> for Key {
    fn from(material: &str) -> Self {
        Self::new(material.as_bytes())
    }
}

impl From<String> for Key {
    fn from(material: String) -> Self {
        Self::new(material.into_bytes())
    }
}

impl From<Vec<u8>> for Key {
    fn from(material: Vec<u8>) -> Self {
        Self::new(material)
    }
}

impl From<&[u8]> for Key {
    fn from(material: &[u8]) -> Self {
        Self::new(material)
    }
}
