//! The interfaces for EC keys.

use crate::{crypto::Result, jwa};

/// The common operations for a curve-generic EC public key.
pub(crate) trait PublicKey: Sized + Clone {
    /// Parses a PEM encoded SPKI (`PUBLIC KEY`) public key on the curve of
    /// the given algorithm.
    fn from_pem(alg: jwa::EcDSA, pem: &str) -> Result<Self>;

    /// Verifies if the message is valid for the given signature.
    ///
    /// The signature is the fixed width `r || s` form. Returns `true` if the
    /// signature is valid, `false` otherwise, including for signatures of
    /// the wrong length.
    fn verify(&mut self, msg: &[u8], signature: &[u8]) -> Result<bool>;
}

/// The common operations for a curve-generic EC private key.
pub(crate) trait PrivateKey: Sized + Clone {
    /// The signature type that is produced by this key.
    type Signature: Into<Vec<u8>> + AsRef<[u8]>;

    /// The public key type.
    type PublicKey: PublicKey;

    /// Parses a PEM encoded private key on the curve of the given
    /// algorithm, either PKCS#8 (`PRIVATE KEY`) or SEC1 (`EC PRIVATE KEY`).
    fn from_pem(alg: jwa::EcDSA, pem: &str) -> Result<Self>;

    /// Returns the public key of this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// Signs the given data using this key, producing a deterministic
    /// signature as described in [RFC 6979](https://www.rfc-editor.org/rfc/rfc6979).
    ///
    /// This operation **must** be re-usable, meaning this method can be
    /// called multiple times with different data to sign.
    fn sign(&mut self, data: &[u8]) -> Result<Self::Signature>;
}
