//! The interfaces for RSA.

use crate::{crypto::Result, jwa};

/// The common operations for an RSA private key.
pub(crate) trait PrivateKey: Sized {
    /// The signature type that is produced by this key.
    type Signature: Into<Vec<u8>> + AsRef<[u8]>;

    /// The public key type.
    type PublicKey: PublicKey;

    /// Parses a PEM encoded private key, either PKCS#8 (`PRIVATE KEY`) or
    /// PKCS#1 (`RSA PRIVATE KEY`).
    fn from_pem(pem: &str) -> Result<Self>;

    /// Creates a new public key from this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// Signs the given data using this key.
    ///
    /// This operation **must** be re-usable, meaning this method can be
    /// called multiple times with different data to sign.
    fn sign(&mut self, alg: jwa::RsassaPkcs1V1_5, data: &[u8]) -> Result<Self::Signature>;
}

/// The common operations for an RSA public key.
pub(crate) trait PublicKey: Sized {
    /// Parses a PEM encoded public key, either SPKI (`PUBLIC KEY`) or
    /// PKCS#1 (`RSA PUBLIC KEY`).
    fn from_pem(pem: &str) -> Result<Self>;

    /// Verifies if the message is valid for the given signature and algorithm.
    ///
    /// Returns `true` if the signature is valid, `false` otherwise.
    fn verify(&mut self, alg: jwa::RsassaPkcs1V1_5, msg: &[u8], signature: &[u8])
        -> Result<bool>;
}
