//! Common traits that define the API each backend must implement.

use core::{error, fmt};

pub(crate) mod ec;
pub(crate) mod hmac;
pub(crate) mod rsa;

/// The backend trait that all backends must implement.
///
/// It ties together the key types of a backend, so the rest of the crate
/// only ever names `<Backend as interface::Backend>::...`.
pub(crate) trait Backend {
    /// The error type that is used by this backend.
    type Error: fmt::Debug + fmt::Display + error::Error + Send + Sync + 'static;

    /// The HMAC key type.
    type HmacKey: hmac::Key;

    /// The RSA private key type.
    type RsaPrivateKey: rsa::PrivateKey<PublicKey = Self::RsaPublicKey>;

    /// The RSA public key type.
    type RsaPublicKey: rsa::PublicKey;

    /// The EC private key type.
    type EcPrivateKey: ec::PrivateKey<PublicKey = Self::EcPublicKey>;

    /// The EC public key type.
    type EcPublicKey: ec::PublicKey;
}
