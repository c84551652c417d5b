use ecdsa::SignatureBytes;
use elliptic_curve::{
    pkcs8::{DecodePrivateKey as _, DecodePublicKey as _},
    sec1::ToEncodedPoint as _,
    PublicKey as CurvePublicKey, SecretKey,
};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use signature::{Signer as _, Verifier as _};

use super::BackendError;
use crate::{
    crypto::{backend::interface::ec, Result},
    jwa::EcDSA,
};

/// Parses a private key of the given curve from PKCS#8 or SEC1 PEM.
macro_rules! secret_from_pem {
    ($curve:ty, $pem:expr) => {
        SecretKey::<$curve>::from_pkcs8_pem($pem)
            .or_else(|_| SecretKey::<$curve>::from_sec1_pem($pem))
            .map_err(|_| BackendError::InvalidKey("EC private key"))
    };
}

/// Parses a public key of the given curve from SPKI PEM, falling back to the
/// public half of a private key.
macro_rules! public_from_pem {
    ($curve:ty, $pem:expr) => {
        match CurvePublicKey::<$curve>::from_public_key_pem($pem) {
            Ok(key) => Ok(key),
            Err(_) => secret_from_pem!($curve, $pem)
                .map(|secret| secret.public_key())
                .map_err(|_| BackendError::InvalidKey("EC public key")),
        }
    };
}

#[derive(Clone)]
enum ErasedPrivateKey {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    P521(SecretKey<NistP521>),
}

#[derive(Clone)]
enum ErasedPublicKey {
    P256(CurvePublicKey<NistP256>),
    P384(CurvePublicKey<NistP384>),
    P521(CurvePublicKey<NistP521>),
}

#[derive(Clone)]
pub(crate) enum ErasedSignature {
    P256(SignatureBytes<NistP256>),
    P384(SignatureBytes<NistP384>),
    P521(SignatureBytes<NistP521>),
}

impl From<ErasedSignature> for Vec<u8> {
    fn from(value: ErasedSignature) -> Self {
        match value {
            ErasedSignature::P256(sig) => sig.to_vec(),
            ErasedSignature::P384(sig) => sig.to_vec(),
            ErasedSignature::P521(sig) => sig.to_vec(),
        }
    }
}

impl AsRef<[u8]> for ErasedSignature {
    fn as_ref(&self) -> &[u8] {
        match self {
            ErasedSignature::P256(sig) => sig.as_ref(),
            ErasedSignature::P384(sig) => sig.as_ref(),
            ErasedSignature::P521(sig) => sig.as_ref(),
        }
    }
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    inner: ErasedPrivateKey,
}

impl ec::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;
    type Signature = ErasedSignature;

    fn from_pem(alg: EcDSA, pem: &str) -> Result<Self> {
        let inner = match alg {
            EcDSA::Es256 => ErasedPrivateKey::P256(secret_from_pem!(NistP256, pem)?),
            EcDSA::Es384 => ErasedPrivateKey::P384(secret_from_pem!(NistP384, pem)?),
            EcDSA::Es512 => ErasedPrivateKey::P521(secret_from_pem!(NistP521, pem)?),
        };

        Ok(Self { inner })
    }

    fn to_public_key(&self) -> Self::PublicKey {
        let inner = match self.inner {
            ErasedPrivateKey::P256(ref key) => ErasedPublicKey::P256(key.public_key()),
            ErasedPrivateKey::P384(ref key) => ErasedPublicKey::P384(key.public_key()),
            ErasedPrivateKey::P521(ref key) => ErasedPublicKey::P521(key.public_key()),
        };

        PublicKey { inner }
    }

    fn sign(&mut self, data: &[u8]) -> Result<Self::Signature> {
        let sig = match self.inner {
            ErasedPrivateKey::P256(ref key) => {
                let key = ecdsa::SigningKey::<NistP256>::from(key);
                let sig: ecdsa::Signature<NistP256> = key.try_sign(data)?;
                ErasedSignature::P256(sig.to_bytes())
            }
            ErasedPrivateKey::P384(ref key) => {
                let key = ecdsa::SigningKey::<NistP384>::from(key);
                let sig: ecdsa::Signature<NistP384> = key.try_sign(data)?;
                ErasedSignature::P384(sig.to_bytes())
            }
            ErasedPrivateKey::P521(ref key) => {
                // P-521 hashes with SHA-512 but has a 66 byte field, so it
                // goes through the curve crate's own signing key
                let key = p521::ecdsa::SigningKey::from_bytes(&key.to_bytes())?;
                let sig: p521::ecdsa::Signature = key.try_sign(data)?;
                ErasedSignature::P521(sig.to_bytes())
            }
        };

        Ok(sig)
    }
}

/// A low level public EC key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PublicKey {
    inner: ErasedPublicKey,
}

impl ec::PublicKey for PublicKey {
    fn from_pem(alg: EcDSA, pem: &str) -> Result<Self> {
        let inner = match alg {
            EcDSA::Es256 => ErasedPublicKey::P256(public_from_pem!(NistP256, pem)?),
            EcDSA::Es384 => ErasedPublicKey::P384(public_from_pem!(NistP384, pem)?),
            EcDSA::Es512 => ErasedPublicKey::P521(public_from_pem!(NistP521, pem)?),
        };

        Ok(Self { inner })
    }

    fn verify(&mut self, msg: &[u8], signature: &[u8]) -> Result<bool> {
        Ok(match self.inner {
            ErasedPublicKey::P256(ref key) => {
                let Ok(sig) = ecdsa::Signature::<NistP256>::try_from(signature) else {
                    return Ok(false);
                };
                let key = ecdsa::VerifyingKey::<NistP256>::from(key);
                key.verify(msg, &sig).is_ok()
            }
            ErasedPublicKey::P384(ref key) => {
                let Ok(sig) = ecdsa::Signature::<NistP384>::try_from(signature) else {
                    return Ok(false);
                };
                let key = ecdsa::VerifyingKey::<NistP384>::from(key);
                key.verify(msg, &sig).is_ok()
            }
            ErasedPublicKey::P521(ref key) => {
                let Ok(sig) = p521::ecdsa::Signature::try_from(signature) else {
                    return Ok(false);
                };
                let key = p521::ecdsa::VerifyingKey::from_encoded_point(
                    &key.to_encoded_point(false),
                )
                .map_err(BackendError::Ecdsa)?;
                key.verify(msg, &sig).is_ok()
            }
        })
    }
}
