use ::rsa::{
    pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _},
    pkcs8::{DecodePrivateKey as _, DecodePublicKey as _},
    Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use sha2::Digest as _;

use super::BackendError;
use crate::{
    crypto::{backend::interface::rsa, Result},
    jwa::RsassaPkcs1V1_5,
};

fn hash(alg: RsassaPkcs1V1_5, data: &[u8]) -> (Pkcs1v15Sign, Vec<u8>) {
    match alg {
        RsassaPkcs1V1_5::Rs256 => (
            Pkcs1v15Sign::new::<sha2::Sha256>(),
            sha2::Sha256::digest(data).to_vec(),
        ),
        RsassaPkcs1V1_5::Rs384 => (
            Pkcs1v15Sign::new::<sha2::Sha384>(),
            sha2::Sha384::digest(data).to_vec(),
        ),
        RsassaPkcs1V1_5::Rs512 => (
            Pkcs1v15Sign::new::<sha2::Sha512>(),
            sha2::Sha512::digest(data).to_vec(),
        ),
    }
}

/// A low level private RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PrivateKey {
    inner: RsaPrivateKey,
}

impl rsa::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;
    type Signature = Vec<u8>;

    fn from_pem(pem: &str) -> Result<Self> {
        let inner = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|_| BackendError::InvalidKey("RSA private key"))?;

        Ok(Self { inner })
    }

    fn to_public_key(&self) -> Self::PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    fn sign(&mut self, alg: RsassaPkcs1V1_5, data: &[u8]) -> Result<Self::Signature> {
        let (pad, hashed) = hash(alg, data);
        let mut rng = rand_core::OsRng;

        Ok(self.inner.sign_with_rng(&mut rng, pad, &hashed)?)
    }
}

/// A low level public RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PublicKey {
    inner: RsaPublicKey,
}

impl rsa::PublicKey for PublicKey {
    fn from_pem(pem: &str) -> Result<Self> {
        let inner = RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map_err(|_| BackendError::InvalidKey("RSA public key"))?;

        Ok(Self { inner })
    }

    fn verify(&mut self, alg: RsassaPkcs1V1_5, msg: &[u8], signature: &[u8]) -> Result<bool> {
        let (pad, hashed) = hash(alg, msg);

        Ok(self.inner.verify(pad, &hashed, signature).is_ok())
    }
}
