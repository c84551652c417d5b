//! The algorithms every registry can start out with, backed by the
//! [`crypto`](crate::crypto) module.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt as _};

use super::{AlgorithmBinding, PrimitiveError, Signer, Verifier};
use crate::{
    base64_url,
    crypto::{ec, hmac, rsa},
    jwa::{EcDSA, Hmac, JsonWebSigningAlgorithm, RsassaPkcs1V1_5},
    Key,
};

type Signed = Result<String, PrimitiveError>;
type Checked = Result<bool, PrimitiveError>;

/// All built-in bindings, keyed by their `alg` identifier.
pub(super) fn bindings() -> Vec<AlgorithmBinding> {
    fn bind<A: Signer + Verifier + 'static>(
        alg: impl Into<JsonWebSigningAlgorithm>,
        algorithm: A,
    ) -> AlgorithmBinding {
        let algorithm = Arc::new(algorithm);
        AlgorithmBinding::new(alg.into().name(), algorithm.clone(), algorithm)
    }

    let mut bindings = Vec::with_capacity(10);

    for variant in [Hmac::Hs256, Hmac::Hs384, Hmac::Hs512] {
        bindings.push(bind(variant, HmacAlgorithm(variant)));
    }
    for variant in [
        RsassaPkcs1V1_5::Rs256,
        RsassaPkcs1V1_5::Rs384,
        RsassaPkcs1V1_5::Rs512,
    ] {
        bindings.push(bind(variant, RsaAlgorithm(variant)));
    }
    for variant in [EcDSA::Es256, EcDSA::Es384, EcDSA::Es512] {
        bindings.push(bind(variant, EcdsaAlgorithm(variant)));
    }

    let none = Arc::new(NoneAlgorithm);
    bindings.push(AlgorithmBinding::new(
        JsonWebSigningAlgorithm::None.name(),
        none.clone(),
        none,
    ));

    bindings
}

/// PEM keys must be text.
fn pem(key: &Key) -> Result<&str, PrimitiveError> {
    Ok(core::str::from_utf8(key.expose())?)
}

/// Decodes a signature segment, `None` meaning it can't possibly be valid.
fn signature_bytes(signature: &str) -> Option<Vec<u8>> {
    base64_url::decode_canonical(signature).ok()
}

struct HmacAlgorithm(Hmac);

impl HmacAlgorithm {
    fn sign_sync(&self, input: &str, key: &Key) -> Signed {
        let mut key = hmac::Key::new(self.0, key.expose())?;
        Ok(base64_url::encode(key.sign(input.as_bytes())?))
    }

    fn verify_sync(&self, input: &str, signature: &str, key: &Key) -> Checked {
        let Some(signature) = signature_bytes(signature) else {
            return Ok(false);
        };

        let mut key = hmac::Key::new(self.0, key.expose())?;
        Ok(key.verify(input.as_bytes(), &signature)?)
    }
}

struct RsaAlgorithm(RsassaPkcs1V1_5);

impl RsaAlgorithm {
    fn sign_sync(&self, input: &str, key: &Key) -> Signed {
        let mut key = rsa::PrivateKey::from_pem(pem(key)?)?;
        Ok(base64_url::encode(key.sign(self.0, input.as_bytes())?))
    }

    fn verify_sync(&self, input: &str, signature: &str, key: &Key) -> Checked {
        let mut key = rsa::PublicKey::from_pem(pem(key)?)?;
        let Some(signature) = signature_bytes(signature) else {
            return Ok(false);
        };

        Ok(key.verify(self.0, input.as_bytes(), &signature)?)
    }
}

struct EcdsaAlgorithm(EcDSA);

impl EcdsaAlgorithm {
    fn sign_sync(&self, input: &str, key: &Key) -> Signed {
        let mut key = ec::PrivateKey::from_pem(self.0, pem(key)?)?;
        Ok(base64_url::encode(key.sign(input.as_bytes())?))
    }

    fn verify_sync(&self, input: &str, signature: &str, key: &Key) -> Checked {
        let mut key = ec::PublicKey::from_pem(self.0, pem(key)?)?;
        let Some(signature) = signature_bytes(signature) else {
            return Ok(false);
        };

        Ok(key.verify(input.as_bytes(), &signature)?)
    }
}

/// The unsecured algorithm: an empty signature that always verifies.
struct NoneAlgorithm;

impl NoneAlgorithm {
    fn sign_sync(&self, _: &str, _: &Key) -> Signed {
        Ok(String::new())
    }

    fn verify_sync(&self, _: &str, _: &str, _: &Key) -> Checked {
        Ok(true)
    }
}

/// The built-in primitives finish synchronously, so their futures are
/// ready right away.
macro_rules! impl_ready_primitive {
    ($($T:ty),* $(,)?) => {$(
        impl Signer for $T {
            fn sign<'a>(&'a self, secured_input: &'a str, key: &'a Key) -> BoxFuture<'a, Signed> {
                future::ready(self.sign_sync(secured_input, key)).boxed()
            }
        }

        impl Verifier for $T {
            fn verify<'a>(
                &'a self,
                secured_input: &'a str,
                signature: &'a str,
                key: &'a Key,
            ) -> BoxFuture<'a, Checked> {
                future::ready(self.verify_sync(secured_input, signature, key)).boxed()
            }
        }
    )*};
}

impl_ready_primitive!(HmacAlgorithm, RsaAlgorithm, EcdsaAlgorithm, NoneAlgorithm);
