//! Identifiers of the JSON Web Algorithms (JWA) for signing, as defined in
//! [RFC 7518 section 3]
//!
//! [RFC 7518 section 3]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3>

mod ecdsa;
mod hmac;
mod rsassa_pkcs1_v1_5;

#[doc(inline)]
pub use self::{ecdsa::EcDSA, hmac::Hmac, rsassa_pkcs1_v1_5::RsassaPkcs1V1_5};

/// The identifiers of all keyed algorithms the built-in registry supports.
///
/// `none` is supported as well but deliberately not part of this list.
pub const ALGORITHMS: [&str; 9] = [
    "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "ES256", "ES384", "ES512",
];

/// A JSON Web Algorithm (JWA) for singing operations (JWS).
///
/// This enum covers the `alg` Header Parameter Values this crate implements
/// out of the box. Anything else parses into
/// [`Other`](JsonWebSigningAlgorithm::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum JsonWebSigningAlgorithm {
    /// HMAC with SHA-2 Functions
    Hmac(Hmac),
    /// RSASSA-PKCS1-v1_5 using SHA-2 Functions
    Rsa(RsassaPkcs1V1_5),
    /// Digital Signature with ECDSA
    EcDSA(EcDSA),
    /// The "none" algorithm as defined in [section 3.6 of RFC 7518].
    ///
    /// Using this algorithm essentially means that there is
    /// no integrity protection for the JWS.
    ///
    /// [section 3.6 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.6>
    None,
    /// JSON Web Algorithms that are not recognised by this implementation.
    ///
    /// Custom algorithms registered with an
    /// [`AlgorithmRegistry`](crate::AlgorithmRegistry) or supplied by an
    /// [`AlgorithmProvider`](crate::AlgorithmProvider) end up here.
    Other(String),
}

impl From<Hmac> for JsonWebSigningAlgorithm {
    fn from(x: Hmac) -> Self {
        Self::Hmac(x)
    }
}

impl From<RsassaPkcs1V1_5> for JsonWebSigningAlgorithm {
    fn from(x: RsassaPkcs1V1_5) -> Self {
        Self::Rsa(x)
    }
}

impl From<EcDSA> for JsonWebSigningAlgorithm {
    fn from(x: EcDSA) -> Self {
        Self::EcDSA(x)
    }
}

impl_serde_jwa!(
    JsonWebSigningAlgorithm,
    [
        "HS256" => Self::Hmac(Hmac::Hs256); Self::Hmac(Hmac::Hs256),
        "HS384" => Self::Hmac(Hmac::Hs384); Self::Hmac(Hmac::Hs384),
        "HS512" => Self::Hmac(Hmac::Hs512); Self::Hmac(Hmac::Hs512),

        "RS256" => Self::Rsa(RsassaPkcs1V1_5::Rs256); Self::Rsa(RsassaPkcs1V1_5::Rs256),
        "RS384" => Self::Rsa(RsassaPkcs1V1_5::Rs384); Self::Rsa(RsassaPkcs1V1_5::Rs384),
        "RS512" => Self::Rsa(RsassaPkcs1V1_5::Rs512); Self::Rsa(RsassaPkcs1V1_5::Rs512),

        "ES256" => Self::EcDSA(EcDSA::Es256); Self::EcDSA(EcDSA::Es256),
        "ES384" => Self::EcDSA(EcDSA::Es384); Self::EcDSA(EcDSA::Es384),
        "ES512" => Self::EcDSA(EcDSA::Es512); Self::EcDSA(EcDSA::Es512),

        "none" => Self::None; Self::None,
    ]
);
