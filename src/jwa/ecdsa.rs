/// Digital Signature with ECDSA as defined in [section 3.4 of RFC 7518]
///
/// [section 3.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcDSA {
    /// ECDSA using P-256 and SHA-256
    Es256,
    /// ECDSA using P-384 and SHA-384
    Es384,
    /// ECDSA using P-521 and SHA-512
    Es512,
}

impl EcDSA {
    /// The name of the curve used by this variant.
    pub const fn curve(self) -> &'static str {
        match self {
            EcDSA::Es256 => "P-256",
            EcDSA::Es384 => "P-384",
            EcDSA::Es512 => "P-521",
        }
    }

    /// The length of a signature, `r || s` with both halves padded to the
    /// size of the curve's field, in bytes.
    pub const fn signature_size(self) -> usize {
        match self {
            EcDSA::Es256 => 64,
            EcDSA::Es384 => 96,
            EcDSA::Es512 => 132,
        }
    }
}
