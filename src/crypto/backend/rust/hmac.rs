use ::hmac::Hmac;
use digest::{Mac as _, Output};

use crate::{
    crypto::{backend::interface::hmac, Result},
    jwa,
};

/// Generates the type erased key and signature enums, one variant per
/// [`jwa::Hmac`] variant, since RustCrypto picks the hash through generics.
macro_rules! erased {
    ($($variant:ident => $hash:ty),* $(,)?) => {
        enum ErasedKey {
            $($variant(Hmac<$hash>),)*
        }

        pub(crate) enum ErasedSignature {
            $($variant(Output<Hmac<$hash>>),)*
        }

        impl AsRef<[u8]> for ErasedSignature {
            fn as_ref(&self) -> &[u8] {
                match self {
                    $(Self::$variant(sig) => sig.as_ref(),)*
                }
            }
        }

        impl ErasedKey {
            fn new(variant: jwa::Hmac, data: &[u8]) -> Result<Self> {
                Ok(match variant {
                    $(jwa::Hmac::$variant => Self::$variant(Hmac::<$hash>::new_from_slice(data)?),)*
                })
            }

            fn sign(&mut self, data: &[u8]) -> ErasedSignature {
                match self {
                    $(Self::$variant(mac) => {
                        mac.update(data);
                        ErasedSignature::$variant(mac.finalize_reset().into_bytes())
                    })*
                }
            }
        }
    };
}

erased!(
    Hs256 => sha2::Sha256,
    Hs384 => sha2::Sha384,
    Hs512 => sha2::Sha512,
);

/// A low level HMAC key. Signing resets it, so it can be reused.
pub(crate) struct Key {
    inner: ErasedKey,
}

impl hmac::Key for Key {
    type Signature = ErasedSignature;

    fn new(variant: jwa::Hmac, data: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: ErasedKey::new(variant, data)?,
        })
    }

    fn sign(&mut self, data: &[u8]) -> Result<Self::Signature> {
        Ok(self.inner.sign(data))
    }
}
