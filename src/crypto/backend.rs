//! The implementations behind the types of the [`crypto`](super) module.
//!
//! Exactly one backend is compiled in. Without a real one, the dummy backend
//! fails every keyed operation.

pub(super) mod interface;

cfg_if::cfg_if! {
    if #[cfg(feature = "crypto-rustcrypto")] {
        mod rust;
        pub(crate) use rust::*;
    } else {
        mod dummy;
        pub(crate) use dummy::*;
    }
}
