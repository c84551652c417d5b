//! Incremental signing and verifying.
//!
//! A pipeline owns two [`DataSink`]s. Callers write into them in as many
//! chunks as they like, from wherever they like, and close them when they are
//! done. Once both are closed an [`Accumulator`] hands their contents to the
//! operation, whose result comes out of the pipeline's `finish`.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> jws::Result<()> {
//! use jws::{
//!     stream::{SignStreamOptions, VerifyStreamOptions},
//!     Header, Jws,
//! };
//!
//! let jws = Jws::default();
//!
//! let signing = jws.create_sign(SignStreamOptions::new(Header::new("HS256")))?;
//! signing.payload().write(b"hello ")?;
//! signing.payload().end(b"world")?;
//! signing.key().end(b"secret")?;
//!
//! let verifying = jws.create_verify(
//!     VerifyStreamOptions::new("HS256").with_key("secret"),
//! );
//! signing.pipe_to(verifying.signature()).await?;
//!
//! assert!(verifying.finish().await?.valid);
//! # Ok(())
//! # }
//! ```

mod gate;
mod sign;
mod sink;
mod verify;

pub use self::{
    gate::Accumulator,
    sign::{SignStream, SignStreamOptions},
    sink::{DataSink, SinkState},
    verify::{Verification, VerifyStream, VerifyStreamOptions},
};
