//! Mapping of algorithm identifiers to the capabilities that sign and verify
//! with them.
//!
//! An [`AlgorithmRegistry`] is assembled once, through a [`RegistryBuilder`],
//! and read-only afterwards. It can be shared freely between engines and
//! threads. Callers that need to swap algorithms per operation hand a
//! [`ProviderOverride`] to the engine instead of mutating the registry.

mod builtin;

use std::{error, fmt, sync::Arc};

use futures::future::{self, BoxFuture, FutureExt as _};
use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::{Error, Key, Result};

/// The error a signer or verifier reports when it rejects its input.
pub type PrimitiveError = Box<dyn error::Error + Send + Sync>;

/// Computes signatures for one algorithm.
///
/// The returned future may complete immediately or later on; the engine
/// always awaits it.
pub trait Signer: Send + Sync {
    /// Signs `secured_input` with `key`, returning the signature in the
    /// base64url alphabet.
    fn sign<'a>(
        &'a self,
        secured_input: &'a str,
        key: &'a Key,
    ) -> BoxFuture<'a, Result<String, PrimitiveError>>;
}

/// Checks signatures for one algorithm.
pub trait Verifier: Send + Sync {
    /// Checks whether `signature` is valid for `secured_input` under `key`.
    ///
    /// An invalid signature is `Ok(false)`; `Err` is reserved for input the
    /// primitive can't work with, like a key of the wrong type.
    fn verify<'a>(
        &'a self,
        secured_input: &'a str,
        signature: &'a str,
        key: &'a Key,
    ) -> BoxFuture<'a, Result<bool, PrimitiveError>>;
}

struct FnSigner<F>(F);

impl<F> Signer for FnSigner<F>
where
    F: Fn(&str, &Key) -> Result<String, PrimitiveError> + Send + Sync,
{
    fn sign<'a>(
        &'a self,
        secured_input: &'a str,
        key: &'a Key,
    ) -> BoxFuture<'a, Result<String, PrimitiveError>> {
        future::ready((self.0)(secured_input, key)).boxed()
    }
}

struct FnVerifier<F>(F);

impl<F> Verifier for FnVerifier<F>
where
    F: Fn(&str, &str, &Key) -> Result<bool, PrimitiveError> + Send + Sync,
{
    fn verify<'a>(
        &'a self,
        secured_input: &'a str,
        signature: &'a str,
        key: &'a Key,
    ) -> BoxFuture<'a, Result<bool, PrimitiveError>> {
        future::ready((self.0)(secured_input, signature, key)).boxed()
    }
}

/// An algorithm identifier together with its signer and verifier.
#[derive(Clone)]
pub struct AlgorithmBinding {
    name: String,
    signer: Arc<dyn Signer>,
    verifier: Arc<dyn Verifier>,
}

impl AlgorithmBinding {
    /// Binds `signer` and `verifier` to the identifier `name`.
    pub fn new(
        name: impl Into<String>,
        signer: Arc<dyn Signer>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            name: name.into(),
            signer,
            verifier,
        }
    }

    /// Binds two synchronous functions to the identifier `name`.
    pub fn from_fns<S, V>(name: impl Into<String>, sign: S, verify: V) -> Self
    where
        S: Fn(&str, &Key) -> Result<String, PrimitiveError> + Send + Sync + 'static,
        V: Fn(&str, &str, &Key) -> Result<bool, PrimitiveError> + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(FnSigner(sign)), Arc::new(FnVerifier(verify)))
    }

    /// The identifier this binding answers to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signing capability.
    pub fn signer(&self) -> &dyn Signer {
        &*self.signer
    }

    /// The verifying capability.
    pub fn verifier(&self) -> &dyn Verifier {
        &*self.verifier
    }
}

impl fmt::Debug for AlgorithmBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Something that can look up the binding of an algorithm identifier.
///
/// Returning `None` means "no binding", which lets a [`ProviderOverride`]
/// with fallback hand the lookup over to the registry.
pub trait AlgorithmProvider: Send + Sync {
    /// Looks up the binding for `algorithm`.
    fn binding(&self, algorithm: &str) -> Option<AlgorithmBinding>;
}

impl<F> AlgorithmProvider for F
where
    F: Fn(&str) -> Option<AlgorithmBinding> + Send + Sync,
{
    fn binding(&self, algorithm: &str) -> Option<AlgorithmBinding> {
        self(algorithm)
    }
}

/// A caller supplied provider that is asked before the registry.
#[derive(Clone)]
pub struct ProviderOverride {
    provider: Arc<dyn AlgorithmProvider>,
    fallback: bool,
}

impl ProviderOverride {
    /// Wraps `provider`. Identifiers it declines are unknown.
    pub fn new(provider: impl AlgorithmProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            fallback: false,
        }
    }

    /// Lets identifiers the provider declines fall back to the registry.
    #[must_use]
    pub fn with_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Whether declined identifiers fall back to the registry.
    pub const fn falls_back(&self) -> bool {
        self.fallback
    }
}

impl fmt::Debug for ProviderOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderOverride")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

/// Builder for an [`AlgorithmRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    bindings: HashMap<String, AlgorithmBinding>,
}

impl RegistryBuilder {
    /// Adds a binding, replacing any earlier one with the same identifier.
    #[must_use]
    pub fn register(mut self, binding: AlgorithmBinding) -> Self {
        self.bindings.insert(binding.name.clone(), binding);
        self
    }

    /// Adds the built-in `HS*`, `RS*`, `ES*` and `none` algorithms.
    #[must_use]
    pub fn with_builtins(self) -> Self {
        builtin::bindings()
            .into_iter()
            .fold(self, RegistryBuilder::register)
    }

    /// Freezes the registry.
    pub fn build(self) -> AlgorithmRegistry {
        AlgorithmRegistry {
            bindings: self.bindings,
        }
    }
}

/// An immutable table of algorithm bindings.
#[derive(Debug)]
pub struct AlgorithmRegistry {
    bindings: HashMap<String, AlgorithmBinding>,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl AlgorithmRegistry {
    /// Starts an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry holding only the built-in algorithms.
    pub fn with_builtins() -> Self {
        Self::builder().with_builtins().build()
    }

    /// Looks up a binding in this registry only.
    pub fn get(&self, algorithm: &str) -> Option<&AlgorithmBinding> {
        self.bindings.get(algorithm)
    }

    /// The identifiers registered, in no particular order.
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Resolves `algorithm` to its binding.
    ///
    /// If `provider` is given it is asked first. When it declines, the
    /// registry is consulted only if the override was built
    /// [with fallback](ProviderOverride::with_fallback).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlgorithm`] if nothing binds `algorithm`.
    pub fn resolve(
        &self,
        algorithm: &str,
        provider: Option<&ProviderOverride>,
    ) -> Result<AlgorithmBinding> {
        let unknown = || Error::UnknownAlgorithm {
            algorithm: algorithm.to_owned(),
        };

        if let Some(provider) = provider {
            if let Some(binding) = provider.provider.binding(algorithm) {
                trace!(algorithm, "resolved by provider override");
                return Ok(binding);
            }

            if !provider.fallback {
                debug!(algorithm, "provider override declined without fallback");
                return Err(unknown());
            }

            debug!(algorithm, "provider override declined, falling back to registry");
        }

        self.bindings.get(algorithm).cloned().ok_or_else(unknown)
    }
}

impl AlgorithmProvider for AlgorithmRegistry {
    fn binding(&self, algorithm: &str) -> Option<AlgorithmBinding> {
        self.get(algorithm).cloned()
    }
}
