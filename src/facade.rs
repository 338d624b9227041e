//! Narrow process-wide access point over the registry.

use std::sync::Arc;

use crate::error::DiResult;
use crate::key::Symbol;
use crate::registration::AnyService;
use crate::registry::Registry;

/// Thin, cloneable handle application code uses to request services.
///
/// Holds nothing but the shared [`Registry`]. Registration and cache resets
/// stay on the registry itself, so ordinary call sites depend on this narrow
/// `get` surface only. Construct the one process-wide registry at the entry
/// point, wrap it once, and hand clones around; there is no ambient global.
///
/// # Examples
///
/// ```rust
/// use latchkey::{Registry, Services, Symbol};
///
/// struct Clock;
///
/// const CLOCK: Symbol = Symbol::new("clock");
///
/// let registry = Registry::new();
/// registry.register_instance(Clock).unwrap();
/// registry.bind_key::<Clock>(CLOCK).unwrap();
///
/// let services = Services::new(registry);
/// let by_type = services.get::<Clock>().unwrap();
/// let by_key = services.get_key_as::<Clock>(CLOCK).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&by_type, &by_key));
/// ```
#[derive(Clone)]
pub struct Services {
    registry: Arc<Registry>,
}

impl Services {
    /// Wraps a freshly bootstrapped registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Wraps an already shared registry.
    pub fn from_arc(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Resolves a service by type.
    pub fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.registry.resolve::<T>()
    }

    /// Resolves a symbolic key to a type-erased instance.
    pub fn get_key(&self, key: Symbol) -> DiResult<AnyService> {
        self.registry.resolve_key(key)
    }

    /// Resolves a symbolic key and downcasts to the expected type.
    pub fn get_key_as<T: Send + Sync + 'static>(&self, key: Symbol) -> DiResult<Arc<T>> {
        self.registry.resolve_key_as::<T>(key)
    }

    /// Resolves a service by type, panicking on failure.
    ///
    /// For bootstrap code that treats a missing service as fatal
    /// misconfiguration.
    pub fn get_required<T: Send + Sync + 'static>(&self) -> Arc<T> {
        self.get::<T>().unwrap_or_else(|err| {
            panic!(
                "failed to resolve {}: {}",
                std::any::type_name::<T>(),
                err
            )
        })
    }

    /// The underlying registry, for bootstrap and tests.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
