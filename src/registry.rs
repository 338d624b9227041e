//! The descriptor table, symbolic-key index, and singleton cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::construct::{construct, Injectable};
use crate::descriptor::{ServiceDescriptor, Source};
use crate::error::{DiError, DiResult};
use crate::internal::{FrameId, InFlightGuard};
use crate::key::{Symbol, TypeKey};
use crate::lifetime::Lifetime;
use crate::registration::{AnyService, KeyBinding, Registration, SupplierFn};

/// What to do when a type or key is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Reject the second registration with `DuplicateRegistration`.
    #[default]
    Reject,
    /// Overwrite the existing registration and log a warning. The previous
    /// cached singleton, if any, is discarded with its registration.
    Replace,
}

/// Single source of truth for "how do I get an instance of X".
///
/// Domain adapters populate the registry during bootstrap
/// ([`register_supplier`](Registry::register_supplier),
/// [`bind_key`](Registry::bind_key) and friends); application code then
/// resolves by type or by symbolic key. The registry is `Send + Sync` and is
/// shared across threads behind an `Arc`, usually via
/// [`Services`](crate::Services).
///
/// # Examples
///
/// ```rust
/// use latchkey::{Registry, Symbol};
/// use std::sync::Arc;
///
/// struct Settings { path: String }
/// struct BackupManager { settings: Arc<Settings> }
///
/// const BACKUP_MANAGER: Symbol = Symbol::new("backup_manager");
///
/// let registry = Registry::new();
/// registry.register_instance(Settings { path: "/var/profiles".into() })?;
/// registry.register_singleton::<BackupManager, _>(|r| {
///     Ok(BackupManager { settings: r.resolve::<Settings>()? })
/// })?;
/// registry.bind_key::<BackupManager>(BACKUP_MANAGER)?;
///
/// let by_type = registry.resolve::<BackupManager>()?;
/// let by_key = registry.resolve_key_as::<BackupManager>(BACKUP_MANAGER)?;
/// assert!(Arc::ptr_eq(&by_type, &by_key));
/// # Ok::<(), latchkey::DiError>(())
/// ```
pub struct Registry {
    descriptors: RwLock<HashMap<TypeKey, Arc<Registration>>>,
    bindings: RwLock<HashMap<Symbol, Arc<KeyBinding>>>,
    policy: DuplicatePolicy,
}

impl Registry {
    /// Creates an empty registry with the strict duplicate policy.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Creates an empty registry with an explicit duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
            bindings: RwLock::new(HashMap::new()),
            policy,
        }
    }

    // ----- Registration -----

    /// Registers a pre-built value as a singleton.
    pub fn register_instance<T: Send + Sync + 'static>(&self, value: T) -> DiResult<()> {
        let instance: AnyService = Arc::new(value);
        let supplier: SupplierFn = Arc::new(move |_| Ok(instance.clone()));
        self.insert_type(
            TypeKey::of::<T>(),
            Registration::new(Lifetime::Singleton, Source::Instance, supplier),
        )
    }

    /// Registers an explicit supplier under the given lifecycle.
    ///
    /// The supplier receives the registry so it can resolve its own
    /// dependencies with `?`.
    pub fn register_supplier<T, F>(&self, lifetime: Lifetime, supplier: F) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&Registry) -> DiResult<T> + Send + Sync + 'static,
    {
        let supplier: SupplierFn =
            Arc::new(move |registry| Ok(Arc::new(supplier(registry)?) as AnyService));
        self.insert_type(
            TypeKey::of::<T>(),
            Registration::new(lifetime, Source::Supplier, supplier),
        )
    }

    /// Registers a singleton supplier; sugar over
    /// [`register_supplier`](Registry::register_supplier).
    pub fn register_singleton<T, F>(&self, supplier: F) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&Registry) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register_supplier(Lifetime::Singleton, supplier)
    }

    /// Registers a transient supplier; sugar over
    /// [`register_supplier`](Registry::register_supplier).
    pub fn register_transient<T, F>(&self, supplier: F) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&Registry) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register_supplier(Lifetime::Transient, supplier)
    }

    /// Installs a descriptor whose supplier runs the constructor resolver for
    /// `T`, so constructor-built types participate in singleton caching and
    /// key bindings like any explicitly supplied service.
    pub fn register_constructed<T: Injectable>(&self, lifetime: Lifetime) -> DiResult<()> {
        let supplier: SupplierFn =
            Arc::new(|registry| Ok(Arc::new(construct::<T>(registry)?) as AnyService));
        self.insert_type(
            TypeKey::of::<T>(),
            Registration::new(lifetime, Source::Constructed, supplier),
        )
    }

    /// Binds a symbolic key to a type as pure indirection: resolving the key
    /// resolves the type through its own descriptor, sharing its cache slot.
    ///
    /// The target does not have to be registered yet; a missing descriptor is
    /// a legitimate `NotFound` at resolve time, not a binding error.
    pub fn bind_key<T: 'static>(&self, key: Symbol) -> DiResult<()> {
        self.insert_binding(key, KeyBinding::Indirect(TypeKey::of::<T>()))
    }

    /// Binds a symbolic key to a type with a key-specific supplier.
    ///
    /// Keys may share a target type but differ in construction; each such
    /// binding caches independently under its own slot.
    pub fn bind_key_with<T, F>(&self, key: Symbol, lifetime: Lifetime, supplier: F) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&Registry) -> DiResult<T> + Send + Sync + 'static,
    {
        let supplier: SupplierFn =
            Arc::new(move |registry| Ok(Arc::new(supplier(registry)?) as AnyService));
        self.insert_binding(
            key,
            KeyBinding::Override {
                target: TypeKey::of::<T>(),
                lifetime,
                supplier,
                cached: Mutex::new(None),
            },
        )
    }

    fn insert_type(&self, key: TypeKey, registration: Registration) -> DiResult<()> {
        let mut descriptors = self.descriptors.write();
        if descriptors.contains_key(&key) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(DiError::DuplicateRegistration(key.name()));
                }
                DuplicatePolicy::Replace => {
                    warn!(service = key.name(), "replacing existing registration");
                }
            }
        }
        descriptors.insert(key, Arc::new(registration));
        Ok(())
    }

    fn insert_binding(&self, key: Symbol, binding: KeyBinding) -> DiResult<()> {
        let mut bindings = self.bindings.write();
        if bindings.contains_key(&key) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(DiError::DuplicateRegistration(key.name()));
                }
                DuplicatePolicy::Replace => {
                    warn!(key = key.name(), "replacing existing key binding");
                }
            }
        }
        bindings.insert(key, Arc::new(binding));
        Ok(())
    }

    // ----- Resolution -----

    /// Resolves a registered service by type.
    ///
    /// Cached singleton first, then the registered supplier (caching the
    /// result under the per-type lock for singletons), otherwise `NotFound`.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        let any = self.resolve_any(TypeKey::of::<T>())?;
        downcast::<T>(any)
    }

    /// Resolves by type, falling through to the constructor resolver when no
    /// descriptor exists.
    ///
    /// The fallback path has no descriptor and therefore no cache slot: it
    /// yields a fresh instance per call. Register the type with
    /// [`register_constructed`](Registry::register_constructed) to give
    /// constructor-built services a lifecycle.
    pub fn resolve_or_construct<T: Injectable>(&self) -> DiResult<Arc<T>> {
        let key = TypeKey::of::<T>();
        if self.descriptors.read().contains_key(&key) {
            return self.resolve::<T>();
        }
        let _guard = InFlightGuard::enter(FrameId::Type(key.id()), key.name())?;
        let value = construct::<T>(self).map_err(|cause| wrap_dependency_failure(key.name(), cause))?;
        Ok(Arc::new(value))
    }

    /// Resolves a symbolic key to a type-erased instance.
    pub fn resolve_key(&self, key: Symbol) -> DiResult<AnyService> {
        let binding = self
            .bindings
            .read()
            .get(&key)
            .cloned()
            .ok_or(DiError::UnregisteredKey(key))?;

        match &*binding {
            KeyBinding::Indirect(target) => self.resolve_any(*target),
            KeyBinding::Override {
                lifetime,
                supplier,
                cached,
                ..
            } => self.resolve_slot(FrameId::Key(key), key.name(), *lifetime, supplier, cached),
        }
    }

    /// Resolves a symbolic key and downcasts to the expected type.
    pub fn resolve_key_as<T: Send + Sync + 'static>(&self, key: Symbol) -> DiResult<Arc<T>> {
        let any = self.resolve_key(key)?;
        downcast::<T>(any)
    }

    pub(crate) fn resolve_any(&self, key: TypeKey) -> DiResult<AnyService> {
        let registration = self
            .descriptors
            .read()
            .get(&key)
            .cloned()
            .ok_or(DiError::NotFound(key.name()))?;
        self.resolve_slot(
            FrameId::Type(key.id()),
            key.name(),
            registration.lifetime,
            &registration.supplier,
            &registration.cached,
        )
    }

    /// Shared resolution path for descriptors and key-override bindings.
    ///
    /// The cycle/depth guard is entered before the slot lock, so same-thread
    /// re-entry surfaces as `Circular` instead of deadlocking; first
    /// resolutions racing from other threads block on the slot lock and then
    /// observe the cached instance.
    fn resolve_slot(
        &self,
        id: FrameId,
        name: &'static str,
        lifetime: Lifetime,
        supplier: &SupplierFn,
        slot: &Mutex<Option<AnyService>>,
    ) -> DiResult<AnyService> {
        let _guard = InFlightGuard::enter(id, name)?;

        match lifetime {
            Lifetime::Singleton => {
                let mut cached = slot.lock();
                if let Some(instance) = cached.as_ref() {
                    return Ok(instance.clone());
                }
                let instance =
                    supplier(self).map_err(|cause| wrap_dependency_failure(name, cause))?;
                debug!(service = name, "constructed singleton");
                *cached = Some(instance.clone());
                Ok(instance)
            }
            Lifetime::Transient => {
                supplier(self).map_err(|cause| wrap_dependency_failure(name, cause))
            }
        }
    }

    // ----- Cache management -----

    /// Clears the cached singleton for `T` (and any key-override slots
    /// targeting `T`), forcing re-construction on next resolve. Descriptors
    /// and bindings are untouched.
    pub fn reset<T: 'static>(&self) {
        let key = TypeKey::of::<T>();
        let registration = self.descriptors.read().get(&key).cloned();
        if let Some(registration) = registration {
            *registration.cached.lock() = None;
            debug!(service = key.name(), "cleared singleton cache");
        }

        let bindings: Vec<Arc<KeyBinding>> = self.bindings.read().values().cloned().collect();
        for binding in bindings {
            if let KeyBinding::Override { target, cached, .. } = &*binding {
                if *target == key {
                    *cached.lock() = None;
                }
            }
        }
    }

    /// Clears every singleton cache, allowing a full re-bootstrap.
    ///
    /// Order is unspecified; no dependency-aware teardown is attempted.
    pub fn reset_all(&self) {
        let registrations: Vec<Arc<Registration>> =
            self.descriptors.read().values().cloned().collect();
        for registration in registrations {
            *registration.cached.lock() = None;
        }

        let bindings: Vec<Arc<KeyBinding>> = self.bindings.read().values().cloned().collect();
        for binding in bindings {
            if let KeyBinding::Override { cached, .. } = &*binding {
                *cached.lock() = None;
            }
        }
        debug!("cleared all singleton caches");
    }

    // ----- Introspection -----

    /// Whether a descriptor exists for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.descriptors.read().contains_key(&TypeKey::of::<T>())
    }

    /// Whether a binding exists for the key.
    pub fn contains_key(&self, key: Symbol) -> bool {
        self.bindings.read().contains_key(&key)
    }

    /// Snapshot of every descriptor-table entry.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        let entries: Vec<(TypeKey, Arc<Registration>)> = self
            .descriptors
            .read()
            .iter()
            .map(|(key, registration)| (*key, registration.clone()))
            .collect();

        entries
            .into_iter()
            .map(|(key, registration)| ServiceDescriptor {
                type_name: key.name(),
                lifetime: registration.lifetime,
                source: registration.source,
                cached: registration.cached.lock().is_some(),
            })
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: Send + Sync + 'static>(any: AnyService) -> DiResult<Arc<T>> {
    any.downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// Wraps a dependency failure in a `Resolution` frame for the type under
/// construction. Cycle and depth errors pass through unwrapped: their path
/// already carries the chain. A supplier's own failure for this type also
/// stays unwrapped so callers can match on it directly.
fn wrap_dependency_failure(name: &'static str, cause: DiError) -> DiError {
    match &cause {
        DiError::Circular(_) | DiError::DepthExceeded(_) => cause,
        DiError::Supplier { type_name, .. } if *type_name == name => cause,
        DiError::NoSuitableConstructor(type_name) if *type_name == name => cause,
        _ => DiError::Resolution {
            type_name: name,
            cause: Box::new(cause),
        },
    }
}
