//! Internal registration records backing the descriptor and binding tables.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::descriptor::Source;
use crate::error::DiResult;
use crate::key::TypeKey;
use crate::lifetime::Lifetime;
use crate::registry::Registry;

/// Type-erased shared service instance, as returned by key-based resolution.
pub type AnyService = Arc<dyn Any + Send + Sync>;

/// Type-erased supplier stored in the tables.
pub(crate) type SupplierFn = Arc<dyn Fn(&Registry) -> DiResult<AnyService> + Send + Sync>;

/// A descriptor-table entry: lifecycle, construction strategy, and the
/// singleton cache slot.
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) supplier: SupplierFn,
    pub(crate) source: Source,
    /// Singleton cache. The mutex doubles as the per-type construction lock:
    /// it is held across the supplier call so concurrent first resolutions
    /// block until exactly one construction finishes. Always `None` for
    /// transient registrations.
    pub(crate) cached: Mutex<Option<AnyService>>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, source: Source, supplier: SupplierFn) -> Self {
        Self {
            lifetime,
            supplier,
            source,
            cached: Mutex::new(None),
        }
    }
}

/// A symbolic-key binding.
pub(crate) enum KeyBinding {
    /// Pure indirection: resolving the key resolves the bound type through
    /// its own descriptor, sharing that descriptor's cache slot.
    Indirect(TypeKey),
    /// Key-specific supplier with its own cache slot. Several keys may bind
    /// the same type with different suppliers; each caches independently.
    Override {
        target: TypeKey,
        lifetime: Lifetime,
        supplier: SupplierFn,
        cached: Mutex<Option<AnyService>>,
    },
}
