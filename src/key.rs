//! Type and symbolic keys used for registry lookup.

use std::any::TypeId;
use std::fmt;

/// Identity of a service's declared type.
///
/// Pairs the `TypeId` with the `std::any::type_name` so errors and logs can
/// print something readable. Equality and hashing use the `TypeId` only; the
/// name is carried for diagnostics.
///
/// # Examples
///
/// ```rust
/// use latchkey::TypeKey;
///
/// struct Cache;
///
/// let key = TypeKey::of::<Cache>();
/// assert!(key.name().contains("Cache"));
/// assert_eq!(key, TypeKey::of::<Cache>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the concrete type `T`.
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Human-readable type name for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Opaque symbolic key: the enum-constant analogue.
///
/// A `Symbol` is a stable, comparable, hashable handle that domain modules
/// bind to a concrete type (and optionally a key-specific supplier) at
/// bootstrap. It holds no state of its own; resolving a symbol always goes
/// through its binding.
///
/// Adapters typically declare their keys as constants:
///
/// ```rust
/// use latchkey::Symbol;
///
/// pub const SETTINGS_MANAGER: Symbol = Symbol::new("settings_manager");
/// pub const PROFILE_CACHE: Symbol = Symbol::new("profile_cache");
///
/// assert_ne!(SETTINGS_MANAGER, PROFILE_CACHE);
/// assert_eq!(SETTINGS_MANAGER.name(), "settings_manager");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(&'static str);

impl Symbol {
    /// Creates a symbol from its stable name.
    pub const fn new(name: &'static str) -> Self {
        Symbol(name)
    }

    /// The symbol's stable name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
