//! Service lifecycle definitions.

/// Lifecycle policy controlling instance caching.
///
/// # Examples
///
/// ```rust
/// use latchkey::{Lifetime, Registry};
/// use std::sync::Arc;
///
/// struct Settings;
/// struct Ticket;
///
/// let registry = Registry::new();
/// registry.register_supplier::<Settings, _>(Lifetime::Singleton, |_| Ok(Settings)).unwrap();
/// registry.register_supplier::<Ticket, _>(Lifetime::Transient, |_| Ok(Ticket)).unwrap();
///
/// // Singletons share one instance.
/// let a = registry.resolve::<Settings>().unwrap();
/// let b = registry.resolve::<Settings>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// // Transients are fresh every time.
/// let t1 = registry.resolve::<Ticket>().unwrap();
/// let t2 = registry.resolve::<Ticket>().unwrap();
/// assert!(!Arc::ptr_eq(&t1, &t2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Constructed lazily on first resolution, then cached for the process
    /// lifetime (or until `reset`). At most one construction runs even under
    /// concurrent first access.
    Singleton,
    /// A fresh instance per resolution, never cached; the caller owns it.
    Transient,
}
