//! Registration snapshots for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// How a registration was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Pre-built value handed to `register_instance`.
    Instance,
    /// Explicit supplier closure.
    Supplier,
    /// Backed by the constructor resolver (`register_constructed`).
    Constructed,
}

/// Data-only snapshot of one descriptor-table entry.
///
/// Useful for startup validation and debug dumps: inspect what is registered,
/// under which lifecycle, and whether a singleton has been constructed yet.
///
/// # Examples
///
/// ```rust
/// use latchkey::{Lifetime, Registry, Source};
///
/// struct Settings;
///
/// let registry = Registry::new();
/// registry.register_instance(Settings).unwrap();
///
/// let descriptors = registry.descriptors();
/// let settings = descriptors
///     .iter()
///     .find(|d| d.type_name.contains("Settings"))
///     .unwrap();
/// assert_eq!(settings.lifetime, Lifetime::Singleton);
/// assert_eq!(settings.source, Source::Instance);
/// assert!(!settings.cached);
///
/// registry.resolve::<Settings>().unwrap();
/// assert!(registry.descriptors()[0].cached);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Declared type name.
    pub type_name: &'static str,
    /// Lifecycle policy.
    pub lifetime: Lifetime,
    /// Construction strategy provenance.
    pub source: Source,
    /// Whether a singleton instance is currently cached.
    pub cached: bool,
}
