//! # latchkey
//!
//! In-process service registry and object-graph resolver: given a requested
//! type or a symbolic key, produce a fully constructed instance, recursively
//! resolving dependencies and caching singletons for reuse.
//!
//! ## Features
//!
//! - **Two lifecycles**: singleton (lazy, cached, at-most-once construction)
//!   and transient (fresh per resolution)
//! - **Symbolic keys**: opaque [`Symbol`] handles bound to types, with
//!   optional key-specific suppliers and independent cache slots
//! - **Constructor fallback**: [`Injectable`] types declare candidate
//!   constructors; the richest satisfiable one wins
//! - **Thread-safe**: per-type construction locks, not one coarse global lock
//! - **Cycle detection**: self-dependency surfaces as a typed `Circular`
//!   error with the full path instead of a stack overflow or deadlock
//! - **Typed errors**: every failure is a [`DiError`] at the call site; no
//!   silent null-object fallback
//!
//! ## Quick start
//!
//! ```rust
//! use latchkey::{Registry, Services, Symbol};
//! use std::sync::Arc;
//!
//! struct Settings {
//!     profile_dir: String,
//! }
//!
//! struct ProfileCache {
//!     settings: Arc<Settings>,
//! }
//!
//! // Symbolic keys are declared by domain adapters as constants.
//! const PROFILE_CACHE: Symbol = Symbol::new("profile_cache");
//!
//! // Bootstrap: adapters register everything before business logic runs.
//! let registry = Registry::new();
//! registry.register_instance(Settings {
//!     profile_dir: "/var/profiles".to_string(),
//! })?;
//! registry.register_singleton::<ProfileCache, _>(|r| {
//!     Ok(ProfileCache {
//!         settings: r.resolve::<Settings>()?,
//!     })
//! })?;
//! registry.bind_key::<ProfileCache>(PROFILE_CACHE)?;
//!
//! // Steady state: application code goes through the facade.
//! let services = Services::new(registry);
//! let cache = services.get::<ProfileCache>()?;
//! assert_eq!(cache.settings.profile_dir, "/var/profiles");
//!
//! // Key resolution is pure indirection to the same singleton.
//! let via_key = services.get_key_as::<ProfileCache>(PROFILE_CACHE)?;
//! assert!(Arc::ptr_eq(&cache, &via_key));
//! # Ok::<(), latchkey::DiError>(())
//! ```
//!
//! ## Constructor fallback
//!
//! Rust has no constructor reflection, so types opt in by declaring their
//! candidates through [`Injectable`]; see the [`construct`] module docs.

pub mod construct;
pub mod descriptor;
pub mod error;
pub mod facade;
pub mod key;
pub mod lifetime;
pub mod registry;

// Internal modules
mod internal;
mod registration;

pub use construct::{Constructor, Injectable};
pub use descriptor::{ServiceDescriptor, Source};
pub use error::{DiError, DiResult};
pub use facade::Services;
pub use key::{Symbol, TypeKey};
pub use lifetime::Lifetime;
pub use registration::AnyService;
pub use registry::{DuplicatePolicy, Registry};
