//! Constructor-based fallback resolution.
//!
//! Rust has no runtime constructor reflection, so types opt in by declaring
//! their candidate constructors through [`Injectable`]. The resolver then
//! picks the richest candidate whose parameters can all be resolved,
//! mirroring the arity-descending selection reflective containers perform.
//!
//! Constructor parameters resolve through registered descriptors; a nested
//! injectable parameter must itself be installed with
//! [`Registry::register_constructed`](crate::Registry::register_constructed).

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::registry::Registry;

/// Types the constructor resolver can build.
///
/// Implementors declare every way they can be constructed; the resolver picks
/// the first fully satisfiable candidate, richest first. Declaration order
/// breaks ties between candidates of equal arity.
///
/// # Examples
///
/// ```rust
/// use latchkey::{Constructor, Injectable, Registry};
/// use std::sync::Arc;
///
/// struct Settings;
///
/// struct Exporter {
///     settings: Option<Arc<Settings>>,
/// }
///
/// impl Injectable for Exporter {
///     fn constructors() -> Vec<Constructor<Self>> {
///         vec![
///             // Preferred: full dependency list.
///             Constructor::unary(|settings| Exporter { settings: Some(settings) }),
///             // Fallback for partially satisfiable graphs.
///             Constructor::nullary(|| Exporter { settings: None }),
///         ]
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register_instance(Settings).unwrap();
///
/// let exporter = registry.resolve_or_construct::<Exporter>().unwrap();
/// assert!(exporter.settings.is_some());
/// ```
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Candidate constructors, in declaration order.
    fn constructors() -> Vec<Constructor<Self>>;
}

type BuildFn<T> = Box<dyn Fn(&Registry) -> DiResult<T> + Send + Sync>;

/// A candidate constructor: its parameter list plus a build closure that
/// resolves each parameter through the registry and invokes the real
/// constructor.
pub struct Constructor<T> {
    params: Vec<&'static str>,
    build: BuildFn<T>,
}

impl<T: Send + Sync + 'static> Constructor<T> {
    /// Zero-parameter candidate.
    pub fn nullary<F>(build: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            build: Box::new(move |_| Ok(build())),
        }
    }

    /// One-parameter candidate.
    pub fn unary<A, F>(build: F) -> Self
    where
        A: Send + Sync + 'static,
        F: Fn(Arc<A>) -> T + Send + Sync + 'static,
    {
        Self {
            params: vec![std::any::type_name::<A>()],
            build: Box::new(move |registry| Ok(build(registry.resolve::<A>()?))),
        }
    }

    /// Two-parameter candidate.
    pub fn binary<A, B, F>(build: F) -> Self
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        F: Fn(Arc<A>, Arc<B>) -> T + Send + Sync + 'static,
    {
        Self {
            params: vec![std::any::type_name::<A>(), std::any::type_name::<B>()],
            build: Box::new(move |registry| {
                let a = registry.resolve::<A>()?;
                let b = registry.resolve::<B>()?;
                Ok(build(a, b))
            }),
        }
    }

    /// Three-parameter candidate.
    pub fn ternary<A, B, C, F>(build: F) -> Self
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(Arc<A>, Arc<B>, Arc<C>) -> T + Send + Sync + 'static,
    {
        Self {
            params: vec![
                std::any::type_name::<A>(),
                std::any::type_name::<B>(),
                std::any::type_name::<C>(),
            ],
            build: Box::new(move |registry| {
                let a = registry.resolve::<A>()?;
                let b = registry.resolve::<B>()?;
                let c = registry.resolve::<C>()?;
                Ok(build(a, b, c))
            }),
        }
    }

    /// Number of parameters; selection tries candidates arity-descending.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameter type names, for diagnostics.
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }
}

/// Picks and invokes the best satisfiable constructor for `T`.
///
/// Candidates are sorted by arity, richest first; the first whose parameters
/// all resolve wins and no further candidates are tried. A parameter failure
/// abandons the candidate. Cycles and depth overruns abort the whole search:
/// a cycle is a graph defect, not an unsatisfiable parameter.
pub(crate) fn construct<T: Injectable>(registry: &Registry) -> DiResult<T> {
    let mut candidates = T::constructors();
    // Stable sort keeps declaration order among equal arities.
    candidates.sort_by(|a, b| b.arity().cmp(&a.arity()));

    for candidate in &candidates {
        match (candidate.build)(registry) {
            Ok(value) => return Ok(value),
            Err(err) => {
                if matches!(
                    err.root_cause(),
                    DiError::Circular(_) | DiError::DepthExceeded(_)
                ) {
                    return Err(err);
                }
                // Unsatisfiable parameter: fall through to the next candidate.
            }
        }
    }

    Err(DiError::NoSuitableConstructor(std::any::type_name::<T>()))
}
