//! Error types for registration and resolution.

use std::fmt;

use crate::key::Symbol;

/// Resolution and registration errors.
///
/// All failures are typed and surface at the call site; the registry never
/// falls back to a default instance or caches a partially constructed one.
/// Failures deep in a dependency chain bubble up wrapped in
/// [`Resolution`](DiError::Resolution) frames, one per type attempted, so the
/// failing link is visible from the top-level call.
///
/// # Examples
///
/// ```rust
/// use latchkey::{DiError, Registry};
///
/// struct Missing;
///
/// let registry = Registry::new();
/// match registry.resolve::<Missing>() {
///     Err(DiError::NotFound(name)) => assert!(name.contains("Missing")),
///     other => panic!("unexpected: {:?}", other.err()),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// No descriptor exists for the requested type.
    NotFound(&'static str),
    /// `resolve_key` was called with a key that has no binding.
    UnregisteredKey(Symbol),
    /// A type or key was registered twice under the strict policy.
    DuplicateRegistration(&'static str),
    /// No declared constructor had all of its parameters resolvable.
    NoSuitableConstructor(&'static str),
    /// A type was required to construct itself; the path shows the cycle,
    /// first and last entries being the offending type.
    Circular(Vec<&'static str>),
    /// The resolution recursion bound was hit.
    DepthExceeded(usize),
    /// Downcast failed during key-based resolution.
    TypeMismatch(&'static str),
    /// A user supplier reported a failure of its own.
    Supplier {
        /// Type the supplier was registered for.
        type_name: &'static str,
        /// Supplier-provided message.
        message: String,
    },
    /// Umbrella: a dependency failed while constructing `type_name`.
    Resolution {
        /// Type whose construction was abandoned.
        type_name: &'static str,
        /// The dependency failure one level down.
        cause: Box<DiError>,
    },
}

impl DiError {
    /// Builds a [`Supplier`](DiError::Supplier) error for the service type `T`.
    ///
    /// Convenience for suppliers that need to report domain failures:
    ///
    /// ```rust
    /// use latchkey::{DiError, Registry};
    ///
    /// struct Store;
    ///
    /// let registry = Registry::new();
    /// registry.register_singleton::<Store, _>(|_| {
    ///     Err(DiError::supplier::<Store>("backing file unreadable"))
    /// }).unwrap();
    /// assert!(registry.resolve::<Store>().is_err());
    /// ```
    pub fn supplier<T>(message: impl Into<String>) -> DiError {
        DiError::Supplier {
            type_name: std::any::type_name::<T>(),
            message: message.into(),
        }
    }

    /// Innermost error beneath any [`Resolution`](DiError::Resolution) frames.
    pub fn root_cause(&self) -> &DiError {
        match self {
            DiError::Resolution { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Types attempted along a failed chain, outermost first.
    ///
    /// Empty when the failure was not a dependency failure.
    pub fn resolution_chain(&self) -> Vec<&'static str> {
        let mut chain = Vec::new();
        let mut current = self;
        while let DiError::Resolution { type_name, cause } = current {
            chain.push(*type_name);
            current = cause;
        }
        chain
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => write!(f, "service not found: {}", name),
            DiError::UnregisteredKey(key) => write!(f, "no binding for key `{}`", key),
            DiError::DuplicateRegistration(name) => {
                write!(f, "duplicate registration for {}", name)
            }
            DiError::NoSuitableConstructor(name) => {
                write!(f, "no satisfiable constructor for {}", name)
            }
            DiError::Circular(path) => {
                write!(f, "circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => {
                write!(f, "resolution depth limit exceeded at {}", depth)
            }
            DiError::TypeMismatch(name) => write!(f, "type mismatch for {}", name),
            DiError::Supplier { type_name, message } => {
                write!(f, "supplier for {} failed: {}", type_name, message)
            }
            DiError::Resolution { type_name, cause } => {
                write!(f, "failed to resolve {}: {}", type_name, cause)
            }
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Resolution { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

/// Result type for registry operations.
pub type DiResult<T> = Result<T, DiError>;
