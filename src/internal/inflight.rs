//! Thread-local in-flight set for cycle and depth detection.

use std::any::TypeId;
use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::Symbol;

const MAX_DEPTH: usize = 1024;

/// Identity of one resolution frame.
///
/// Types and key-override slots live in separate namespaces: symbol names are
/// opaque, so a key named after a type must not be mistaken for the type
/// itself. The display name travels alongside purely for the error path.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameId {
    Type(TypeId),
    Key(Symbol),
}

// One resolution stack per thread: entries are the frames whose construction
// is in flight on this thread's resolution path.
thread_local! {
    static IN_FLIGHT: RefCell<Vec<(FrameId, &'static str)>> = RefCell::new(Vec::new());
}

/// Marks a frame as under construction on the current thread for the guard's
/// lifetime.
///
/// Entering a frame already on the stack means the service is (directly or
/// transitively) required to construct itself, which surfaces as a typed
/// `Circular` error instead of unbounded recursion or a deadlock on the
/// per-type lock.
pub(crate) struct InFlightGuard {
    id: FrameId,
}

impl InFlightGuard {
    pub(crate) fn enter(id: FrameId, name: &'static str) -> DiResult<Self> {
        IN_FLIGHT.with(|tls| {
            let mut stack = tls.borrow_mut();

            if stack.iter().any(|&(entry, _)| entry == id) {
                let mut path: Vec<&'static str> =
                    stack.iter().map(|&(_, entry_name)| entry_name).collect();
                path.push(name);
                return Err(DiError::Circular(path));
            }
            if stack.len() >= MAX_DEPTH {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push((id, name));
            Ok(())
        })?;

        Ok(Self { id })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some((last, _)) = stack.pop() {
                debug_assert!(last == self.id);
            }
        });
    }
}
