//! Internal implementation details.

pub(crate) mod inflight;

pub(crate) use inflight::{FrameId, InFlightGuard};
