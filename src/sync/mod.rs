//! Best-effort sync with a remote quote endpoint.
//!
//! Each tick fetches a bounded batch of items, maps every item's `title` to a
//! quote in the [`SERVER_CATEGORY`], and appends the ones whose text is not
//! already stored. There is no conflict resolution: the merge is append-only.
//! Newly added local quotes can be pushed out with a POST, also best-effort.
//!
//! - [`agent`] - fetch, map, merge and push
//! - [`scheduler`] - periodic ticks with an in-flight guard and `stop()`

mod agent;
mod scheduler;

pub use agent::{
    map_remote_items, InFlightGuard, SyncAgent, SyncError, SyncOutcome, SyncReport, SyncSettings,
    SERVER_CATEGORY,
};
pub use scheduler::SyncHandle;
