//! devtrack-core: storage-backed state for the devtrack progress tracker.
//!
//! The crate owns the two persisted sequences (the build log and the ranked
//! plan list), the snapshot store they are written to, the pure statistics
//! derivation over the log, and the synchronous change bus that lets the
//! statistics consumer react to log mutations without re-reading storage.

pub mod bus;
pub mod confirm;
pub mod log;
pub mod model;
pub mod plans;
pub mod stats;
pub mod store;
