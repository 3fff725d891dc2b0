//! # Vigil Shared Memory Exchange
//!
//! A shared-memory state-exchange layer for the independent processes of one
//! Vigil unit (camera pipelines, diagnostics collector, screen controller).
//! Producers publish small fixed-layout telemetry and event records into
//! keyed segments; consumers read the latest snapshot whenever they like.
//!
//! ## Model
//!
//! - One OS shared-memory segment per (record type, optional camera index),
//!   addressed by a stable integer key (`vigil_common::shm::keys`).
//! - A segment is created by the first `read_*`/`write_*` touching its key
//!   and sized to `max(record size, policy reserve)`; the size never shrinks
//!   afterwards, so any process can attach at any time.
//! - A segment holds only the most recent value. There is no queue, no
//!   handshake and no notification.
//!
//! ## Concurrency contract
//!
//! **No cross-process atomicity is guaranteed.** Operations take no lock and
//! never block on another process. Concurrent writes to the same key can
//! interleave at the byte level, and a read racing a write can observe a
//! torn record. Partial-field writers confine themselves to their own field
//! group, which keeps disjoint writers from corrupting each other but does
//! not protect against a racing full-record write. The protocol trades
//! consistency for simplicity and low latency; callers that need mutual
//! exclusion enable the `flock` feature, which wraps every operation in an
//! exclusive advisory file lock per key.
//!
//! ## Usage
//!
//! ```no_run
//! use vigil_shared_memory::{SegmentStore, ShmResult};
//! use vigil_shared_memory::data::{Accelerometer, Timeval};
//!
//! # fn main() -> ShmResult<()> {
//! let store = SegmentStore::new();
//!
//! // Producer process
//! let mut sample = Accelerometer::default();
//! sample.tv = Timeval::now();
//! sample.vt = 12;
//! store.write_accelerometer(&sample)?;
//!
//! // Consumer process, any time later
//! let latest = store.read_accelerometer()?;
//! println!("vt = {}", { latest.vt });
//! # Ok(())
//! # }
//! ```
//!
//! The position-phase mailbox is the one read with side effects:
//!
//! ```no_run
//! use vigil_shared_memory::{PhaseRead, SegmentStore, ShmResult};
//! use vigil_shared_memory::data::PositionPhase;
//!
//! # fn main() -> ShmResult<()> {
//! let store = SegmentStore::new();
//! store.write_position_phase(&PositionPhase::pending(0, 0.7, 0.2))?;
//!
//! match store.take_position_phase(0)? {
//!     PhaseRead::Consumed(obs) => {
//!         // Ratios come back ordered, and the slot is now cleared.
//!         assert_eq!({ obs.p1 }, 0.2);
//!         assert_eq!({ obs.p2 }, 0.7);
//!     }
//!     PhaseRead::Stale(_) => { /* nothing new since the last take */ }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Every operation returns [`ShmResult`]. Failures are local and
//! recoverable: an invalid camera index, an unavailable segment, or an
//! out-of-range mailbox ratio. Nothing retries internally and nothing
//! panics; retry policy belongs to the caller.
//!
//! ## Lifetime
//!
//! Segments live until [`SegmentStore::remove_segment`] or a host reboot;
//! this layer never removes them on its own.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod segment;
pub mod store;
pub mod telemetry;

pub use data::*;
pub use discovery::{SegmentInfo, list_segments};
pub use error::{ShmError, ShmResult};
pub use segment::{SegmentGuard, required_size};
pub use store::{SegmentStore, StoreConfig};
pub use telemetry::PhaseRead;

/// Initialize tracing for the host process.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
