//! Central record definitions for the Vigil shared memory exchange.
//!
//! Every record here is a `#[repr(C, packed)]` aggregate of fixed-width
//! primitives. The packed in-memory image IS the wire format: independent
//! processes built at different times exchange these bytes verbatim through
//! shared memory, so field order and widths must never change once deployed.
//! Each layout is pinned by a `const_assert_eq!` on its size.
//!
//! Fixed-size types only (no `String`, `Vec`, references or padding).

pub mod event;
pub mod motion;
pub mod system;

pub use event::{CrashRisk, SplitTime, Warning};
pub use motion::{Accelerometer, AccelerometerThreshold, PositionPhase, Radar, RadarUnit};
pub use system::{ControlScreen, DiagnosisStats, TegraStats};

use static_assertions::const_assert_eq;
use std::time::{SystemTime, UNIX_EPOCH};

/// Marker for fixed-layout records exchanged through segments.
///
/// The store copies an implementor's packed bytes to and from its segment
/// verbatim; `bytemuck::Pod` guarantees every bit pattern is a valid value,
/// which is what makes reading a never-written (zero-filled) segment safe.
pub trait ShmRecord: bytemuck::Pod {
    /// Short name used in log events and error reporting.
    const NAME: &'static str;
}

/// Seconds/microseconds timestamp pair.
///
/// Matches `struct timeval` on 64-bit Linux (two 8-byte fields), the
/// timestamp convention every record in the exchange uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, packed)]
pub struct Timeval {
    /// Whole seconds since the UNIX epoch.
    pub sec: i64,
    /// Microseconds within the current second.
    pub usec: i64,
}

// SAFETY: two i64 fields, packed — no padding, all bit patterns valid.
unsafe impl bytemuck::Zeroable for Timeval {}
unsafe impl bytemuck::Pod for Timeval {}

const_assert_eq!(core::mem::size_of::<Timeval>(), 16);

impl Timeval {
    /// Current wall-clock time.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            sec: elapsed.as_secs() as i64,
            usec: elapsed.subsec_micros() as i64,
        }
    }
}

impl Default for Timeval {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

// Records implement Default via zeroed(). Zero is a valid value for every
// field, and a zeroed record is exactly what a consumer observes on a
// segment no producer has written yet.
macro_rules! impl_default_zeroed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Default for $ty {
                fn default() -> Self {
                    bytemuck::Zeroable::zeroed()
                }
            }
        )*
    };
}

pub(crate) use impl_default_zeroed;
