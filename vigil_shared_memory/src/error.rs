//! Error types for shared memory operations

use thiserror::Error;
use vigil::shm::keys::SegmentKey;

/// Errors that can occur during shared memory operations
#[derive(Error, Debug)]
pub enum ShmError {
    /// Camera index outside the record type's legal set.
    #[error("camera index {camera} is not valid for {record} records")]
    InvalidCamera {
        /// Record type the index was resolved for
        record: &'static str,
        /// Rejected camera index
        camera: i32,
    },

    /// The segment could not be created, grown or mapped.
    #[error("segment {key} unavailable: {source}")]
    SegmentUnavailable {
        /// Key of the affected segment
        key: SegmentKey,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// A stored position-phase ratio was outside `[0, 1]` at consume time.
    #[error("stored ratio {value} is outside [0, 1]")]
    RatioOutOfRange {
        /// The offending stored value
        value: f64,
    },

    /// IO error outside any single segment (discovery walks).
    #[error("IO error: {source}")]
    Io {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

/// Result type for shared memory operations
pub type ShmResult<T> = Result<T, ShmError>;
