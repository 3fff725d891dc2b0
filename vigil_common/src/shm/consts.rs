//! SHM (Shared Memory) constants.
//!
//! These constants define the fundamental parameters for the Vigil shared
//! memory exchange. They are the single source of truth - all other crates
//! should import from here.

/// Reserved byte size requested for every known segment key.
///
/// Every record is far smaller than this; the headroom lets record layouts
/// grow without invalidating segments already created by older builds. A
/// segment, once created, must never shrink below the size any attached
/// process expects.
pub const SEGMENT_RESERVE: usize = 256;

/// Sentinel size returned by the policy for keys it does not know.
///
/// Callers must treat it as "use the record's natural size only".
pub const SEGMENT_SIZE_UNKNOWN: usize = 0;

/// `update` flag value marking a pending position-phase observation.
pub const UPDATE_PENDING: i32 = 1;

/// `update` flag value after the pending observation has been consumed.
pub const UPDATE_NONE: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_has_headroom() {
        // Largest record today is the 173-byte warning event.
        assert!(SEGMENT_RESERVE >= 256);
    }

    #[test]
    fn flag_values_differ() {
        assert_ne!(UPDATE_PENDING, UPDATE_NONE);
    }
}
