//! System-wide constants for the Vigil workspace.
//!
//! Single source of truth for all numeric limits.
//! Imported by all crates — no duplication permitted.

/// Number of physical cameras on the unit.
pub const MAX_CAMERAS: i32 = 2;

/// Camera index sentinel meaning "no specific camera".
///
/// Only the approach-event slot accepts it.
pub const CAMERA_NONE: i32 = -1;

/// Number of camera link channels reported in the diagnosis record.
pub const DIAGNOSIS_CAMERA_LINKS: usize = 4;

/// Capacity of the variable-length payload carried by a warning event.
pub const WARNING_DATA_MAX: usize = 128;

/// Fixed width of the UWB gateway identifier (null-terminated).
pub const GATEWAY_ID_LEN: usize = 64;

/// Number of target slots in one radar frame.
pub const RADAR_UNITS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(MAX_CAMERAS > 0);
        assert!(CAMERA_NONE < 0);
        assert!(DIAGNOSIS_CAMERA_LINKS >= MAX_CAMERAS as usize);
        assert!(WARNING_DATA_MAX > 0);
        assert!(GATEWAY_ID_LEN > 0);
        assert!(RADAR_UNITS > 0);
    }
}
