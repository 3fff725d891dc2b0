//! Segment key constants and the sizing policy.
//!
//! One key per (record type, optional camera index) pair. The key values are
//! the wire-level protocol between independently built producer and consumer
//! processes: they must never change once deployed. Keys are date-coded
//! (YYYYMMDD of introduction).
//!
//! Multiplexed record types resolve their key through a lookup table from
//! camera index to key, so the legal index set for each type lives in exactly
//! one place.

use crate::consts::CAMERA_NONE;
use crate::shm::consts::{SEGMENT_RESERVE, SEGMENT_SIZE_UNKNOWN};

/// Identifier of one shared-memory segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentKey(pub u32);

impl std::fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Key Constants ──────────────────────────────────────────────────

/// Latest accelerometer sample.
pub const SK_ACCELEROMETER: SegmentKey = SegmentKey(20190902);
/// Configured accelerometer trigger thresholds.
pub const SK_ACCELEROMETER_THRESHOLD: SegmentKey = SegmentKey(20200301);
/// Approach event, camera 0.
pub const SK_EVENT_APPROACH_00: SegmentKey = SegmentKey(20200800);
/// Approach event, camera 1.
pub const SK_EVENT_APPROACH_01: SegmentKey = SegmentKey(20200801);
/// Crash event, camera 0.
pub const SK_EVENT_CRASH_00: SegmentKey = SegmentKey(20200802);
/// Crash event, camera 1.
pub const SK_EVENT_CRASH_01: SegmentKey = SegmentKey(20200803);
/// Approach event without a specific camera.
pub const SK_EVENT_APPROACH_FF: SegmentKey = SegmentKey(20200899);
/// Position-phase mailbox, camera 0.
pub const SK_POSITION_PHASE_00: SegmentKey = SegmentKey(20201010);
/// Position-phase mailbox, camera 1.
pub const SK_POSITION_PHASE_01: SegmentKey = SegmentKey(20201011);
/// Video fragment boundary, camera 0.
pub const SK_EVENT_SPLIT_TIME_00: SegmentKey = SegmentKey(20201201);
/// Video fragment boundary, camera 1.
pub const SK_EVENT_SPLIT_TIME_01: SegmentKey = SegmentKey(20201202);
/// Host hardware health snapshot.
pub const SK_TEGRA_STATS: SegmentKey = SegmentKey(20210315);
/// Aggregate device health record.
pub const SK_DIAGNOSIS_STATS: SegmentKey = SegmentKey(20210316);
/// Collision-risk alert from the UWB gateway.
pub const SK_EVENT_CRASH_RISK: SegmentKey = SegmentKey(20220405);
/// Desired screen orientation.
pub const SK_CONTROL_SCREEN: SegmentKey = SegmentKey(20220406);
/// Latest radar frame.
pub const SK_RADAR: SegmentKey = SegmentKey(20221025);

/// Every key the sizing policy recognizes.
pub const KNOWN_KEYS: [SegmentKey; 16] = [
    SK_ACCELEROMETER,
    SK_ACCELEROMETER_THRESHOLD,
    SK_EVENT_APPROACH_00,
    SK_EVENT_APPROACH_01,
    SK_EVENT_APPROACH_FF,
    SK_EVENT_CRASH_00,
    SK_EVENT_CRASH_01,
    SK_POSITION_PHASE_00,
    SK_POSITION_PHASE_01,
    SK_EVENT_SPLIT_TIME_00,
    SK_EVENT_SPLIT_TIME_01,
    SK_TEGRA_STATS,
    SK_DIAGNOSIS_STATS,
    SK_EVENT_CRASH_RISK,
    SK_CONTROL_SCREEN,
    SK_RADAR,
];

// ─── Sizing Policy ──────────────────────────────────────────────────

/// Minimum byte size to request when creating the segment for `key`.
///
/// Pure and total: every known key maps to [`SEGMENT_RESERVE`], any other
/// key to [`SEGMENT_SIZE_UNKNOWN`] (0). Callers combine the result with the
/// record's natural size via `max`, so an unknown key falls back to the
/// record size alone.
pub fn max_alloc_size(key: SegmentKey) -> usize {
    if KNOWN_KEYS.contains(&key) {
        SEGMENT_RESERVE
    } else {
        SEGMENT_SIZE_UNKNOWN
    }
}

// ─── Camera Index Tables ────────────────────────────────────────────

const APPROACH_KEYS: [(i32, SegmentKey); 3] = [
    (0, SK_EVENT_APPROACH_00),
    (1, SK_EVENT_APPROACH_01),
    (CAMERA_NONE, SK_EVENT_APPROACH_FF),
];

const CRASH_KEYS: [(i32, SegmentKey); 2] = [(0, SK_EVENT_CRASH_00), (1, SK_EVENT_CRASH_01)];

const POSITION_PHASE_KEYS: [(i32, SegmentKey); 2] =
    [(0, SK_POSITION_PHASE_00), (1, SK_POSITION_PHASE_01)];

const SPLIT_TIME_KEYS: [(i32, SegmentKey); 2] =
    [(0, SK_EVENT_SPLIT_TIME_00), (1, SK_EVENT_SPLIT_TIME_01)];

fn lookup(table: &[(i32, SegmentKey)], camera: i32) -> Option<SegmentKey> {
    table.iter().find(|(c, _)| *c == camera).map(|(_, k)| *k)
}

/// Segment key for the approach event of `camera` (`0`, `1` or
/// [`CAMERA_NONE`]). `None` for any other index.
pub fn approach_key(camera: i32) -> Option<SegmentKey> {
    lookup(&APPROACH_KEYS, camera)
}

/// Segment key for the crash event of `camera` (`0` or `1`).
pub fn crash_key(camera: i32) -> Option<SegmentKey> {
    lookup(&CRASH_KEYS, camera)
}

/// Segment key for the position-phase mailbox of `camera` (`0` or `1`).
pub fn position_phase_key(camera: i32) -> Option<SegmentKey> {
    lookup(&POSITION_PHASE_KEYS, camera)
}

/// Segment key for the split-time marker of `camera` (`0` or `1`).
pub fn split_time_key(camera: i32) -> Option<SegmentKey> {
    lookup(&SPLIT_TIME_KEYS, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in KNOWN_KEYS.iter().enumerate() {
            for b in &KNOWN_KEYS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn known_keys_get_the_reserve() {
        for key in KNOWN_KEYS {
            assert_eq!(max_alloc_size(key), SEGMENT_RESERVE);
        }
    }

    #[test]
    fn unknown_key_sizes_to_zero() {
        assert_eq!(max_alloc_size(SegmentKey(0)), 0);
        assert_eq!(max_alloc_size(SegmentKey(19991231)), 0);
    }

    #[test]
    fn approach_accepts_the_no_camera_sentinel() {
        assert_eq!(approach_key(0), Some(SK_EVENT_APPROACH_00));
        assert_eq!(approach_key(1), Some(SK_EVENT_APPROACH_01));
        assert_eq!(approach_key(CAMERA_NONE), Some(SK_EVENT_APPROACH_FF));
        assert_eq!(approach_key(2), None);
    }

    #[test]
    fn crash_rejects_the_sentinel() {
        assert_eq!(crash_key(0), Some(SK_EVENT_CRASH_00));
        assert_eq!(crash_key(1), Some(SK_EVENT_CRASH_01));
        assert_eq!(crash_key(CAMERA_NONE), None);
        assert_eq!(crash_key(99), None);
    }

    #[test]
    fn phase_and_split_cover_both_cameras() {
        assert_eq!(position_phase_key(0), Some(SK_POSITION_PHASE_00));
        assert_eq!(position_phase_key(1), Some(SK_POSITION_PHASE_01));
        assert_eq!(position_phase_key(2), None);
        assert_eq!(split_time_key(0), Some(SK_EVENT_SPLIT_TIME_00));
        assert_eq!(split_time_key(1), Some(SK_EVENT_SPLIT_TIME_01));
        assert_eq!(split_time_key(-1), None);
    }
}
