//! Typed accessors for every telemetry record.
//!
//! One `write_*`/`read_*` pair per record type, all thin wrappers over the
//! generic store operations: resolve the key (through the camera lookup
//! tables for multiplexed types), then copy the record in or out. The
//! position-phase mailbox and the partial-field writers add their own
//! semantics on top and are documented on their methods.
//!
//! All accessors share the store's concurrency contract: no cross-process
//! atomicity, latest value wins.

use crate::data::{
    Accelerometer, AccelerometerThreshold, ControlScreen, CrashRisk, DiagnosisStats,
    PositionPhase, Radar, ShmRecord, SplitTime, TegraStats, Warning,
};
use crate::error::{ShmError, ShmResult};
use crate::store::SegmentStore;
use vigil::shm::consts::{UPDATE_NONE, UPDATE_PENDING};
use vigil::shm::keys::{
    SegmentKey, SK_ACCELEROMETER, SK_ACCELEROMETER_THRESHOLD, SK_CONTROL_SCREEN,
    SK_DIAGNOSIS_STATS, SK_EVENT_CRASH_RISK, SK_RADAR, SK_TEGRA_STATS, approach_key, crash_key,
    position_phase_key, split_time_key,
};

/// Outcome of a position-phase mailbox read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseRead {
    /// No pending observation; the stored snapshot, returned verbatim and
    /// left in place.
    Stale(PositionPhase),
    /// A pending observation, validated and canonicalized (`p1 <= p2`). The
    /// slot has been cleared: the next read returns [`PhaseRead::Stale`]
    /// until a producer deposits again.
    Consumed(PositionPhase),
}

fn camera_key(
    record: &'static str,
    camera: i32,
    resolve: fn(i32) -> Option<SegmentKey>,
) -> ShmResult<SegmentKey> {
    resolve(camera).ok_or_else(|| {
        tracing::warn!(record, camera, "rejected camera index");
        ShmError::InvalidCamera { record, camera }
    })
}

impl SegmentStore {
    // ─── Warning events ─────────────────────────────────────────────

    /// Publish an approach event to the slot of `value.camera`.
    pub fn write_approach(&self, value: &Warning) -> ShmResult<()> {
        let key = camera_key(Warning::NAME, value.camera, approach_key)?;
        self.write_record(key, value)
    }

    /// Latest approach event for `camera` (`0`, `1` or
    /// [`CAMERA_NONE`](vigil::consts::CAMERA_NONE)).
    pub fn read_approach(&self, camera: i32) -> ShmResult<Warning> {
        let key = camera_key(Warning::NAME, camera, approach_key)?;
        self.read_record(key)
    }

    /// Publish a crash event to the slot of `value.camera`.
    pub fn write_crash(&self, value: &Warning) -> ShmResult<()> {
        let key = camera_key(Warning::NAME, value.camera, crash_key)?;
        self.write_record(key, value)
    }

    /// Latest crash event for `camera` (`0` or `1`).
    pub fn read_crash(&self, camera: i32) -> ShmResult<Warning> {
        let key = camera_key(Warning::NAME, camera, crash_key)?;
        self.read_record(key)
    }

    /// Publish a collision-risk alert.
    pub fn write_crash_risk(&self, value: &CrashRisk) -> ShmResult<()> {
        self.write_record(SK_EVENT_CRASH_RISK, value)
    }

    /// Latest collision-risk alert.
    pub fn read_crash_risk(&self) -> ShmResult<CrashRisk> {
        self.read_record(SK_EVENT_CRASH_RISK)
    }

    /// Publish a fragment boundary to the slot of `value.camera`.
    pub fn write_split_time(&self, value: &SplitTime) -> ShmResult<()> {
        let key = camera_key(SplitTime::NAME, value.camera, split_time_key)?;
        self.write_record(key, value)
    }

    /// Latest fragment boundary for `camera` (`0` or `1`).
    pub fn read_split_time(&self, camera: i32) -> ShmResult<SplitTime> {
        let key = camera_key(SplitTime::NAME, camera, split_time_key)?;
        self.read_record(key)
    }

    // ─── Motion sensing ─────────────────────────────────────────────

    /// Publish the configured accelerometer thresholds.
    pub fn write_accelerometer_threshold(
        &self,
        value: &AccelerometerThreshold,
    ) -> ShmResult<()> {
        self.write_record(SK_ACCELEROMETER_THRESHOLD, value)
    }

    /// Current accelerometer thresholds.
    pub fn read_accelerometer_threshold(&self) -> ShmResult<AccelerometerThreshold> {
        self.read_record(SK_ACCELEROMETER_THRESHOLD)
    }

    /// Publish an accelerometer sample.
    pub fn write_accelerometer(&self, value: &Accelerometer) -> ShmResult<()> {
        self.write_record(SK_ACCELEROMETER, value)
    }

    /// Latest accelerometer sample.
    pub fn read_accelerometer(&self) -> ShmResult<Accelerometer> {
        self.read_record(SK_ACCELEROMETER)
    }

    /// Publish a radar frame.
    pub fn write_radar(&self, value: &Radar) -> ShmResult<()> {
        self.write_record(SK_RADAR, value)
    }

    /// Latest radar frame.
    pub fn read_radar(&self) -> ShmResult<Radar> {
        self.read_record(SK_RADAR)
    }

    // ─── Position-phase mailbox ─────────────────────────────────────

    /// Deposit an observation in the mailbox of `value.camera`.
    ///
    /// Overwrites unconditionally — no validation and no consume semantics
    /// on this side; both happen when a consumer takes the observation.
    pub fn write_position_phase(&self, value: &PositionPhase) -> ShmResult<()> {
        let key = camera_key(PositionPhase::NAME, value.camera, position_phase_key)?;
        self.write_record(key, value)
    }

    /// Take the pending observation for `camera`, if any.
    ///
    /// The one destructive read in the exchange. If the stored `update` flag
    /// is not the pending sentinel the stored snapshot is returned verbatim
    /// as [`PhaseRead::Stale`] and nothing is mutated. Otherwise the stored
    /// ratios are validated against `[0, 1]` — an out-of-range value aborts
    /// with [`ShmError::RatioOutOfRange`] and leaves the slot untouched —
    /// then returned in `p1 <= p2` order as [`PhaseRead::Consumed`], and the
    /// slot is cleared (`update` reset, ratios zeroed, `camera` kept).
    pub fn take_position_phase(&self, camera: i32) -> ShmResult<PhaseRead> {
        let key = camera_key(PositionPhase::NAME, camera, position_phase_key)?;
        let mut segment = self.attach::<PositionPhase>(key)?;
        let stored: &mut PositionPhase = bytemuck::from_bytes_mut(
            &mut segment.bytes_mut()[..core::mem::size_of::<PositionPhase>()],
        );

        if stored.update != UPDATE_PENDING {
            return Ok(PhaseRead::Stale(*stored));
        }

        let (p1, p2) = (stored.p1, stored.p2);
        for ratio in [p1, p2] {
            if !(0.0..=1.0).contains(&ratio) {
                tracing::warn!(camera, ratio, "pending ratio outside [0, 1], slot kept");
                return Err(ShmError::RatioOutOfRange { value: ratio });
            }
        }

        let taken = PositionPhase {
            update: stored.update,
            camera: stored.camera,
            p1: if p2 < p1 { p2 } else { p1 },
            p2: if p2 < p1 { p1 } else { p2 },
        };

        stored.update = UPDATE_NONE;
        stored.p1 = 0.0;
        stored.p2 = 0.0;

        Ok(PhaseRead::Consumed(taken))
    }

    // ─── Device health ──────────────────────────────────────────────

    /// Publish a host hardware health snapshot.
    pub fn write_tegra_stats(&self, value: &TegraStats) -> ShmResult<()> {
        self.write_record(SK_TEGRA_STATS, value)
    }

    /// Latest host hardware health snapshot.
    pub fn read_tegra_stats(&self) -> ShmResult<TegraStats> {
        self.read_record(SK_TEGRA_STATS)
    }

    /// Publish a full diagnosis record, overwriting every field group.
    pub fn write_diagnosis_stats(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.write_record(SK_DIAGNOSIS_STATS, value)
    }

    /// Current diagnosis record.
    ///
    /// Field groups are written independently; the snapshot may mix ages
    /// across groups.
    pub fn read_diagnosis_stats(&self) -> ShmResult<DiagnosisStats> {
        self.read_record(SK_DIAGNOSIS_STATS)
    }

    /// Update only the battery group of the diagnosis record.
    pub fn write_diagnosis_battery(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.update_record(SK_DIAGNOSIS_STATS, |stored: &mut DiagnosisStats| {
            stored.tv_battery = value.tv_battery;
            stored.battery_level = value.battery_level;
        })
    }

    /// Update only the USB storage group of the diagnosis record.
    pub fn write_diagnosis_usb_storage(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.update_record(SK_DIAGNOSIS_STATS, |stored: &mut DiagnosisStats| {
            stored.tv_usb_storage = value.tv_usb_storage;
            stored.usb_storage = value.usb_storage;
        })
    }

    /// Update only the camera-link group of the diagnosis record.
    pub fn write_diagnosis_camera(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.update_record(SK_DIAGNOSIS_STATS, |stored: &mut DiagnosisStats| {
            stored.tv_camera = value.tv_camera;
            stored.camera00 = value.camera00;
            stored.camera01 = value.camera01;
            stored.camera02 = value.camera02;
            stored.camera03 = value.camera03;
        })
    }

    /// Update only the accelerometer group of the diagnosis record.
    pub fn write_diagnosis_accelerometer(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.update_record(SK_DIAGNOSIS_STATS, |stored: &mut DiagnosisStats| {
            stored.tv_accelerometer = value.tv_accelerometer;
            stored.accelerometer = value.accelerometer;
        })
    }

    /// Update only the fan group of the diagnosis record.
    pub fn write_diagnosis_fan(&self, value: &DiagnosisStats) -> ShmResult<()> {
        self.update_record(SK_DIAGNOSIS_STATS, |stored: &mut DiagnosisStats| {
            stored.tv_fan = value.tv_fan;
            stored.fan = value.fan;
        })
    }

    // ─── Screen control ─────────────────────────────────────────────

    /// Publish a full screen-control record, overwriting both pairs.
    pub fn write_control_screen(&self, value: &ControlScreen) -> ShmResult<()> {
        self.write_record(SK_CONTROL_SCREEN, value)
    }

    /// Current screen-control record.
    pub fn read_control_screen(&self) -> ShmResult<ControlScreen> {
        self.read_record(SK_CONTROL_SCREEN)
    }

    /// Update only the manual-touch pair of the screen-control record.
    pub fn write_manual_screen(&self, value: &ControlScreen) -> ShmResult<()> {
        self.update_record(SK_CONTROL_SCREEN, |stored: &mut ControlScreen| {
            stored.manual_time = value.manual_time;
            stored.screen_manual = value.screen_manual;
        })
    }

    /// Update only the GPIO pair of the screen-control record.
    pub fn write_gpio_screen(&self, value: &ControlScreen) -> ShmResult<()> {
        self.update_record(SK_CONTROL_SCREEN, |stored: &mut ControlScreen| {
            stored.gpio_time = value.gpio_time;
            stored.screen_gpio = value.screen_gpio;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    fn test_store() -> (tempfile::TempDir, SegmentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SegmentStore::with_config(StoreConfig {
            base_dir: dir.path().to_path_buf(),
            prefix: "test".to_string(),
        });
        (dir, store)
    }

    #[test]
    fn invalid_camera_is_rejected_before_any_segment_io() {
        let (_dir, store) = test_store();
        assert!(matches!(
            store.read_approach(99),
            Err(ShmError::InvalidCamera { camera: 99, .. })
        ));
        assert!(store.list_segments().unwrap().is_empty());
    }

    #[test]
    fn crash_slot_rejects_the_no_camera_sentinel() {
        let (_dir, store) = test_store();
        let mut value = Warning::default();
        value.camera = vigil::consts::CAMERA_NONE;
        assert!(matches!(
            store.write_crash(&value),
            Err(ShmError::InvalidCamera { camera: -1, .. })
        ));
    }

    #[test]
    fn approach_slots_are_distinct_per_camera() {
        let (_dir, store) = test_store();
        let mut cam0 = Warning::default();
        cam0.camera = 0;
        cam0.event = 10;
        let mut cam1 = Warning::default();
        cam1.camera = 1;
        cam1.event = 20;

        store.write_approach(&cam0).unwrap();
        store.write_approach(&cam1).unwrap();

        assert_eq!({ store.read_approach(0).unwrap().event }, 10);
        assert_eq!({ store.read_approach(1).unwrap().event }, 20);
    }

    #[test]
    fn take_on_an_empty_mailbox_is_stale() {
        let (_dir, store) = test_store();
        match store.take_position_phase(0).unwrap() {
            PhaseRead::Stale(snapshot) => {
                assert_eq!({ snapshot.update }, UPDATE_NONE);
            }
            other => panic!("expected Stale, got {other:?}"),
        }
    }
}
