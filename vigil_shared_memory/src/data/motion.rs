//! Motion sensing records: accelerometer, radar and the position-phase
//! mailbox payload.

use super::{ShmRecord, Timeval, impl_default_zeroed};
use static_assertions::const_assert_eq;
use vigil::shm::consts::UPDATE_PENDING;

/// Latest accelerometer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct Accelerometer {
    /// Sample time.
    pub tv: Timeval,
    /// Position, x axis (raw sensor units).
    pub x: i16,
    /// Position, y axis.
    pub y: i16,
    /// Position, z axis.
    pub z: i16,
    /// Velocity, x axis.
    pub vx: i16,
    /// Velocity, y axis.
    pub vy: i16,
    /// Velocity, z axis.
    pub vz: i16,
    /// Velocity magnitude.
    pub vt: i16,
}

// SAFETY: packed aggregate of integer primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for Accelerometer {}
unsafe impl bytemuck::Pod for Accelerometer {}

impl ShmRecord for Accelerometer {
    const NAME: &'static str = "accelerometer";
}

const_assert_eq!(core::mem::size_of::<Accelerometer>(), 30);

/// Configured accelerometer trigger thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, packed)]
pub struct AccelerometerThreshold {
    /// Threshold on the velocity magnitude.
    pub total: i32,
    /// Per-axis threshold, x.
    pub x: i32,
    /// Per-axis threshold, y.
    pub y: i32,
    /// Per-axis threshold, z.
    pub z: i32,
}

// SAFETY: packed aggregate of integer primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for AccelerometerThreshold {}
unsafe impl bytemuck::Pod for AccelerometerThreshold {}

impl ShmRecord for AccelerometerThreshold {
    const NAME: &'static str = "accelerometer_threshold";
}

const_assert_eq!(core::mem::size_of::<AccelerometerThreshold>(), 16);

/// Pending approach-ratio observation, consumed on read.
///
/// Payload of the single-slot mailbox: the producer deposits at most one
/// pending observation (`update` set to the pending sentinel) and the first
/// consumer to read it takes it. Ratio validation and `p1 <= p2`
/// canonicalization happen at consume time, not production time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct PositionPhase {
    /// Mailbox flag; [`UPDATE_PENDING`] marks an unconsumed observation.
    pub update: i32,
    /// Camera the observation belongs to; selects the segment on write.
    pub camera: i32,
    /// First approach ratio, in `[0, 1]` once validated.
    pub p1: f64,
    /// Second approach ratio, in `[0, 1]` once validated.
    pub p2: f64,
}

// SAFETY: packed aggregate of integer and float primitives — no padding,
// all bit patterns valid.
unsafe impl bytemuck::Zeroable for PositionPhase {}
unsafe impl bytemuck::Pod for PositionPhase {}

impl ShmRecord for PositionPhase {
    const NAME: &'static str = "position_phase";
}

const_assert_eq!(core::mem::size_of::<PositionPhase>(), 24);

impl PositionPhase {
    /// A pending observation for `camera`, ready to deposit.
    pub fn pending(camera: i32, p1: f64, p2: f64) -> Self {
        Self {
            update: UPDATE_PENDING,
            camera,
            p1,
            p2,
        }
    }
}

/// One radar target slot.
///
/// Distances are in 0.1 m steps, speeds in 0.1 m/s steps, signed where the
/// quantity is directional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, packed)]
pub struct RadarUnit {
    /// Target identifier assigned by the radar.
    pub id: u8,
    /// Lateral offset, -12.7 m to 12.7 m.
    pub x: i8,
    /// Forward offset.
    pub y: u8,
    /// Distance to target, 0 to 25.5 m.
    pub dist: u8,
    /// Closing speed, -12.7 m/s to 12.7 m/s.
    pub d_speed: i8,
    /// Lateral speed, -12.7 m/s to 12.7 m/s.
    pub o_speed: i8,
    /// Estimated target size class.
    pub size: u8,
    /// Detection flags.
    pub flag: u8,
}

// SAFETY: aggregate of single-byte primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for RadarUnit {}
unsafe impl bytemuck::Pod for RadarUnit {}

const_assert_eq!(core::mem::size_of::<RadarUnit>(), 8);

/// Latest four-target radar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct Radar {
    /// Frame time.
    pub tv: Timeval,
    /// Radar frame identifier.
    pub id: [u8; 2],
    /// Target slot 1.
    pub u1: RadarUnit,
    /// Target slot 2.
    pub u2: RadarUnit,
    /// Target slot 3.
    pub u3: RadarUnit,
    /// Target slot 4.
    pub u4: RadarUnit,
}

// SAFETY: packed aggregate of Pod sub-records and byte arrays — no padding,
// all bit patterns valid.
unsafe impl bytemuck::Zeroable for Radar {}
unsafe impl bytemuck::Pod for Radar {}

impl ShmRecord for Radar {
    const NAME: &'static str = "radar";
}

const_assert_eq!(core::mem::size_of::<Radar>(), 50);

impl_default_zeroed!(
    Accelerometer,
    AccelerometerThreshold,
    PositionPhase,
    RadarUnit,
    Radar,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_sizes() {
        assert_eq!(core::mem::size_of::<Accelerometer>(), 30);
        assert_eq!(core::mem::size_of::<AccelerometerThreshold>(), 16);
        assert_eq!(core::mem::size_of::<PositionPhase>(), 24);
        assert_eq!(core::mem::size_of::<RadarUnit>(), 8);
        assert_eq!(core::mem::size_of::<Radar>(), 50);
    }

    #[test]
    fn pending_sets_the_flag() {
        let phase = PositionPhase::pending(1, 0.25, 0.75);
        assert_eq!({ phase.update }, UPDATE_PENDING);
        assert_eq!({ phase.camera }, 1);
        assert_eq!({ phase.p1 }, 0.25);
        assert_eq!({ phase.p2 }, 0.75);
    }

    #[test]
    fn radar_units_lay_out_in_order() {
        let mut frame = Radar::default();
        frame.u1.id = 1;
        frame.u4.id = 4;
        let bytes = bytemuck::bytes_of(&frame);
        // tv (16) + id (2), then four 8-byte units.
        assert_eq!(bytes[18], 1);
        assert_eq!(bytes[18 + 24], 4);
    }
}
