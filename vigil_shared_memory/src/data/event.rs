//! Detection and recording event records.

use super::{ShmRecord, Timeval, impl_default_zeroed};
use static_assertions::const_assert_eq;
use vigil::consts::{GATEWAY_ID_LEN, WARNING_DATA_MAX};

/// One detection or crash event observed by a camera pipeline.
///
/// Published to the approach slot of the camera named by `camera`
/// ([`CAMERA_NONE`](vigil::consts::CAMERA_NONE) selects the camera-less
/// slot), or to the crash slot for cameras `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct Warning {
    /// When the detection sequence started.
    pub start_time: Timeval,
    /// When the event itself fired.
    pub event_time: Timeval,
    /// Camera the event belongs to; selects the segment on write.
    pub camera: i32,
    /// Event code assigned by the detector.
    pub event: i32,
    /// Video frame index at the event instant.
    pub frame_index: i32,
    /// Number of meaningful bytes in `data`.
    pub data_len: u8,
    /// Detector-specific payload, zero padded past `data_len`.
    pub data: [u8; WARNING_DATA_MAX],
}

// SAFETY: packed aggregate of integer primitives and byte arrays — no
// padding, all bit patterns valid.
unsafe impl bytemuck::Zeroable for Warning {}
unsafe impl bytemuck::Pod for Warning {}

impl ShmRecord for Warning {
    const NAME: &'static str = "warning";
}

const_assert_eq!(core::mem::size_of::<Warning>(), 173);

/// Collision-risk alert relayed from the external UWB gateway.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct CrashRisk {
    /// When the gateway raised the alert.
    pub alert_time: Timeval,
    /// When this unit received it.
    pub recv_time: Timeval,
    /// Identifier of the sending gateway, null terminated.
    pub gateway_id: [u8; GATEWAY_ID_LEN],
    /// UWB tag that triggered the alert.
    pub tag_id: u32,
    /// Reported approach speed.
    pub speed: u32,
    /// Alerts received from this tag so far.
    pub count: u32,
}

// SAFETY: packed aggregate of integer primitives and byte arrays — no
// padding, all bit patterns valid.
unsafe impl bytemuck::Zeroable for CrashRisk {}
unsafe impl bytemuck::Pod for CrashRisk {}

impl ShmRecord for CrashRisk {
    const NAME: &'static str = "crash_risk";
}

const_assert_eq!(core::mem::size_of::<CrashRisk>(), 108);

/// Video fragment boundary marker published by the recorder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct SplitTime {
    /// When the fragment was split.
    pub split_time: Timeval,
    /// Sequence number of the fragment that just closed.
    pub fragment: u32,
    /// Camera the recording belongs to; selects the segment on write.
    pub camera: i32,
}

// SAFETY: packed aggregate of integer primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for SplitTime {}
unsafe impl bytemuck::Pod for SplitTime {}

impl ShmRecord for SplitTime {
    const NAME: &'static str = "split_time";
}

const_assert_eq!(core::mem::size_of::<SplitTime>(), 24);

impl_default_zeroed!(Warning, CrashRisk, SplitTime);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_sizes() {
        assert_eq!(core::mem::size_of::<Warning>(), 173);
        assert_eq!(core::mem::size_of::<CrashRisk>(), 108);
        assert_eq!(core::mem::size_of::<SplitTime>(), 24);
    }

    #[test]
    fn warning_payload_capacity() {
        let mut warning = Warning::default();
        warning.data_len = 3;
        warning.data[..3].copy_from_slice(b"abc");
        assert_eq!(warning.data_len as usize, 3);
        assert_eq!(&warning.data[..3], b"abc");
        assert_eq!(warning.data[3], 0);
    }

    #[test]
    fn default_is_zeroed() {
        let risk = CrashRisk::default();
        assert_eq!({ risk.tag_id }, 0);
        assert_eq!(risk.gateway_id, [0u8; GATEWAY_ID_LEN]);
        assert_eq!({ risk.alert_time.sec }, 0);
    }
}
