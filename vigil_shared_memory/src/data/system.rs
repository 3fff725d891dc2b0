//! Device health and control records.

use super::{ShmRecord, Timeval, impl_default_zeroed};
use static_assertions::const_assert_eq;

/// Host hardware health snapshot, polled from the Jetson stats interface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct TegraStats {
    /// Poll time.
    pub tv: Timeval,
    /// RAM in use, MB.
    pub ram: u32,
    /// Swap in use, MB.
    pub swap: u32,
    /// CPU utilization, percent.
    pub cpu: f32,
    /// Wireless subsystem temperature, Celsius.
    pub iwlwifi: f32,
    /// Power management IC temperature, Celsius.
    pub pmic: f32,
    /// GPU temperature, Celsius.
    pub gpu: f32,
    /// Always-on cluster temperature, Celsius.
    pub ao: f32,
    /// Board thermal zone temperature, Celsius.
    pub thermal: f32,
}

// SAFETY: packed aggregate of integer and float primitives — no padding,
// all bit patterns valid.
unsafe impl bytemuck::Zeroable for TegraStats {}
unsafe impl bytemuck::Pod for TegraStats {}

impl ShmRecord for TegraStats {
    const NAME: &'static str = "tegra_stats";
}

const_assert_eq!(core::mem::size_of::<TegraStats>(), 48);

/// Aggregate device health record.
///
/// Five independently scheduled subsystems each own one (timestamp, value)
/// field group and publish through the partial-field writers, so any two
/// groups in one read may be of different ages. Wire order keeps the five
/// timestamps ahead of the value block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct DiagnosisStats {
    /// When the battery group was last written.
    pub tv_battery: Timeval,
    /// When the USB storage group was last written.
    pub tv_usb_storage: Timeval,
    /// When the camera-link group was last written.
    pub tv_camera: Timeval,
    /// When the accelerometer group was last written.
    pub tv_accelerometer: Timeval,
    /// When the fan group was last written.
    pub tv_fan: Timeval,
    /// Battery charge level, percent.
    pub battery_level: i32,
    /// USB storage health code.
    pub usb_storage: i32,
    /// Link state of camera 0.
    pub camera00: i32,
    /// Link state of camera 1.
    pub camera01: i32,
    /// Link state of camera 2.
    pub camera02: i32,
    /// Link state of camera 3.
    pub camera03: i32,
    /// Accelerometer health code.
    pub accelerometer: i32,
    /// Fan health code.
    pub fan: i32,
}

// SAFETY: packed aggregate of integer primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for DiagnosisStats {}
unsafe impl bytemuck::Pod for DiagnosisStats {}

impl ShmRecord for DiagnosisStats {
    const NAME: &'static str = "diagnosis_stats";
}

const_assert_eq!(core::mem::size_of::<DiagnosisStats>(), 112);

/// Desired screen orientation, settable by two independent actors.
///
/// The touch handler and the GPIO watcher each own one (timestamp,
/// orientation) pair; the screen controller reads both and applies the most
/// recent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, packed)]
pub struct ControlScreen {
    /// When the manual-touch pair was last written.
    pub manual_time: Timeval,
    /// When the GPIO pair was last written.
    pub gpio_time: Timeval,
    /// Orientation requested by manual touch.
    pub screen_manual: i32,
    /// Orientation requested by the GPIO line.
    pub screen_gpio: i32,
}

// SAFETY: packed aggregate of integer primitives — no padding, all bit
// patterns valid.
unsafe impl bytemuck::Zeroable for ControlScreen {}
unsafe impl bytemuck::Pod for ControlScreen {}

impl ShmRecord for ControlScreen {
    const NAME: &'static str = "control_screen";
}

const_assert_eq!(core::mem::size_of::<ControlScreen>(), 40);

impl_default_zeroed!(TegraStats, DiagnosisStats, ControlScreen);
