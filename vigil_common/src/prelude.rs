//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use vigil_common::prelude::*;` and get
//! the most important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{CAMERA_NONE, MAX_CAMERAS};

// ─── Shared Memory ──────────────────────────────────────────────────
pub use crate::shm::consts::{SEGMENT_RESERVE, UPDATE_NONE, UPDATE_PENDING};
pub use crate::shm::keys::{SegmentKey, max_alloc_size};
