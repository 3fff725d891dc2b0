//! Segment addressing, sizing and the attach guard.

use crate::data::ShmRecord;
use crate::platform;
use memmap2::MmapMut;
use std::io;
use std::path::Path;
use vigil::shm::keys::{SegmentKey, max_alloc_size};

/// File name of the segment for `key` under a store prefix.
pub fn segment_file_name(prefix: &str, key: SegmentKey) -> String {
    format!("{prefix}_{key}")
}

/// Byte size to request when attaching the segment for `key` as record `T`.
///
/// The policy reserve wins while the record is smaller than it; a key the
/// policy does not know contributes nothing and the record's natural size
/// is used alone.
pub fn required_size<T: ShmRecord>(key: SegmentKey) -> usize {
    core::mem::size_of::<T>().max(max_alloc_size(key))
}

/// An attached segment mapping, unmapped (and unlocked) on drop.
///
/// With the `flock` feature the guard also holds an exclusive advisory lock
/// on the backing file for its whole lifetime, serializing operations on the
/// same key across processes that opt in. The default build takes no lock.
pub struct SegmentGuard {
    mmap: MmapMut,
    #[cfg(feature = "flock")]
    _lock: nix::fcntl::Flock<std::fs::File>,
}

impl SegmentGuard {
    /// Create-or-attach the segment at `path` with at least `min_size` bytes.
    pub fn attach(path: &Path, min_size: usize) -> io::Result<Self> {
        let file = platform::ensure_segment_file(path, min_size)?;
        Self::from_file(file)
    }

    #[cfg(feature = "flock")]
    fn from_file(file: std::fs::File) -> io::Result<Self> {
        let lock = platform::lock_segment_file(file)?;
        let mmap = platform::map_segment(&lock)?;
        Ok(Self { mmap, _lock: lock })
    }

    #[cfg(not(feature = "flock"))]
    fn from_file(file: std::fs::File) -> io::Result<Self> {
        let mmap = platform::map_segment(&file)?;
        Ok(Self { mmap })
    }

    /// The mapped segment contents.
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// The mapped segment contents, writable.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Accelerometer, Warning};
    use vigil::shm::consts::SEGMENT_RESERVE;
    use vigil::shm::keys::{SK_ACCELEROMETER, SK_EVENT_APPROACH_00};

    #[test]
    fn known_keys_take_the_reserve() {
        assert_eq!(required_size::<Accelerometer>(SK_ACCELEROMETER), SEGMENT_RESERVE);
        assert_eq!(required_size::<Warning>(SK_EVENT_APPROACH_00), SEGMENT_RESERVE);
    }

    #[test]
    fn unknown_keys_fall_back_to_record_size() {
        let key = SegmentKey(42);
        assert_eq!(
            required_size::<Accelerometer>(key),
            core::mem::size_of::<Accelerometer>()
        );
    }

    #[test]
    fn file_names_embed_the_key() {
        assert_eq!(
            segment_file_name("vigil", SK_ACCELEROMETER),
            "vigil_20190902"
        );
    }

    #[test]
    fn guard_maps_at_least_the_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seg");
        let guard = SegmentGuard::attach(&path, 256).unwrap();
        assert!(guard.bytes().len() >= 256);
    }
}
