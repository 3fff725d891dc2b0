//! Segment discovery and enumeration.
//!
//! Everything about a segment is recoverable from its backing file: the key
//! from the file name, the allocated size and last write time from the file
//! metadata. Listing is purely informational — segments appear and grow
//! while a walk is in progress.

use crate::error::ShmResult;
use crate::store::StoreConfig;
use std::time::SystemTime;
use vigil::shm::keys::SegmentKey;

/// Information about one existing segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    /// The segment's key.
    pub key: SegmentKey,
    /// Allocated size in bytes.
    pub size: u64,
    /// Last modification time of the backing file.
    pub modified: SystemTime,
}

/// Enumerate the segments of the store described by `config`, sorted by key.
///
/// Files under `base_dir` that do not match the store's `<prefix>_<key>`
/// naming pattern are ignored.
pub fn list_segments(config: &StoreConfig) -> ShmResult<Vec<SegmentInfo>> {
    let pattern = format!("{}_", config.prefix);
    let mut segments = Vec::new();

    for entry in std::fs::read_dir(&config.base_dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(suffix) = name.strip_prefix(&pattern) else {
            continue;
        };
        let Ok(raw) = suffix.parse::<u32>() else {
            continue;
        };
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        segments.push(SegmentInfo {
            key: SegmentKey(raw),
            size: metadata.len(),
            modified: metadata.modified()?,
        });
    }

    segments.sort_by_key(|info| info.key.0);
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Accelerometer, TegraStats};
    use crate::store::SegmentStore;
    use vigil::shm::consts::SEGMENT_RESERVE;
    use vigil::shm::keys::{SK_ACCELEROMETER, SK_TEGRA_STATS};

    #[test]
    fn lists_only_matching_segments_sorted_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            base_dir: dir.path().to_path_buf(),
            prefix: "test".to_string(),
        };
        let store = SegmentStore::with_config(config.clone());

        store
            .write_record(SK_TEGRA_STATS, &TegraStats::default())
            .unwrap();
        store
            .write_record(SK_ACCELEROMETER, &Accelerometer::default())
            .unwrap();
        // Unrelated files are skipped.
        std::fs::write(dir.path().join("other_123"), b"x").unwrap();
        std::fs::write(dir.path().join("test_notakey"), b"x").unwrap();

        let segments = list_segments(&config).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].key, SK_ACCELEROMETER);
        assert_eq!(segments[1].key, SK_TEGRA_STATS);
        assert_eq!(segments[0].size, SEGMENT_RESERVE as u64);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            base_dir: dir.path().to_path_buf(),
            prefix: "test".to_string(),
        };
        assert!(list_segments(&config).unwrap().is_empty());
    }
}
