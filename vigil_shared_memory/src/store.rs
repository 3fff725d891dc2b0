//! The segment store: generic typed record access.
//!
//! A [`SegmentStore`] turns a segment key into a file under its base
//! directory and runs the attach-copy-detach sequence for one record. Every
//! operation is a bounded sequence of those three steps with no wait state;
//! nothing blocks on another process.
//!
//! The generic operations are public so deployments can exchange their own
//! record types: implement [`ShmRecord`](crate::data::ShmRecord), pick a key,
//! and the same machinery applies.

use crate::data::ShmRecord;
use crate::discovery::{self, SegmentInfo};
use crate::error::{ShmError, ShmResult};
use crate::platform;
use crate::segment::{SegmentGuard, required_size, segment_file_name};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vigil::shm::keys::SegmentKey;

fn default_base_dir() -> PathBuf {
    PathBuf::from("/dev/shm")
}

fn default_prefix() -> String {
    "vigil".to_string()
}

/// Store configuration, embeddable in an application's TOML config.
///
/// # TOML Example
///
/// ```toml
/// [store]
/// base_dir = "/dev/shm"
/// prefix = "vigil"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the segment backing files.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// File name prefix separating this store's segments from anything else
    /// in the directory.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            prefix: default_prefix(),
        }
    }
}

/// Typed record store over keyed shared memory segments.
///
/// The store itself holds no OS resources; each operation attaches and
/// detaches on its own. Cloning is cheap and any number of stores (in any
/// number of processes) may address the same segments concurrently.
///
/// # Concurrency contract
///
/// No cross-process atomicity is guaranteed. Two concurrent full-record
/// writes to one key can interleave at the byte level and a concurrent read
/// can observe a torn record. Partial-field writers touch only their own
/// field group, so writers of disjoint groups do not corrupt each other, but
/// a partial writer racing a full-record writer can still tear. Deployments
/// that need mutual exclusion build with the `flock` feature.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    config: StoreConfig,
}

impl SegmentStore {
    /// Store with the default configuration (`/dev/shm`, prefix `vigil`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the backing file for `key`.
    pub fn segment_path(&self, key: SegmentKey) -> PathBuf {
        self.config
            .base_dir
            .join(segment_file_name(&self.config.prefix, key))
    }

    pub(crate) fn attach<T: ShmRecord>(&self, key: SegmentKey) -> ShmResult<SegmentGuard> {
        SegmentGuard::attach(&self.segment_path(key), required_size::<T>(key))
            .map_err(|source| ShmError::SegmentUnavailable { key, source })
    }

    /// Serialize `value` into the segment for `key`, creating the segment on
    /// first use.
    ///
    /// The whole record is copied to the segment start; previous contents
    /// past the record are left as they were.
    pub fn write_record<T: ShmRecord>(&self, key: SegmentKey, value: &T) -> ShmResult<()> {
        let mut segment = self.attach::<T>(key)?;
        segment.bytes_mut()[..core::mem::size_of::<T>()]
            .copy_from_slice(bytemuck::bytes_of(value));
        Ok(())
    }

    /// Deserialize the current contents of the segment for `key`, creating
    /// the segment on first use.
    ///
    /// Never waits for a producer: a segment nobody has written reads as the
    /// zeroed record.
    pub fn read_record<T: ShmRecord>(&self, key: SegmentKey) -> ShmResult<T> {
        let segment = self.attach::<T>(key)?;
        Ok(bytemuck::pod_read_unaligned(
            &segment.bytes()[..core::mem::size_of::<T>()],
        ))
    }

    /// Mutate the stored record in place through the mapping.
    ///
    /// `update` sees the record as it currently is in the segment; only the
    /// fields it assigns are written, which is what keeps independent
    /// partial-field writers out of each other's way.
    pub fn update_record<T: ShmRecord, R>(
        &self,
        key: SegmentKey,
        update: impl FnOnce(&mut T) -> R,
    ) -> ShmResult<R> {
        let mut segment = self.attach::<T>(key)?;
        let record: &mut T =
            bytemuck::from_bytes_mut(&mut segment.bytes_mut()[..core::mem::size_of::<T>()]);
        Ok(update(record))
    }

    /// Whether the segment for `key` currently exists.
    pub fn segment_exists(&self, key: SegmentKey) -> bool {
        self.segment_path(key).exists()
    }

    /// Remove the segment for `key`.
    ///
    /// Idempotent; removing an absent segment is not an error. Processes
    /// still attached keep their mapping until they detach — only new
    /// attachments start from a fresh, zeroed segment.
    pub fn remove_segment(&self, key: SegmentKey) -> ShmResult<()> {
        match platform::remove_segment_file(&self.segment_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ShmError::SegmentUnavailable { key, source }),
        }
    }

    /// Enumerate this store's existing segments.
    pub fn list_segments(&self) -> ShmResult<Vec<SegmentInfo>> {
        discovery::list_segments(&self.config)
    }
}
