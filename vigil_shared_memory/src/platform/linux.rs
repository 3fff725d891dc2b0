//! Linux-specific shared memory operations
//!
//! Segments are plain files in a tmpfs directory (`/dev/shm` by default),
//! mapped read-write by every attached process. The OS zero-fills pages on
//! first allocation, which is what gives a never-written segment its
//! all-zeroes content.

use memmap2::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// Open the backing file for a segment, creating it if absent, and grow it
/// to at least `min_size` bytes.
///
/// The file is never truncated: another process may already be attached
/// expecting the current size, and that bound must not shrink for the
/// lifetime of the segment.
pub fn ensure_segment_file(path: &Path, min_size: usize) -> io::Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .mode(0o666) // any local process may attach
        .open(path)?;

    let len = file.metadata()?.len();
    if (len as usize) < min_size {
        file.set_len(min_size as u64)?;
        tracing::debug!(path = %path.display(), size = min_size, "segment created or grown");
    }

    Ok(file)
}

/// Map the whole segment read-write.
pub fn map_segment(file: &File) -> io::Result<MmapMut> {
    unsafe { MmapOptions::new().map_mut(file) }
}

/// Unlink the backing file.
///
/// Existing mappings stay valid until their owners unmap; only new
/// attachments see the segment as gone.
pub fn remove_segment_file(path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
}

/// Take an exclusive advisory lock on the segment's backing file.
///
/// Blocks until any other lock holder releases. The lock drops with the
/// returned guard.
#[cfg(feature = "flock")]
pub fn lock_segment_file(file: File) -> io::Result<nix::fcntl::Flock<File>> {
    nix::fcntl::Flock::lock(file, nix::fcntl::FlockArg::LockExclusive)
        .map_err(|(_, errno)| io::Error::from_raw_os_error(errno as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_and_grows_but_never_shrinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segment");

        let file = ensure_segment_file(&path, 64).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 64);

        let file = ensure_segment_file(&path, 256).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 256);

        // Re-attaching with a smaller request keeps the larger size.
        let file = ensure_segment_file(&path, 32).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 256);
    }

    #[test]
    fn fresh_segment_reads_as_zeroes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segment");

        let file = ensure_segment_file(&path, 128).unwrap();
        let mmap = map_segment(&file).unwrap();
        assert!(mmap.iter().all(|&b| b == 0));
    }

    #[test]
    fn remove_unlinks_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segment");

        ensure_segment_file(&path, 64).unwrap();
        assert!(path.exists());
        remove_segment_file(&path).unwrap();
        assert!(!path.exists());
    }
}
