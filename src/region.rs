//! Read-only mapped regions and the `map_file` entry point.
//!
//! This module provides the [`MappedRegion`] type returned by [`map_file`]:
//! a contiguous read-only byte view of a whole file, backed by the OS virtual
//! memory system, plus a single-shot release of the backing resources.

use std::fmt;
use std::fs::File;
use std::mem;
use std::ops::Deref;

use log::warn;

use crate::error::{MapError, ReleaseError, Result};
use crate::sys::RawMapping;

/// A read-only memory mapping of a whole file.
///
/// Created by [`map_file`]. The byte view has the length the file had at
/// mapping time and stays valid until the region is released. Two contracts
/// hold on both platform families:
///
/// - **Handle independence**: the region borrows the [`File`] only for the
///   duration of the mapping call. The caller may close the file immediately
///   afterwards; the mapped bytes remain readable until release.
/// - **Release exactly once**: [`MappedRegion::release`] consumes the region,
///   so a second release cannot be expressed. A region that is dropped
///   without an explicit release performs the same cleanup, logging (rather
///   than returning) any failure.
///
/// Zero-length files map to a region with an empty view and a no-op release;
/// no OS mapping is created, since the underlying syscalls reject zero-length
/// requests on both platform families.
///
/// The view is read-only, so regions may be read from any number of threads
/// concurrently and moved across threads freely.
pub struct MappedRegion {
    raw: RawMapping,
}

/// Map an open file's full contents into memory as a read-only byte region.
///
/// The file must be a readable regular file; opening and validating it is the
/// caller's job. The file's size is queried from the handle, so the view
/// length reflects the size at call time.
///
/// # Errors
///
/// - [`MapError::Metadata`] if the size query fails.
/// - [`MapError::TooLarge`] if the file exceeds this target's address space.
/// - [`MapError::MappingCreation`] / [`MapError::ViewCreation`] if the OS
///   refuses the mapping. Every failure path releases anything acquired
///   before the failing step, so an error never leaks a resource.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("data.bin")?;
/// let region = romap::map_file(&file)?;
/// drop(file); // the region stays valid without the file handle
///
/// println!("first byte: {:?}", region.first());
/// region.release()?;
/// # Ok(())
/// # }
/// ```
pub fn map_file(file: &File) -> Result<MappedRegion> {
    MappedRegion::map(file)
}

impl MappedRegion {
    /// Map `file` into memory; see [`map_file`].
    pub fn map(file: &File) -> Result<Self> {
        let size = file.metadata().map_err(MapError::metadata)?.len();
        let len = usize::try_from(size).map_err(|_| MapError::TooLarge { size })?;

        let raw = if len == 0 {
            RawMapping::empty()
        } else {
            RawMapping::map(file, len)?
        };

        Ok(Self { raw })
    }

    /// The mapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_slice()
    }

    /// Length of the view: the file's size at mapping time.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the view is empty (the file was zero-length).
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Release the mapping, returning every backing OS resource.
    ///
    /// Consumes the region, so the bytes cannot be touched afterwards and a
    /// second release cannot be written. A [`ReleaseError`] is diagnostic
    /// only; all release steps have already been attempted by the time it is
    /// returned, and there is no further corrective action to take.
    pub fn release(mut self) -> std::result::Result<(), ReleaseError> {
        let result = self.raw.unmap();
        // Cleanup already ran; Drop must not run it again.
        mem::forget(self);
        result.map_err(ReleaseError::new)
    }
}

impl Deref for MappedRegion {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for MappedRegion {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for MappedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedRegion")
            .field("len", &self.len())
            .finish()
    }
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        if let Err(err) = self.raw.unmap() {
            // No corrective action is possible here; report and continue.
            warn!("releasing mapped region during drop failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with known content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test data");
        file.flush().expect("Failed to flush test data");
        file
    }

    #[test]
    fn test_hello_world_scenario() {
        let temp_file = create_test_file(b"hello world");
        let file = File::open(temp_file.path()).unwrap();

        let region = map_file(&file).unwrap();
        assert_eq!(region.len(), 11);
        assert_eq!(region.as_bytes(), b"hello world");

        region.release().unwrap();
    }

    #[test]
    fn test_empty_file_maps_to_empty_view() {
        let temp_file = create_test_file(b"");
        let file = File::open(temp_file.path()).unwrap();

        let region = map_file(&file).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.len(), 0);
        assert_eq!(region.as_bytes(), b"");

        region.release().unwrap();
    }

    #[test]
    fn test_deref_and_as_ref_access() {
        let temp_file = create_test_file(b"line1\nline2\n");
        let file = File::open(temp_file.path()).unwrap();
        let region = map_file(&file).unwrap();

        // Deref gives slice methods directly
        assert!(region.starts_with(b"line1"));
        assert_eq!(region[6..], *b"line2\n");

        let bytes: &[u8] = region.as_ref();
        assert_eq!(bytes.len(), 12);

        region.release().unwrap();
    }

    #[test]
    fn test_length_matches_file_size_at_call_time() {
        let content = vec![0xabu8; 4096 + 17];
        let temp_file = create_test_file(&content);
        let file = File::open(temp_file.path()).unwrap();

        let size = file.metadata().unwrap().len();
        let region = map_file(&file).unwrap();
        assert_eq!(region.len() as u64, size);

        region.release().unwrap();
    }

    #[test]
    fn test_debug_shows_length() {
        let temp_file = create_test_file(b"abc");
        let file = File::open(temp_file.path()).unwrap();
        let region = map_file(&file).unwrap();

        assert_eq!(format!("{region:?}"), "MappedRegion { len: 3 }");

        region.release().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unmappable_handle_yields_creation_error_without_region() {
        // Directories can be opened and stat'ed but not mapped, which
        // exercises the view-creation failure path deterministically.
        let dir = tempfile::tempdir().unwrap();
        let handle = File::open(dir.path()).unwrap();

        assert!(matches!(
            map_file(&handle),
            Err(MapError::ViewCreation { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_closed_descriptor_yields_metadata_error() {
        use std::mem::ManuallyDrop;
        use std::os::unix::io::{AsRawFd, FromRawFd};

        let temp_file = create_test_file(b"soon stale");
        let file = File::open(temp_file.path()).unwrap();

        // Duplicate the descriptor and close the copy, leaving the original
        // handle untouched. ManuallyDrop keeps File from closing the stale
        // number a second time.
        let fd = unsafe { libc::dup(file.as_raw_fd()) };
        assert!(fd >= 0);
        assert_eq!(unsafe { libc::close(fd) }, 0);
        let stale = ManuallyDrop::new(unsafe { File::from_raw_fd(fd) });

        assert!(matches!(
            map_file(&stale),
            Err(MapError::Metadata { .. })
        ));
    }
}
