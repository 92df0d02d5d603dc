//! POSIX mapping strategy built on `mmap`/`munmap`.

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::ptr;
use std::slice;

use crate::error::{MapError, Result};

/// A raw read-only, shared mapping of a whole file.
///
/// A null pointer marks the empty or already-unmapped state; `unmap` is
/// idempotent so a drop after an explicit release touches nothing.
pub(crate) struct RawMapping {
    ptr: *mut libc::c_void,
    len: usize,
}

// Safety: the mapping is read-only for its entire lifetime, so references
// into it may be shared and sent across threads freely; the OS guarantees
// coherent reads of a shared read-only mapping.
unsafe impl Send for RawMapping {}
unsafe impl Sync for RawMapping {}

impl RawMapping {
    /// A mapping with no backing pages, used for zero-length files.
    pub(crate) fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
        }
    }

    /// Map `len` bytes of `file` starting at offset 0, read-only and shared.
    ///
    /// `len` must be nonzero; the kernel rejects zero-length mappings, which
    /// is why callers route empty files through [`RawMapping::empty`].
    pub(crate) fn map(file: &File, len: usize) -> Result<Self> {
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len as libc::size_t,
                libc::PROT_READ,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            // A failed mmap leaves nothing to release.
            return Err(MapError::view_creation(io::Error::last_os_error()));
        }

        Ok(Self { ptr, len })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        if self.ptr.is_null() {
            return &[];
        }
        // Safety: `ptr` came from a successful mmap of `len` bytes and stays
        // valid until `unmap` nulls it out.
        unsafe { slice::from_raw_parts(self.ptr as *const u8, self.len) }
    }

    /// Return the mapped pages to the OS. Idempotent: the first call nulls
    /// the pointer, later calls are no-ops.
    pub(crate) fn unmap(&mut self) -> io::Result<()> {
        if self.ptr.is_null() {
            return Ok(());
        }

        let rc = unsafe { libc::munmap(self.ptr, self.len as libc::size_t) };
        self.ptr = ptr::null_mut();

        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
