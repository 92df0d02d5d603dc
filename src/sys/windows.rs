//! Windows mapping strategy built on `CreateFileMappingW`/`MapViewOfFile`.
//!
//! Unlike the POSIX strategy this one acquires two kernel resources: the
//! file-mapping object and the mapped view. The mapping object must outlive
//! the view, so `unmap` tears them down in view-then-handle order and always
//! attempts both steps.

use std::fs::File;
use std::io;
use std::os::windows::io::AsRawHandle;
use std::ptr;
use std::slice;

use windows_sys::Win32::Foundation::{CloseHandle, HANDLE};
use windows_sys::Win32::System::Memory::{
    CreateFileMappingW, MapViewOfFile, UnmapViewOfFile, FILE_MAP_READ,
    MEMORY_MAPPED_VIEW_ADDRESS, PAGE_READONLY,
};

use crate::error::{MapError, Result};

/// A raw read-only view of a whole file plus the kernel mapping object that
/// backs it.
///
/// Null fields mark the empty or already-unmapped state; `unmap` is
/// idempotent so a drop after an explicit release touches nothing.
pub(crate) struct RawMapping {
    view: *mut core::ffi::c_void,
    len: usize,
    mapping: HANDLE,
}

// Safety: the view is read-only for its entire lifetime, so references into
// it may be shared and sent across threads freely; the OS guarantees coherent
// reads of a read-only view. The mapping handle is only touched by `unmap`,
// which requires exclusive access.
unsafe impl Send for RawMapping {}
unsafe impl Sync for RawMapping {}

impl RawMapping {
    /// A mapping with no backing view, used for zero-length files.
    pub(crate) fn empty() -> Self {
        Self {
            view: ptr::null_mut(),
            len: 0,
            mapping: ptr::null_mut(),
        }
    }

    /// Map `len` bytes of `file` starting at offset 0, read-only.
    ///
    /// `len` must be nonzero; `CreateFileMappingW` rejects empty files, which
    /// is why callers route them through [`RawMapping::empty`].
    pub(crate) fn map(file: &File, len: usize) -> Result<Self> {
        let mapping = unsafe {
            CreateFileMappingW(
                file.as_raw_handle() as HANDLE,
                ptr::null(),
                PAGE_READONLY,
                0,
                0,
                ptr::null(),
            )
        };
        if mapping.is_null() {
            return Err(MapError::mapping_creation(io::Error::last_os_error()));
        }

        let view = unsafe { MapViewOfFile(mapping, FILE_MAP_READ, 0, 0, 0) };
        if view.Value.is_null() {
            let err = io::Error::last_os_error();
            // The mapping object was already created; close it before
            // surfacing the view failure so nothing leaks.
            unsafe { CloseHandle(mapping) };
            return Err(MapError::view_creation(err));
        }

        Ok(Self {
            view: view.Value,
            len,
            mapping,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        if self.view.is_null() {
            return &[];
        }
        // Safety: `view` came from a successful MapViewOfFile over `len`
        // bytes and stays valid until `unmap` nulls it out.
        unsafe { slice::from_raw_parts(self.view as *const u8, self.len) }
    }

    /// Unmap the view, then close the mapping-object handle. Both steps run
    /// even if the first fails; the first failure is the one reported.
    /// Idempotent: fields are nulled as they are torn down.
    pub(crate) fn unmap(&mut self) -> io::Result<()> {
        let mut first_err = None;

        if !self.view.is_null() {
            let ok = unsafe { UnmapViewOfFile(MEMORY_MAPPED_VIEW_ADDRESS { Value: self.view }) };
            if ok == 0 {
                first_err = Some(io::Error::last_os_error());
            }
            self.view = ptr::null_mut();
        }

        if !self.mapping.is_null() {
            let ok = unsafe { CloseHandle(self.mapping) };
            if ok == 0 && first_err.is_none() {
                first_err = Some(io::Error::last_os_error());
            }
            self.mapping = ptr::null_mut();
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
