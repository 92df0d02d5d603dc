//! Error types and handling infrastructure for romap.
//!
//! This module provides the error types for mapping creation and release using
//! `thiserror`, keeping the underlying `std::io::Error` available as a source
//! so callers can still inspect OS error codes.
//!
//! ## Design Principles
//!
//! - **Stage identification**: Creation errors say which step failed (metadata
//!   query, mapping-object creation, or view creation)
//! - **Recoverable by default**: No creation failure terminates the process;
//!   policy belongs to the caller
//! - **Release never escalates**: Release failures are reportable, not fatal

use std::io;
use thiserror::Error;

/// The error type for mapping creation.
///
/// Every variant corresponds to a distinct stage of `map_file`; whichever
/// stage fails, no OS resource acquired by an earlier stage is left behind.
#[derive(Error, Debug)]
pub enum MapError {
    /// The file's size could not be determined from its handle.
    #[error("failed to query file metadata: {source}")]
    Metadata {
        #[source]
        source: io::Error,
    },

    /// The OS refused to create the file-mapping object (Windows only; the
    /// POSIX strategy has no separate mapping-object step).
    #[error("failed to create file mapping object: {source}")]
    MappingCreation {
        #[source]
        source: io::Error,
    },

    /// The OS refused to map a view of the file into the address space.
    #[error("failed to map view of file: {source}")]
    ViewCreation {
        #[source]
        source: io::Error,
    },

    /// The file is larger than the address space of this target can map.
    #[error("file of {size} bytes is too large to map into the address space")]
    TooLarge { size: u64 },
}

/// Standard Result type for romap operations.
pub type Result<T> = std::result::Result<T, MapError>;

impl MapError {
    /// Create a Metadata error from the failed size query.
    pub fn metadata(source: io::Error) -> Self {
        Self::Metadata { source }
    }

    /// Create a MappingCreation error from the failed mapping-object step.
    pub fn mapping_creation(source: io::Error) -> Self {
        Self::MappingCreation { source }
    }

    /// Create a ViewCreation error from the failed view step.
    pub fn view_creation(source: io::Error) -> Self {
        Self::ViewCreation { source }
    }
}

/// The error type for releasing a mapped region.
///
/// Raised when unmapping the view or closing the mapping-object handle fails.
/// By the time release runs the caller no longer needs the bytes, so this is
/// diagnostic information, never grounds for a panic. If both release steps
/// fail on Windows, the first failure is the one reported.
#[derive(Error, Debug)]
#[error("failed to release mapped region: {source}")]
pub struct ReleaseError {
    #[source]
    source: io::Error,
}

impl ReleaseError {
    pub(crate) fn new(source: io::Error) -> Self {
        Self { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_messages() {
        let metadata = MapError::metadata(io::Error::new(io::ErrorKind::Other, "bad fd"));
        assert_eq!(
            metadata.to_string(),
            "failed to query file metadata: bad fd"
        );

        let mapping =
            MapError::mapping_creation(io::Error::new(io::ErrorKind::Other, "access denied"));
        assert_eq!(
            mapping.to_string(),
            "failed to create file mapping object: access denied"
        );

        let view = MapError::view_creation(io::Error::new(io::ErrorKind::Other, "no memory"));
        assert_eq!(view.to_string(), "failed to map view of file: no memory");

        let too_large = MapError::TooLarge { size: 1 << 40 };
        assert!(too_large.to_string().contains("too large"));
    }

    #[test]
    fn test_error_constructors() {
        let err = MapError::metadata(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, MapError::Metadata { .. }));

        let err = MapError::mapping_creation(io::Error::new(io::ErrorKind::Other, "x"));
        assert!(matches!(err, MapError::MappingCreation { .. }));

        let err = MapError::view_creation(io::Error::new(io::ErrorKind::Other, "x"));
        assert!(matches!(err, MapError::ViewCreation { .. }));
    }

    #[test]
    fn test_source_chain_preserved() {
        let inner = io::Error::from_raw_os_error(13);
        let err = MapError::view_creation(inner);
        let source = err.source().expect("source should be preserved");
        assert_eq!(
            source.downcast_ref::<io::Error>().unwrap().raw_os_error(),
            Some(13)
        );
    }

    #[test]
    fn test_release_error_reports_source() {
        let err = ReleaseError::new(io::Error::from_raw_os_error(22));
        assert!(err.to_string().starts_with("failed to release"));
        let source = err.source().expect("source should be preserved");
        assert_eq!(
            source.downcast_ref::<io::Error>().unwrap().raw_os_error(),
            Some(22)
        );
    }
}
