//! # romap - Read-Only File Memory Mapping
//!
//! A small cross-platform library that maps a regular file's contents into
//! the process's address space as a read-only contiguous byte region, with an
//! explicit, single-shot release of the backing OS resources.
//!
//! ## Features
//!
//! - **One operation**: [`map_file`] takes an already-open [`std::fs::File`]
//!   and returns a [`MappedRegion`] byte view of the whole file
//! - **Two native strategies, one contract**: POSIX `mmap`/`munmap` and
//!   Windows `CreateFileMapping`/`MapViewOfFile`, selected at compile time,
//!   with identical observable behavior
//! - **Deterministic cleanup**: [`MappedRegion::release`] consumes the region
//!   and reclaims every acquired resource, including the Windows kernel
//!   mapping handle; dropping an unreleased region does the same
//! - **Recoverable errors**: every creation failure is a typed
//!   [`MapError`] identifying the failing stage; nothing terminates the
//!   process
//!
//! ## Architecture
//!
//! - [`error`] - Typed creation and release errors
//! - [`region`] - The [`MappedRegion`] handle and [`map_file`] entry point
//! - `sys` - Per-platform mapping strategies behind a compile-time shim
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("data.bin")?;
//! let region = romap::map_file(&file)?;
//!
//! assert_eq!(region.len() as u64, file.metadata()?.len());
//! let bytes: &[u8] = &region;
//!
//! region.release()?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod error;
pub mod region;

// Platform strategies (compile-time selected, not part of the public API)
mod sys;

// Re-export commonly used types for convenience
pub use error::{MapError, ReleaseError, Result};
pub use region::{map_file, MappedRegion};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
