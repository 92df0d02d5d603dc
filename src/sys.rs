//! Platform selection for the native mapping strategies.
//!
//! Resolved statically per build target: exactly one submodule compiles in and
//! re-exports `RawMapping`, so the rest of the crate stays platform-agnostic.
//! Both strategies honor the same contract: map the whole file read-only and
//! shared, and reclaim every acquired OS resource in `unmap`.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::RawMapping;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::RawMapping;
