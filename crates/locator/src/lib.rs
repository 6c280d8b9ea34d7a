//! Discovery of an installed Ultima Online client data directory.
//!
//! A [`Resolver`] consults an explicit override directory first, then scans
//! one or more [`CandidateSource`]s (the Windows registry, configured search
//! paths) and settles on a single [`Installation`]. Discovery runs once per
//! resolver; the result never changes afterwards.

pub mod candidates;
pub mod compat;
pub mod registry;
#[cfg(target_os = "windows")]
pub mod registry_windows;
pub mod resolver;
pub mod source;

// Re-export primary types.
pub use candidates::KNOWN_REGKEYS;
pub use compat::{INCOMPATIBLE_EXTENSION, is_compatible};
pub use registry::{Hive, MemoryRegistry, RegistryBackend, RegistryKey, is_64bit_process};
#[cfg(target_os = "windows")]
pub use registry_windows::WindowsRegistry;
pub use resolver::{CandidateReport, Installation, Outcome, Resolver, Selection};
pub use source::{CandidateSource, RegistrySource, SearchPathSource};

/// Errors raised while probing a single installation candidate.
///
/// These never escape a [`Resolver`]; the scan records them against the
/// candidate and moves on.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("registry error at {key}: {message}")]
    Registry { key: String, message: String },
}
