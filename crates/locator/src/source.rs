//! Candidate sources scanned by the [`Resolver`](crate::Resolver).

use std::path::PathBuf;

use crate::LocateError;
use crate::candidates::KNOWN_REGKEYS;
use crate::registry::{RegistryBackend, is_64bit_process, read_install_dir, registry_subkey};

/// An ordered list of places an installation might be recorded.
pub trait CandidateSource: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Candidate labels, in scan order.
    fn candidates(&self) -> Vec<String>;

    /// Resolves the installation directory for one candidate, if any.
    fn locate(&self, candidate: &str) -> Result<Option<PathBuf>, LocateError>;
}

/// Looks candidates up as registry subkeys under `SOFTWARE\`.
pub struct RegistrySource<B> {
    backend: B,
    candidates: Vec<String>,
    wow64: bool,
}

impl<B: RegistryBackend> RegistrySource<B> {
    /// Creates a source over [`KNOWN_REGKEYS`], using the 32-bit registry
    /// view when the process is 64-bit.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            candidates: KNOWN_REGKEYS.iter().map(|k| k.to_string()).collect(),
            wow64: is_64bit_process(),
        }
    }

    /// Replaces the candidate list.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Forces the `Wow6432Node` prefix on or off.
    pub fn with_wow64(mut self, wow64: bool) -> Self {
        self.wow64 = wow64;
        self
    }
}

impl<B: RegistryBackend> CandidateSource for RegistrySource<B> {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn candidates(&self) -> Vec<String> {
        self.candidates.clone()
    }

    fn locate(&self, candidate: &str) -> Result<Option<PathBuf>, LocateError> {
        let subkey = registry_subkey(candidate, self.wow64);
        tracing::trace!(subkey = %subkey, "probing registry");
        read_install_dir(&self.backend, &subkey)
    }
}

/// Treats each configured directory as a candidate installation.
///
/// Covers hosts without a registry (Wine prefixes, copied client folders).
#[derive(Debug, Clone, Default)]
pub struct SearchPathSource {
    dirs: Vec<PathBuf>,
}

impl SearchPathSource {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl CandidateSource for SearchPathSource {
    fn name(&self) -> &'static str {
        "search-path"
    }

    fn candidates(&self) -> Vec<String> {
        self.dirs
            .iter()
            .map(|d| d.to_string_lossy().into_owned())
            .collect()
    }

    fn locate(&self, candidate: &str) -> Result<Option<PathBuf>, LocateError> {
        let dir = PathBuf::from(candidate);
        Ok(dir.is_dir().then_some(dir))
    }
}
