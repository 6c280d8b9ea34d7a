//! Installation discovery.
//!
//! Order of precedence:
//! 1. the override directory, when it exists (no candidate is probed);
//! 2. every candidate of every source, in order. Each existing, compatible
//!    candidate replaces the previous pick, so the *last* accepted candidate
//!    wins. Existing installs depend on this ordering.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;

use crate::compat::is_compatible;
use crate::registry::is_64bit_process;
#[cfg(target_os = "windows")]
use crate::source::RegistrySource;
use crate::source::{CandidateSource, SearchPathSource};

/// How the installation root was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selection {
    /// The configured override directory.
    Override,
    /// The scanned candidate with this 1-based order.
    Candidate { order: usize },
    /// Nothing usable was found.
    NotFound,
}

/// Result of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// The source has no record of an installation.
    NotInstalled,
    /// The recorded directory does not exist.
    MissingDirectory,
    /// The directory holds unsupported `.uop` data.
    Incompatible,
    /// The directory was accepted (a later candidate may still replace it).
    Accepted,
    /// Probing failed; the candidate was skipped.
    Failed { reason: String },
}

/// Diagnostic record for one probed candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub order: usize,
    pub source: &'static str,
    pub candidate: String,
    pub dir: Option<PathBuf>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The outcome of discovery: the data root, if any, and how it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    root: Option<PathBuf>,
    selection: Selection,
    candidates: Vec<CandidateReport>,
}

impl Installation {
    /// Returns the data directory, or `None` when no installation was found.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Returns true if a data directory was resolved.
    pub fn is_data_present(&self) -> bool {
        self.root.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Every probed candidate, in scan order. Empty when the override won.
    pub fn candidates(&self) -> &[CandidateReport] {
        &self.candidates
    }
}

/// Discovers the installation once and keeps the result.
pub struct Resolver {
    data_dir: Option<PathBuf>,
    sources: Vec<Box<dyn CandidateSource>>,
    installation: OnceLock<Installation>,
}

impl Resolver {
    /// Creates a resolver with only an override directory and no sources.
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir,
            sources: Vec::new(),
            installation: OnceLock::new(),
        }
    }

    /// Creates the resolver appropriate for the host.
    ///
    /// On Windows the registry is scanned (when `use_registry` is set); on
    /// every platform the `search_paths` are scanned after it.
    pub fn platform_default(
        data_dir: Option<PathBuf>,
        search_paths: Vec<PathBuf>,
        use_registry: bool,
    ) -> Self {
        let mut resolver = Self::new(data_dir);
        if use_registry {
            resolver = resolver.with_host_registry();
        }

        let search = SearchPathSource::new(search_paths);
        if !search.is_empty() {
            resolver = resolver.with_source(search);
        }
        resolver
    }

    #[cfg(target_os = "windows")]
    fn with_host_registry(self) -> Self {
        self.with_source(RegistrySource::new(crate::WindowsRegistry))
    }

    #[cfg(not(target_os = "windows"))]
    fn with_host_registry(self) -> Self {
        tracing::debug!("no registry on this platform, skipping registry scan");
        self
    }

    /// Appends a source; sources are scanned in the order they are added.
    pub fn with_source(mut self, source: impl CandidateSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Returns the installation, running discovery on the first call only.
    pub fn installation(&self) -> &Installation {
        self.installation.get_or_init(|| self.discover())
    }

    /// Consumes the resolver, returning its installation.
    pub fn into_installation(self) -> Installation {
        match self.installation.get() {
            Some(installation) => installation.clone(),
            None => self.discover(),
        }
    }

    fn override_dir(&self) -> Option<PathBuf> {
        let dir = self.data_dir.as_ref().filter(|d| !d.as_os_str().is_empty())?;
        if dir.is_dir() {
            Some(dir.clone())
        } else {
            tracing::warn!(path = %dir.display(), "configured data directory does not exist, ignoring");
            None
        }
    }

    fn discover(&self) -> Installation {
        tracing::debug!(is_64bit = is_64bit_process(), "looking for client installation");

        if let Some(dir) = self.override_dir() {
            tracing::info!(path = %dir.display(), "using configured data directory");
            return Installation {
                root: Some(dir),
                selection: Selection::Override,
                candidates: Vec::new(),
            };
        }

        let mut root = None;
        let mut selection = Selection::NotFound;
        let mut reports = Vec::new();

        for source in &self.sources {
            for candidate in source.candidates() {
                let order = reports.len() + 1;
                let (dir, outcome) = match source.locate(&candidate) {
                    Ok(None) => (None, Outcome::NotInstalled),
                    Ok(Some(dir)) if !dir.is_dir() => (Some(dir), Outcome::MissingDirectory),
                    Ok(Some(dir)) => {
                        if is_compatible(&dir) {
                            tracing::debug!(path = %dir.display(), "compatible");
                            root = Some(dir.clone());
                            selection = Selection::Candidate { order };
                            (Some(dir), Outcome::Accepted)
                        } else {
                            tracing::debug!(path = %dir.display(), "incompatible");
                            (Some(dir), Outcome::Incompatible)
                        }
                    }
                    Err(e) => {
                        tracing::debug!(source = source.name(), candidate = %candidate, error = %e, "probe failed");
                        (
                            None,
                            Outcome::Failed {
                                reason: e.to_string(),
                            },
                        )
                    }
                };

                reports.push(CandidateReport {
                    order,
                    source: source.name(),
                    candidate,
                    dir,
                    outcome,
                });
            }
        }

        match &root {
            Some(dir) => tracing::info!(path = %dir.display(), "selected client installation"),
            None => tracing::error!(
                probed = reports.len(),
                "did not find a compatible client installation; clients up to Mondain's Legacy are supported"
            ),
        }

        Installation {
            root,
            selection,
            candidates: reports,
        }
    }
}
