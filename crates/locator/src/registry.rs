//! Registry access used by [`RegistrySource`](crate::RegistrySource).
//!
//! The backend is a trait so the probing logic runs the same way against the
//! real Windows registry and against [`MemoryRegistry`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::LocateError;

/// Value holding the full path of the client executable.
pub const VALUE_EXE_PATH: &str = "ExePath";

/// Install directory value as written by the older installers.
pub const VALUE_INSTALL_DIR_SPACED: &str = "Install Dir";

/// Install directory value as written by the EA installers.
pub const VALUE_INSTALL_DIR: &str = "InstallDir";

/// Registry root hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Hive {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
    /// `HKEY_CURRENT_USER`
    CurrentUser,
}

impl std::fmt::Display for Hive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hive::LocalMachine => write!(f, "HKLM"),
            Hive::CurrentUser => write!(f, "HKCU"),
        }
    }
}

/// An opened registry key.
pub trait RegistryKey {
    /// Reads a string value. Missing, non-string and unreadable values all
    /// come back as `None`.
    fn string_value(&self, name: &str) -> Option<String>;
}

/// Read-only view of a registry.
pub trait RegistryBackend: Send + Sync {
    type Key: RegistryKey;

    /// Opens `subkey` under `hive`. A missing key is `Ok(None)`; anything
    /// else that goes wrong (access denied, ...) is an error.
    fn open_subkey(&self, hive: Hive, subkey: &str) -> Result<Option<Self::Key>, LocateError>;
}

impl<B: RegistryBackend> RegistryBackend for Arc<B> {
    type Key = B::Key;

    fn open_subkey(&self, hive: Hive, subkey: &str) -> Result<Option<Self::Key>, LocateError> {
        (**self).open_subkey(hive, subkey)
    }
}

/// Returns true when running as a 64-bit process, in which case the client's
/// 32-bit installers wrote their keys under `Wow6432Node`.
pub fn is_64bit_process() -> bool {
    cfg!(target_pointer_width = "64")
}

/// Builds the full subkey path for a candidate.
pub fn registry_subkey(candidate: &str, wow64: bool) -> String {
    if wow64 {
        format!(r"SOFTWARE\Wow6432Node\{candidate}")
    } else {
        format!(r"SOFTWARE\{candidate}")
    }
}

/// Resolves the installation directory recorded under `subkey`.
///
/// `HKLM` is tried first and `HKCU` only if the key is missing there. From
/// the opened key, `ExePath` (an existing file, whose parent is returned)
/// wins over `Install Dir`, which wins over `InstallDir` (both must name an
/// existing directory).
pub fn read_install_dir<B: RegistryBackend>(
    backend: &B,
    subkey: &str,
) -> Result<Option<PathBuf>, LocateError> {
    let key = match backend.open_subkey(Hive::LocalMachine, subkey)? {
        Some(key) => key,
        None => match backend.open_subkey(Hive::CurrentUser, subkey)? {
            Some(key) => {
                tracing::trace!(subkey, "using current-user key");
                key
            }
            None => return Ok(None),
        },
    };

    let path = if let Some(exe) = non_empty(key.string_value(VALUE_EXE_PATH))
        .filter(|p| Path::new(p).is_file())
    {
        exe
    } else if let Some(dir) = non_empty(key.string_value(VALUE_INSTALL_DIR_SPACED))
        .filter(|p| Path::new(p).is_dir())
    {
        dir
    } else if let Some(dir) =
        non_empty(key.string_value(VALUE_INSTALL_DIR)).filter(|p| Path::new(p).is_dir())
    {
        dir
    } else {
        tracing::trace!(subkey, "key has no usable install path");
        return Ok(None);
    };

    let path = PathBuf::from(path);
    let dir = if path.is_file() {
        path.parent().map(Path::to_path_buf)
    } else {
        Some(path)
    };

    Ok(dir.filter(|d| d.is_dir()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// In-memory registry.
///
/// Stands in for the Windows registry on other hosts and in tests. Key paths
/// and value names are case-insensitive, as on Windows. Every
/// [`open_subkey`](RegistryBackend::open_subkey) call is counted.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: HashMap<(Hive, String), MemoryKey>,
    denied: HashSet<(Hive, String)>,
    reads: AtomicUsize,
}

/// A key of a [`MemoryRegistry`].
#[derive(Debug, Clone, Default)]
pub struct MemoryKey {
    values: HashMap<String, String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string value, creating the key if needed.
    pub fn set_value(&mut self, hive: Hive, subkey: &str, name: &str, value: &str) {
        self.keys
            .entry((hive, normalize(subkey)))
            .or_default()
            .values
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Creates an empty key.
    pub fn create_key(&mut self, hive: Hive, subkey: &str) {
        self.keys.entry((hive, normalize(subkey))).or_default();
    }

    /// Makes every open of this key fail with an access error.
    pub fn deny(&mut self, hive: Hive, subkey: &str) {
        self.denied.insert((hive, normalize(subkey)));
    }

    /// Number of subkey opens performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl RegistryBackend for MemoryRegistry {
    type Key = MemoryKey;

    fn open_subkey(&self, hive: Hive, subkey: &str) -> Result<Option<MemoryKey>, LocateError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let id = (hive, normalize(subkey));
        if self.denied.contains(&id) {
            return Err(LocateError::Registry {
                key: format!(r"{hive}\{subkey}"),
                message: "access denied".into(),
            });
        }
        Ok(self.keys.get(&id).cloned())
    }
}

impl RegistryKey for MemoryKey {
    fn string_value(&self, name: &str) -> Option<String> {
        self.values.get(&name.to_lowercase()).cloned()
    }
}

fn normalize(subkey: &str) -> String {
    subkey.trim_end_matches('\\').to_lowercase()
}
