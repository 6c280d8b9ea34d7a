//! Client compatibility check.
//!
//! Newer clients ship their data in `.uop` containers, which this reader
//! does not understand. A directory with any such file is rejected outright.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension (without the dot) marking an unsupported container file.
pub const INCOMPATIBLE_EXTENSION: &str = "uop";

/// Returns true if `dir` holds no top-level file with the
/// [`INCOMPATIBLE_EXTENSION`] (compared case-insensitively).
///
/// Only the immediate entries are listed. A directory that cannot be read
/// is treated as incompatible.
pub fn is_compatible(dir: &Path) -> bool {
    match find_container(dir) {
        Ok(None) => true,
        Ok(Some(file)) => {
            tracing::trace!(file = %file.display(), "found unsupported container file");
            false
        }
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "cannot list candidate directory");
            false
        }
    }
}

fn find_container(dir: &Path) -> io::Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if has_container_extension(&entry.file_name()) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Checks the text after the last dot, so a file named exactly `.uop` counts.
fn has_container_extension(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(INCOMPATIBLE_EXTENSION))
}
