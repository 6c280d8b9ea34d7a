//! Access to client data files under the discovered installation.
//!
//! Every lookup is failure-safe: when no installation was found, a name is
//! malformed or a file cannot be opened, callers get `false` or `None`
//! rather than an error. [`FileGateway::try_open`] is available when the
//! reason matters.

mod name;
mod open;

use std::fs::File;
use std::path::{Path, PathBuf};

use uodata_locator::Installation;

pub use name::FileName;

/// Errors produced while resolving or opening a data file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("no client installation available")]
    NoInstallation,

    #[error("invalid file name template {template:?}: {reason}")]
    Format { template: String, reason: String },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves logical file names against an installation root.
///
/// Cheap to clone; safe to share between threads. Paths are never cached,
/// so every call sees the current state of the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileGateway {
    root: Option<PathBuf>,
}

impl FileGateway {
    /// Creates a gateway over the installation's data directory.
    pub fn new(installation: &Installation) -> Self {
        Self {
            root: installation.root().map(Path::to_path_buf),
        }
    }

    /// Creates a gateway over an explicit directory, without discovery.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Returns true if a data directory is available.
    pub fn is_data_present(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the full path of `name` if that file exists.
    pub fn file_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.root.as_ref()?.join(name);
        path.is_file().then_some(path)
    }

    /// Joins the rendered name under the root without checking existence.
    pub fn resolve(&self, name: FileName<'_>) -> Result<PathBuf, FileError> {
        let root = self.root.as_ref().ok_or(FileError::NoInstallation)?;
        Ok(root.join(name.render()?))
    }

    /// Returns true if the file named by `name` exists.
    pub fn contains(&self, name: FileName<'_>) -> bool {
        match self.resolve(name) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "checking if file exists");
                path.is_file()
            }
            Err(e) => {
                tracing::debug!(error = %e, "cannot resolve file name");
                false
            }
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.contains(FileName::Plain(name))
    }

    pub fn exists_index(&self, template: &str, index: i32) -> bool {
        self.contains(FileName::Indexed { template, index })
    }

    pub fn exists_index_ext(&self, name: &str, index: i32, ext: &str) -> bool {
        self.contains(FileName::IndexedTyped { name, index, ext })
    }

    pub fn exists_ext(&self, name: &str, ext: &str) -> bool {
        self.contains(FileName::Typed { name, ext })
    }

    /// Opens the file named by `name` for shared reading.
    pub fn try_open(&self, name: FileName<'_>) -> Result<File, FileError> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(FileError::NotFound(path));
        }
        open::open_shared_read(&path).map_err(|source| FileError::Io { path, source })
    }

    /// Like [`try_open`](Self::try_open), logging and discarding the error.
    pub fn open_name(&self, name: FileName<'_>) -> Option<File> {
        self.try_open(name)
            .inspect_err(|e| tracing::debug!(error = %e, "data file unavailable"))
            .ok()
    }

    pub fn open(&self, name: &str) -> Option<File> {
        self.open_name(FileName::Plain(name))
    }

    pub fn open_index(&self, template: &str, index: i32) -> Option<File> {
        self.open_name(FileName::Indexed { template, index })
    }

    pub fn open_index_ext(&self, name: &str, index: i32, ext: &str) -> Option<File> {
        self.open_name(FileName::IndexedTyped { name, index, ext })
    }

    pub fn open_ext(&self, name: &str, ext: &str) -> Option<File> {
        self.open_name(FileName::Typed { name, ext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;

    use uodata_locator::Resolver;

    fn install() -> (tempfile::TempDir, FileGateway) {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("verdata.mul"), b"verdata").unwrap();
        fs::write(tmp.path().join("map2.mul"), b"map").unwrap();
        fs::write(tmp.path().join("staidx2.mul"), b"idx").unwrap();
        let installation = Resolver::new(Some(tmp.path().to_path_buf())).into_installation();
        let gateway = FileGateway::new(&installation);
        (tmp, gateway)
    }

    fn absent() -> FileGateway {
        FileGateway::new(&Resolver::new(None).into_installation())
    }

    #[test]
    fn file_path_lookup() {
        let (tmp, files) = install();
        assert!(files.is_data_present());
        assert_eq!(
            files.file_path("verdata.mul"),
            Some(tmp.path().join("verdata.mul"))
        );
        assert_eq!(files.file_path("missing.mul"), None);
    }

    #[test]
    fn directories_are_not_files() {
        let (tmp, files) = install();
        fs::create_dir(tmp.path().join("music")).unwrap();
        assert_eq!(files.file_path("music"), None);
        assert!(!files.exists("music"));
        assert!(files.open("music").is_none());
    }

    #[test]
    fn exists_shapes() {
        let (_tmp, files) = install();
        assert!(files.exists("verdata.mul"));
        assert!(files.exists_ext("verdata", "mul"));
        assert!(!files.exists_ext("verdata", "idx"));
        assert!(files.exists_index_ext("map", 2, "mul"));
        assert!(files.exists_index_ext("staidx", 2, "mul"));
        assert!(!files.exists_index_ext("map", 3, "mul"));
        assert!(files.exists_index("map{0}.mul", 2));
        assert!(!files.exists_index("map{0}.mul", 0));
    }

    #[test]
    fn indexed_typed_name_is_checked_verbatim() {
        let (tmp, files) = install();
        assert!(!files.exists_index_ext("data", 3, "idx"));
        fs::write(tmp.path().join("data3.idx"), b"").unwrap();
        assert!(files.exists_index_ext("data", 3, "idx"));

        assert!(!files.exists_ext("data", "idx"));
        fs::write(tmp.path().join("data.idx"), b"").unwrap();
        assert!(files.exists_ext("data", "idx"));
    }

    #[test]
    fn malformed_template_is_false() {
        let (_tmp, files) = install();
        assert!(!files.exists_index("map{1}.mul", 2));
        assert!(files.open_index("map{0.mul", 2).is_none());
        assert!(matches!(
            files.try_open(FileName::Indexed {
                template: "map{",
                index: 0
            }),
            Err(FileError::Format { .. })
        ));
    }

    #[test]
    fn oversized_pad_width_is_false() {
        let (_tmp, files) = install();
        assert!(!files.exists_index("map{0:D70000}.mul", 2));
        assert!(files.open_index("map{0:D70000}.mul", 2).is_none());
        let custom = format!("map{{0:{}}}.mul", "0".repeat(70_000));
        assert!(!files.exists_index(&custom, 2));
        assert!(files.open_index(&custom, 2).is_none());
    }

    #[test]
    fn no_installation_is_negative_everywhere() {
        let files = absent();
        assert!(!files.is_data_present());
        assert_eq!(files.file_path("anything"), None);
        assert!(!files.exists("anything"));
        assert!(!files.exists_ext("anything", "mul"));
        assert!(!files.exists_index("anything{0}", 1));
        assert!(!files.exists_index_ext("anything", 1, "mul"));
        assert!(files.open("anything").is_none());
        assert!(files.open_ext("anything", "mul").is_none());
        assert!(matches!(
            files.try_open(FileName::Plain("anything")),
            Err(FileError::NoInstallation)
        ));
    }

    #[test]
    fn open_reads_content() {
        let (_tmp, files) = install();

        let mut content = String::new();
        files
            .open_ext("verdata", "mul")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "verdata");

        let mut content = String::new();
        files
            .open_index("map{0}.mul", 2)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "map");

        assert!(files.open_index_ext("staidx", 2, "mul").is_some());
        assert!(files.open("verdata.mul").is_some());
    }

    #[test]
    fn open_missing_reports_not_found() {
        let (tmp, files) = install();
        assert!(files.open("missing.mul").is_none());
        match files.try_open(FileName::Plain("missing.mul")) {
            Err(FileError::NotFound(path)) => assert_eq!(path, tmp.path().join("missing.mul")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolve_does_not_check_existence() {
        let (tmp, files) = install();
        assert_eq!(
            files.resolve(FileName::Typed {
                name: "missing",
                ext: "mul"
            })
            .unwrap(),
            tmp.path().join("missing.mul")
        );
    }

    #[test]
    fn concurrent_readers() {
        let (_tmp, files) = install();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut buf = Vec::new();
                    files
                        .open("verdata.mul")
                        .unwrap()
                        .read_to_end(&mut buf)
                        .unwrap();
                    assert_eq!(buf, b"verdata");
                });
            }
        });
    }

    #[test]
    fn explicit_root() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("hues.mul"), b"").unwrap();
        let files = FileGateway::with_root(tmp.path());
        assert_eq!(files.root(), Some(tmp.path()));
        assert!(files.exists("hues.mul"));
    }
}
