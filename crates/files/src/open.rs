use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// `FILE_SHARE_READ`: other handles may read, nobody may write or delete.
#[cfg(windows)]
const FILE_SHARE_READ: u32 = 0x0000_0001;

/// Opens `path` read-only, allowing concurrent readers.
pub(crate) fn open_shared_read(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(FILE_SHARE_READ);
    }

    options.open(path)
}
