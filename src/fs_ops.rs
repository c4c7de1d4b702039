//! Filesystem primitives timed by the harness
//!
//! Direct native calls only: spawning `mkdir` through a shell would put
//! process start-up cost inside every measurement.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Empty file left in every scratch root this tool creates
///
/// [`NativeFs::reset`] only deletes a non-empty directory that carries it.
pub const OWNER_MARKER: &str = ".id-splits-scratch";

/// The four timed primitives plus scratch-root housekeeping
pub trait Filesystem {
    /// Create a single directory; fails if it already exists
    fn make_dir(&self, path: &Path) -> io::Result<()>;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Write `contents` to `path`, returning the resulting file length
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<usize>;

    /// Read the whole file at `path`
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Recursively delete `root` if present, then recreate it holding only
    /// [`OWNER_MARKER`]
    fn reset(&self, root: &Path) -> io::Result<()>;
}

/// `std::fs` backed primitives
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl Filesystem for NativeFs {
    fn make_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<usize> {
        let mut file = fs::File::create(path)?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(file.metadata()?.len() as usize)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn reset(&self, root: &Path) -> io::Result<()> {
        check_scratch_root(root)?;
        match fs::remove_dir_all(root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(root)?;
        fs::write(root.join(OWNER_MARKER), b"")
    }
}

/// Refuse a scratch root whose deletion could destroy data the tool did not write
///
/// Accepted: a missing path, an empty directory, or a directory holding
/// [`OWNER_MARKER`]. Paths without a final component (`.`, `..`, `/`) are
/// always refused.
pub fn check_scratch_root(root: &Path) -> io::Result<()> {
    if root.file_name().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} does not name a directory of its own", root),
        ));
    }

    let mut entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if entries.next().is_none() || root.join(OWNER_MARKER).is_file() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!(
                "{} is not empty and has no {} file, refusing to delete it",
                root.display(),
                OWNER_MARKER
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_make_dir_fails_when_present() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a");
        NativeFs.make_dir(&dir).unwrap();
        assert!(NativeFs.is_dir(&dir));
        assert!(NativeFs.make_dir(&dir).is_err());
    }

    #[test]
    fn test_write_reports_file_length() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("info.txt");
        assert_eq!(NativeFs.write(&file, b"hello").unwrap(), 5);
        assert_eq!(NativeFs.write(&file, b"hi").unwrap(), 2);
        assert_eq!(NativeFs.read(&file).unwrap(), b"hi");
    }

    #[test]
    fn test_reset_wipes_previous_contents() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("id_splits");
        NativeFs.reset(&root).unwrap();
        NativeFs.make_dir(&root.join("x")).unwrap();
        NativeFs.write(&root.join("x").join("info.txt"), b"hello").unwrap();

        NativeFs.reset(&root).unwrap();
        assert!(root.is_dir());
        let entries: Vec<_> = fs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, [OWNER_MARKER]);
    }

    #[test]
    fn test_reset_refuses_unowned_directory() {
        let tmp = TempDir::new().unwrap();
        let keep = tmp.path().join("notes.txt");
        fs::write(&keep, b"mine").unwrap();

        let err = NativeFs.reset(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(fs::read(&keep).unwrap(), b"mine");
    }

    #[test]
    fn test_check_scratch_root() {
        let tmp = TempDir::new().unwrap();
        assert!(check_scratch_root(Path::new(".")).is_err());
        assert!(check_scratch_root(Path::new("/")).is_err());
        assert!(check_scratch_root(&tmp.path().join("absent")).is_ok());
        assert!(check_scratch_root(tmp.path()).is_ok());

        fs::write(tmp.path().join("data"), b"x").unwrap();
        assert!(check_scratch_root(tmp.path()).is_err());
        fs::write(tmp.path().join(OWNER_MARKER), b"").unwrap();
        assert!(check_scratch_root(tmp.path()).is_ok());
    }
}
