//! I/O utility functions

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while a write is in flight: `name.yaml` -> `name.yaml.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("unnamed"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// Readers see either the previous file or the complete new one, never a
/// partial write. The temporary file lives next to the target so the rename
/// stays on one filesystem.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("scenarios/pricing.yaml"), yaml)?;
/// ```
pub fn atomic_write(path: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
    let temp = temp_path(path);

    if let Err(e) = fs::write(&temp, content) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    fs::rename(&temp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pricing.yaml");

        atomic_write(&path, "name: pricing\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name: pricing\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pricing.yaml");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        let path = Path::new("/data/scenarios/a.yaml");
        assert_eq!(temp_path(path), Path::new("/data/scenarios/a.yaml.tmp"));
    }

    #[test]
    fn test_atomic_write_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("a.yaml");
        assert!(atomic_write(&path, "x").is_err());
    }
}
