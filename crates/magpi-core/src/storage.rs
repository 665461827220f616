//! Destination directory and file lifecycle.
//!
//! Bodies are streamed into `<name>.part` and atomically renamed over the
//! final name, so an existing copy of an issue is replaced, never duplicated,
//! and an interrupted transfer never leaves a truncated file under that name.

use crate::issue::Issue;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `MagPi3.pdf` → `MagPi3.pdf.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Where issues are saved and how their files are named.
#[derive(Debug, Clone)]
pub struct Destination {
    dir: PathBuf,
    file_prefix: String,
}

impl Destination {
    pub fn new(dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, issue: Issue) -> PathBuf {
        self.dir.join(issue.file_name(&self.file_prefix))
    }

    /// Create the directory (and parents) if missing.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create destination {}", self.dir.display()))?;
        Ok(())
    }
}

/// Buffered writer for `<final>.part`; `finalize` renames it into place.
pub struct StorageWriter {
    file: BufWriter<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl StorageWriter {
    /// Create (or truncate) the temp file next to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(StorageWriter {
            file: BufWriter::new(file),
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync and rename over the final path, replacing any existing file.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let file = self.file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        // Close before rename on platforms that care.
        drop(file);
        fs::rename(&self.temp_path, &self.final_path)?;
        Ok(self.final_path)
    }

    /// Drop the temp file; the final path is left untouched.
    pub fn discard(self) {
        let temp_path = self.temp_path;
        drop(self.file);
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!("could not remove {}: {}", temp_path.display(), e);
        }
    }
}

impl Write for StorageWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("MagPi3.pdf"));
        assert_eq!(p.to_string_lossy(), "MagPi3.pdf.part");
        let p2 = temp_path(Path::new("/tmp/MagPi151.pdf"));
        assert_eq!(p2.to_string_lossy(), "/tmp/MagPi151.pdf.part");
    }

    #[test]
    fn destination_names_files_by_issue() {
        let dest = Destination::new("/srv/magpi", "MagPi");
        let issue = Issue::new(42).unwrap();
        assert_eq!(dest.path_for(issue), Path::new("/srv/magpi/MagPi42.pdf"));
    }

    #[test]
    fn prepare_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::new(dir.path().join("a").join("b"), "MagPi");
        dest.prepare().unwrap();
        assert!(dest.dir().is_dir());
        // Idempotent.
        dest.prepare().unwrap();
    }

    #[test]
    fn finalize_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("MagPi1.pdf");
        fs::write(&final_path, b"old contents that are longer").unwrap();

        let mut w = StorageWriter::create(&final_path).unwrap();
        let tp = w.temp_path().to_path_buf();
        w.write_all(b"%PDF-new").unwrap();
        let saved = w.finalize().unwrap();

        assert_eq!(saved, final_path);
        assert!(!tp.exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"%PDF-new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn discard_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("MagPi2.pdf");
        fs::write(&final_path, b"keep me").unwrap();

        let mut w = StorageWriter::create(&final_path).unwrap();
        let tp = w.temp_path().to_path_buf();
        w.write_all(b"<html>error page</html>").unwrap();
        w.discard();

        assert!(!tp.exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"keep me");
    }
}
