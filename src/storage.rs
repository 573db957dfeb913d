//! Storage backend for the passphrase hash file.

use anyhow::{Context, Result};
use getrandom::fill;
use log::info;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::DrillError;

/// Reads and writes the single record file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a new Storage instance with the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the entire record file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`DrillError::RecordNotFound`] if the file is missing, or an
    /// I/O error if it cannot be read.
    pub fn load(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(data) => {
                info!("loaded {} bytes from {}", data.len(), self.path.display());
                Ok(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DrillError::RecordNotFound(self.path.clone()).into())
            }
            Err(e) => Err(e)
                .with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    /// Replaces the record file with `data` in one step.
    ///
    /// The data goes to a randomly named sibling first, is synced, and is then
    /// renamed over the target, so a crash leaves either the old record or the
    /// new one. On Unix the file is readable by the owner only.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, data: &[u8]) -> Result<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(&parent)?;

        let tmp_path = self.random_tmp_path()?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut tmp_file = options
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        if let Err(e) = tmp_file.write_all(data).and_then(|_| tmp_file.sync_all()) {
            drop(tmp_file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e).context("failed to write temporary file");
        }
        drop(tmp_file);

        if let Err(e) = self.atomic_replace(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        // fsync directory
        #[cfg(not(target_os = "windows"))]
        {
            File::open(&parent)?.sync_all()?;
        }

        info!("wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }

    /// Returns the path to the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Format: `filename.tmp.<randomhex>`
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf).map_err(|_| DrillError::Random)?;

        let rand_string = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

        let file_name = self
            .path
            .file_name()
            .context("record path has no file name")?
            .to_string_lossy();

        let tmp_name = format!("{}.tmp.{}", file_name, rand_string);

        Ok(self.parent_dir().join(tmp_name))
    }

    /// Uses `ReplaceFileW` with `REPLACEFILE_WRITE_THROUGH`; falls back to a
    /// plain rename when there is no file to replace yet.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        if !self.path.exists() {
            fs::rename(tmp_path, &self.path)?;
            return Ok(());
        }

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - Strings are valid UTF-16 and null-terminated
        // - Pointers remain valid during the call
        // - Windows does not retain the pointers after return
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            let err = std::io::Error::last_os_error();
            return Err(err).context("atomic replace failed");
        }

        Ok(())
    }

    /// On Unix, `rename()` is atomic when both paths are on the same filesystem.
    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}
