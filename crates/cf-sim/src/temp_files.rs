//! Engine scratch files.

use std::path::PathBuf;

pub const TEMP_FILE_EXTENSIONS: [&str; 4] = [".inp", ".bin", ".hyd", ".rpt"];

/// Delete the engine's scratch files for `prefix`. Missing files are skipped.
/// Returns the number of files removed.
pub fn clean_temp_files(prefix: &str) -> usize {
    let mut removed = 0;
    for ext in TEMP_FILE_EXTENSIONS {
        let path = PathBuf::from(format!("{}{}", prefix, ext));
        if std::fs::remove_file(&path).is_ok() {
            tracing::debug!(path = %path.display(), "removed engine temp file");
            removed += 1;
        }
    }
    removed
}

/// Cleans up the engine's scratch files when dropped, including on early return.
pub struct TempFileGuard {
    prefix: String,
}

impl TempFileGuard {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        clean_temp_files(&self.prefix);
    }
}
