//! Bridge file placement
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Make a file path usable, falling back to the temp directory
///
/// Creates parent directories and touches the file without truncating it.
/// If that fails (typically permissions), the same filename under
/// `<temp>/aria/` is used instead so the bridge keeps working on
/// locked-down installs.
pub fn ensure_writable(path: &Path) -> PathBuf {
    match touch(path) {
        Ok(()) => path.to_path_buf(),
        Err(err) => {
            let file_name = path
                .file_name()
                .map_or_else(|| OsStr::new("aria.dat").to_os_string(), OsStr::to_os_string);
            let fallback = std::env::temp_dir().join("aria").join(file_name);
            warn!(
                path = %path.display(),
                fallback = %fallback.display(),
                error = %err,
                "path not writable, using temp fallback"
            );
            if let Err(err) = touch(&fallback) {
                warn!(
                    fallback = %fallback.display(),
                    error = %err,
                    "temp fallback not writable either"
                );
            }
            fallback
        }
    }
}

fn touch(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    Ok(())
}
