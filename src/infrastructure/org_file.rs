// src/infrastructure/org_file.rs
use crate::constants::ORG_EXTENSION;
use crate::domain::DomainError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What [`write_read_only`] did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    /// Existing content was byte-identical; the file was left untouched so
    /// its modification time survives re-exports.
    Unchanged,
}

/// Output path for a note id.
///
/// Pure function of the id: downstream notes link to these paths, so the
/// scheme must stay stable across runs and versions.
pub fn export_path(output_dir: &Path, note_id: i64) -> PathBuf {
    output_dir.join(format!("{note_id}.{ORG_EXTENSION}"))
}

/// Create the output directory if it does not exist yet.
pub fn ensure_output_dir(output_dir: &Path) -> Result<(), DomainError> {
    fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))
}

/// Write `content` to `path` and leave the file read-only.
///
/// Files from a previous run are read-only, so the owner write bit is
/// restored before overwriting and cleared again afterwards. A file whose
/// content already matches is not rewritten.
pub fn write_read_only(path: &Path, content: &str) -> Result<WriteOutcome, DomainError> {
    let existing = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(write_error(path, e)),
    };

    let outcome = match existing {
        Some(old) if old == content.as_bytes() => {
            debug!(?path, "Content unchanged, skipping write");
            WriteOutcome::Unchanged
        }
        Some(_) => {
            let meta = fs::metadata(path).map_err(|e| write_error(path, e))?;
            if meta.permissions().readonly() {
                make_writable(path)?;
            }
            fs::write(path, content).map_err(|e| write_error(path, e))?;
            WriteOutcome::Updated
        }
        None => {
            fs::write(path, content).map_err(|e| write_error(path, e))?;
            WriteOutcome::Created
        }
    };

    // Runs for unchanged files too: repairs the bit if someone chmod'ed
    // the file writable since the last export.
    make_read_only(path)?;
    Ok(outcome)
}

// Unix keeps the group/world bits as they are; Permissions::set_readonly
// would flip the write bit for everyone, not just the owner.
#[cfg(unix)]
fn make_writable(path: &Path) -> Result<(), DomainError> {
    use std::os::unix::fs::PermissionsExt;
    let mode = current_mode(path)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode | 0o200))
        .map_err(|e| write_error(path, e))
}

#[cfg(unix)]
fn make_read_only(path: &Path) -> Result<(), DomainError> {
    use std::os::unix::fs::PermissionsExt;
    let mode = current_mode(path)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & !0o222))
        .map_err(|e| write_error(path, e))
}

#[cfg(unix)]
fn current_mode(path: &Path) -> Result<u32, DomainError> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)
        .map_err(|e| write_error(path, e))?
        .permissions()
        .mode())
}

#[cfg(not(unix))]
fn make_writable(path: &Path) -> Result<(), DomainError> {
    let mut perms = fs::metadata(path)
        .map_err(|e| write_error(path, e))?
        .permissions();
    perms.set_readonly(false);
    fs::set_permissions(path, perms).map_err(|e| write_error(path, e))
}

#[cfg(not(unix))]
fn make_read_only(path: &Path) -> Result<(), DomainError> {
    let mut perms = fs::metadata(path)
        .map_err(|e| write_error(path, e))?
        .permissions();
    perms.set_readonly(true);
    fs::set_permissions(path, perms).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, source: std::io::Error) -> DomainError {
    DomainError::FileWrite {
        path: path.to_path_buf(),
        source,
    }
}
