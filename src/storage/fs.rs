use std::io::{
    ErrorKind,
    Write,
};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{
    PrettyFormatter,
    Serializer,
};
use tempfile::NamedTempFile;

use super::{
    Result,
    StoreError,
};

/// Reads and parses a JSON file, or returns `None` when it does not exist.
pub(super) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Translation file not found");
            return Ok(None);
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })
}

/// Renders `value` as indented JSON. Non-ASCII characters are written as-is.
pub(super) fn to_pretty_json<T: Serialize>(
    path: &Path,
    value: &T,
    indent_width: usize,
) -> Result<Vec<u8>> {
    let indent = vec![b' '; indent_width];
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Encode { path: path.to_path_buf(), source })?;
    Ok(buf)
}

/// Replaces `path` with `contents` via a temp file in the same directory.
///
/// Readers see either the old file or the new one, never a partial write.
/// An existing file keeps its permissions.
pub(super) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let existing = match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let mut file = temp_file_in(dir).map_err(|e| StoreError::io(dir, e))?;
    file.write_all(contents).map_err(|e| StoreError::io(file.path(), e))?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).map_err(|e| StoreError::io(file.path(), e))?;
    }
    file.as_file().sync_all().map_err(|e| StoreError::io(file.path(), e))?;
    file.persist(path).map_err(|e| StoreError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote translation file");
    Ok(())
}

/// Temp files default to 0600; new translation files get the usual 0644 minus umask.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new().permissions(Permissions::from_mode(0o644)).tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
