use std::collections::BTreeSet;
use std::fs::DirEntry;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    Result,
    StoreError,
};

/// Which kind of directory entry a listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// Lists language directories, language JSON files and group files under a root.
///
/// Only immediate children are inspected. Hidden entries are ignored.
#[derive(Debug, Clone)]
pub struct PathScanner {
    root: PathBuf,
    excluded_directories: Vec<String>,
}

impl PathScanner {
    #[must_use]
    pub const fn new(root: PathBuf, excluded_directories: Vec<String>) -> Self {
        Self { root, excluded_directories }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the subdirectories of the root, minus excluded ones.
    ///
    /// # Errors
    /// Fails if the root cannot be read.
    pub fn language_directories(&self) -> Result<BTreeSet<String>> {
        let mut names = list_entries(&self.root, EntryKind::Directory, None)?;
        names.retain(|name| !self.is_excluded(name));
        Ok(names)
    }

    /// Base names of the `*.json` files directly under the root, minus excluded ones.
    ///
    /// # Errors
    /// Fails if the root cannot be read.
    pub fn language_json_files(&self) -> Result<BTreeSet<String>> {
        let mut names = list_entries(&self.root, EntryKind::File, Some("json"))?;
        names.retain(|name| !self.is_excluded(name));
        Ok(names)
    }

    /// Whether `name` is reserved by `excludedDirectories` and never a language.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_directories.iter().any(|excluded| excluded == name)
    }

    /// Base names of the files with `extension` in `<root>/<lang>`.
    ///
    /// # Errors
    /// Fails if the language directory cannot be read, including when it is missing.
    pub fn group_files(&self, lang: &str, extension: &str) -> Result<BTreeSet<String>> {
        list_entries(&self.root.join(lang), EntryKind::File, Some(extension))
    }
}

fn list_entries(dir: &Path, kind: EntryKind, extension: Option<&str>) -> Result<BTreeSet<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let Some(name) = entry_name(&entry.path(), kind, extension) else {
            continue;
        };
        if matches_kind(&entry, kind)? {
            names.insert(name);
        }
    }

    tracing::debug!(dir = %dir.display(), ?kind, count = names.len(), "Scanned directory");
    Ok(names)
}

fn matches_kind(entry: &DirEntry, kind: EntryKind) -> Result<bool> {
    // Follows symlinks so a linked language directory still counts.
    let metadata = match std::fs::metadata(entry.path()) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %entry.path().display(), "Skipping dangling symlink");
            return Ok(false);
        }
        Err(e) => return Err(StoreError::io(entry.path(), e)),
    };
    Ok(match kind {
        EntryKind::Directory => metadata.is_dir(),
        EntryKind::File => metadata.is_file(),
    })
}

/// Returns the listed name of `path`: the file stem when filtering by extension.
fn entry_name(path: &Path, kind: EntryKind, extension: Option<&str>) -> Option<String> {
    let file_name = path.file_name()?;
    let Some(file_name) = file_name.to_str() else {
        tracing::warn!(path = %path.display(), "Skipping entry with non UTF-8 name");
        return None;
    };
    if file_name.starts_with('.') {
        return None;
    }

    match (kind, extension) {
        (EntryKind::File, Some(ext)) => {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                return None;
            }
            path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
        }
        _ => Some(file_name.to_string()),
    }
}
