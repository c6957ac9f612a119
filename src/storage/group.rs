use std::io::ErrorKind;
use std::path::PathBuf;

use super::fs::{
    read_json,
    to_pretty_json,
    write_atomic,
};
use super::scanner::PathScanner;
use super::{
    Result,
    StoreError,
};
use crate::types::{
    GroupTranslations,
    GroupTree,
    insert_at,
};

/// Extension of group translation files.
pub const GROUP_FILE_EXTENSION: &str = "json";

/// Reads and writes `<root>/<lang>/<group>.json`.
#[derive(Debug, Clone)]
pub struct GroupCodec {
    scanner: PathScanner,
    key_separator: String,
    indent_width: usize,
}

impl GroupCodec {
    #[must_use]
    pub const fn new(scanner: PathScanner, key_separator: String, indent_width: usize) -> Self {
        Self { scanner, key_separator, indent_width }
    }

    #[must_use]
    pub fn path_for(&self, lang: &str, group: &str) -> PathBuf {
        self.scanner.root().join(lang).join(format!("{group}.{GROUP_FILE_EXTENSION}"))
    }

    /// Parses one group file; a missing file reads as empty.
    ///
    /// # Errors
    /// Fails on unreadable files and content that is not a nested string mapping.
    pub fn read(&self, lang: &str, group: &str) -> Result<GroupTree> {
        Ok(read_json(&self.path_for(lang, group))?.unwrap_or_default())
    }

    /// Reads every group of `lang`. A language without a directory has no groups.
    ///
    /// # Errors
    /// Fails if the directory or any group file cannot be read or parsed.
    pub fn read_all(&self, lang: &str) -> Result<GroupTranslations> {
        if !self.scanner.root().join(lang).is_dir() {
            return Ok(GroupTranslations::new());
        }

        self.scanner
            .group_files(lang, GROUP_FILE_EXTENSION)?
            .into_iter()
            .map(|group| {
                let tree = self.read(lang, &group)?;
                Ok((group, tree))
            })
            .collect()
    }

    /// Overwrites a group file, creating the language directory if needed.
    ///
    /// The root itself is never created.
    ///
    /// # Errors
    /// Fails if the root is missing or the directory or file cannot be written.
    pub fn write(&self, lang: &str, group: &str, tree: &GroupTree) -> Result<()> {
        let path = self.path_for(lang, group);
        if let Some(dir) = path.parent() {
            match std::fs::create_dir(dir) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(StoreError::io(dir, e)),
            }
        }

        let mut contents = to_pretty_json(&path, tree, self.indent_width)?;
        contents.push(b'\n');
        write_atomic(&path, &contents)
    }

    /// Sets the value at `key` (split on the key separator) inside `group`.
    ///
    /// Intermediate mappings are created; everything else in the file is kept.
    ///
    /// # Errors
    /// Fails on an empty path segment, a path collision, or I/O and parse errors.
    /// The file is not touched on failure.
    pub fn merge(&self, lang: &str, group: &str, key: &str, value: &str) -> Result<()> {
        self.update(lang, group, |tree| {
            self.set(tree, group, key, value.to_string())?;
            Ok(true)
        })
        .map(|_| ())
    }

    /// Sets `key` in `tree`, mapping path collisions to [`StoreError::KeyConflict`].
    pub(super) fn set(
        &self,
        tree: &mut GroupTree,
        group: &str,
        key: &str,
        value: String,
    ) -> Result<()> {
        let path = self.split_key(key)?;
        insert_at(tree, &path, value).map_err(|source| StoreError::KeyConflict {
            group: group.to_string(),
            key: key.to_string(),
            source,
        })
    }

    /// Splits a key into path segments, rejecting empty ones.
    pub(super) fn split_key<'a>(&self, key: &'a str) -> Result<Vec<&'a str>> {
        let path: Vec<&str> = key.split(self.key_separator.as_str()).collect();
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key path contains an empty segment",
            });
        }
        Ok(path)
    }

    /// Read-modify-write helper; see [`super::SingleCodec`] for the contract of `apply`.
    pub(super) fn update<F>(&self, lang: &str, group: &str, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut GroupTree) -> Result<bool>,
    {
        let mut tree = self.read(lang, group)?;
        if !apply(&mut tree)? {
            return Ok(false);
        }
        self.write(lang, group, &tree)?;
        tracing::debug!(lang, group, "Updated group translations");
        Ok(true)
    }
}
