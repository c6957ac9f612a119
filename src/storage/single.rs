use std::path::PathBuf;

use super::fs::{
    read_json,
    to_pretty_json,
    write_atomic,
};
use super::Result;
use crate::types::SingleTranslations;

/// Reads and writes `<root>/<lang>.json`.
#[derive(Debug, Clone)]
pub struct SingleCodec {
    root: PathBuf,
    indent_width: usize,
}

impl SingleCodec {
    #[must_use]
    pub const fn new(root: PathBuf, indent_width: usize) -> Self {
        Self { root, indent_width }
    }

    #[must_use]
    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.root.join(format!("{lang}.json"))
    }

    /// Parses the language file; a missing file reads as empty.
    ///
    /// # Errors
    /// Fails on unreadable files and malformed JSON.
    pub fn read(&self, lang: &str) -> Result<SingleTranslations> {
        Ok(read_json(&self.path_for(lang))?.unwrap_or_default())
    }

    /// Overwrites the language file with `translations`, keeping their order.
    ///
    /// # Errors
    /// Fails if the file cannot be written.
    pub fn write(&self, lang: &str, translations: &SingleTranslations) -> Result<()> {
        let path = self.path_for(lang);
        let contents = to_pretty_json(&path, translations, self.indent_width)?;
        write_atomic(&path, &contents)
    }

    /// Sets `key` to `value`, appending new keys after existing ones.
    ///
    /// # Errors
    /// Fails if the current file cannot be read or the result cannot be written.
    pub fn merge(&self, lang: &str, key: &str, value: &str) -> Result<()> {
        self.update(lang, |translations| {
            translations.insert(key.to_string(), value.to_string());
            true
        })
        .map(|_| ())
    }

    /// Read-modify-write helper. `apply` reports whether anything changed;
    /// the file is left alone when it did not.
    pub(super) fn update<F>(&self, lang: &str, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut SingleTranslations) -> bool,
    {
        let mut translations = self.read(lang)?;
        if !apply(&mut translations) {
            return Ok(false);
        }
        self.write(lang, &translations)?;
        tracing::debug!(lang, keys = translations.len(), "Updated single translations");
        Ok(true)
    }
}
