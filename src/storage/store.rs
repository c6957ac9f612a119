//! The translation storage driver.
//!
//! Reconciles flat `<lang>.json` files and nested `<lang>/<group>.json` files
//! into one model. Every call re-reads disk; every mutation is a
//! read-merge-write of a single file.

use std::collections::BTreeSet;
use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexMap;

use super::group::GroupCodec;
use super::scanner::PathScanner;
use super::single::SingleCodec;
use super::{
    Result,
    StoreError,
    guard,
};
use crate::config::{
    ConfigManager,
    StoreSettings,
};
use crate::types::{
    GroupTranslations,
    LanguageTranslations,
    MissingTranslations,
    SingleTranslations,
    TranslationComparison,
    TranslationCorpus,
    TranslationPair,
    filter_tree,
    flatten_tree,
    lookup,
};

/// File-backed translation store rooted at a lang directory.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    scanner: PathScanner,
    single: SingleCodec,
    group: GroupCodec,
    key_separator: String,
}

impl TranslationStore {
    /// Creates a store with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_settings(root, &StoreSettings::default())
    }

    #[must_use]
    pub fn with_settings(root: impl Into<PathBuf>, settings: &StoreSettings) -> Self {
        let root = root.into();
        let scanner = PathScanner::new(root.clone(), settings.excluded_directories.clone());
        Self {
            single: SingleCodec::new(root, settings.indent_width),
            group: GroupCodec::new(
                scanner.clone(),
                settings.key_separator.clone(),
                settings.indent_width,
            ),
            scanner,
            key_separator: settings.key_separator.clone(),
        }
    }

    /// Creates a store for the lang directory configured in `config`.
    #[must_use]
    pub fn from_config(config: &ConfigManager) -> Self {
        Self::with_settings(config.lang_root(), config.get_settings())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Every language that has a `<code>.json` file or a `<code>/` directory.
    ///
    /// # Errors
    /// Fails if the root cannot be read.
    pub fn all_languages(&self) -> Result<BTreeSet<String>> {
        let mut languages = self.scanner.language_directories()?;
        languages.extend(self.scanner.language_json_files()?);
        Ok(languages)
    }

    /// # Errors
    /// Fails if the root cannot be read.
    pub fn language_exists(&self, code: &str) -> Result<bool> {
        Ok(self.all_languages()?.contains(code))
    }

    /// Group names of `lang`; empty when the language has no directory.
    ///
    /// # Errors
    /// Fails on an invalid code or an unreadable language directory.
    pub fn all_groups(&self, lang: &str) -> Result<BTreeSet<String>> {
        self.validate_language(lang)?;
        if !self.root().join(lang).is_dir() {
            return Ok(BTreeSet::new());
        }
        self.scanner.group_files(lang, super::GROUP_FILE_EXTENSION)
    }

    /// Single and group translations of every language.
    ///
    /// # Errors
    /// Fails on unreadable or malformed files.
    pub fn all_translations(&self) -> Result<TranslationCorpus> {
        self.all_languages()?
            .into_iter()
            .map(|lang| {
                let translations = self.all_translations_for(&lang)?;
                Ok((lang, translations))
            })
            .collect()
    }

    /// Single and group translations of `lang`; both empty for an unknown language.
    ///
    /// # Errors
    /// Fails on an invalid code or unreadable or malformed files.
    pub fn all_translations_for(&self, lang: &str) -> Result<LanguageTranslations> {
        Ok(LanguageTranslations {
            single: self.single_translations_for(lang)?,
            group: self.group_translations_for(lang)?,
        })
    }

    /// # Errors
    /// Fails on an invalid code or an unreadable or malformed file.
    pub fn single_translations_for(&self, lang: &str) -> Result<SingleTranslations> {
        self.validate_language(lang)?;
        self.single.read(lang)
    }

    /// # Errors
    /// Fails on an invalid code or unreadable or malformed files.
    pub fn group_translations_for(&self, lang: &str) -> Result<GroupTranslations> {
        self.validate_language(lang)?;
        self.group.read_all(lang)
    }

    /// Translations of `lang` whose key or value contains `needle`.
    ///
    /// `None` or an empty needle returns everything. Groups left empty are dropped.
    ///
    /// # Errors
    /// Same as [`Self::all_translations_for`].
    pub fn filter_translations_for(
        &self,
        lang: &str,
        needle: Option<&str>,
    ) -> Result<LanguageTranslations> {
        let translations = self.all_translations_for(lang)?;
        let Some(needle) = needle.filter(|n| !n.is_empty()) else {
            return Ok(translations);
        };

        let single = translations
            .single
            .into_iter()
            .filter(|(key, value)| key.contains(needle) || value.contains(needle))
            .collect();
        let group = translations
            .group
            .iter()
            .filter_map(|(name, tree)| {
                let kept = filter_tree(tree, needle);
                (!kept.is_empty()).then(|| (name.clone(), kept))
            })
            .collect();

        Ok(LanguageTranslations { single, group })
    }

    /// Every key of `source` next to the value `target` has for it.
    ///
    /// Group keys are flattened to `group.path`. Missing targets are empty strings.
    ///
    /// # Errors
    /// Same as [`Self::all_translations_for`], for either language.
    pub fn source_language_translations_with(
        &self,
        source: &str,
        target: &str,
    ) -> Result<TranslationComparison> {
        let source_translations = self.all_translations_for(source)?;
        let target_translations = self.all_translations_for(target)?;

        let single = source_translations
            .single
            .into_iter()
            .map(|(key, value)| {
                let target = target_translations.single.get(&key).cloned().unwrap_or_default();
                (key, TranslationPair { source: value, target })
            })
            .collect();

        let mut group = IndexMap::new();
        for (name, tree) in &source_translations.group {
            let target_flat = target_translations
                .group
                .get(name)
                .map(|t| flatten_tree(t, &self.key_separator, Some(name.as_str())))
                .unwrap_or_default();
            for (key, value) in flatten_tree(tree, &self.key_separator, Some(name.as_str())) {
                let target = target_flat.get(&key).cloned().unwrap_or_default();
                group.insert(key, TranslationPair { source: value, target });
            }
        }

        Ok(TranslationComparison { single, group })
    }

    /// Creates an empty `<code>.json` and an empty `<code>/` directory.
    ///
    /// # Errors
    /// [`StoreError::LanguageExists`] if the language is already present; nothing
    /// is written in that case.
    pub fn add_language(&self, code: &str) -> Result<()> {
        self.validate_language(code)?;
        guard::ensure_absent(&self.all_languages()?, code)?;

        let dir = self.root().join(code);
        std::fs::create_dir(&dir).map_err(|e| StoreError::io(&dir, e))?;
        self.single.write(code, &SingleTranslations::new())?;

        tracing::info!(lang = code, "Added language");
        Ok(())
    }

    /// Sets `key` to `value` in `<lang>.json`. The key is taken literally.
    ///
    /// # Errors
    /// Fails on an invalid code or I/O and parse errors.
    pub fn add_single_translation(&self, lang: &str, key: &str, value: &str) -> Result<()> {
        self.validate_language(lang)?;
        self.single.merge(lang, key, value)?;
        tracing::info!(lang, key, "Added single translation");
        Ok(())
    }

    /// Sets `<group>.<path...>` to `value`: the first segment names the group file,
    /// the rest is the nested path inside it.
    ///
    /// # Errors
    /// [`StoreError::InvalidKey`] when the key has no path after the group,
    /// [`StoreError::KeyConflict`] when the path collides with existing entries.
    pub fn add_group_translation(&self, lang: &str, key: &str, value: &str) -> Result<()> {
        self.validate_language(lang)?;
        let (group, path) = self.split_group_key(key)?;
        self.group.merge(lang, group, path, value)?;
        tracing::info!(lang, group, key = path, "Added group translation");
        Ok(())
    }

    /// Adds keys not yet present in `lang` without touching existing ones.
    ///
    /// Single keys map to themselves, group keys get an empty value. Every key is
    /// checked against the files before the first write, so an invalid key or a
    /// path collision leaves all files untouched. Returns how many keys were added.
    ///
    /// # Errors
    /// Fails on invalid keys, path collisions, or I/O and parse errors.
    pub fn add_missing_translations(
        &self,
        lang: &str,
        missing: &MissingTranslations,
    ) -> Result<usize> {
        self.validate_language(lang)?;

        let mut by_group: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for key in &missing.group {
            let (group, path) = self.split_group_key(key)?;
            self.group.split_key(path)?;
            by_group.entry(group).or_default().push(path);
        }

        let mut added = 0;
        let mut single = None;
        if !missing.single.is_empty() {
            let mut translations = self.single.read(lang)?;
            let before = translations.len();
            for key in &missing.single {
                translations.entry(key.clone()).or_insert_with(|| key.clone());
            }
            if translations.len() > before {
                added += translations.len() - before;
                single = Some(translations);
            }
        }

        let mut groups = Vec::new();
        for (group, paths) in by_group {
            let mut tree = self.group.read(lang, group)?;
            let mut changed = false;
            for path in paths {
                let segments = self.group.split_key(path)?;
                if lookup(&tree, &segments).is_none() {
                    self.group.set(&mut tree, group, path, String::new())?;
                    added += 1;
                    changed = true;
                }
            }
            if changed {
                groups.push((group, tree));
            }
        }

        if let Some(translations) = &single {
            self.single.write(lang, translations)?;
        }
        for (group, tree) in &groups {
            self.group.write(lang, group, tree)?;
        }

        if added > 0 {
            tracing::info!(lang, added, "Added missing translations");
        }
        Ok(added)
    }

    /// Checks that `code` can name a language and is not an excluded directory.
    fn validate_language(&self, code: &str) -> Result<()> {
        guard::validate_language(code)?;
        if self.scanner.is_excluded(code) {
            return Err(StoreError::InvalidLanguage(code.to_string()));
        }
        Ok(())
    }

    /// Splits `group<sep>path` into its group name and in-group path.
    fn split_group_key<'a>(&self, key: &'a str) -> Result<(&'a str, &'a str)> {
        let Some((group, path)) = key.split_once(self.key_separator.as_str()) else {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "expected a group name followed by a key",
            });
        };
        guard::validate_group(group, key)?;
        if path.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "missing key after the group name",
            });
        }
        Ok((group, path))
    }
}
