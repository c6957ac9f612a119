use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Largest accepted `indentWidth`.
const MAX_INDENT_WIDTH: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludedDirectories[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Directory holding `<lang>.json` files and `<lang>/` group directories.
    /// Relative paths are resolved against the workspace root.
    pub lang_path: PathBuf,

    /// Separates the group name and nested keys in group translation keys.
    pub key_separator: String,

    /// Directories under the lang path that are not languages.
    pub excluded_directories: Vec<String>,

    /// Spaces per indentation level in written files.
    pub indent_width: usize,
}

impl StoreSettings {
    /// # Errors
    /// - Required field is empty
    /// - Indent width out of range
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "langPath",
                "The path cannot be empty. Example: \"lang\" or \"resources/lang\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        for (index, dir) in self.excluded_directories.iter().enumerate() {
            if dir.is_empty() || dir.contains(['/', '\\']) {
                errors.push(ValidationError::new(
                    format!("excludedDirectories[{index}]"),
                    format!("'{dir}' is not a directory name"),
                ));
            }
        }

        if self.indent_width > MAX_INDENT_WIDTH {
            errors.push(ValidationError::new(
                "indentWidth",
                format!("Must be at most {MAX_INDENT_WIDTH}, got {}", self.indent_width),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            lang_path: PathBuf::from("lang"),
            key_separator: ".".to_string(),
            excluded_directories: vec!["vendor".to_string()],
            indent_width: 4,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = StoreSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"keySeparator": "/"}"#;

        let settings: StoreSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("/"));
        assert_that!(settings.excluded_directories, len(eq(1)));
        assert_that!(settings.indent_width, eq(4));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: StoreSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.excluded_directories, elements_are![eq("vendor")]);
        assert_eq!(settings.lang_path, PathBuf::from("lang"));
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = StoreSettings { key_separator: String::new(), ..StoreSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_lang_path_empty() {
        let settings = StoreSettings { lang_path: PathBuf::new(), ..StoreSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("langPath"))])
        );
    }

    #[rstest]
    fn validate_invalid_excluded_directory() {
        let settings = StoreSettings {
            excluded_directories: vec!["vendor".to_string(), "a/b".to_string()],
            ..StoreSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("excludedDirectories[1]"))])
        );
    }

    #[rstest]
    fn validate_collects_multiple_errors() {
        let settings = StoreSettings {
            key_separator: String::new(),
            indent_width: 64,
            ..StoreSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                field!(ValidationError.field_path, eq("keySeparator")),
                all![
                    field!(ValidationError.field_path, eq("indentWidth")),
                    field!(ValidationError.message, contains_substring("at most 16"))
                ]
            ])
        );
    }

    #[rstest]
    fn validation_error_display() {
        let error = ConfigError::ValidationErrors(vec![ValidationError::new("a", "b")]);

        assert_that!(error.to_string(), contains_substring("1. a - b"));
    }
}
