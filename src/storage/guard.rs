use std::collections::BTreeSet;

use super::{
    Result,
    StoreError,
};

/// Rejects codes that cannot name `<code>.json` and `<code>/` directly under the root.
pub(super) fn validate_language(code: &str) -> Result<()> {
    if is_plain_name(code) { Ok(()) } else { Err(StoreError::InvalidLanguage(code.to_string())) }
}

/// Same rule applied to a group name.
pub(super) fn validate_group(group: &str, key: &str) -> Result<()> {
    if is_plain_name(group) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "group name cannot be used as a file name",
        })
    }
}

/// Fails with [`StoreError::LanguageExists`] if `code` is already known.
pub(super) fn ensure_absent(languages: &BTreeSet<String>, code: &str) -> Result<()> {
    if languages.contains(code) {
        return Err(StoreError::LanguageExists(code.to_string()));
    }
    Ok(())
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
