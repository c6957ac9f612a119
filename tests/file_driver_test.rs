//! ファイルドライバーの振る舞いに関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use googletest::prelude::*;
use rstest::*;
use serde_json::{
    Value,
    json,
};
use tempfile::TempDir;
use translation_store::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use translation_store::types::LanguageTranslations;
use translation_store::{
    StoreError,
    TranslationStore,
};

const EN_JSON: &str = "{\n    \"Hello\": \"Hello\",\n    \"What's up\": \"What's up!\"\n}";

#[fixture]
fn lang_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("en.json"), EN_JSON).unwrap();
    fs::create_dir(root.join("en")).unwrap();
    fs::write(root.join("en/test.json"), r#"{"hello": "Hello", "whats_up": "What's up!"}"#)
        .unwrap();
    fs::create_dir(root.join("es")).unwrap();
    temp_dir
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn to_json(translations: &LanguageTranslations) -> Value {
    serde_json::to_value(translations).unwrap()
}

/// 全スナップショット（ファイルパス → 内容）
fn snapshot(root: &Path) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if path.is_dir() {
            for (child, content) in snapshot(&path) {
                entries.push((format!("{name}/{child}"), content));
            }
            entries.push((format!("{name}/"), String::new()));
        } else {
            entries.push((name, fs::read_to_string(&path).unwrap()));
        }
    }
    entries.sort();
    entries
}

#[rstest]
fn it_returns_all_languages(lang_dir: TempDir) {
    fs::write(lang_dir.path().join("es.json"), "{}").unwrap();
    let store = TranslationStore::new(lang_dir.path());

    let languages: Vec<String> = store.all_languages().unwrap().into_iter().collect();

    assert_that!(languages, unordered_elements_are![eq("en"), eq("es")]);
}

#[rstest]
fn it_returns_all_translations(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    let translations = store.all_translations().unwrap();

    assert_that!(translations.len(), eq(store.all_languages().unwrap().len()));
    assert_eq!(
        to_json(&translations["en"]),
        json!({
            "single": { "Hello": "Hello", "What's up": "What's up!" },
            "group": { "test": { "hello": "Hello", "whats_up": "What's up!" } }
        })
    );
    assert_eq!(to_json(&translations["es"]), json!({ "single": {}, "group": {} }));
}

#[rstest]
fn it_returns_all_translations_for_a_given_language(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    let en = store.all_translations_for("en").unwrap();

    assert_eq!(&en, &store.all_translations().unwrap()["en"]);
    let keys: Vec<&str> = en.single.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Hello", "What's up"]);
}

#[rstest]
fn it_throws_an_error_if_a_language_exists(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());
    let before = snapshot(lang_dir.path());

    let result = store.add_language("en");

    assert!(matches!(result, Err(StoreError::LanguageExists(code)) if code == "en"));
    assert_eq!(snapshot(lang_dir.path()), before);
}

#[rstest]
fn it_can_add_a_new_language(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_language("fr").unwrap();

    assert_eq!(fs::read_to_string(lang_dir.path().join("fr.json")).unwrap(), "{}");
    let fr_dir = lang_dir.path().join("fr");
    assert!(fr_dir.is_dir());
    assert_eq!(fs::read_dir(&fr_dir).unwrap().count(), 0);
    assert!(store.language_exists("fr").unwrap());
}

#[rstest]
fn it_can_add_a_new_translation_to_a_group_translation_file(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_group_translation("es", "test.hello", "Hola!").unwrap();

    assert_eq!(read_json(&lang_dir.path().join("es/test.json")), json!({ "hello": "Hola!" }));
    let es = store.all_translations_for("es").unwrap();
    assert_eq!(to_json(&es)["group"]["test"]["hello"], "Hola!");
}

#[rstest]
fn it_can_add_a_new_translation_to_an_existing_group_translation_file(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_group_translation("en", "test.test", "Testing").unwrap();

    let en = store.all_translations_for("en").unwrap();
    let keys: Vec<&str> = en.group["test"].keys().map(String::as_str).collect();
    assert_eq!(keys, ["hello", "whats_up", "test"]);
    assert_eq!(
        to_json(&en)["group"]["test"],
        json!({ "hello": "Hello", "whats_up": "What's up!", "test": "Testing" })
    );
}

#[rstest]
fn it_can_add_a_new_translation_to_a_json_translation_file(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_single_translation("es", "Hello", "Hola!").unwrap();

    assert_eq!(read_json(&lang_dir.path().join("es.json")), json!({ "Hello": "Hola!" }));
    assert_eq!(store.all_translations_for("es").unwrap().single["Hello"], "Hola!");
}

#[rstest]
fn it_can_add_a_new_translation_to_an_existing_json_translation_file(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_single_translation("en", "Test", "Testing").unwrap();

    assert_eq!(
        fs::read_to_string(lang_dir.path().join("en.json")).unwrap(),
        "{\n    \"Hello\": \"Hello\",\n    \"What's up\": \"What's up!\",\n    \"Test\": \"Testing\"\n}"
    );
}

#[rstest]
fn adding_the_same_single_translation_twice_is_idempotent(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());
    let path = lang_dir.path().join("en.json");

    store.add_single_translation("en", "Test", "Testing").unwrap();
    let once = fs::read_to_string(&path).unwrap();
    store.add_single_translation("en", "Test", "Testing").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), once);
}

#[rstest]
fn non_ascii_values_are_written_literally(lang_dir: TempDir) {
    let store = TranslationStore::new(lang_dir.path());

    store.add_single_translation("ja", "Hello", "こんにちは").unwrap();

    let content = fs::read_to_string(lang_dir.path().join("ja.json")).unwrap();
    assert_that!(content, contains_substring("こんにちは"));
}

#[rstest]
fn malformed_files_are_reported(lang_dir: TempDir) {
    fs::write(lang_dir.path().join("en/broken.json"), "{").unwrap();
    let store = TranslationStore::new(lang_dir.path());
    let before = snapshot(lang_dir.path());

    assert!(matches!(store.all_translations(), Err(StoreError::Parse { .. })));
    assert!(matches!(
        store.add_group_translation("en", "broken.key", "x"),
        Err(StoreError::Parse { .. })
    ));
    assert_eq!(snapshot(lang_dir.path()), before);
}

#[rstest]
fn store_uses_configured_lang_path() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE_NAME),
        r#"{"langPath": "resources/lang", "indentWidth": 2}"#,
    )
    .unwrap();
    fs::create_dir_all(workspace.path().join("resources/lang")).unwrap();
    let mut config = ConfigManager::new();
    config.load_settings(Some(workspace.path().to_path_buf())).unwrap();
    let store = TranslationStore::from_config(&config);

    store.add_single_translation("en", "Hello", "Hello").unwrap();

    assert_eq!(
        fs::read_to_string(workspace.path().join("resources/lang/en.json")).unwrap(),
        "{\n  \"Hello\": \"Hello\"\n}"
    );
}
