//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のフィクスチャを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;

use rstest::fixture;
use tempfile::TempDir;

/// `en.json` / `en/test.json` / 空の `es/` を持つ翻訳ディレクトリを作成する
#[fixture]
pub(crate) fn lang_fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("en.json"),
        "{\n    \"Hello\": \"Hello\",\n    \"What's up\": \"What's up!\"\n}",
    )
    .unwrap();
    fs::create_dir(root.join("en")).unwrap();
    fs::write(
        root.join("en/test.json"),
        "{\n    \"hello\": \"Hello\",\n    \"whats_up\": \"What's up!\"\n}\n",
    )
    .unwrap();
    fs::create_dir(root.join("es")).unwrap();

    temp_dir
}
