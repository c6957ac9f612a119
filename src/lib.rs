//! translation-store
//!
//! Language discovery and translation file storage for `<lang>.json` single
//! translations and `<lang>/<group>.json` group translations.

pub mod config;
pub mod storage;
mod test_utils;
pub mod types;

pub use storage::{
    StoreError,
    TranslationStore,
};
