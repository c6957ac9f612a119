//! File-backed translation storage.
/// Storage error types
mod error;
/// Atomic JSON file writes
mod fs;
/// Group translation files (`<lang>/<group>.json`)
mod group;
/// Language existence checks
mod guard;
/// Language and group discovery
mod scanner;
/// Single translation files (`<lang>.json`)
mod single;
/// The storage driver
mod store;

pub use error::{
    Result,
    StoreError,
};
pub use group::{
    GROUP_FILE_EXTENSION,
    GroupCodec,
};
pub use scanner::PathScanner;
pub use single::SingleCodec;
pub use store::TranslationStore;
