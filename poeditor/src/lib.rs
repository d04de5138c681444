//! luagen-poeditor
//!
//! Mirrors a POEditor project to the on-disk layout the translation compiler
//! reads (`terms.json`, `languages.json`, `exports/<code>.json`).
//!
//! - [`TranslationSource`]: the three reads the sync needs,
//! - [`PoEditorClient`]: blocking implementation against the v2 API,
//! - [`sync_to_disk`]: sequential fetch and write, aborting on the first error.

pub mod error;
pub mod client;
pub mod sync;

pub use client::{api_token_from_env, PoEditorClient, PoEditorOptions, TranslationSource};
pub use error::FetchError;
pub use sync::{sync_to_disk, SyncSummary};
