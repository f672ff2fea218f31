//! Local persistence for players, challenge results and chat transcripts.
//!
//! Everything is kept in a flat key-value namespace of JSON strings:
//!
//! - [`kv`] - the [`KeyValueStore`] trait with in-memory and directory-backed
//!   implementations
//! - [`json`] - typed access on top of any store
//! - [`records`] - player profiles, challenge results and the leaderboard
//!
//! Writes replace the previous value under a key. There is no versioning or migration.

use std::{io, path::PathBuf};

pub use self::{json::JsonStoreExt, kv::*};

pub mod json;
pub mod kv;
pub mod records;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("invalid store key `{key}`")]
    InvalidKey { key: String },
    #[display("no entry `{key}` in store")]
    NotFound { key: String },
    #[display("failed to access {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed JSON under key `{key}`")]
    Json {
        key: String,
        source: serde_json::Error,
    },
}
