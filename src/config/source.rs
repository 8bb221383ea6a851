//! Raw configuration sources.
//!
//! # Responsibilities
//! - Read optional `.env` and `.env.local` files from the working directory
//! - Overlay the process environment on top (final precedence)
//! - Present one string-keyed map to validation
//!
//! # Design Decisions
//! - Files are parsed with dotenvy without mutating the process environment
//! - A missing file is not an error; a malformed line is skipped
//! - Keys outside the schema are carried along but never cause failure

use std::collections::HashMap;
use std::path::Path;

/// Unvalidated string-keyed configuration input.
///
/// Built once per validation pass; validation never reads the process
/// environment directly.
#[derive(Debug, Clone, Default)]
pub struct RawEnvironment {
    vars: HashMap<String, String>,
}

impl RawEnvironment {
    /// Snapshot the process environment layered over `.env` and `.env.local`.
    pub fn from_process() -> Self {
        let mut raw = Self::default();
        raw.merge_file(Path::new(".env"));
        raw.merge_file(Path::new(".env.local"));
        raw.merge_vars(std::env::vars());
        raw
    }

    /// Build from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        raw.merge_vars(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        raw
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge a dotenv-format file; later merges win over earlier ones.
    pub fn merge_file(&mut self, path: &Path) {
        let Ok(entries) = dotenvy::from_path_iter(path) else {
            return;
        };
        for (key, value) in entries.flatten() {
            self.vars.insert(key, value);
        }
    }

    /// Merge key/value pairs; later merges win over earlier ones.
    pub fn merge_vars(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        self.vars.extend(vars);
    }
}
