// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading for `Init`.
//!
//! Per spec §6, configuration "affects only the collaborators and is
//! otherwise opaque" to the core — `ErConfig` is parsed here and handed,
//! unopened beyond parsing, to collaborator `init()` calls. A missing or
//! unreadable path is not an error: it just means "use collaborator
//! defaults," the same way the teacher's `config.toml` loader tolerates an
//! absent file.

use std::collections::BTreeMap;
use std::path::Path;

/// Opaque key/value configuration handed to collaborators at `Init` time.
///
/// The core never reads any of these keys itself.
#[derive(Debug, Clone, Default)]
pub struct ErConfig {
    values: BTreeMap<String, toml::Value>,
}

impl ErConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a TOML configuration file. Returns an empty config if `path` is
    /// `None`, does not exist, or fails to parse — a malformed or missing
    /// config file never fails `Init`.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::empty();
        };
        let Ok(text) = std::fs::read_to_string(path) else {
            tracing::warn!(path = %path.display(), "config file unreadable, using defaults");
            return Self::empty();
        };
        match toml::from_str::<toml::Value>(&text) {
            Ok(toml::Value::Table(table)) => Self { values: table.into_iter().collect() },
            Ok(_) | Err(_) => {
                tracing::warn!(path = %path.display(), "config file not a TOML table, using defaults");
                Self::empty()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
