/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Which path a fail-soft load took. Missing or unreadable files are
/// masked by defaults rather than surfaced as errors, but callers (and
/// tests) can still see which happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    UsedDefault,
}

/// Reads a JSON document, falling back to `default` when the file is
/// missing or malformed. Corruption is logged and swallowed.
pub fn load_json_or<T, F>(path: &Path, default: F) -> (T, LoadOutcome)
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let raw = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), "store file unreadable, using defaults: {e}");
            }
            return (default(), LoadOutcome::UsedDefault);
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => (v, LoadOutcome::Loaded),
        Err(e) => {
            warn!(path = %path.display(), "store file malformed, using defaults: {e}");
            (default(), LoadOutcome::UsedDefault)
        }
    }
}

/// Overwrites the whole document in place. No atomic rename; the last
/// writer wins, as a single-operator deployment tolerates.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("create store dir")?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize store document")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Local wall-clock time in the `DD.MM.YYYY HH:MM:SS` format used for
/// `last_updated` and media upload times.
pub fn timestamp() -> String {
    chrono::Local::now().format("%d.%m.%Y %H:%M:%S").to_string()
}
