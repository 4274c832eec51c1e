/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Current status document, relative to the root.
pub const STATUS_FILE: &str = "data/current_status.json";
/// Media history document, relative to the root.
pub const HISTORY_FILE: &str = "data/media_history.json";
/// Template presets document, relative to the root.
pub const TEMPLATES_FILE: &str = "data/templates/templates.json";
/// Directory holding uploaded media files, relative to the root.
pub const UPLOAD_DIR: &str = "static/uploads";

/// Global request body cap. Uploads are fully buffered, so this also
/// bounds the largest accepted media file.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Resolves the fixed on-disk layout under an injected root directory,
/// so tests can run against a temp dir with no shared state.
#[derive(Debug, Clone)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn status_file(&self) -> PathBuf {
        self.root.join(STATUS_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    pub fn templates_file(&self) -> PathBuf {
        self.root.join(TEMPLATES_FILE)
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.root.join(UPLOAD_DIR)
    }

    /// Creates the data and upload directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.root.join("data"),
            self.root.join("data/templates"),
            self.upload_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create dir {}", dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dirs_creates_layout() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::new(tmp.path());
        paths.ensure_dirs().expect("ensure");
        assert!(paths.upload_dir().is_dir());
        assert!(paths.templates_file().parent().unwrap().is_dir());
    }
}
