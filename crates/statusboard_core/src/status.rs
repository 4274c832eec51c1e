/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::media::MediaKind;
use crate::store::{self, LoadOutcome};

/// The single current-state record shown on the display page. Field
/// names are the disk and wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    pub user_name: String,
    pub status: String,
    pub status_text: String,
    pub current_activity: String,
    pub custom_message: String,
    pub media_file: String,
    pub media_type: MediaKind,
    pub color_scheme: String,
    pub last_updated: String,
}

impl Default for StatusDocument {
    fn default() -> Self {
        Self {
            user_name: "Алексей Петров".to_string(),
            status: "available".to_string(),
            status_text: "Доступен".to_string(),
            current_activity: "Готов к работе".to_string(),
            custom_message: String::new(),
            media_file: String::new(),
            media_type: MediaKind::None,
            color_scheme: "blue".to_string(),
            last_updated: store::timestamp(),
        }
    }
}

impl StatusDocument {
    /// Points the document at an uploaded file.
    pub fn set_media(&mut self, filename: String, kind: MediaKind) {
        self.media_file = filename;
        self.media_type = kind;
    }

    pub fn clear_media(&mut self) {
        self.media_file = String::new();
        self.media_type = MediaKind::None;
    }
}

/// Singleton status document, one JSON file on disk.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> (StatusDocument, LoadOutcome) {
        store::load_json_or(&self.path, StatusDocument::default)
    }

    /// Stamps `last_updated` and rewrites the file in full. The stamp is
    /// always server-side, never client-supplied.
    pub fn save(&self, doc: &mut StatusDocument) -> Result<()> {
        doc.last_updated = store::timestamp();
        store::write_json(&self.path, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default_document() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let status = StatusStore::new(tmp.path().join("current_status.json"));
        let (doc, outcome) = status.load();
        assert_eq!(outcome, LoadOutcome::UsedDefault);
        assert_eq!(doc.user_name, "Алексей Петров");
        assert_eq!(doc.status, "available");
        assert_eq!(doc.status_text, "Доступен");
        assert_eq!(doc.current_activity, "Готов к работе");
        assert_eq!(doc.custom_message, "");
        assert_eq!(doc.media_file, "");
        assert_eq!(doc.media_type, MediaKind::None);
        assert_eq!(doc.color_scheme, "blue");
    }

    #[test]
    fn corrupt_file_yields_default_document() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("current_status.json");
        std::fs::write(&path, "{\"user_name\": 17}").expect("write");
        let (doc, outcome) = StatusStore::new(path).load();
        assert_eq!(outcome, LoadOutcome::UsedDefault);
        assert_eq!(doc.user_name, "Алексей Петров");
    }

    #[test]
    fn save_restamps_last_updated_and_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let status = StatusStore::new(tmp.path().join("current_status.json"));
        let mut doc = StatusDocument {
            user_name: "Мария".to_string(),
            status: "busy".to_string(),
            status_text: "Занята".to_string(),
            current_activity: "Пишу отчёт".to_string(),
            custom_message: "До 18:00".to_string(),
            media_file: "abc_cat.gif".to_string(),
            media_type: MediaKind::Gif,
            color_scheme: "red".to_string(),
            last_updated: "01.01.2000 00:00:00".to_string(),
        };
        status.save(&mut doc).expect("save");
        assert_ne!(doc.last_updated, "01.01.2000 00:00:00");

        let (loaded, outcome) = status.load();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(loaded, doc);
    }

    #[test]
    fn clear_media_resets_both_fields() {
        let mut doc = StatusDocument::default();
        doc.set_media("x.mp4".to_string(), MediaKind::Video);
        doc.clear_media();
        assert_eq!(doc.media_file, "");
        assert_eq!(doc.media_type, MediaKind::None);
    }
}
