/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::{self, LoadOutcome};

/// How the display page should embed the current media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    None,
    Image,
    Gif,
    Video,
}

impl MediaKind {
    /// Kind for an already-validated extension. Callers check the
    /// allow-list first; anything unrecognized renders as an image.
    pub fn for_extension(ext: &str) -> MediaKind {
        match ext.to_ascii_lowercase().as_str() {
            "gif" => MediaKind::Gif,
            "mp4" | "webm" => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn from_filename(filename: &str) -> MediaKind {
        match crate::upload::extension_of(filename) {
            Some(ext) => MediaKind::for_extension(&ext),
            None => MediaKind::Image,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::None => "none",
            MediaKind::Image => "image",
            MediaKind::Gif => "gif",
            MediaKind::Video => "video",
        }
    }
}

/// One successfully uploaded file. Immutable once written; records only
/// accumulate, nothing ever deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub filename: String,
    pub original_name: String,
    pub upload_time: String,
    pub file_type: MediaKind,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryDocument {
    media: Vec<MediaRecord>,
}

/// Append-only upload log, persisted as `{"media": [...]}`.
#[derive(Debug, Clone)]
pub struct MediaHistory {
    path: PathBuf,
}

impl MediaHistory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> (Vec<MediaRecord>, LoadOutcome) {
        let (doc, outcome) = store::load_json_or(&self.path, HistoryDocument::default);
        (doc.media, outcome)
    }

    /// Appends one record, rewriting the whole document.
    pub fn append(&self, record: MediaRecord) -> Result<()> {
        let (mut media, _) = self.load();
        media.push(record);
        store::write_json(&self.path, &HistoryDocument { media })
    }
}
