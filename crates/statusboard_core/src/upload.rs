/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use rand::RngCore as _;
use std::path::{Path, PathBuf};

use crate::media::MediaKind;

/// Extensions accepted for upload. Extension-only; file content is
/// never sniffed.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "mp4", "webm"];

/// Lowercased extension after the last dot, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_allowed(filename: &str) -> bool {
    extension_of(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn random_token() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    b.iter().map(|v| format!("{v:02x}")).collect()
}

/// Strips path components and anything outside ASCII `[A-Za-z0-9._-]`,
/// mapping whitespace to underscores.
fn sanitize_component(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Collision-free stored name: random hex token + sanitized stem + the
/// original (lowercased) extension. `None` when the extension is not
/// allowed. A stem that sanitizes to nothing falls back to `upload`, so
/// the stored name always keeps a usable extension.
pub fn generate_stored_name(original: &str) -> Option<String> {
    let ext = extension_of(original)?;
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => base,
    };
    let mut stem = sanitize_component(stem);
    if stem.is_empty() {
        stem = "upload".to_string();
    }
    Some(format!("{}_{stem}.{ext}", random_token()))
}

/// A stored upload: the generated on-disk name and the kind derived
/// from its extension.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub kind: MediaKind,
}

/// The directory of uploaded media files.
#[derive(Debug, Clone)]
pub struct UploadDir {
    dir: PathBuf,
}

impl UploadDir {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a stored filename, refusing traversal attempts.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return None;
        }
        Some(self.dir.join(filename))
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.resolve(filename).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Validates the original filename and writes the bytes under a
    /// fresh stored name. `Ok(None)` when the name is rejected; the
    /// caller treats that as "skip the media portion".
    pub fn store(&self, original: &str, bytes: &[u8]) -> Result<Option<StoredUpload>> {
        let Some(filename) = generate_stored_name(original) else {
            return Ok(None);
        };
        let kind = MediaKind::from_filename(&filename);
        std::fs::create_dir_all(&self.dir).context("create upload dir")?;
        std::fs::write(self.dir.join(&filename), bytes)
            .with_context(|| format!("write upload {filename}"))?;
        Ok(Some(StoredUpload { filename, kind }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_extension_only() {
        assert!(is_allowed("photo.png"));
        assert!(is_allowed("PHOTO.JPG"));
        assert!(is_allowed("clip.webm"));
        assert!(!is_allowed("notes.txt"));
        assert!(!is_allowed("no_extension"));
        assert!(!is_allowed("trailing."));
    }

    #[test]
    fn sanitizer_strips_paths_and_unsafe_characters() {
        assert_eq!(sanitize_component("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_component("my photo (1)"), "my_photo_1");
        assert_eq!(sanitize_component("..hidden.."), "hidden");
        // Non-ASCII drops entirely.
        assert_eq!(sanitize_component("картинка"), "");
    }

    #[test]
    fn stored_names_keep_the_extension_and_differ() {
        let a = generate_stored_name("cat.GIF").expect("name");
        let b = generate_stored_name("cat.GIF").expect("name");
        assert!(a.ends_with("_cat.gif"));
        assert_ne!(a, b);
        // Token is 16 random bytes as hex.
        assert_eq!(a.split('_').next().unwrap().len(), 32);
    }

    #[test]
    fn stored_name_falls_back_when_stem_sanitizes_away() {
        let name = generate_stored_name("картинка.png").expect("name");
        assert!(name.ends_with("_upload.png"));
    }

    #[test]
    fn disallowed_extension_yields_no_name() {
        assert!(generate_stored_name("script.exe").is_none());
        assert!(generate_stored_name("noext").is_none());
    }

    #[test]
    fn resolve_refuses_traversal() {
        let uploads = UploadDir::new(PathBuf::from("/tmp/uploads"));
        assert!(uploads.resolve("ok.png").is_some());
        assert!(uploads.resolve("").is_none());
        assert!(uploads.resolve("../secret").is_none());
        assert!(uploads.resolve("a/b.png").is_none());
        assert!(uploads.resolve("a\\b.png").is_none());
    }

    #[test]
    fn store_writes_file_and_derives_kind() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let uploads = UploadDir::new(tmp.path().join("uploads"));
        let stored = uploads
            .store("dance move.mp4", b"not really video")
            .expect("store")
            .expect("accepted");
        assert_eq!(stored.kind, MediaKind::Video);
        assert!(uploads.contains(&stored.filename));
        let bytes = std::fs::read(uploads.resolve(&stored.filename).unwrap()).unwrap();
        assert_eq!(bytes, b"not really video");
    }

    #[test]
    fn store_rejects_disallowed_without_writing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let uploads = UploadDir::new(tmp.path().join("uploads"));
        let stored = uploads.store("evil.exe", b"nope").expect("store");
        assert!(stored.is_none());
        assert!(!uploads.dir().exists());
    }
}
