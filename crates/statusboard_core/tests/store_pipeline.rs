/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use statusboard_core::media::{MediaHistory, MediaKind, MediaRecord};
use statusboard_core::paths::StorePaths;
use statusboard_core::status::StatusStore;
use statusboard_core::store::{self, LoadOutcome};
use statusboard_core::templates::{NewTemplate, TemplateStore};
use statusboard_core::upload::UploadDir;
use tempfile::tempdir;

#[test]
fn upload_then_reuse_then_template_apply() {
    let tmp = tempdir().expect("tempdir");
    let paths = StorePaths::new(tmp.path());
    paths.ensure_dirs().expect("dirs");

    let status = StatusStore::new(paths.status_file());
    let history = MediaHistory::new(paths.history_file());
    let templates = TemplateStore::new(paths.templates_file());
    let uploads = UploadDir::new(paths.upload_dir());

    // Fresh root: everything falls back to defaults.
    let (mut doc, outcome) = status.load();
    assert_eq!(outcome, LoadOutcome::UsedDefault);

    // Upload a gif and point the status at it.
    let stored = uploads
        .store("funny cat.gif", b"GIF89a")
        .expect("store")
        .expect("accepted");
    assert_eq!(stored.kind, MediaKind::Gif);
    doc.set_media(stored.filename.clone(), stored.kind);
    history
        .append(MediaRecord {
            filename: stored.filename.clone(),
            original_name: "funny cat.gif".to_string(),
            upload_time: store::timestamp(),
            file_type: stored.kind,
        })
        .expect("append");
    status.save(&mut doc).expect("save");

    // Upload a second file; history keeps both in order.
    let second = uploads
        .store("clip.webm", b"webm")
        .expect("store")
        .expect("accepted");
    history
        .append(MediaRecord {
            filename: second.filename.clone(),
            original_name: "clip.webm".to_string(),
            upload_time: store::timestamp(),
            file_type: second.kind,
        })
        .expect("append");
    let (records, _) = history.load();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].original_name, "funny cat.gif");

    // Re-point at the first upload by filename, as /api/use_media does.
    assert!(uploads.contains(&records[0].filename));
    let (mut doc, _) = status.load();
    doc.set_media(records[0].filename.clone(), MediaKind::from_filename(&records[0].filename));
    status.save(&mut doc).expect("save");
    assert_eq!(status.load().0.media_type, MediaKind::Gif);

    // Applying a template leaves the media selection alone.
    let created = templates
        .create(NewTemplate {
            name: "Фокус".to_string(),
            status: "busy".to_string(),
            status_text: "Не беспокоить".to_string(),
            current_activity: "Глубокая работа".to_string(),
            custom_message: String::new(),
            color_scheme: "purple".to_string(),
        })
        .expect("create");
    let template = templates.find(created.id).expect("find");
    let (mut doc, _) = status.load();
    let media_before = doc.media_file.clone();
    template.apply_to(&mut doc);
    status.save(&mut doc).expect("save");

    let (reloaded, _) = status.load();
    assert_eq!(reloaded.status, "busy");
    assert_eq!(reloaded.color_scheme, "purple");
    assert_eq!(reloaded.media_file, media_before);
    assert_eq!(reloaded.media_type, MediaKind::Gif);
}
