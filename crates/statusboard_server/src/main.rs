/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};

use statusboard_core::media::{MediaHistory, MediaKind, MediaRecord};
use statusboard_core::paths::{StorePaths, MAX_BODY_BYTES};
use statusboard_core::status::StatusStore;
use statusboard_core::store;
use statusboard_core::templates::{NewTemplate, TemplateStore};
use statusboard_core::upload::UploadDir;

mod pages;

#[derive(Clone)]
struct AppState {
    status: StatusStore,
    history: MediaHistory,
    templates: TemplateStore,
    uploads: UploadDir,
}

impl AppState {
    fn new(paths: &StorePaths) -> Self {
        Self {
            status: StatusStore::new(paths.status_file()),
            history: MediaHistory::new(paths.history_file()),
            templates: TemplateStore::new(paths.templates_file()),
            uploads: UploadDir::new(paths.upload_dir()),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let root = std::env::var("STATUSBOARD_ROOT").unwrap_or_else(|_| ".".to_string());
    let bind = std::env::var("STATUSBOARD_BIND").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let bind: SocketAddr = bind.parse().expect("STATUSBOARD_BIND invalid");

    let paths = StorePaths::new(PathBuf::from(root));
    paths.ensure_dirs().expect("data dirs init");
    let state = AppState::new(&paths);
    let app = build_router(state);

    info!("statusboard listening on http://{bind}");
    let listener = tokio::net::TcpListener::bind(bind).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/admin", get(admin))
        .route("/static/uploads/:filename", get(uploaded_file))
        .route("/api/status", get(get_status))
        .route("/api/update_status", post(update_status))
        .route("/api/use_media", post(use_media))
        .route("/api/clear_media", post(clear_media))
        .route("/api/save_template", post(save_template))
        .route("/api/apply_template", post(apply_template))
        .route("/api/delete_template", post(delete_template))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                info_span!("http", method = %req.method(), uri = %req.uri())
            }),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let (doc, _) = state.status.load();
    Html(pages::render_index(&doc))
}

async fn admin(State(state): State<AppState>) -> Html<String> {
    let (doc, _) = state.status.load();
    let (history, _) = state.history.load();
    let (templates, _) = state.templates.load();
    Html(pages::render_admin(&doc, &history, &templates))
}

async fn uploaded_file(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let Some(path) = state.uploads.resolve(&filename) else {
        return (StatusCode::BAD_REQUEST, "invalid filename").into_response();
    };
    let bytes = match std::fs::read(&path) {
        Ok(v) => v,
        Err(_) => return (StatusCode::NOT_FOUND, "not found").into_response(),
    };
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    // Stored names carry a random token, so they never change content.
    headers.insert(
        http::header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );
    (StatusCode::OK, headers, bytes).into_response()
}

async fn get_status(State(state): State<AppState>) -> Response {
    let (doc, _) = state.status.load();
    axum::Json(doc).into_response()
}

/// Merges any non-empty text fields into the status document and, when a
/// valid file part is present, stores it and records it in the history.
/// An invalid or missing file part skips only the media portion; the
/// request still succeeds for the text fields.
async fn update_status(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let (mut doc, _) = state.status.load();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "media_file" {
            let original = field.file_name().unwrap_or_default().to_string();
            if original.is_empty() {
                continue;
            }
            match field.bytes().await {
                Ok(bytes) => upload = Some((original, bytes.to_vec())),
                Err(e) => warn!("reading upload field failed: {e}"),
            }
            continue;
        }
        let value = match field.text().await {
            Ok(v) => v,
            Err(_) => continue,
        };
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "user_name" => doc.user_name = value,
            "status" => doc.status = value,
            "status_text" => doc.status_text = value,
            "current_activity" => doc.current_activity = value,
            "custom_message" => doc.custom_message = value,
            "color_scheme" => doc.color_scheme = value,
            _ => {}
        }
    }

    if let Some((original, bytes)) = upload {
        match state.uploads.store(&original, &bytes) {
            Ok(Some(stored)) => {
                doc.set_media(stored.filename.clone(), stored.kind);
                let record = MediaRecord {
                    filename: stored.filename,
                    original_name: original,
                    upload_time: store::timestamp(),
                    file_type: stored.kind,
                };
                if let Err(e) = state.history.append(record) {
                    warn!("media history append failed: {e:#}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("upload store failed: {e:#}"),
        }
    }

    if let Err(e) = state.status.save(&mut doc) {
        warn!("status save failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true, "data": doc })).into_response()
}

#[derive(Debug, Deserialize)]
struct UseMediaRequest {
    media_file: String,
}

async fn use_media(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<UseMediaRequest>,
) -> Response {
    if !state.uploads.contains(&req.media_file) {
        return axum::Json(serde_json::json!({ "success": false, "error": "File not found" }))
            .into_response();
    }
    let (mut doc, _) = state.status.load();
    let kind = MediaKind::from_filename(&req.media_file);
    doc.set_media(req.media_file, kind);
    if let Err(e) = state.status.save(&mut doc) {
        warn!("status save failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true })).into_response()
}

async fn clear_media(State(state): State<AppState>) -> Response {
    let (mut doc, _) = state.status.load();
    doc.clear_media();
    if let Err(e) = state.status.save(&mut doc) {
        warn!("status save failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true })).into_response()
}

async fn save_template(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<NewTemplate>,
) -> Response {
    if let Err(e) = state.templates.create(req) {
        warn!("template create failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true })).into_response()
}

#[derive(Debug, Deserialize)]
struct TemplateIdRequest {
    template_id: u64,
}

async fn apply_template(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<TemplateIdRequest>,
) -> Response {
    let Some(template) = state.templates.find(req.template_id) else {
        return axum::Json(
            serde_json::json!({ "success": false, "error": "Template not found" }),
        )
        .into_response();
    };
    let (mut doc, _) = state.status.load();
    template.apply_to(&mut doc);
    if let Err(e) = state.status.save(&mut doc) {
        warn!("status save failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true, "data": doc })).into_response()
}

async fn delete_template(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<TemplateIdRequest>,
) -> Response {
    if let Err(e) = state.templates.delete(req.template_id) {
        warn!("template delete failed: {e:#}");
    }
    axum::Json(serde_json::json!({ "success": true })).into_response()
}
