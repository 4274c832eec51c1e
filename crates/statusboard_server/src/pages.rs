/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use statusboard_core::media::{MediaKind, MediaRecord};
use statusboard_core::status::StatusDocument;
use statusboard_core::templates::Template;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn accent_color(scheme: &str) -> &'static str {
    match scheme {
        "green" => "#34c759",
        "yellow" => "#ffcc00",
        "red" => "#ff3b30",
        "gray" => "#8e8e93",
        "purple" => "#af52de",
        _ => "#0a84ff",
    }
}

fn media_embed(doc: &StatusDocument) -> String {
    if doc.media_file.is_empty() {
        return String::new();
    }
    let src = format!("/static/uploads/{}", html_escape(&doc.media_file));
    match doc.media_type {
        MediaKind::Image | MediaKind::Gif => {
            format!(r#"<div class="media"><img src="{src}" alt=""></div>"#)
        }
        MediaKind::Video => format!(
            r#"<div class="media"><video src="{src}" autoplay loop muted playsinline></video></div>"#
        ),
        MediaKind::None => String::new(),
    }
}

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="ru">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{USER_NAME}} — статус</title>
  <style>
    :root { --accent: {{ACCENT}}; }
    * { box-sizing: border-box; }
    body { margin:0; min-height:100vh; display:flex; align-items:center; justify-content:center;
           background:#0b0e12; color:#e6f0ff; font-family:system-ui, sans-serif; }
    .card { max-width:720px; width:92%; padding:40px; border-radius:16px; background:#141920;
            border-top:6px solid var(--accent); text-align:center; }
    .dot { display:inline-block; width:14px; height:14px; border-radius:50%; background:var(--accent);
           margin-right:10px; vertical-align:middle; }
    h1 { font-size:28px; margin:0 0 6px; }
    .status { font-size:22px; color:var(--accent); margin:10px 0; }
    .activity { font-size:18px; color:#aab4c4; margin:6px 0; }
    .message { font-size:16px; margin:16px 0; padding:12px; border-radius:8px; background:#1c232d; }
    .media img, .media video { max-width:100%; max-height:360px; border-radius:12px; margin-top:18px; }
    .updated { font-size:12px; color:#5d6878; margin-top:22px; }
  </style>
</head>
<body>
  <div class="card">
    <h1>{{USER_NAME}}</h1>
    <div class="status"><span class="dot"></span>{{STATUS_TEXT}}</div>
    <div class="activity">{{CURRENT_ACTIVITY}}</div>
    {{MESSAGE_BLOCK}}
    {{MEDIA_BLOCK}}
    <div class="updated">Обновлено: {{LAST_UPDATED}}</div>
  </div>
  <script>
    const shownAt = {{LAST_UPDATED_JSON}};
    setInterval(async () => {
      try {
        const res = await fetch("/api/status");
        const data = await res.json();
        if (data.last_updated !== shownAt) location.reload();
      } catch (e) { /* display keeps last known state */ }
    }, 5000);
  </script>
</body>
</html>"##;

pub fn render_index(doc: &StatusDocument) -> String {
    let message_block = if doc.custom_message.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="message">{}</div>"#, html_escape(&doc.custom_message))
    };
    INDEX_HTML
        .replace("{{USER_NAME}}", &html_escape(&doc.user_name))
        .replace("{{STATUS_TEXT}}", &html_escape(&doc.status_text))
        .replace("{{CURRENT_ACTIVITY}}", &html_escape(&doc.current_activity))
        .replace("{{MESSAGE_BLOCK}}", &message_block)
        .replace("{{MEDIA_BLOCK}}", &media_embed(doc))
        .replace("{{ACCENT}}", accent_color(&doc.color_scheme))
        .replace(
            "{{LAST_UPDATED_JSON}}",
            &serde_json::to_string(&doc.last_updated).unwrap_or_else(|_| "\"\"".to_string()),
        )
        .replace("{{LAST_UPDATED}}", &html_escape(&doc.last_updated))
}

const ADMIN_HTML: &str = r##"<!doctype html>
<html lang="ru">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Статус — администрирование</title>
  <style>
    * { box-sizing: border-box; }
    body { margin:0; background:#0b0e12; color:#e6f0ff; font-family:system-ui, sans-serif; }
    .wrap { max-width:860px; margin:32px auto; padding:0 16px; }
    h1 { font-size:22px; }
    h2 { font-size:17px; margin-top:30px; border-top:1px solid #232b36; padding-top:18px; }
    label { display:block; font-size:13px; color:#8b97a8; margin:12px 0 4px; }
    input, select { width:100%; padding:8px 10px; background:#141920; border:1px solid #232b36;
                    border-radius:4px; color:#e6f0ff; font-size:14px; }
    button { margin-top:12px; padding:8px 16px; background:#0a84ff; color:#fff; border:none;
             border-radius:4px; font-size:14px; cursor:pointer; }
    button.danger { background:#ff3b30; }
    button.quiet { background:#2b3442; }
    .row { display:flex; align-items:center; justify-content:space-between; gap:10px;
           padding:10px 12px; margin-top:8px; background:#141920; border-radius:6px; }
    .row .meta { font-size:13px; color:#8b97a8; }
    .msg { margin-left:10px; font-size:13px; color:#34c759; }
  </style>
</head>
<body>
  <div class="wrap">
    <h1>Администрирование статуса</h1>

    <h2>Текущий статус</h2>
    <form id="status-form">
      <label>Имя</label>
      <input name="user_name" value="{{USER_NAME}}">
      <label>Статус</label>
      <select name="status">
        <option value="">(без изменений)</option>
        <option value="available">available</option>
        <option value="busy">busy</option>
        <option value="meeting">meeting</option>
        <option value="away">away</option>
      </select>
      <label>Текст статуса</label>
      <input name="status_text" value="{{STATUS_TEXT}}">
      <label>Чем занят</label>
      <input name="current_activity" value="{{CURRENT_ACTIVITY}}">
      <label>Сообщение</label>
      <input name="custom_message" value="{{CUSTOM_MESSAGE}}">
      <label>Цветовая схема</label>
      <select name="color_scheme">
        <option value="">(без изменений)</option>
        <option value="blue">blue</option>
        <option value="green">green</option>
        <option value="yellow">yellow</option>
        <option value="red">red</option>
        <option value="gray">gray</option>
        <option value="purple">purple</option>
      </select>
      <label>Медиа (png, jpg, jpeg, gif, mp4, webm)</label>
      <input type="file" name="media_file">
      <button type="submit">Сохранить</button>
      <button type="button" class="quiet" id="clear-media">Убрать медиа</button>
      <span class="msg" id="status-msg"></span>
    </form>

    <h2>Шаблоны</h2>
    <div id="templates">{{TEMPLATE_ROWS}}</div>
    <form id="template-form">
      <label>Название</label>
      <input name="name" required>
      <label>Статус</label>
      <input name="status" required>
      <label>Текст статуса</label>
      <input name="status_text" required>
      <label>Чем занят</label>
      <input name="current_activity" required>
      <label>Сообщение</label>
      <input name="custom_message">
      <label>Цветовая схема</label>
      <input name="color_scheme" value="blue">
      <button type="submit">Сохранить шаблон</button>
    </form>

    <h2>История медиа</h2>
    <div id="history">{{HISTORY_ROWS}}</div>
  </div>
  <script>
    async function post(url, body) {
      const res = await fetch(url, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body)
      });
      return res.json();
    }

    document.getElementById("status-form").onsubmit = async (e) => {
      e.preventDefault();
      const res = await fetch("/api/update_status", {
        method: "POST",
        body: new FormData(e.target)
      });
      const data = await res.json();
      document.getElementById("status-msg").textContent = data.success ? "Сохранено" : "Ошибка";
      setTimeout(() => location.reload(), 600);
    };

    document.getElementById("clear-media").onclick = async () => {
      await post("/api/clear_media", {});
      location.reload();
    };

    document.getElementById("template-form").onsubmit = async (e) => {
      e.preventDefault();
      const body = Object.fromEntries(new FormData(e.target));
      await post("/api/save_template", body);
      location.reload();
    };

    document.querySelectorAll("[data-apply]").forEach(btn => {
      btn.onclick = async () => {
        await post("/api/apply_template", { template_id: Number(btn.dataset.apply) });
        location.reload();
      };
    });
    document.querySelectorAll("[data-delete]").forEach(btn => {
      btn.onclick = async () => {
        await post("/api/delete_template", { template_id: Number(btn.dataset.delete) });
        location.reload();
      };
    });
    document.querySelectorAll("[data-use]").forEach(btn => {
      btn.onclick = async () => {
        const data = await post("/api/use_media", { media_file: btn.dataset.use });
        if (!data.success) alert(data.error);
        else location.reload();
      };
    });
  </script>
</body>
</html>"##;

fn template_rows(templates: &[Template]) -> String {
    let mut rows = String::new();
    for t in templates {
        rows.push_str(&format!(
            r#"<div class="row"><div><b>{name}</b><div class="meta">{status_text} — {activity}</div></div><div><button data-apply="{id}">Применить</button> <button class="danger" data-delete="{id}">Удалить</button></div></div>"#,
            name = html_escape(&t.name),
            status_text = html_escape(&t.status_text),
            activity = html_escape(&t.current_activity),
            id = t.id,
        ));
    }
    rows
}

fn history_rows(history: &[MediaRecord]) -> String {
    if history.is_empty() {
        return r#"<div class="row"><div class="meta">Пока ничего не загружено</div></div>"#
            .to_string();
    }
    let mut rows = String::new();
    for r in history.iter().rev() {
        rows.push_str(&format!(
            r#"<div class="row"><div><b>{original}</b><div class="meta">{kind} — {time}</div></div><button data-use="{filename}">Использовать</button></div>"#,
            original = html_escape(&r.original_name),
            kind = r.file_type.as_str(),
            time = html_escape(&r.upload_time),
            filename = html_escape(&r.filename),
        ));
    }
    rows
}

pub fn render_admin(
    doc: &StatusDocument,
    history: &[MediaRecord],
    templates: &[Template],
) -> String {
    ADMIN_HTML
        .replace("{{USER_NAME}}", &html_escape(&doc.user_name))
        .replace("{{STATUS_TEXT}}", &html_escape(&doc.status_text))
        .replace("{{CURRENT_ACTIVITY}}", &html_escape(&doc.current_activity))
        .replace("{{CUSTOM_MESSAGE}}", &html_escape(&doc.custom_message))
        .replace("{{TEMPLATE_ROWS}}", &template_rows(templates))
        .replace("{{HISTORY_ROWS}}", &history_rows(history))
}
