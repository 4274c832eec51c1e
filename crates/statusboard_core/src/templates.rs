/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::status::StatusDocument;
use crate::store::{self, LoadOutcome};

fn default_color() -> String {
    "blue".to_string()
}

/// A named, reusable bundle of status fields applicable in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub status_text: String,
    pub current_activity: String,
    #[serde(default)]
    pub custom_message: String,
    #[serde(default = "default_color")]
    pub color_scheme: String,
}

/// Template as submitted by the admin page; the id is assigned here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub status: String,
    pub status_text: String,
    pub current_activity: String,
    #[serde(default)]
    pub custom_message: String,
    #[serde(default = "default_color")]
    pub color_scheme: String,
}

impl Template {
    /// Overlays the preset fields onto the current status, leaving
    /// `user_name` and the media fields untouched.
    pub fn apply_to(&self, doc: &mut StatusDocument) {
        doc.status = self.status.clone();
        doc.status_text = self.status_text.clone();
        doc.current_activity = self.current_activity.clone();
        doc.custom_message = self.custom_message.clone();
        doc.color_scheme = self.color_scheme.clone();
    }
}

/// Built-in presets seeded when no templates file exists yet.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: 1,
            name: "На встрече".to_string(),
            status: "meeting".to_string(),
            status_text: "На встрече".to_string(),
            current_activity: "Обсуждаю проект с командой".to_string(),
            custom_message: "Вернусь через 30 минут".to_string(),
            color_scheme: "yellow".to_string(),
        },
        Template {
            id: 2,
            name: "Не беспокоить".to_string(),
            status: "busy".to_string(),
            status_text: "Не беспокоить".to_string(),
            current_activity: "Сосредоточенная работа".to_string(),
            custom_message: "Пожалуйста, не отвлекайте".to_string(),
            color_scheme: "red".to_string(),
        },
        Template {
            id: 3,
            name: "Обеденный перерыв".to_string(),
            status: "away".to_string(),
            status_text: "Отошёл".to_string(),
            current_activity: "Обеденный перерыв".to_string(),
            custom_message: "Вернусь в 14:00".to_string(),
            color_scheme: "gray".to_string(),
        },
    ]
}

/// Template presets, persisted as a bare JSON array.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> (Vec<Template>, LoadOutcome) {
        store::load_json_or(&self.path, default_templates)
    }

    /// Assigns `max(ids) + 1` and persists. Two concurrent creates can
    /// race and pick the same id; the single-operator deployment never
    /// exercises that.
    pub fn create(&self, new: NewTemplate) -> Result<Template> {
        let (mut templates, _) = self.load();
        let id = templates.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let template = Template {
            id,
            name: new.name,
            status: new.status,
            status_text: new.status_text,
            current_activity: new.current_activity,
            custom_message: new.custom_message,
            color_scheme: new.color_scheme,
        };
        templates.push(template.clone());
        store::write_json(&self.path, &templates)?;
        Ok(template)
    }

    /// Removes the template with the given id; silently a no-op when the
    /// id is absent.
    pub fn delete(&self, id: u64) -> Result<()> {
        let (mut templates, _) = self.load();
        templates.retain(|t| t.id != id);
        store::write_json(&self.path, &templates)
    }

    pub fn find(&self, id: u64) -> Option<Template> {
        self.load().0.into_iter().find(|t| t.id == id)
    }
}
