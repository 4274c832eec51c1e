/*
 * SPDX-FileCopyrightText: 2026 Status Board Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! File-backed persistence for the status board: the current status
//! document, the append-only media history, the template presets and
//! the upload directory. Disk is the single source of truth; every
//! caller does a full load-mutate-save cycle.

pub mod media;
pub mod paths;
pub mod status;
pub mod store;
pub mod templates;
pub mod upload;
