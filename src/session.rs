// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Cardclip", "cardclip"));

/// The authenticated identity. Held as an explicit context value passed to
/// the remote client, never as process-global state; at most one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

pub fn session_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("session.json"))
}

/// Load the cached session, if any. An unreadable or malformed cache is
/// treated as signed-out rather than an error.
pub fn load() -> Result<Option<Session>> {
    load_from(&session_path()?)
}

pub fn load_from(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read session cache at {}", path.display()))?;
    Ok(serde_json::from_str(&raw).ok())
}

pub fn save(session: &Session) -> Result<()> {
    save_to(&session_path()?, session)
}

pub fn save_to(path: &Path, session: &Session) -> Result<()> {
    let raw = serde_json::to_string_pretty(session)?;
    fs::write(path, raw).with_context(|| format!("Write session cache at {}", path.display()))?;
    Ok(())
}

pub fn clear() -> Result<()> {
    clear_at(&session_path()?)
}

pub fn clear_at(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Remove session cache at {}", path.display()))?;
    }
    Ok(())
}
