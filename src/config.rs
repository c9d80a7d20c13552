// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

pub const ENV_BACKEND_URL: &str = "CARDCLIP_BACKEND_URL";
pub const ENV_API_KEY: &str = "CARDCLIP_API_KEY";

/// Startup settings for the hosted backend. Both are required; without
/// either the application refuses to initialize.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub api_key: String,
}

impl Config {
    pub fn new(backend_url: &str, api_key: &str) -> Result<Self> {
        let url = backend_url.trim().trim_end_matches('/');
        if url.is_empty() {
            bail!("backend URL is empty");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("backend URL '{}' must start with http:// or https://", url);
        }
        let key = api_key.trim();
        if key.is_empty() {
            bail!("API key is empty");
        }
        Ok(Self {
            backend_url: url.to_string(),
            api_key: key.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let url = std::env::var(ENV_BACKEND_URL)
            .with_context(|| format!("{} is not set", ENV_BACKEND_URL))?;
        let key =
            std::env::var(ENV_API_KEY).with_context(|| format!("{} is not set", ENV_API_KEY))?;
        Self::new(&url, &key).context("Invalid backend configuration")
    }
}
