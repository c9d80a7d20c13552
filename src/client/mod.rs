// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod cards;
pub mod reminders;
pub mod statements;
pub mod storage;

use reqwest::blocking::{RequestBuilder, Response};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::utils::http_client;

/// Remote data client. Every data operation is scoped to the session held
/// here; callers never pass an identity explicitly. Without a session, data
/// operations fail with `Unauthenticated` before any request is made.
pub struct Client {
    config: Config,
    http: reqwest::blocking::Client,
    session: Option<Session>,
}

impl Client {
    pub fn new(config: Config, session: Option<Session>) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            http: http_client()?,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }

    pub(crate) fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::Unauthenticated)
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.backend_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.backend_url, path)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.config.backend_url, path)
    }

    /// Attach the API key and the session's bearer token.
    pub(crate) fn authed(&self, rb: RequestBuilder) -> Result<RequestBuilder> {
        let session = self.require_session()?;
        Ok(rb
            .header("apikey", &self.config.api_key)
            .bearer_auth(&session.access_token))
    }

    /// API key only, for auth endpoints that run without a session.
    pub(crate) fn anon(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header("apikey", &self.config.api_key)
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }
}

/// PostgREST-style equality filter value.
pub(crate) fn eq<T: std::fmt::Display>(value: T) -> String {
    format!("eq.{}", value)
}

/// Map a non-success response to `Error::Remote`, extracting the backend's
/// message field when it sends one.
pub(crate) fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            }
        });
    Err(Error::Remote {
        status: status.as_u16(),
        message,
    })
}

/// Inserts with `Prefer: return=representation` come back as a one-row array.
pub(crate) fn single<T>(mut rows: Vec<T>) -> Result<T> {
    if rows.is_empty() {
        return Err(Error::Remote {
            status: 200,
            message: "backend returned no row".to_string(),
        });
    }
    Ok(rows.remove(0))
}
