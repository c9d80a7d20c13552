// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{Client, check};
use crate::error::{Error, Result};
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

fn session_from(tok: TokenResponse) -> Session {
    Session {
        user_id: tok.user.id,
        email: tok.user.email.unwrap_or_default(),
        access_token: tok.access_token,
        refresh_token: tok.refresh_token,
        expires_at: Utc::now() + Duration::seconds(tok.expires_in),
    }
}

/// Sign in with a credential pair.
pub fn sign_in(client: &Client, email: &str, password: &str) -> Result<Session> {
    let resp = client
        .anon(client.http().post(client.auth_url("token?grant_type=password")))
        .json(&json!({ "email": email, "password": password }))
        .send()?;
    let tok: TokenResponse = check(resp)?.json()?;
    Ok(session_from(tok))
}

/// Register a new account. Returns a session when the backend signs the new
/// user in directly, or None when email confirmation is pending.
pub fn sign_up(client: &Client, email: &str, password: &str) -> Result<Option<Session>> {
    let resp = client
        .anon(client.http().post(client.auth_url("signup")))
        .json(&json!({ "email": email, "password": password }))
        .send()?;
    let body: serde_json::Value = check(resp)?.json()?;
    if body.get("access_token").is_some() {
        let tok: TokenResponse = serde_json::from_value(body).map_err(|e| Error::Remote {
            status: 200,
            message: format!("unexpected signup response: {}", e),
        })?;
        Ok(Some(session_from(tok)))
    } else {
        Ok(None)
    }
}

/// Exchange the refresh token for a fresh session (the auth state change
/// that keeps a cached identity usable across invocations).
pub fn refresh(client: &Client, refresh_token: &str) -> Result<Session> {
    let resp = client
        .anon(
            client
                .http()
                .post(client.auth_url("token?grant_type=refresh_token")),
        )
        .json(&json!({ "refresh_token": refresh_token }))
        .send()?;
    let tok: TokenResponse = check(resp)?.json()?;
    Ok(session_from(tok))
}

/// True when the backend itself turned the refresh token down, meaning the
/// cached session is dead. Network failures and server errors are not
/// rejections; the cache stays usable for a later attempt.
pub fn refresh_rejected(err: &Error) -> bool {
    matches!(err, Error::Remote { status: 400..=403, .. })
}

/// Revoke the session server-side.
pub fn sign_out(client: &Client) -> Result<()> {
    let resp = client
        .authed(client.http().post(client.auth_url("logout")))?
        .send()?;
    check(resp)?;
    Ok(())
}

/// Fetch the identity the backend associates with the current token.
pub fn current_identity(client: &Client) -> Result<AuthUser> {
    let resp = client.authed(client.http().get(client.auth_url("user")))?.send()?;
    Ok(check(resp)?.json()?)
}
