// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

use super::{Client, check, statements};
use crate::error::Result;
use crate::models::BillStatement;
use crate::schema::StatementRecord;

pub const BUCKET: &str = "statements";

/// Content type from the file extension; anything unrecognized is uploaded
/// as an opaque blob.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub fn upload_object(client: &Client, object_path: &str, bytes: Vec<u8>, mime: &str) -> Result<()> {
    let url = client.storage_url(&format!("object/{}/{}", BUCKET, object_path));
    let resp = client
        .authed(client.http().post(url))?
        .header("Content-Type", mime)
        .body(bytes)
        .send()?;
    check(resp)?;
    Ok(())
}

pub fn remove_object(client: &Client, object_path: &str) -> Result<()> {
    let url = client.storage_url(&format!("object/{}/{}", BUCKET, object_path));
    let resp = client.authed(client.http().delete(url))?.send()?;
    check(resp)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

/// Time-limited access URL for a stored object.
pub fn signed_url(client: &Client, object_path: &str, expires_secs: u64) -> Result<String> {
    let url = client.storage_url(&format!("object/sign/{}/{}", BUCKET, object_path));
    let resp = client
        .authed(client.http().post(url))?
        .json(&json!({ "expiresIn": expires_secs }))
        .send()?;
    let sign: SignResponse = check(resp)?.json()?;
    Ok(format!(
        "{}/storage/v1{}",
        client.config().backend_url,
        sign.signed_url
    ))
}

/// Upload a statement file and create its metadata row. If the row insert
/// fails after the binary was stored, the binary is removed so no orphaned
/// object is left behind, and the original error is re-surfaced.
pub fn upload_statement(
    client: &Client,
    record: &StatementRecord,
    file: &Path,
) -> Result<BillStatement> {
    let session = client.require_session()?;
    let bytes = std::fs::read(file)?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("statement")
        .to_string();
    let meta = statements::FileMeta {
        file_size: bytes.len() as i64,
        mime_type: mime_for(&file_name).to_string(),
        file_path: format!(
            "{}/{}/{}_{}",
            session.user_id,
            record.card_id,
            Uuid::new_v4(),
            file_name
        ),
        file_name,
    };

    upload_object(client, &meta.file_path, bytes, &meta.mime_type)?;
    match statements::insert(client, record, &meta) {
        Ok(row) => Ok(row),
        Err(err) => {
            // Compensating delete; the insert failure is what the caller sees.
            let _ = remove_object(client, &meta.file_path);
            Err(err)
        }
    }
}
