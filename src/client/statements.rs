// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use uuid::Uuid;

use super::{Client, check, eq, single};
use crate::error::Result;
use crate::models::BillStatement;
use crate::schema::StatementRecord;

const TABLE: &str = "bill_statements";

/// File metadata captured alongside the validated statement fields; the
/// binary itself lives in object storage.
#[derive(Debug, Clone)]
pub struct FileMeta {
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
}

pub fn list_for_card(client: &Client, card_id: Uuid) -> Result<Vec<BillStatement>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("card_id", eq(card_id)),
            ("user_id", eq(user_id)),
            ("order", "bill_date.desc".to_string()),
        ])
        .send()?;
    Ok(check(resp)?.json()?)
}

pub fn get(client: &Client, id: Uuid) -> Result<Option<BillStatement>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("id", eq(id)),
            ("user_id", eq(user_id)),
        ])
        .send()?;
    let mut rows: Vec<BillStatement> = check(resp)?.json()?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.remove(0))
    })
}

pub fn insert(client: &Client, record: &StatementRecord, meta: &FileMeta) -> Result<BillStatement> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().post(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .json(&json!({
            "user_id": user_id,
            "card_id": record.card_id,
            "file_name": meta.file_name,
            "file_path": meta.file_path,
            "file_size": meta.file_size,
            "mime_type": meta.mime_type,
            "bill_date": record.bill_date,
            "due_date": record.due_date,
            "amount": record.amount,
        }))
        .send()?;
    single(check(resp)?.json()?)
}

pub fn delete(client: &Client, id: Uuid) -> Result<()> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().delete(client.rest_url(TABLE)))?
        .query(&[("id", eq(id)), ("user_id", eq(user_id))])
        .send()?;
    check(resp)?;
    Ok(())
}
