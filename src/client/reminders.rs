// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use uuid::Uuid;

use super::{Client, check, eq, single};
use crate::error::Result;
use crate::models::PaymentReminder;
use crate::schema::ReminderRecord;

const TABLE: &str = "payment_reminders";

pub fn list(client: &Client) -> Result<Vec<PaymentReminder>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "due_date.asc".to_string()),
        ])
        .send()?;
    Ok(check(resp)?.json()?)
}

pub fn list_for_card(client: &Client, card_id: Uuid) -> Result<Vec<PaymentReminder>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("card_id", eq(card_id)),
            ("user_id", eq(user_id)),
            ("order", "due_date.asc".to_string()),
        ])
        .send()?;
    Ok(check(resp)?.json()?)
}

pub fn get(client: &Client, id: Uuid) -> Result<Option<PaymentReminder>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("id", eq(id)),
            ("user_id", eq(user_id)),
        ])
        .send()?;
    let mut rows: Vec<PaymentReminder> = check(resp)?.json()?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.remove(0))
    })
}

pub fn insert(client: &Client, record: ReminderRecord) -> Result<PaymentReminder> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().post(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .json(&json!({
            "user_id": user_id,
            "card_id": record.card_id,
            "due_date": record.due_date,
            "amount": record.amount,
            "paid": false,
            "note": record.note,
        }))
        .send()?;
    single(check(resp)?.json()?)
}

/// Full edit: due date, amount, and note; the paid flag is left alone.
pub fn update(client: &Client, id: Uuid, record: ReminderRecord) -> Result<PaymentReminder> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().patch(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .query(&[("id", eq(id)), ("user_id", eq(user_id))])
        .json(&json!({
            "card_id": record.card_id,
            "due_date": record.due_date,
            "amount": record.amount,
            "note": record.note,
        }))
        .send()?;
    single(check(resp)?.json()?)
}

/// Flip the paid flag and nothing else, then return the refetched row.
pub fn set_paid(client: &Client, id: Uuid, paid: bool) -> Result<PaymentReminder> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().patch(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .query(&[("id", eq(id)), ("user_id", eq(user_id))])
        .json(&json!({ "paid": paid }))
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
