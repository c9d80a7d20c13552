// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::{Client, check, eq, single};
use crate::error::Result;
use crate::models::{CreditCard, available_credit, bill_cycle_days};
use crate::schema::CardRecord;

const TABLE: &str = "credit_cards";

/// Write payload: the validated fields plus the two derived ones, computed
/// here at submission time so add and edit share one path.
#[derive(Debug, Serialize)]
struct CardPayload {
    user_id: Uuid,
    name: String,
    last_four_digits: String,
    network: String,
    bank: String,
    color: Option<String>,
    image_url: Option<String>,
    joining_date: Option<NaiveDate>,
    expiry_date: Option<NaiveDate>,
    last_bill_date: Option<NaiveDate>,
    last_due_date: Option<NaiveDate>,
    credit_limit: Decimal,
    current_balance: Decimal,
    joining_fee: Decimal,
    annual_fee: Decimal,
    bill_cycle_days: Option<i64>,
    available_credit: Decimal,
}

impl CardPayload {
    fn from_record(user_id: Uuid, r: CardRecord) -> Self {
        let cycle = bill_cycle_days(r.last_bill_date, r.last_due_date);
        let available = available_credit(r.credit_limit, r.current_balance);
        Self {
            user_id,
            name: r.name,
            last_four_digits: r.last_four_digits,
            network: r.network,
            bank: r.bank,
            color: r.color,
            image_url: r.image_url,
            joining_date: r.joining_date,
            expiry_date: r.expiry_date,
            last_bill_date: r.last_bill_date,
            last_due_date: r.last_due_date,
            credit_limit: r.credit_limit,
            current_balance: r.current_balance,
            joining_fee: r.joining_fee,
            annual_fee: r.annual_fee,
            bill_cycle_days: cycle,
            available_credit: available,
        }
    }
}

pub fn list(client: &Client) -> Result<Vec<CreditCard>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "name.asc".to_string()),
        ])
        .send()?;
    Ok(check(resp)?.json()?)
}

pub fn get(client: &Client, id: Uuid) -> Result<Option<CreditCard>> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().get(client.rest_url(TABLE)))?
        .query(&[
            ("select", "*".to_string()),
            ("id", eq(id)),
            ("user_id", eq(user_id)),
        ])
        .send()?;
    let mut rows: Vec<CreditCard> = check(resp)?.json()?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.remove(0))
    })
}

pub fn insert(client: &Client, record: CardRecord) -> Result<CreditCard> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().post(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .json(&CardPayload::from_record(user_id, record))
        .send()?;
    single(check(resp)?.json()?)
}

pub fn update(client: &Client, id: Uuid, record: CardRecord) -> Result<CreditCard> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().patch(client.rest_url(TABLE)))?
        .header("Prefer", "return=representation")
        .query(&[("id", eq(id)), ("user_id", eq(user_id))])
        .json(&CardPayload::from_record(user_id, record))
        .send()?;
    single(check(resp)?.json()?)
}

/// Reminders and statement rows referencing the card cascade on the backend.
pub fn delete(client: &Client, id: Uuid) -> Result<()> {
    let user_id = client.require_session()?.user_id;
    let resp = client
        .authed(client.http().delete(client.rest_url(TABLE)))?
        .query(&[("id", eq(id)), ("user_id", eq(user_id))])
        .send()?;
    check(resp)?;
    Ok(())
}
