// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::FieldError;

static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid literal pattern"));

/// Raw card form input, as typed. Date fields accept an empty string for
/// "not set"; money fields are text to be coerced.
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub name: String,
    pub last_four_digits: String,
    pub network: String,
    pub bank: String,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub joining_date: String,
    pub expiry_date: String,
    pub last_bill_date: String,
    pub last_due_date: String,
    pub credit_limit: String,
    pub current_balance: String,
    pub joining_fee: String,
    pub annual_fee: String,
}

/// Normalized card fields, ready for the derived-field calculator and the
/// remote write.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub last_four_digits: String,
    pub network: String,
    pub bank: String,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub last_bill_date: Option<NaiveDate>,
    pub last_due_date: Option<NaiveDate>,
    pub credit_limit: Decimal,
    pub current_balance: Decimal,
    pub joining_fee: Decimal,
    pub annual_fee: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ReminderForm {
    pub card_id: String,
    pub due_date: String,
    pub amount: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub card_id: Uuid,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StatementForm {
    pub card_id: String,
    pub bill_date: String,
    pub due_date: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementRecord {
    pub card_id: Uuid,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

/// Validate a raw card form. All violated constraints are collected; the
/// record is returned only when every field passes.
pub fn validate_card(form: &CardForm) -> Result<CardRecord, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required(&mut errors, "name", &form.name);
    let network = required(&mut errors, "network", &form.network);
    let bank = required(&mut errors, "bank", &form.bank);

    let last_four = form.last_four_digits.trim().to_string();
    if !FOUR_DIGITS.is_match(&last_four) {
        errors.push(FieldError::new(
            "last_four_digits",
            "must be exactly 4 digits",
        ));
    }

    let joining_date = optional_date(&mut errors, "joining_date", &form.joining_date);
    let expiry_date = optional_date(&mut errors, "expiry_date", &form.expiry_date);
    let last_bill_date = optional_date(&mut errors, "last_bill_date", &form.last_bill_date);
    let last_due_date = optional_date(&mut errors, "last_due_date", &form.last_due_date);

    let credit_limit = money(&mut errors, "credit_limit", &form.credit_limit);
    let current_balance = money(&mut errors, "current_balance", &form.current_balance);
    let joining_fee = money(&mut errors, "joining_fee", &form.joining_fee);
    let annual_fee = money(&mut errors, "annual_fee", &form.annual_fee);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CardRecord {
        name,
        last_four_digits: last_four,
        network,
        bank,
        color: trimmed_opt(&form.color),
        image_url: trimmed_opt(&form.image_url),
        joining_date,
        expiry_date,
        last_bill_date,
        last_due_date,
        credit_limit,
        current_balance,
        joining_fee,
        annual_fee,
    })
}

pub fn validate_reminder(form: &ReminderForm) -> Result<ReminderRecord, Vec<FieldError>> {
    let mut errors = Vec::new();

    let card_id = card_ref(&mut errors, &form.card_id);
    let due_date = required_date(&mut errors, "due_date", &form.due_date);
    let amount = money(&mut errors, "amount", &form.amount);
    if errors.iter().all(|e| e.field != "amount") && amount <= Decimal::ZERO {
        errors.push(FieldError::new("amount", "must be greater than zero"));
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ReminderRecord {
        card_id: card_id.unwrap_or_default(),
        due_date: due_date.unwrap_or_default(),
        amount,
        note: trimmed_opt(&form.note),
    })
}

pub fn validate_statement(form: &StatementForm) -> Result<StatementRecord, Vec<FieldError>> {
    let mut errors = Vec::new();

    let card_id = card_ref(&mut errors, &form.card_id);
    let bill_date = required_date(&mut errors, "bill_date", &form.bill_date);
    let due_date = required_date(&mut errors, "due_date", &form.due_date);
    let amount = money(&mut errors, "amount", &form.amount);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(StatementRecord {
        card_id: card_id.unwrap_or_default(),
        bill_date: bill_date.unwrap_or_default(),
        due_date: due_date.unwrap_or_default(),
        amount,
    })
}

fn required(errors: &mut Vec<FieldError>, field: &str, value: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
    v.to_string()
}

fn optional_date(errors: &mut Vec<FieldError>, field: &str, value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(v, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("invalid date '{}', expected YYYY-MM-DD", v),
            ));
            None
        }
    }
}

fn required_date(errors: &mut Vec<FieldError>, field: &str, value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    if v.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return None;
    }
    optional_date(errors, field, v)
}

fn money(errors: &mut Vec<FieldError>, field: &str, value: &str) -> Decimal {
    let v = value.trim();
    match v.parse::<Decimal>() {
        Ok(d) if d < Decimal::ZERO => {
            errors.push(FieldError::new(field, "must not be negative"));
            Decimal::ZERO
        }
        Ok(d) => d,
        Err(_) => {
            errors.push(FieldError::new(field, format!("invalid amount '{}'", v)));
            Decimal::ZERO
        }
    }
}

fn card_ref(errors: &mut Vec<FieldError>, value: &str) -> Option<Uuid> {
    match value.trim().parse::<Uuid>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new("card_id", "is not a valid card id"));
            None
        }
    }
}

fn trimmed_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
