// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub last_four_digits: String,
    pub network: String,
    pub bank: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub last_bill_date: Option<NaiveDate>,
    pub last_due_date: Option<NaiveDate>,
    pub credit_limit: Decimal,
    pub current_balance: Decimal,
    pub joining_fee: Decimal,
    pub annual_fee: Decimal,
    /// Whole days between last bill date and last due date; None if either
    /// date is missing. Stored at submission time, not recomputed on read.
    pub bill_cycle_days: Option<i64>,
    /// credit_limit - current_balance, unclamped (negative when over limit).
    pub available_credit: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReminder {
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub paid: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillStatement {
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

/// Day count between statement generation and payment due date. A due date
/// before the bill date yields a negative count; callers store the result
/// as-is.
pub fn bill_cycle_days(
    last_bill_date: Option<NaiveDate>,
    last_due_date: Option<NaiveDate>,
) -> Option<i64> {
    match (last_bill_date, last_due_date) {
        (Some(bill), Some(due)) => Some((due - bill).num_days()),
        _ => None,
    }
}

/// Credit limit minus current balance, unclamped.
pub fn available_credit(credit_limit: Decimal, current_balance: Decimal) -> Decimal {
    credit_limit - current_balance
}
