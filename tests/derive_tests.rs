// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use cardclip::models::{available_credit, bill_cycle_days};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn cycle_is_exact_day_count() {
    // 2024-01-05 -> 2024-01-25 is 20 days
    assert_eq!(
        bill_cycle_days(Some(d(2024, 1, 5)), Some(d(2024, 1, 25))),
        Some(20)
    );
}

#[test]
fn cycle_spans_month_and_leap_day() {
    assert_eq!(
        bill_cycle_days(Some(d(2024, 2, 20)), Some(d(2024, 3, 5))),
        Some(14)
    );
}

#[test]
fn cycle_none_when_either_date_missing() {
    assert_eq!(bill_cycle_days(None, Some(d(2024, 1, 25))), None);
    assert_eq!(bill_cycle_days(Some(d(2024, 1, 5)), None), None);
    assert_eq!(bill_cycle_days(None, None), None);
}

#[test]
fn cycle_negative_when_due_before_bill() {
    // Unvalidated by design: callers store the negative count as-is.
    assert_eq!(
        bill_cycle_days(Some(d(2024, 1, 25)), Some(d(2024, 1, 5))),
        Some(-20)
    );
}

#[test]
fn cycle_zero_for_same_day() {
    assert_eq!(bill_cycle_days(Some(d(2024, 1, 5)), Some(d(2024, 1, 5))), Some(0));
}

#[test]
fn available_is_limit_minus_balance() {
    assert_eq!(
        available_credit(Decimal::new(50000, 0), Decimal::new(12000, 0)),
        Decimal::new(38000, 0)
    );
}

#[test]
fn available_goes_negative_over_limit() {
    assert_eq!(
        available_credit(Decimal::new(1000, 0), Decimal::new(1500, 0)),
        Decimal::new(-500, 0)
    );
}

#[test]
fn available_keeps_cents() {
    assert_eq!(
        available_credit(Decimal::new(100050, 2), Decimal::new(2525, 2)),
        Decimal::new(97525, 2)
    );
}
