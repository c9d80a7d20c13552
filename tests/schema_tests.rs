// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use cardclip::schema::{
    CardForm, ReminderForm, StatementForm, validate_card, validate_reminder, validate_statement,
};

fn valid_form() -> CardForm {
    CardForm {
        name: "Platinum Travel".into(),
        last_four_digits: "1234".into(),
        network: "Visa".into(),
        bank: "HDFC".into(),
        color: Some("#1a1a2e".into()),
        image_url: None,
        joining_date: "".into(),
        expiry_date: "2027-09-30".into(),
        last_bill_date: "2024-01-05".into(),
        last_due_date: "2024-01-25".into(),
        credit_limit: "50000".into(),
        current_balance: "12000".into(),
        joining_fee: "0".into(),
        annual_fee: "499".into(),
    }
}

#[test]
fn valid_card_is_normalized() {
    let record = validate_card(&valid_form()).unwrap();
    assert_eq!(record.name, "Platinum Travel");
    assert_eq!(record.last_four_digits, "1234");
    assert_eq!(record.joining_date, None);
    assert_eq!(
        record.last_bill_date,
        Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    );
    assert_eq!(
        record.last_due_date,
        Some(NaiveDate::from_ymd_opt(2024, 1, 25).unwrap())
    );
    assert_eq!(record.credit_limit, Decimal::new(50000, 0));
    assert_eq!(record.current_balance, Decimal::new(12000, 0));
}

#[test]
fn whitespace_is_trimmed() {
    let mut form = valid_form();
    form.name = "  Platinum Travel  ".into();
    form.last_four_digits = " 1234 ".into();
    form.color = Some("   ".into());
    let record = validate_card(&form).unwrap();
    assert_eq!(record.name, "Platinum Travel");
    assert_eq!(record.last_four_digits, "1234");
    assert_eq!(record.color, None);
}

#[test]
fn missing_name_is_rejected_with_field() {
    let mut form = valid_form();
    form.name = "   ".into();
    let errs = validate_card(&form).unwrap_err();
    assert!(errs.iter().any(|e| e.field == "name"));
}

#[test]
fn wrong_length_digits_rejected() {
    for bad in ["123", "12345", "12a4", "", "one2"] {
        let mut form = valid_form();
        form.last_four_digits = bad.into();
        let errs = validate_card(&form).unwrap_err();
        assert!(
            errs.iter().any(|e| e.field == "last_four_digits"),
            "'{}' should be rejected",
            bad
        );
    }
}

#[test]
fn malformed_date_rejected() {
    let mut form = valid_form();
    form.expiry_date = "30-09-2027".into();
    let errs = validate_card(&form).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].field, "expiry_date");
}

#[test]
fn negative_money_rejected() {
    let mut form = valid_form();
    form.credit_limit = "-1".into();
    let errs = validate_card(&form).unwrap_err();
    assert!(errs.iter().any(|e| e.field == "credit_limit"));
}

#[test]
fn unparseable_money_rejected() {
    let mut form = valid_form();
    form.annual_fee = "lots".into();
    let errs = validate_card(&form).unwrap_err();
    assert!(errs.iter().any(|e| e.field == "annual_fee"));
}

#[test]
fn all_violations_are_collected() {
    let mut form = valid_form();
    form.bank = "".into();
    form.last_four_digits = "12".into();
    form.current_balance = "-5".into();
    let errs = validate_card(&form).unwrap_err();
    let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"bank"));
    assert!(fields.contains(&"last_four_digits"));
    assert!(fields.contains(&"current_balance"));
}

#[test]
fn reminder_zero_amount_rejected_one_cent_accepted() {
    let card_id = uuid::Uuid::new_v4().to_string();
    let mut form = ReminderForm {
        card_id: card_id.clone(),
        due_date: "2024-02-10".into(),
        amount: "0".into(),
        note: None,
    };
    let errs = validate_reminder(&form).unwrap_err();
    assert!(errs.iter().any(|e| e.field == "amount"));

    form.amount = "0.01".into();
    let record = validate_reminder(&form).unwrap();
    assert_eq!(record.amount, Decimal::new(1, 2));
}

#[test]
fn reminder_requires_due_date_and_card() {
    let form = ReminderForm {
        card_id: "not-a-uuid".into(),
        due_date: "".into(),
        amount: "10".into(),
        note: Some("minimum due".into()),
    };
    let errs = validate_reminder(&form).unwrap_err();
    let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"card_id"));
    assert!(fields.contains(&"due_date"));
}

#[test]
fn statement_dates_required_negative_amount_rejected() {
    let form = StatementForm {
        card_id: uuid::Uuid::new_v4().to_string(),
        bill_date: "".into(),
        due_date: "2024-01-25".into(),
        amount: "-1".into(),
    };
    let errs = validate_statement(&form).unwrap_err();
    let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"bill_date"));
    assert!(fields.contains(&"amount"));
}
