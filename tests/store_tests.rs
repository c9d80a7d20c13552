// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use cardclip::error::Error;
use cardclip::models::PaymentReminder;
use cardclip::store::Store;

fn reminder(card_id: Uuid) -> PaymentReminder {
    PaymentReminder {
        id: Uuid::new_v4(),
        card_id,
        user_id: Uuid::new_v4(),
        due_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        amount: Decimal::new(250000, 2),
        paid: false,
        note: Some("minimum due".into()),
    }
}

#[test]
fn delete_removes_row_on_success() {
    let card = Uuid::new_v4();
    let a = reminder(card);
    let b = reminder(card);
    let removed_id = a.id;

    let mut store = Store::new();
    store.replace_all(vec![a, b]);

    // Mirrors the command flow: the store is touched only after Ok.
    let remote: Result<(), Error> = Ok(());
    if remote.is_ok() {
        store.remove(removed_id);
    }
    assert_eq!(store.len(), 1);
    assert!(store.get(removed_id).is_none());
}

#[test]
fn failed_delete_leaves_store_unchanged() {
    let card = Uuid::new_v4();
    let a = reminder(card);
    let id = a.id;

    let mut store = Store::new();
    store.replace_all(vec![a]);

    let remote: Result<(), Error> = Err(Error::Remote {
        status: 503,
        message: "unavailable".into(),
    });
    if remote.is_ok() {
        store.remove(id);
    }
    assert_eq!(store.len(), 1);
    assert!(store.get(id).is_some());
}

#[test]
fn paid_toggle_flips_exactly_one_field() {
    let original = reminder(Uuid::new_v4());
    let id = original.id;

    let mut store = Store::new();
    store.replace_all(vec![original.clone()]);

    // The backend returns the patched row; upsert is the refetch landing.
    let mut refetched = original.clone();
    refetched.paid = true;
    store.upsert(refetched);

    let stored = store.get(id).unwrap();
    assert!(stored.paid);
    assert_eq!(stored.card_id, original.card_id);
    assert_eq!(stored.due_date, original.due_date);
    assert_eq!(stored.amount, original.amount);
    assert_eq!(stored.note, original.note);
}

#[test]
fn upsert_appends_unknown_rows() {
    let mut store = Store::new();
    store.replace_all(vec![reminder(Uuid::new_v4())]);
    store.upsert(reminder(Uuid::new_v4()));
    assert_eq!(store.len(), 2);
}

#[test]
fn replace_all_keeps_fetch_order_and_drops_stale_rows() {
    let card = Uuid::new_v4();
    let rows = vec![reminder(card), reminder(card), reminder(card)];
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let mut store = Store::new();
    store.replace_all(rows);
    let stored_ids: Vec<Uuid> = store.iter().map(|r| r.id).collect();
    assert_eq!(stored_ids, ids);

    // A refetch replaces the cache wholesale; nothing stale survives.
    let fresh = reminder(card);
    let fresh_id = fresh.id;
    store.replace_all(vec![fresh]);
    assert_eq!(store.len(), 1);
    assert!(store.get(fresh_id).is_some());
    assert!(store.get(ids[0]).is_none());
}
