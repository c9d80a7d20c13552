// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::client::{Client, cards, reminders};
use crate::store::Store;
use crate::utils::{fmt_money, pretty_table};

/// The one ungated view: with no session it prints a hint instead of failing.
pub fn handle(client: &Client) -> Result<()> {
    if client.session().is_none() {
        println!("Not signed in. Run `cardclip auth login` to see your cards.");
        return Ok(());
    }

    let mut card_store = Store::new();
    card_store.replace_all(cards::list(client)?);
    let mut reminder_store = Store::new();
    reminder_store.replace_all(reminders::list(client)?);

    if card_store.is_empty() {
        println!("No cards yet. Add one with `cardclip card add`.");
    } else {
        let data = card_store
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    format!("**** {}", c.last_four_digits),
                    fmt_money(&c.credit_limit),
                    fmt_money(&c.current_balance),
                    fmt_money(&c.available_credit),
                    c.bill_cycle_days
                        .map(|d| format!("{}d", d))
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Card", "Number", "Limit", "Balance", "Available", "Cycle"],
                data
            )
        );
    }

    let due: Vec<Vec<String>> = reminder_store
        .iter()
        .filter(|r| !r.paid)
        .map(|r| {
            let card = card_store
                .get(r.card_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| r.card_id.to_string());
            vec![
                r.due_date.to_string(),
                card,
                fmt_money(&r.amount),
                r.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if due.is_empty() {
        println!("No unpaid reminders.");
    } else {
        println!("Upcoming payments:");
        println!("{}", pretty_table(&["Due", "Card", "Amount", "Note"], due));
    }
    Ok(())
}
