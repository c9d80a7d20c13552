// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use uuid::Uuid;

use crate::client::{Client, reminders};
use crate::error::Error;
use crate::models::PaymentReminder;
use crate::schema::{ReminderForm, validate_reminder};
use crate::store::Store;
use crate::utils::{confirm, fmt_money, maybe_print_json, pretty_table};

pub fn handle(client: &Client, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("paid", sub)) => set_paid(client, sub, true)?,
        Some(("unpaid", sub)) => set_paid(client, sub, false)?,
        Some(("rm", sub)) => rm(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_id(sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.parse::<Uuid>()
        .with_context(|| format!("Invalid reminder id '{}'", raw))
}

fn add(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let form = ReminderForm {
        card_id: sub.get_one::<String>("card").cloned().unwrap_or_default(),
        due_date: sub.get_one::<String>("due").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        note: sub.get_one::<String>("note").cloned(),
    };
    let record = validate_reminder(&form).map_err(|errs| anyhow::Error::from(Error::Validation(errs)))?;
    let reminder = reminders::insert(client, record)?;
    println!(
        "Added reminder: {} due {} (id {})",
        fmt_money(&reminder.amount),
        reminder.due_date,
        reminder.id
    );
    Ok(())
}

fn list(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unpaid_only = sub.get_flag("unpaid");

    let fetched = match sub.get_one::<String>("card") {
        Some(raw) => {
            let card_id = raw
                .parse::<Uuid>()
                .with_context(|| format!("Invalid card id '{}'", raw))?;
            reminders::list_for_card(client, card_id)?
        }
        None => reminders::list(client)?,
    };

    let mut store = Store::new();
    store.replace_all(fetched);

    let rows: Vec<&PaymentReminder> = store
        .iter()
        .filter(|r| !unpaid_only || !r.paid)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.card_id.to_string(),
                    r.due_date.to_string(),
                    fmt_money(&r.amount),
                    if r.paid { "paid" } else { "due" }.to_string(),
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Card", "Due", "Amount", "Status", "Note"], data)
        );
    }
    Ok(())
}

/// Merge edit flags over the stored row and re-validate through the same
/// path `add` uses. The paid flag is only changed by `paid`/`unpaid`.
fn edit(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(current) = reminders::get(client, id)? else {
        bail!("Reminder {} not found", id);
    };

    let form = ReminderForm {
        card_id: current.card_id.to_string(),
        due_date: sub
            .get_one::<String>("due")
            .cloned()
            .unwrap_or_else(|| current.due_date.to_string()),
        amount: sub
            .get_one::<String>("amount")
            .cloned()
            .unwrap_or_else(|| current.amount.to_string()),
        note: sub.get_one::<String>("note").cloned().or(current.note),
    };
    let record =
        validate_reminder(&form).map_err(|errs| anyhow::Error::from(Error::Validation(errs)))?;
    let updated = reminders::update(client, id, record)?;
    println!(
        "Updated reminder {}: {} due {}",
        updated.id,
        fmt_money(&updated.amount),
        updated.due_date
    );
    Ok(())
}

fn set_paid(client: &Client, sub: &clap::ArgMatches, paid: bool) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(current) = reminders::get(client, id)? else {
        bail!("Reminder {} not found", id);
    };

    let mut store = Store::new();
    store.replace_all(reminders::list_for_card(client, current.card_id)?);

    let updated = reminders::set_paid(client, id, paid)?;
    println!(
        "Reminder {} marked {} ({} due {})",
        updated.id,
        if updated.paid { "paid" } else { "unpaid" },
        fmt_money(&updated.amount),
        updated.due_date
    );
    // Land the refetched row in the cached list, then report from it.
    store.upsert(updated);
    let unpaid = store.iter().filter(|r| !r.paid).count();
    println!("{} unpaid reminder(s) remain on this card", unpaid);
    Ok(())
}

fn rm(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(reminder) = reminders::get(client, id)? else {
        bail!("Reminder {} not found", id);
    };
    if !confirm(
        &format!(
            "Delete reminder for {} due {}?",
            fmt_money(&reminder.amount),
            reminder.due_date
        ),
        sub.get_flag("yes"),
    )? {
        println!("Aborted");
        return Ok(());
    }
    reminders::delete(client, id)?;
    println!("Removed reminder {}", id);
    Ok(())
}
