// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use uuid::Uuid;

use crate::client::{Client, cards};
use crate::error::Error;
use crate::models::CreditCard;
use crate::schema::{CardForm, CardRecord, validate_card};
use crate::store::Store;
use crate::utils::{confirm, fmt_money, fmt_opt_date, maybe_print_json, pretty_table};

pub fn handle(client: &Client, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name).cloned().unwrap_or_default()
}

fn arg_or(sub: &clap::ArgMatches, name: &str, default: &str) -> String {
    sub.get_one::<String>(name)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn form_from_args(sub: &clap::ArgMatches) -> CardForm {
    CardForm {
        name: arg(sub, "name"),
        last_four_digits: arg(sub, "last-four"),
        network: arg(sub, "network"),
        bank: arg(sub, "bank"),
        color: sub.get_one::<String>("color").cloned(),
        image_url: sub.get_one::<String>("image-url").cloned(),
        joining_date: arg(sub, "joining-date"),
        expiry_date: arg(sub, "expiry-date"),
        last_bill_date: arg(sub, "last-bill-date"),
        last_due_date: arg(sub, "last-due-date"),
        credit_limit: arg_or(sub, "limit", "0"),
        current_balance: arg_or(sub, "balance", "0"),
        joining_fee: arg_or(sub, "joining-fee", "0"),
        annual_fee: arg_or(sub, "annual-fee", "0"),
    }
}

fn validated(form: &CardForm) -> Result<CardRecord> {
    validate_card(form).map_err(|errs| Error::Validation(errs).into())
}

fn parse_id(sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.parse::<Uuid>()
        .with_context(|| format!("Invalid card id '{}'", raw))
}

fn add(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let record = validated(&form_from_args(sub))?;
    let card = cards::insert(client, record)?;
    println!(
        "Added card '{}' (**** {}), available credit {}",
        card.name,
        card.last_four_digits,
        fmt_money(&card.available_credit)
    );
    println!("Id: {}", card.id);
    Ok(())
}

fn list(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut store = Store::new();
    store.replace_all(cards::list(client)?);

    let rows: Vec<&CreditCard> = store.iter().collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows.iter().map(|c| card_row(c)).collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Name", "Card", "Network", "Bank", "Limit", "Balance", "Available",
                    "Cycle", "Last due"
                ],
                data
            )
        );
    }
    Ok(())
}

fn card_row(c: &CreditCard) -> Vec<String> {
    vec![
        c.id.to_string(),
        c.name.clone(),
        format!("**** {}", c.last_four_digits),
        c.network.clone(),
        c.bank.clone(),
        fmt_money(&c.credit_limit),
        fmt_money(&c.current_balance),
        fmt_money(&c.available_credit),
        c.bill_cycle_days
            .map(|d| format!("{}d", d))
            .unwrap_or_default(),
        fmt_opt_date(&c.last_due_date),
    ]
}

/// Merge edit flags over the stored row, then re-validate and recompute the
/// derived fields through the same path `add` uses.
fn edit(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(current) = cards::get(client, id)? else {
        bail!("Card {} not found", id);
    };

    let pick = |name: &str, fallback: String| -> String {
        sub.get_one::<String>(name).cloned().unwrap_or(fallback)
    };
    let pick_opt = |name: &str, fallback: &Option<String>| -> Option<String> {
        sub.get_one::<String>(name).cloned().or_else(|| fallback.clone())
    };

    let form = CardForm {
        name: pick("name", current.name.clone()),
        last_four_digits: pick("last-four", current.last_four_digits.clone()),
        network: pick("network", current.network.clone()),
        bank: pick("bank", current.bank.clone()),
        color: pick_opt("color", &current.color),
        image_url: pick_opt("image-url", &current.image_url),
        joining_date: pick("joining-date", fmt_opt_date(&current.joining_date)),
        expiry_date: pick("expiry-date", fmt_opt_date(&current.expiry_date)),
        last_bill_date: pick("last-bill-date", fmt_opt_date(&current.last_bill_date)),
        last_due_date: pick("last-due-date", fmt_opt_date(&current.last_due_date)),
        credit_limit: pick("limit", current.credit_limit.to_string()),
        current_balance: pick("balance", current.current_balance.to_string()),
        joining_fee: pick("joining-fee", current.joining_fee.to_string()),
        annual_fee: pick("annual-fee", current.annual_fee.to_string()),
    };

    let record = validated(&form)?;
    let card = cards::update(client, id, record)?;
    println!(
        "Updated card '{}', available credit {}",
        card.name,
        fmt_money(&card.available_credit)
    );
    Ok(())
}

fn rm(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;

    let mut store = Store::new();
    store.replace_all(cards::list(client)?);
    let Some(card) = store.get(id) else {
        bail!("Card {} not found", id);
    };
    let name = card.name.clone();

    if !confirm(
        &format!("Delete card '{}' and its reminders/statements?", name),
        sub.get_flag("yes"),
    )? {
        println!("Aborted");
        return Ok(());
    }

    // Store is only touched once the remote delete succeeded.
    cards::delete(client, id)?;
    store.remove(id);
    println!("Removed card '{}'; {} card(s) remain", name, store.len());
    Ok(())
}
