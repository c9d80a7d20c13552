// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use std::path::Path;
use uuid::Uuid;

use crate::client::{Client, statements, storage};
use crate::error::Error;
use crate::models::BillStatement;
use crate::schema::{StatementForm, validate_statement};
use crate::store::Store;
use crate::utils::{confirm, fmt_money, maybe_print_json, pretty_table};

pub fn handle(client: &Client, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("upload", sub)) => upload(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("url", sub)) => url(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_id(sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.parse::<Uuid>()
        .with_context(|| format!("Invalid statement id '{}'", raw))
}

fn upload(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let form = StatementForm {
        card_id: sub.get_one::<String>("card").cloned().unwrap_or_default(),
        bill_date: sub
            .get_one::<String>("bill-date")
            .cloned()
            .unwrap_or_default(),
        due_date: sub
            .get_one::<String>("due-date")
            .cloned()
            .unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
    };
    let record =
        validate_statement(&form).map_err(|errs| anyhow::Error::from(Error::Validation(errs)))?;

    let file = Path::new(sub.get_one::<String>("file").unwrap());
    if !file.is_file() {
        bail!("File {} does not exist", file.display());
    }

    let row = storage::upload_statement(client, &record, file)?;
    println!(
        "Uploaded '{}' ({} bytes) for bill {} due {} (id {})",
        row.file_name, row.file_size, row.bill_date, row.due_date, row.id
    );
    Ok(())
}

fn list(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let raw = sub.get_one::<String>("card").unwrap();
    let card_id = raw
        .parse::<Uuid>()
        .with_context(|| format!("Invalid card id '{}'", raw))?;

    let mut store = Store::new();
    store.replace_all(statements::list_for_card(client, card_id)?);

    let rows: Vec<&BillStatement> = store.iter().collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.file_name.clone(),
                    s.bill_date.to_string(),
                    s.due_date.to_string(),
                    fmt_money(&s.amount),
                    format!("{}", s.file_size),
                    s.mime_type.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "File", "Bill", "Due", "Amount", "Size", "Type"],
                data
            )
        );
    }
    Ok(())
}

fn url(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let expires = *sub.get_one::<u64>("expires").unwrap_or(&3600);
    let Some(row) = statements::get(client, id)? else {
        bail!("Statement {} not found", id);
    };
    let link = storage::signed_url(client, &row.file_path, expires)?;
    println!("{}", link);
    Ok(())
}

fn rm(client: &Client, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(row) = statements::get(client, id)? else {
        bail!("Statement {} not found", id);
    };
    if !confirm(
        &format!("Delete statement '{}'?", row.file_name),
        sub.get_flag("yes"),
    )? {
        println!("Aborted");
        return Ok(());
    }
    statements::delete(client, id)?;
    if let Err(e) = storage::remove_object(client, &row.file_path) {
        eprintln!("Warning: stored file was not removed: {}", e);
    }
    println!("Removed statement '{}'", row.file_name);
    Ok(())
}
