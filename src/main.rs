// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cardclip::client::{Client, auth};
use cardclip::{cli, commands, config, session};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = config::Config::from_env()?;
    let mut client = Client::new(config, session::load()?)?;
    refresh_expired(&mut client)?;

    match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&mut client, sub)?,
        Some(("card", sub)) => commands::cards::handle(&client, sub)?,
        Some(("reminder", sub)) => commands::reminders::handle(&client, sub)?,
        Some(("statement", sub)) => commands::statements::handle(&client, sub)?,
        Some(("dashboard", _)) => commands::dashboard::handle(&client)?,
        Some(("doctor", _)) => commands::doctor::handle(&client)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// An expired cached token is exchanged once at startup. Only a backend
/// rejection of the refresh token signs the user out; network or server
/// trouble keeps the cache so the failing call, not the startup path,
/// surfaces the error.
fn refresh_expired(client: &mut Client) -> Result<()> {
    let expired = client
        .session()
        .filter(|s| s.is_expired())
        .map(|s| s.refresh_token.clone());
    if let Some(refresh_token) = expired {
        match auth::refresh(client, &refresh_token) {
            Ok(fresh) => {
                session::save(&fresh)?;
                client.set_session(fresh);
            }
            Err(err) if auth::refresh_rejected(&err) => {
                session::clear()?;
                client.clear_session();
            }
            Err(_) => {}
        }
    }
    Ok(())
}
