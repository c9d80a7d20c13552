// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::client::{Client, auth};
use crate::session;

pub fn handle(client: &mut Client, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let sess = auth::sign_in(client, email, password)?;
            session::save(&sess)?;
            println!("Signed in as {}", sess.email);
            client.set_session(sess);
        }
        Some(("signup", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            match auth::sign_up(client, email, password)? {
                Some(sess) => {
                    session::save(&sess)?;
                    println!("Account created; signed in as {}", sess.email);
                    client.set_session(sess);
                }
                None => {
                    println!("Account created; confirm your email, then run `cardclip auth login`");
                }
            }
        }
        Some(("logout", _)) => {
            if client.session().is_some() {
                if let Err(e) = auth::sign_out(client) {
                    eprintln!("Warning: backend sign-out failed: {}", e);
                }
                session::clear()?;
                client.clear_session();
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
        Some(("whoami", _)) => {
            let user = auth::current_identity(client)?;
            println!("{} ({})", user.email.unwrap_or_default(), user.id);
        }
        _ => {}
    }
    Ok(())
}
