// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::client::{Client, auth};
use crate::utils::pretty_table;

/// Sanity checks: configuration, backend reachability, session validity.
/// Prints one row per finding rather than failing on the first.
pub fn handle(client: &Client) -> Result<()> {
    let mut rows = Vec::new();

    rows.push(vec![
        "backend_url".into(),
        client.config().backend_url.clone(),
    ]);

    let health = client.auth_url("health");
    match client
        .http()
        .get(&health)
        .header("apikey", &client.config().api_key)
        .send()
    {
        Ok(resp) if resp.status().is_success() => {
            rows.push(vec!["backend".into(), "reachable".into()]);
        }
        Ok(resp) => {
            rows.push(vec![
                "backend".into(),
                format!("unexpected status {}", resp.status()),
            ]);
        }
        Err(e) => {
            rows.push(vec!["backend".into(), format!("unreachable: {}", e)]);
        }
    }

    match client.session() {
        None => rows.push(vec!["session".into(), "none (run `cardclip auth login`)".into()]),
        Some(s) if s.is_expired() => {
            rows.push(vec!["session".into(), format!("expired for {}", s.email)]);
        }
        Some(s) => match auth::current_identity(client) {
            Ok(user) => rows.push(vec![
                "session".into(),
                format!("valid for {}", user.email.unwrap_or_else(|| s.email.clone())),
            ]),
            Err(e) => rows.push(vec!["session".into(), format!("rejected by backend: {}", e)]),
        },
    }

    println!("{}", pretty_table(&["Check", "Detail"], rows));
    Ok(())
}
