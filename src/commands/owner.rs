// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_owner, set_owner};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => println!("{}", get_owner(conn)?),
        Some(("set", sub)) => {
            let id = sub
                .get_one::<String>("id")
                .map(|s| s.trim())
                .unwrap_or_default();
            if id.is_empty() {
                bail!("Owner id must not be empty");
            }
            set_owner(conn, id)?;
            println!("Owner set to {}", id);
        }
        _ => {}
    }
    Ok(())
}
