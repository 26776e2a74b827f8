// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - inspect the effective configuration

use super::Context;
use anyhow::Result;

/// Run config command
pub fn run(ctx: &Context, action: &str) -> Result<()> {
    match action {
        "show" => {
            print!("{}", crate::config::to_toml(&ctx.config)?);
        }
        "path" => {
            println!("{}", ctx.data_dir().display());
        }
        "network" => {
            let network = ctx.config.network_config()?;
            println!("{} (chain {})", network.name, network.chain_id);
            println!("  rpc: {}", network.rpc_url);
            if !network.explorer_url.is_empty() {
                println!("  explorer: {}", network.explorer_url);
            }
        }
        other => {
            anyhow::bail!("Unknown action: {}. Valid: show, path, network", other);
        }
    }
    Ok(())
}
