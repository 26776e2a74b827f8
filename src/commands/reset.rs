// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Reset command - discard the working blueprint

use super::Context;
use crate::template::GhostOverlay;
use anyhow::Result;

/// Run the reset command
pub fn run(ctx: &Context) -> Result<()> {
    let network = ctx.config.network_config()?;
    let mut session = ctx.load_session()?;
    let id = session.reset().id.clone();
    session.config_mut().network = network;
    ctx.save_session(&session)?;
    GhostOverlay::clear(ctx.data_dir())?;

    println!("Reset to empty blueprint {}", id);
    Ok(())
}
