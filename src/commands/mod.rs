// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod edge;
pub mod export;
pub mod ghost;
pub mod import;
pub mod layout;
pub mod new;
pub mod node;
pub mod reset;
pub mod templates;

use crate::config::Config;
use crate::graph::{BlueprintSession, BLUEPRINT_FILE};
use crate::types::ConfigMap;
use anyhow::{Context as _, Result};
use owo_colors::{OwoColorize, Style};
use std::path::Path;

/// Shared state handed to every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,
    /// Emit ANSI colors
    pub color: bool,
}

impl Context {
    /// Directory holding the working blueprint
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Load the working blueprint.
    ///
    /// A data directory without a blueprint yields a fresh one on the
    /// configured network.
    pub fn load_session(&self) -> Result<BlueprintSession> {
        let stored = self.data_dir().join(BLUEPRINT_FILE).exists();
        let mut session = BlueprintSession::load(self.data_dir()).with_context(|| {
            format!("Failed to load blueprint from {}", self.data_dir().display())
        })?;
        if !stored {
            session.config_mut().network = self.config.network_config()?;
        }
        Ok(session)
    }

    /// Save the working blueprint
    pub fn save_session(&self, session: &BlueprintSession) -> Result<()> {
        session
            .save(self.data_dir())
            .with_context(|| format!("Failed to save blueprint to {}", self.data_dir().display()))
    }

    /// Style text unless colors are disabled
    #[must_use]
    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Resolve a full node ID or a unique ID prefix
pub fn resolve_node_id(session: &BlueprintSession, id_or_prefix: &str) -> Result<String> {
    if session.node(id_or_prefix).is_some() {
        return Ok(id_or_prefix.to_string());
    }

    let matches: Vec<_> = session
        .nodes()
        .iter()
        .filter(|n| n.id.starts_with(id_or_prefix))
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No node found matching: {}", id_or_prefix),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple nodes match '{}':", id_or_prefix);
            for n in &matches {
                eprintln!("  {} ({})", n.id, n.block_type);
            }
            anyhow::bail!("Ambiguous node ID. Use a longer prefix.");
        }
    }
}

/// Parse a JSON object given on the command line
pub fn parse_config_object(text: &str) -> Result<ConfigMap> {
    let value: serde_json::Value =
        serde_json::from_str(text).context("Config must be a JSON object")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Config must be a JSON object, got: {}", text),
    }
}

/// First eight characters of an ID, for listings
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
