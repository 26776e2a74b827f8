// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Blueprint JSON document format
//!
//! Export is deterministic: struct fields are written in declaration order
//! and config maps are sorted by key. Import is all-or-nothing: a document
//! either yields a Blueprint that satisfies every graph invariant or a
//! [`Error::MalformedDocument`].

use crate::error::{Error, Result};
use crate::types::{
    new_id, Blueprint, BlueprintConfig, BlueprintStatus, Edge, Node, SCHEMA_VERSION,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// Incoming document; only `nodes`, `edges` and `config` are mandatory
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlueprintDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    version: Option<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    config: BlueprintConfig,
    #[serde(default)]
    status: Option<BlueprintStatus>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Serialize a Blueprint as pretty-printed JSON
pub fn export(blueprint: &Blueprint) -> Result<String> {
    let text = serde_json::to_string_pretty(blueprint)?;
    info!(
        "Exported blueprint {} ({} nodes, {} edges)",
        blueprint.id,
        blueprint.nodes.len(),
        blueprint.edges.len()
    );
    Ok(text)
}

/// Serialize a Blueprint as single-line JSON
pub fn export_compact(blueprint: &Blueprint) -> Result<String> {
    Ok(serde_json::to_string(blueprint)?)
}

/// Parse and validate a document, refreshing `updatedAt` to now.
///
/// A missing or empty `id` is replaced with a fresh one.
pub fn import(text: &str) -> Result<Blueprint> {
    let mut blueprint = decode(text)?;
    let now = Utc::now();
    blueprint.updated_at = if now > blueprint.created_at {
        now
    } else {
        blueprint.created_at
    };
    info!(
        "Imported blueprint {} ({} nodes, {} edges)",
        blueprint.id,
        blueprint.nodes.len(),
        blueprint.edges.len()
    );
    Ok(blueprint)
}

/// Parse and validate a document, keeping its own timestamps.
///
/// Used when reloading a session from disk.
pub fn decode(text: &str) -> Result<Blueprint> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;
    check_shape(&value)?;

    let document: BlueprintDocument = serde_json::from_value(value)
        .map_err(|e| Error::malformed(e.to_string()))?;

    let now = Utc::now();
    let created_at = document.created_at.unwrap_or(now);
    let updated_at = document
        .updated_at
        .map_or(created_at, |updated| updated.max(created_at));

    let blueprint = Blueprint {
        id: document
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(new_id),
        version: document
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| SCHEMA_VERSION.into()),
        nodes: document.nodes,
        edges: document.edges,
        config: document.config,
        status: document.status.unwrap_or_default(),
        created_at,
        updated_at,
    };

    validate(&blueprint)?;
    debug!("Decoded blueprint {}", blueprint.id);
    Ok(blueprint)
}

/// Top-level shape: an object with `nodes`/`edges` arrays and a `config` object
fn check_shape(value: &Value) -> Result<()> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::malformed("document is not a JSON object"))?;

    for key in ["nodes", "edges"] {
        match object.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(Error::malformed(format!("`{key}` must be an array"))),
            None => return Err(Error::malformed(format!("missing `{key}` array"))),
        }
    }

    match object.get("config") {
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(Error::malformed("`config` must be an object")),
        None => Err(Error::malformed("missing `config` object")),
    }
}

/// Check every graph invariant of a Blueprint
pub fn validate(blueprint: &Blueprint) -> Result<()> {
    let mut ids: HashSet<&str> = HashSet::new();

    for node in &blueprint.nodes {
        if node.id.is_empty() {
            return Err(Error::malformed("node with empty id"));
        }
        if !ids.insert(&node.id) {
            return Err(Error::malformed(format!("duplicate id {}", node.id)));
        }
        if !node.position.is_finite() {
            return Err(Error::malformed(format!(
                "node {} has a non-finite position",
                node.id
            )));
        }
    }

    let node_ids: HashSet<&str> = blueprint.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut pairs: HashSet<(&str, &str)> = HashSet::new();

    for edge in &blueprint.edges {
        if edge.id.is_empty() {
            return Err(Error::malformed("edge with empty id"));
        }
        if !ids.insert(&edge.id) {
            return Err(Error::malformed(format!("duplicate id {}", edge.id)));
        }
        if edge.source == edge.target {
            return Err(Error::malformed(format!("edge {} is a self-loop", edge.id)));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(Error::malformed(format!(
                    "edge {} references unknown node {endpoint}",
                    edge.id
                )));
            }
        }
        if !pairs.insert((edge.source.as_str(), edge.target.as_str())) {
            return Err(Error::malformed(format!(
                "duplicate edge {} -> {}",
                edge.source, edge.target
            )));
        }
    }

    if blueprint.updated_at < blueprint.created_at {
        return Err(Error::malformed("updatedAt precedes createdAt"));
    }

    Ok(())
}
