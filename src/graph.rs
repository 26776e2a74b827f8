// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Blueprint editing session - the mutation API over the graph
//!
//! A session owns one Blueprint plus the UI selection. Every mutation keeps
//! the graph invariants: edges only connect present nodes, no self-loops,
//! at most one edge per ordered pair, unique ids, monotonic `updated_at`.
//! Stale or racing requests (unknown ids, duplicate edges) are no-ops.

use crate::catalog::{BlockCatalog, BuiltinCatalog};
use crate::document;
use crate::error::Result;
use crate::layout;
use crate::types::{
    merge_config, new_id, Blueprint, ConfigMap, Edge, EdgeKind, Node, NodeUpdate, Position,
};
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// File name of a saved Blueprint inside a data directory
pub const BLUEPRINT_FILE: &str = "blueprint.json";

/// An editing session over one Blueprint
pub struct BlueprintSession {
    blueprint: Blueprint,
    selected: Option<String>,
    catalog: Box<dyn BlockCatalog>,
}

impl Default for BlueprintSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlueprintSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintSession")
            .field("blueprint", &self.blueprint)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl BlueprintSession {
    /// Fresh default Blueprint with the built-in block catalog
    #[must_use]
    pub fn new() -> Self {
        Self::from_blueprint(Blueprint::create_default())
    }

    /// Fresh default Blueprint with a custom block catalog
    #[must_use]
    pub fn with_catalog(catalog: impl BlockCatalog + 'static) -> Self {
        Self {
            blueprint: Blueprint::create_default(),
            selected: None,
            catalog: Box::new(catalog),
        }
    }

    /// Session over an existing Blueprint.
    ///
    /// The Blueprint is trusted; use [`document::import`] for untrusted input.
    #[must_use]
    pub fn from_blueprint(blueprint: Blueprint) -> Self {
        Self {
            blueprint,
            selected: None,
            catalog: Box::new(BuiltinCatalog),
        }
    }

    /// Replace the block catalog
    pub fn set_catalog(&mut self, catalog: impl BlockCatalog + 'static) {
        self.catalog = Box::new(catalog);
    }

    /// Load from a data directory; a missing file yields a fresh Blueprint
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(BLUEPRINT_FILE);
        if !path.exists() {
            debug!("No blueprint at {}, starting fresh", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let blueprint = document::decode(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Self::from_blueprint(blueprint))
    }

    /// Save to a data directory
    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let path = dir.join(BLUEPRINT_FILE);
        let json = document::export(&self.blueprint).context("Failed to serialize blueprint")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current Blueprint
    #[must_use]
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Consume the session, keeping the Blueprint
    #[must_use]
    pub fn into_blueprint(self) -> Blueprint {
        self.blueprint
    }

    /// Mutable access to the project/network configuration
    pub fn config_mut(&mut self) -> &mut crate::types::BlueprintConfig {
        self.blueprint.touch();
        &mut self.blueprint.config
    }

    /// Get a node by ID
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.blueprint.node(id)
    }

    /// Get an edge by ID
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.blueprint.edge(id)
    }

    /// All nodes
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.blueprint.nodes
    }

    /// All edges
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.blueprint.edges
    }

    /// Edges leaving a node
    #[must_use]
    pub fn edges_from(&self, node_id: &str) -> Vec<&Edge> {
        self.blueprint
            .edges
            .iter()
            .filter(|e| e.source == node_id)
            .collect()
    }

    /// Edges entering a node
    #[must_use]
    pub fn edges_to(&self, node_id: &str) -> Vec<&Edge> {
        self.blueprint
            .edges
            .iter()
            .filter(|e| e.target == node_id)
            .collect()
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.blueprint.nodes.len()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.blueprint.edges.len()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprint.nodes.is_empty()
    }

    /// ID of the selected node
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected node
    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.blueprint.node(id))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a node of `block_type` at `position`.
    ///
    /// Config starts from the catalog defaults (empty for unknown kinds) and
    /// `overrides` are shallow-merged on top. Always succeeds.
    pub fn add_node(
        &mut self,
        block_type: &str,
        position: Position,
        overrides: Option<ConfigMap>,
    ) -> Node {
        let position = if position.is_finite() {
            position
        } else {
            warn!("Non-finite position for new {} node, using origin", block_type);
            Position::default()
        };

        let mut config = self.catalog.default_config(block_type);
        if let Some(overrides) = overrides {
            merge_config(&mut config, overrides);
        }

        let node = Node {
            id: self.fresh_id(),
            block_type: block_type.to_string(),
            position,
            config,
        };

        debug!("Added node {} ({})", node.id, node.block_type);
        self.blueprint.nodes.push(node.clone());
        self.blueprint.touch();
        node
    }

    /// Shallow-merge `update` into the node; returns false if `id` is unknown.
    ///
    /// A non-finite position in the update is ignored.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool {
        let Some(node) = self.blueprint.nodes.iter_mut().find(|n| n.id == id) else {
            debug!("update_node: no node {}", id);
            return false;
        };

        if let Some(block_type) = update.block_type {
            node.block_type = block_type;
        }
        if let Some(position) = update.position {
            if position.is_finite() {
                node.position = position;
            } else {
                warn!("Ignoring non-finite position for node {}", id);
            }
        }
        if let Some(config) = update.config {
            merge_config(&mut node.config, config);
        }

        self.blueprint.touch();
        true
    }

    /// Shallow-merge `partial` into the node config; returns false if `id` is unknown
    pub fn update_node_config(&mut self, id: &str, partial: ConfigMap) -> bool {
        self.update_node(
            id,
            NodeUpdate {
                config: Some(partial),
                ..NodeUpdate::default()
            },
        )
    }

    /// Remove a node and every edge touching it; clears the selection if it
    /// pointed at the node
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.blueprint.nodes.iter().position(|n| n.id == id)?;
        let node = self.blueprint.nodes.remove(index);

        let before = self.blueprint.edges.len();
        self.blueprint
            .edges
            .retain(|e| e.source != id && e.target != id);
        let cascaded = before - self.blueprint.edges.len();

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        debug!("Removed node {} and {} edge(s)", id, cascaded);
        self.blueprint.touch();
        Some(node)
    }

    /// Link `source` to `target`.
    ///
    /// Returns `None` without mutating for self-loops, duplicate pairs and
    /// unknown endpoints.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<Edge> {
        if source == target {
            debug!("Rejected self-loop on {}", source);
            return None;
        }
        if self.blueprint.node(source).is_none() || self.blueprint.node(target).is_none() {
            debug!("Rejected edge {} -> {}: unknown endpoint", source, target);
            return None;
        }
        if self.blueprint.has_edge(source, target) {
            debug!("Rejected duplicate edge {} -> {}", source, target);
            return None;
        }

        let edge = Edge {
            id: self.fresh_id(),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Dependency,
        };

        debug!("Added edge {} ({} -> {})", edge.id, source, target);
        self.blueprint.edges.push(edge.clone());
        self.blueprint.touch();
        Some(edge)
    }

    /// Remove an edge by ID
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.blueprint.edges.iter().position(|e| e.id == id)?;
        let edge = self.blueprint.edges.remove(index);
        debug!("Removed edge {}", id);
        self.blueprint.touch();
        Some(edge)
    }

    /// Set or clear the selection; selecting an unknown node clears it
    pub fn select_node(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.blueprint.node(id).is_some())
            .map(str::to_string);
    }

    /// Re-flow every node with the tier layout, using insertion order for rows.
    ///
    /// On a cycle the Blueprint is left untouched.
    pub fn apply_layout(&mut self) -> Result<()> {
        let index_of: HashMap<&str, usize> = self
            .blueprint
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let pairs: Vec<(usize, usize)> = self
            .blueprint
            .edges
            .iter()
            .filter_map(|e| {
                let source = *index_of.get(e.source.as_str())?;
                let target = *index_of.get(e.target.as_str())?;
                Some((source, target))
            })
            .collect();

        let positions = layout::layout(self.blueprint.nodes.len(), &pairs, Position::default())?;

        for (node, position) in self.blueprint.nodes.iter_mut().zip(positions) {
            node.position = position;
        }

        info!("Re-flowed {} nodes", self.blueprint.nodes.len());
        self.blueprint.touch();
        Ok(())
    }

    // =========================================================================
    // Whole-document operations
    // =========================================================================

    /// Serialize the Blueprint
    pub fn export(&self) -> Result<String> {
        document::export(&self.blueprint)
    }

    /// Replace the Blueprint with an imported document.
    ///
    /// On error the current Blueprint and selection are left untouched.
    pub fn import(&mut self, text: &str) -> Result<()> {
        let blueprint = document::import(text)?;
        self.blueprint = blueprint;
        self.selected = None;
        Ok(())
    }

    /// Discard everything and start from a default Blueprint
    pub fn reset(&mut self) -> &Blueprint {
        self.blueprint = Blueprint::create_default();
        self.selected = None;
        info!("Reset to blueprint {}", self.blueprint.id);
        &self.blueprint
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph blueprint {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for node in &self.blueprint.nodes {
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", pos=\"{},{}!\"];\n",
                dot_escape(&node.id),
                dot_escape(&node.block_type),
                node.position.x,
                0.0 - node.position.y
            ));
        }

        dot.push('\n');

        for edge in &self.blueprint.edges {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                dot_escape(&edge.source),
                dot_escape(&edge.target)
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Identifier not yet used by any node or edge
    fn fresh_id(&self) -> String {
        loop {
            let id = new_id();
            if self.blueprint.node(&id).is_none() && self.blueprint.edge(&id).is_none() {
                return id;
            }
        }
    }
}

/// Escape text for a double-quoted DOT string
fn dot_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
