// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Template library and ghost overlays
//!
//! A template is a read-only seed graph. Edges are index pairs: core edges
//! index into `nodes`, ghost edges index into `[nodes..., ghost_nodes...]`,
//! so ghost node `j` is index `nodes.len() + j`. A ghost edge always ends
//! at a ghost node; a core edge never touches one.
//!
//! Instantiating a template copies the core graph into a fresh session and
//! returns the ghost part as a [`GhostOverlay`] whose nodes can be promoted
//! into the live graph one at a time.

use crate::catalog::{BlockCatalog, BuiltinCatalog};
use crate::error::{Error, Result};
use crate::graph::BlueprintSession;
use crate::layout::{
    assign_positions, assign_rows, compute_tiers, compute_tiers_with_floor, tier_position,
};
use crate::types::{ConfigMap, Node, Position};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// File name of a saved ghost overlay inside a data directory
pub const GHOSTS_FILE: &str = "ghosts.json";

// =============================================================================
// Template records
// =============================================================================

/// A block in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateNode {
    /// Block kind
    #[serde(rename = "type")]
    pub block_type: String,
    /// Display label, copied into the node config as `label`
    pub label: String,
    /// Authored canvas position
    pub position: Position,
    /// Config overrides on top of the catalog defaults
    #[serde(default)]
    pub config: ConfigMap,
}

impl TemplateNode {
    /// Block without config overrides
    #[must_use]
    pub fn new(block_type: &str, label: &str, x: f64, y: f64) -> Self {
        Self {
            block_type: block_type.into(),
            label: label.into(),
            position: Position::new(x, y),
            config: ConfigMap::new(),
        }
    }

    /// Add config overrides from a JSON object
    #[must_use]
    pub fn with_config(mut self, overrides: Value) -> Self {
        if let Value::Object(map) = overrides {
            self.config.extend(map);
        }
        self
    }

    /// Overrides handed to `add_node`: the authored config plus the label
    fn overrides(&self) -> ConfigMap {
        let mut config = self.config.clone();
        config.insert("label".into(), Value::String(self.label.clone()));
        config
    }
}

/// Index pair into a template's node list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateEdge {
    /// Source index
    pub source: usize,
    /// Target index
    pub target: usize,
}

/// Shorthand for a template edge
#[must_use]
pub const fn link(source: usize, target: usize) -> TemplateEdge {
    TemplateEdge { source, target }
}

/// Tier of every template node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTiers {
    /// Tiers of core nodes
    pub core: Vec<usize>,
    /// Tiers of ghost nodes, all past the last core tier
    pub ghost: Vec<usize>,
}

/// Positions computed from the tier rule
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLayout {
    /// Core node positions
    pub core: Vec<Position>,
    /// Ghost node positions
    pub ghost: Vec<Position>,
}

/// Canonical seed for a category of Blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Category tag
    pub category: String,
    /// Offset applied to every computed position
    pub origin: Position,
    /// Core blocks
    pub nodes: Vec<TemplateNode>,
    /// Core edges, indices into `nodes`
    pub edges: Vec<TemplateEdge>,
    /// Suggested blocks
    #[serde(default)]
    pub ghost_nodes: Vec<TemplateNode>,
    /// Suggested edges, indices into `nodes` followed by `ghost_nodes`
    #[serde(default)]
    pub ghost_edges: Vec<TemplateEdge>,
}

impl Template {
    /// Look up a template from the built-in library
    pub fn find(id: &str) -> Result<Self> {
        Self::library()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidTemplate {
            template: self.id.clone(),
            reason: reason.into(),
        }
    }

    fn core_pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(|e| (e.source, e.target)).collect()
    }

    fn check_indices(&self) -> Result<()> {
        let core_len = self.nodes.len();
        let combined_len = core_len + self.ghost_nodes.len();

        let mut seen = HashSet::new();
        for edge in &self.edges {
            if edge.source >= core_len || edge.target >= core_len {
                return Err(self.invalid(format!(
                    "core edge {} -> {} must stay within the {core_len} core nodes",
                    edge.source, edge.target
                )));
            }
            if !seen.insert(*edge) {
                return Err(self.invalid(format!(
                    "duplicate core edge {} -> {}",
                    edge.source, edge.target
                )));
            }
        }

        for edge in &self.ghost_edges {
            if edge.source >= combined_len {
                return Err(self.invalid(format!(
                    "ghost edge source {} is out of range for {combined_len} nodes",
                    edge.source
                )));
            }
            if edge.target < core_len || edge.target >= combined_len {
                return Err(self.invalid(format!(
                    "ghost edge target {} must be a ghost index in {core_len}..{combined_len}",
                    edge.target
                )));
            }
            if !seen.insert(*edge) {
                return Err(self.invalid(format!(
                    "duplicate ghost edge {} -> {}",
                    edge.source, edge.target
                )));
            }
        }

        Ok(())
    }

    /// Tier every core and ghost node.
    ///
    /// Ghost tiers extend the longest-path rule over the combined graph with
    /// every ghost held at least one column past the deepest core node.
    pub fn tiers(&self) -> Result<TemplateTiers> {
        self.check_indices()?;

        let core = compute_tiers(self.nodes.len(), &self.core_pairs())?;
        let ghost_floor = core.iter().max().map_or(0, |deepest| deepest + 1);

        let floor: Vec<usize> = std::iter::repeat(0)
            .take(self.nodes.len())
            .chain(std::iter::repeat(ghost_floor).take(self.ghost_nodes.len()))
            .collect();
        let mut pairs = self.core_pairs();
        pairs.extend(self.ghost_edges.iter().map(|e| (e.source, e.target)));

        let combined = compute_tiers_with_floor(floor.len(), &pairs, &floor)?;
        let ghost = combined[self.nodes.len()..].to_vec();

        Ok(TemplateTiers { core, ghost })
    }

    /// Check index rules and acyclicity
    pub fn validate(&self) -> Result<()> {
        self.tiers().map(|_| ())
    }

    /// Positions given by the tier rule, offset by `origin`
    pub fn compute_layout(&self) -> Result<TemplateLayout> {
        let tiers = self.tiers()?;
        let core = assign_positions(&tiers.core, self.origin);
        let ghost = tiers
            .ghost
            .iter()
            .zip(assign_rows(&tiers.ghost))
            .map(|(tier, row)| tier_position(*tier, row, self.origin))
            .collect();
        Ok(TemplateLayout { core, ghost })
    }

    /// Overwrite authored positions with computed ones
    pub fn with_computed_layout(mut self) -> Result<Self> {
        let layout = self.compute_layout()?;
        for (node, position) in self.nodes.iter_mut().zip(layout.core) {
            node.position = position;
        }
        for (node, position) in self.ghost_nodes.iter_mut().zip(layout.ghost) {
            node.position = position;
        }
        Ok(self)
    }

    /// The built-in template library
    #[must_use]
    pub fn library() -> Vec<Self> {
        vec![
            Self {
                id: "token-launch".into(),
                name: "ERC-20 Token Launch".into(),
                description: "Fungible token with staking, a dashboard and holder alerts".into(),
                category: "defi".into(),
                origin: Position::new(0.0, 50.0),
                nodes: vec![
                    TemplateNode::new("erc20-stylus", "Governance Token", 0.0, 50.0)
                        .with_config(json!({"name": "Governance Token", "symbol": "GOV"})),
                    TemplateNode::new("staking", "Staking Pool", 300.0, 50.0),
                    TemplateNode::new("frontend-scaffold", "Token Dashboard", 600.0, 50.0),
                    TemplateNode::new("telegram-bot", "Holder Alerts", 300.0, 200.0),
                ],
                edges: vec![link(0, 1), link(0, 2), link(1, 2), link(0, 3)],
                ghost_nodes: vec![
                    TemplateNode::new("multisig", "Treasury Multisig", 900.0, 50.0),
                    TemplateNode::new("indexer", "Transfer Indexer", 900.0, 200.0),
                    TemplateNode::new("dao-governor", "Token DAO", 1200.0, 50.0),
                ],
                ghost_edges: vec![link(0, 4), link(0, 5), link(4, 6)],
            },
            Self {
                id: "nft-drop".into(),
                name: "NFT Drop".into(),
                description: "ERC-721 collection with a marketplace, indexer and mint site".into(),
                category: "nft".into(),
                origin: Position::new(0.0, 80.0),
                nodes: vec![
                    TemplateNode::new("erc721-stylus", "Collection", 0.0, 80.0),
                    TemplateNode::new("marketplace", "Marketplace", 300.0, 80.0),
                    TemplateNode::new("indexer", "Mint Indexer", 300.0, 230.0)
                        .with_config(json!({"entities": ["Transfer", "Mint"]})),
                    TemplateNode::new("frontend-scaffold", "Mint Site", 600.0, 80.0),
                ],
                edges: vec![link(0, 1), link(0, 2), link(1, 3), link(2, 3)],
                ghost_nodes: vec![
                    TemplateNode::new("discord-bot", "Holder Roles", 900.0, 80.0),
                    TemplateNode::new("erc1155-stylus", "Companion Editions", 900.0, 230.0),
                ],
                ghost_edges: vec![link(3, 4), link(0, 5)],
            },
            Self {
                id: "price-feed-vault".into(),
                name: "Oracle-Priced Vault".into(),
                description: "Collateral vault priced by Chainlink with a Pyth fallback".into(),
                category: "oracle".into(),
                origin: Position::new(0.0, 50.0),
                nodes: vec![
                    TemplateNode::new("chainlink-price-feed", "ETH/USD Feed", 0.0, 50.0)
                        .with_config(json!({"pair": "ETH/USD"})),
                    TemplateNode::new("pyth-oracle", "Pyth Fallback", 0.0, 200.0),
                    TemplateNode::new("staking", "Collateral Vault", 300.0, 50.0),
                    TemplateNode::new("frontend-scaffold", "Vault UI", 600.0, 50.0),
                    TemplateNode::new("telegram-bot", "Liquidation Alerts", 600.0, 200.0),
                ],
                edges: vec![link(0, 2), link(1, 2), link(2, 3), link(2, 4), link(0, 3)],
                ghost_nodes: vec![
                    TemplateNode::new("indexer", "Position Indexer", 900.0, 50.0),
                    TemplateNode::new("discord-bot", "Risk Channel", 1200.0, 50.0),
                ],
                ghost_edges: vec![link(2, 5), link(5, 6)],
            },
            Self {
                id: "dao".into(),
                name: "Token DAO".into(),
                description: "Voting token, governor and guardian multisig with a portal".into(),
                category: "governance".into(),
                origin: Position::new(0.0, 50.0),
                nodes: vec![
                    TemplateNode::new("erc20-stylus", "Voting Token", 0.0, 50.0)
                        .with_config(json!({"name": "Voting Token", "symbol": "VOTE"})),
                    TemplateNode::new("dao-governor", "Governor", 300.0, 50.0),
                    TemplateNode::new("multisig", "Guardian Multisig", 600.0, 50.0),
                    TemplateNode::new("frontend-scaffold", "Governance Portal", 900.0, 50.0),
                    TemplateNode::new("discord-bot", "Proposal Feed", 600.0, 200.0),
                ],
                edges: vec![link(0, 1), link(1, 2), link(1, 3), link(2, 3), link(1, 4)],
                ghost_nodes: vec![
                    TemplateNode::new("indexer", "Vote Indexer", 1200.0, 50.0),
                    TemplateNode::new("telegram-bot", "Vote Reminders", 1500.0, 50.0),
                ],
                ghost_edges: vec![link(1, 5), link(5, 6)],
            },
        ]
    }
}

// =============================================================================
// Ghost overlay
// =============================================================================

/// Endpoint of a ghost edge after materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ref", rename_all = "lowercase")]
pub enum Endpoint {
    /// A node of the live graph
    Live(String),
    /// A ghost node, by index in the overlay
    Ghost(usize),
}

/// A suggested block not yet in the live graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostNode {
    /// Block kind
    #[serde(rename = "type")]
    pub block_type: String,
    /// Display label
    pub label: String,
    /// Where the ghost is drawn
    pub position: Position,
    /// Config overrides used on activation
    #[serde(default)]
    pub config: ConfigMap,
    /// Live node ID once activated
    #[serde(default)]
    pub activated: Option<String>,
}

/// A suggested edge; its target is always a ghost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostEdge {
    /// Source endpoint
    pub source: Endpoint,
    /// Target endpoint
    pub target: Endpoint,
}

/// Suggested extensions kept beside a live Blueprint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GhostOverlay {
    /// Template the overlay came from
    pub template_id: String,
    /// Ghost nodes
    pub nodes: Vec<GhostNode>,
    /// Ghost edges
    pub edges: Vec<GhostEdge>,
}

impl GhostOverlay {
    /// Resolve template indices against the live IDs of the core nodes
    fn from_template(template: &Template, core_ids: &[String]) -> Self {
        let endpoint = |index: usize| match core_ids.get(index) {
            Some(id) => Endpoint::Live(id.clone()),
            None => Endpoint::Ghost(index - core_ids.len()),
        };

        Self {
            template_id: template.id.clone(),
            nodes: template
                .ghost_nodes
                .iter()
                .map(|ghost| GhostNode {
                    block_type: ghost.block_type.clone(),
                    label: ghost.label.clone(),
                    position: ghost.position,
                    config: ghost.overrides(),
                    activated: None,
                })
                .collect(),
            edges: template
                .ghost_edges
                .iter()
                .map(|edge| GhostEdge {
                    source: endpoint(edge.source),
                    target: endpoint(edge.target),
                })
                .collect(),
        }
    }

    /// Ghosts still waiting for activation
    pub fn pending(&self) -> impl Iterator<Item = (usize, &GhostNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, ghost)| ghost.activated.is_none())
    }

    /// Whether every ghost has been promoted
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending().next().is_none()
    }

    /// Load the overlay stored in a data directory, if any
    pub fn load(dir: &Path) -> anyhow::Result<Option<Self>> {
        let path = dir.join(GHOSTS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let overlay = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(overlay))
    }

    /// Save the overlay into a data directory
    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        let path = dir.join(GHOSTS_FILE);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize ghosts")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Delete any overlay stored in a data directory
    pub fn clear(dir: &Path) -> anyhow::Result<()> {
        let path = dir.join(GHOSTS_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

// =============================================================================
// Materialization
// =============================================================================

impl BlueprintSession {
    /// New session seeded from a template with the built-in catalog
    pub fn from_template(template: &Template) -> Result<(Self, GhostOverlay)> {
        Self::from_template_with_catalog(template, BuiltinCatalog)
    }

    /// New session seeded from a template.
    ///
    /// Core nodes and edges go through the mutation API; template indices
    /// are translated to the fresh node IDs in one pass. Ghosts are returned
    /// separately and are not inserted.
    pub fn from_template_with_catalog(
        template: &Template,
        catalog: impl BlockCatalog + 'static,
    ) -> Result<(Self, GhostOverlay)> {
        template.validate()?;

        let mut session = Self::with_catalog(catalog);
        {
            let config = session.config_mut();
            config.project.name = template.id.clone();
            config.project.description = template.description.clone();
            config.project.keywords.insert(template.category.clone());
        }

        let core_ids: Vec<String> = template
            .nodes
            .iter()
            .map(|n| session.add_node(&n.block_type, n.position, Some(n.overrides())).id)
            .collect();

        for edge in &template.edges {
            session.add_edge(&core_ids[edge.source], &core_ids[edge.target]);
        }

        let overlay = GhostOverlay::from_template(template, &core_ids);
        info!(
            "Instantiated template {} ({} nodes, {} ghosts)",
            template.id,
            core_ids.len(),
            overlay.nodes.len()
        );
        Ok((session, overlay))
    }

    /// Promote ghost `index` into the live graph.
    ///
    /// The node is created with `add_node`, then every ghost edge whose
    /// endpoints are now both live is added with `add_edge`. Returns `None`
    /// if the ghost is already live.
    pub fn activate_ghost(
        &mut self,
        overlay: &mut GhostOverlay,
        index: usize,
    ) -> Result<Option<Node>> {
        let ghost = overlay.nodes.get(index).ok_or(Error::UnknownGhost(index))?;
        if let Some(id) = &ghost.activated {
            if self.node(id).is_some() {
                debug!("Ghost {} already active as {}", index, id);
                return Ok(None);
            }
        }

        let node = self.add_node(&ghost.block_type, ghost.position, Some(ghost.config.clone()));
        overlay.nodes[index].activated = Some(node.id.clone());

        let resolve = |endpoint: &Endpoint| -> Option<String> {
            let id = match endpoint {
                Endpoint::Live(id) => Some(id.clone()),
                Endpoint::Ghost(j) => overlay.nodes.get(*j).and_then(|g| g.activated.clone()),
            }?;
            self.node(&id).map(|_| id)
        };

        let touches = |endpoint: &Endpoint| *endpoint == Endpoint::Ghost(index);
        let links: Vec<(String, String)> = overlay
            .edges
            .iter()
            .filter(|e| touches(&e.source) || touches(&e.target))
            .filter_map(|e| Some((resolve(&e.source)?, resolve(&e.target)?)))
            .collect();

        for (source, target) in links {
            self.add_edge(&source, &target);
        }

        info!("Activated ghost {} as node {}", index, node.id);
        Ok(Some(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_template() -> Template {
        Template {
            id: "chain".into(),
            name: "Chain".into(),
            description: String::new(),
            category: "test".into(),
            origin: Position::default(),
            nodes: vec![
                TemplateNode::new("erc20-stylus", "A", 0.0, 0.0),
                TemplateNode::new("staking", "B", 0.0, 0.0),
            ],
            edges: vec![link(0, 1)],
            ghost_nodes: vec![
                TemplateNode::new("indexer", "G0", 0.0, 0.0),
                TemplateNode::new("telegram-bot", "G1", 0.0, 0.0),
            ],
            ghost_edges: vec![link(1, 2), link(2, 3), link(0, 3)],
        }
    }

    #[test]
    fn test_ghost_tiers_follow_core() {
        let tiers = chain_template().tiers().unwrap();
        assert_eq!(tiers.core, vec![0, 1]);
        assert_eq!(tiers.ghost, vec![2, 3]);
    }

    #[test]
    fn test_unconnected_ghost_sits_after_core() {
        let mut template = chain_template();
        template.ghost_edges.clear();
        let tiers = template.tiers().unwrap();
        assert_eq!(tiers.ghost, vec![2, 2]);

        let layout = template.compute_layout().unwrap();
        assert_eq!(layout.ghost[0], Position::new(600.0, 0.0));
        assert_eq!(layout.ghost[1], Position::new(600.0, 150.0));
    }

    #[test]
    fn test_core_edge_into_ghost_rejected() {
        let mut template = chain_template();
        template.edges.push(link(1, 2));
        assert!(matches!(template.validate(), Err(Error::InvalidTemplate { .. })));
    }

    #[test]
    fn test_ghost_edge_into_core_rejected() {
        let mut template = chain_template();
        template.ghost_edges.push(link(2, 0));
        assert!(matches!(template.validate(), Err(Error::InvalidTemplate { .. })));
    }

    #[test]
    fn test_ghost_edge_out_of_range_rejected() {
        let mut template = chain_template();
        template.ghost_edges.push(link(0, 4));
        assert!(matches!(template.validate(), Err(Error::InvalidTemplate { .. })));
    }

    #[test]
    fn test_ghost_cycle_rejected() {
        let mut template = chain_template();
        template.ghost_edges.push(link(3, 2));
        assert!(matches!(template.validate(), Err(Error::CyclicGraph { .. })));
    }

    #[test]
    fn test_duplicate_core_edge_rejected() {
        let mut template = chain_template();
        template.edges.push(link(0, 1));
        assert!(matches!(template.validate(), Err(Error::InvalidTemplate { .. })));
    }

    #[test]
    fn test_with_computed_layout() {
        let template = chain_template().with_computed_layout().unwrap();
        assert_eq!(template.nodes[1].position, Position::new(300.0, 0.0));
        assert_eq!(template.ghost_nodes[1].position, Position::new(900.0, 0.0));
    }

    #[test]
    fn test_instantiate_translates_indices() {
        let template = chain_template();
        let (session, overlay) = BlueprintSession::from_template(&template).unwrap();

        assert_eq!(session.node_count(), 2);
        assert_eq!(session.edge_count(), 1);
        let edge = &session.edges()[0];
        assert_eq!(session.node(&edge.source).unwrap().block_type, "erc20-stylus");
        assert_eq!(session.node(&edge.target).unwrap().block_type, "staking");
        assert_eq!(session.nodes()[0].config["label"], "A");

        assert_eq!(overlay.nodes.len(), 2);
        assert_eq!(overlay.edges[0].source, Endpoint::Live(edge.target.clone()));
        assert_eq!(overlay.edges[0].target, Endpoint::Ghost(0));
        assert_eq!(overlay.edges[1].source, Endpoint::Ghost(0));
        assert_eq!(session.blueprint().config.project.name, "chain");
    }

    #[test]
    fn test_activate_ghost_links_live_endpoints() {
        let (mut session, mut overlay) =
            BlueprintSession::from_template(&chain_template()).unwrap();

        // G1 first: only A -> G1 is fully live
        let g1 = session.activate_ghost(&mut overlay, 1).unwrap().unwrap();
        assert_eq!(session.node_count(), 3);
        assert_eq!(session.edges_to(&g1.id).len(), 1);

        // G0 now connects B -> G0 and G0 -> G1
        let g0 = session.activate_ghost(&mut overlay, 0).unwrap().unwrap();
        assert_eq!(session.edges_to(&g0.id).len(), 1);
        assert_eq!(session.edges_from(&g0.id).len(), 1);
        assert_eq!(session.edge_count(), 4);
        assert!(overlay.is_exhausted());
    }

    #[test]
    fn test_activate_twice_is_no_op() {
        let (mut session, mut overlay) =
            BlueprintSession::from_template(&chain_template()).unwrap();
        session.activate_ghost(&mut overlay, 0).unwrap();
        let count = session.node_count();

        assert!(session.activate_ghost(&mut overlay, 0).unwrap().is_none());
        assert_eq!(session.node_count(), count);
    }

    #[test]
    fn test_activate_after_removal_recreates() {
        let (mut session, mut overlay) =
            BlueprintSession::from_template(&chain_template()).unwrap();
        let g0 = session.activate_ghost(&mut overlay, 0).unwrap().unwrap();
        session.remove_node(&g0.id);

        let again = session.activate_ghost(&mut overlay, 0).unwrap().unwrap();
        assert_ne!(again.id, g0.id);
    }

    #[test]
    fn test_unknown_ghost() {
        let (mut session, mut overlay) =
            BlueprintSession::from_template(&chain_template()).unwrap();
        assert!(matches!(
            session.activate_ghost(&mut overlay, 9),
            Err(Error::UnknownGhost(9))
        ));
    }

    #[test]
    fn test_find() {
        assert!(Template::find("dao").is_ok());
        assert!(matches!(Template::find("nope"), Err(Error::UnknownTemplate(_))));
    }

    #[test]
    fn test_overlay_save_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let (_, overlay) = BlueprintSession::from_template(&chain_template()).unwrap();

        assert!(GhostOverlay::load(dir.path()).unwrap().is_none());
        overlay.save(dir.path()).unwrap();
        assert_eq!(GhostOverlay::load(dir.path()).unwrap(), Some(overlay));

        GhostOverlay::clear(dir.path()).unwrap();
        assert!(GhostOverlay::load(dir.path()).unwrap().is_none());
    }
}
