// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Dappcanvas library - Blueprint graph model for visual dapp scaffolding
//!
//! This crate provides the core of the canvas: the Blueprint graph of typed
//! blocks and dependency edges, the mutation API that keeps it consistent,
//! the template library with its longest-path layout rule, and the JSON
//! document format shared with downstream generators.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod layout;
pub mod template;

/// Core data types for the Blueprint document
pub mod types {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    /// Schema version written into every Blueprint
    pub const SCHEMA_VERSION: &str = "1.0.0";

    /// Open key/value settings of a block
    pub type ConfigMap = Map<String, Value>;

    /// Generate a fresh 128-bit random identifier
    #[must_use]
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Shallow merge: keys in `patch` overwrite, everything else persists
    pub fn merge_config(base: &mut ConfigMap, patch: ConfigMap) {
        for (key, value) in patch {
            base.insert(key, value);
        }
    }

    // =========================================================================
    // Node / Edge
    // =========================================================================

    /// Position on the canvas
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    impl Position {
        /// Create a position
        #[must_use]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }

        /// Both coordinates are finite numbers
        #[must_use]
        pub fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite()
        }
    }

    /// A block instance placed on the canvas
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Node {
        /// Unique identifier, stable for the node's lifetime
        pub id: String,
        /// Block kind key from the catalog (opaque to the core)
        #[serde(rename = "type")]
        pub block_type: String,
        /// Canvas position
        pub position: Position,
        /// Block-specific settings
        #[serde(default)]
        pub config: ConfigMap,
    }

    /// Edge discriminator
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum EdgeKind {
        /// Target depends on source
        #[default]
        Dependency,
    }

    /// Directed dependency link between two nodes
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Edge {
        /// Unique identifier
        pub id: String,
        /// Source node ID
        pub source: String,
        /// Target node ID
        pub target: String,
        /// Edge kind
        #[serde(rename = "type", default)]
        pub kind: EdgeKind,
    }

    /// Partial update applied by `BlueprintSession::update_node`
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct NodeUpdate {
        /// New block kind
        pub block_type: Option<String>,
        /// New position
        pub position: Option<Position>,
        /// Keys shallow-merged into the node config
        pub config: Option<ConfigMap>,
    }

    impl NodeUpdate {
        /// Update that only moves the node
        #[must_use]
        pub fn position(position: Position) -> Self {
            Self {
                position: Some(position),
                ..Self::default()
            }
        }
    }

    // =========================================================================
    // Blueprint configuration
    // =========================================================================

    /// Project metadata for the generated scaffold
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ProjectConfig {
        /// Project name
        pub name: String,
        /// Description
        pub description: String,
        /// Project version (not the schema version)
        pub version: String,
        /// SPDX license identifier
        pub license: String,
        /// Keywords
        pub keywords: BTreeSet<String>,
    }

    impl Default for ProjectConfig {
        fn default() -> Self {
            Self {
                name: "my-dapp".into(),
                description: "A dapp scaffolded from a blueprint".into(),
                version: "0.1.0".into(),
                license: "MIT".into(),
                keywords: BTreeSet::new(),
            }
        }
    }

    /// Target chain for deployment
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct NetworkConfig {
        /// EVM chain ID
        pub chain_id: u64,
        /// Display name
        pub name: String,
        /// JSON-RPC endpoint
        pub rpc_url: String,
        /// Block explorer base URL
        pub explorer_url: String,
        /// Whether this is a test network
        pub is_testnet: bool,
    }

    impl Default for NetworkConfig {
        fn default() -> Self {
            Self::arbitrum_sepolia()
        }
    }

    impl NetworkConfig {
        /// Arbitrum Sepolia testnet
        #[must_use]
        pub fn arbitrum_sepolia() -> Self {
            Self {
                chain_id: 421_614,
                name: "Arbitrum Sepolia".into(),
                rpc_url: "https://sepolia-rollup.arbitrum.io/rpc".into(),
                explorer_url: "https://sepolia.arbiscan.io".into(),
                is_testnet: true,
            }
        }

        /// Arbitrum One mainnet
        #[must_use]
        pub fn arbitrum_one() -> Self {
            Self {
                chain_id: 42_161,
                name: "Arbitrum One".into(),
                rpc_url: "https://arb1.arbitrum.io/rpc".into(),
                explorer_url: "https://arbiscan.io".into(),
                is_testnet: false,
            }
        }

        /// Local Nitro dev node
        #[must_use]
        pub fn localhost() -> Self {
            Self {
                chain_id: 412_346,
                name: "Nitro Devnode".into(),
                rpc_url: "http://localhost:8547".into(),
                explorer_url: String::new(),
                is_testnet: true,
            }
        }

        /// Look up a network preset by its short name
        #[must_use]
        pub fn preset(name: &str) -> Option<Self> {
            match name.to_lowercase().as_str() {
                "arbitrum-sepolia" | "sepolia" => Some(Self::arbitrum_sepolia()),
                "arbitrum-one" | "arbitrum" | "mainnet" => Some(Self::arbitrum_one()),
                "localhost" | "local" | "devnode" => Some(Self::localhost()),
                _ => None,
            }
        }
    }

    /// Structured Blueprint configuration
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct BlueprintConfig {
        /// Project metadata
        pub project: ProjectConfig,
        /// Target network
        pub network: NetworkConfig,
        /// Generate docs alongside the scaffold
        pub generate_docs: bool,
        /// Deploy contracts as part of generation
        pub deploy_on_generate: bool,
    }

    impl Default for BlueprintConfig {
        fn default() -> Self {
            Self {
                project: ProjectConfig::default(),
                network: NetworkConfig::default(),
                generate_docs: true,
                deploy_on_generate: false,
            }
        }
    }

    // =========================================================================
    // Blueprint
    // =========================================================================

    /// Lifecycle tag; unknown values from imported documents are kept as-is
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum BlueprintStatus {
        /// Being edited
        #[default]
        Draft,
        /// Any other tag written by external tooling
        Other(String),
    }

    impl BlueprintStatus {
        /// Tag as written in documents
        #[must_use]
        pub fn as_str(&self) -> &str {
            match self {
                Self::Draft => "draft",
                Self::Other(tag) => tag,
            }
        }
    }

    impl From<String> for BlueprintStatus {
        fn from(tag: String) -> Self {
            if tag == "draft" {
                Self::Draft
            } else {
                Self::Other(tag)
            }
        }
    }

    impl From<BlueprintStatus> for String {
        fn from(status: BlueprintStatus) -> Self {
            match status {
                BlueprintStatus::Draft => "draft".into(),
                BlueprintStatus::Other(tag) => tag,
            }
        }
    }

    /// The whole dapp design: graph, configuration and metadata
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Blueprint {
        /// Unique identifier, preserved across edits
        pub id: String,
        /// Schema version
        pub version: String,
        /// Blocks, in insertion order
        pub nodes: Vec<Node>,
        /// Dependency links, in insertion order
        pub edges: Vec<Edge>,
        /// Project and network configuration
        pub config: BlueprintConfig,
        /// Lifecycle tag
        pub status: BlueprintStatus,
        /// Construction time
        pub created_at: DateTime<Utc>,
        /// Last mutation time
        pub updated_at: DateTime<Utc>,
    }

    impl Default for Blueprint {
        fn default() -> Self {
            Self::create_default()
        }
    }

    impl Blueprint {
        /// Empty graph with default configuration, status `draft`
        #[must_use]
        pub fn create_default() -> Self {
            Self::with_config(BlueprintConfig::default())
        }

        /// Empty graph with the given configuration
        #[must_use]
        pub fn with_config(config: BlueprintConfig) -> Self {
            let now = Utc::now();
            Self {
                id: new_id(),
                version: SCHEMA_VERSION.into(),
                nodes: Vec::new(),
                edges: Vec::new(),
                config,
                status: BlueprintStatus::Draft,
                created_at: now,
                updated_at: now,
            }
        }

        /// Refresh `updated_at`; never moves it backwards
        pub fn touch(&mut self) {
            let now = Utc::now();
            if now > self.updated_at {
                self.updated_at = now;
            }
        }

        /// Get a node by ID
        #[must_use]
        pub fn node(&self, id: &str) -> Option<&Node> {
            self.nodes.iter().find(|n| n.id == id)
        }

        /// Get an edge by ID
        #[must_use]
        pub fn edge(&self, id: &str) -> Option<&Edge> {
            self.edges.iter().find(|e| e.id == id)
        }

        /// Whether an edge exists for the ordered pair
        #[must_use]
        pub fn has_edge(&self, source: &str, target: &str) -> bool {
            self.edges
                .iter()
                .any(|e| e.source == source && e.target == target)
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::graph::BlueprintSession;
    pub use crate::types::*;
}
