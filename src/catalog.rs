// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Block catalog - default settings for each block kind
//!
//! The core never interprets block semantics. It only asks the catalog for
//! a default config when a node is created; unknown kinds get an empty map.

use crate::types::ConfigMap;
use serde_json::{json, Value};

/// Source of default block configuration
pub trait BlockCatalog {
    /// Default config for a block kind; empty for kinds the catalog does not know
    fn default_config(&self, block_type: &str) -> ConfigMap;
}

/// Catalog that knows no blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl BlockCatalog for EmptyCatalog {
    fn default_config(&self, _block_type: &str) -> ConfigMap {
        ConfigMap::new()
    }
}

/// The blocks shipped with the canvas
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// Every block kind this catalog has defaults for
    pub const BLOCK_TYPES: &'static [&'static str] = &[
        "erc20-stylus",
        "erc721-stylus",
        "erc1155-stylus",
        "staking",
        "multisig",
        "dao-governor",
        "marketplace",
        "chainlink-price-feed",
        "pyth-oracle",
        "indexer",
        "frontend-scaffold",
        "telegram-bot",
        "discord-bot",
    ];

    /// Whether the kind is part of the built-in catalog
    #[must_use]
    pub fn contains(block_type: &str) -> bool {
        Self::BLOCK_TYPES.iter().any(|known| *known == block_type)
    }
}

impl BlockCatalog for BuiltinCatalog {
    fn default_config(&self, block_type: &str) -> ConfigMap {
        let defaults = match block_type {
            "erc20-stylus" => json!({
                "name": "MyToken",
                "symbol": "MTK",
                "decimals": 18,
                "initialSupply": "1000000",
                "features": ["ownable", "mintable", "burnable", "pausable"],
            }),
            "erc721-stylus" => json!({
                "name": "MyNFT",
                "symbol": "MNFT",
                "baseUri": "",
                "maxSupply": 10000,
                "features": ["ownable", "mintable", "burnable", "pausable", "enumerable"],
            }),
            "erc1155-stylus" => json!({
                "uri": "",
                "features": ["ownable", "mintable", "burnable", "supply"],
            }),
            "staking" => json!({
                "rewardRate": "100",
                "lockPeriodDays": 30,
                "compound": false,
            }),
            "multisig" => json!({
                "owners": [],
                "threshold": 2,
            }),
            "dao-governor" => json!({
                "votingDelayBlocks": 1,
                "votingPeriodBlocks": 50400,
                "quorumPercent": 4,
                "proposalThreshold": "0",
            }),
            "marketplace" => json!({
                "feeBasisPoints": 250,
                "currency": "ETH",
                "royalties": true,
            }),
            "chainlink-price-feed" => json!({
                "pair": "ETH/USD",
                "heartbeatSeconds": 3600,
                "decimals": 8,
            }),
            "pyth-oracle" => json!({
                "priceFeedId": "",
                "maxAgeSeconds": 60,
            }),
            "indexer" => json!({
                "startBlock": 0,
                "entities": [],
            }),
            "frontend-scaffold" => json!({
                "framework": "nextjs",
                "styling": "tailwind",
                "walletConnect": true,
            }),
            "telegram-bot" => json!({
                "commands": ["balance", "price"],
                "notifyOnTransfer": true,
            }),
            "discord-bot" => json!({
                "commands": ["balance"],
                "announceChannel": "",
            }),
            _ => Value::Null,
        };

        match defaults {
            Value::Object(map) => map,
            _ => ConfigMap::new(),
        }
    }
}
