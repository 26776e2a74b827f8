// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the Blueprint core

use thiserror::Error;

/// Result alias for Blueprint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the library boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Import document could not be parsed or violates graph invariants
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The dependency graph has a cycle, so no tier assignment exists
    #[error("cyclic graph: node {node} is part of a dependency cycle")]
    CyclicGraph {
        /// Index of a node on the cycle
        node: usize,
    },

    /// Tiering input references a node index outside the node list
    #[error("edge {index} ({from} -> {to}) is out of range for {node_count} nodes")]
    EdgeOutOfRange {
        /// Position of the edge in the input
        index: usize,
        /// Source index
        from: usize,
        /// Target index
        to: usize,
        /// Number of nodes
        node_count: usize,
    },

    /// Template data breaks the index or layout rules
    #[error("invalid template {template}: {reason}")]
    InvalidTemplate {
        /// Template ID
        template: String,
        /// What is wrong
        reason: String,
    },

    /// No template with this ID in the library
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Ghost index outside the overlay
    #[error("unknown ghost node: {0}")]
    UnknownGhost(usize),

    /// Serialization failure
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::EdgeOutOfRange {
            index: 2,
            from: 0,
            to: 9,
            node_count: 3,
        };
        assert_eq!(err.to_string(), "edge 2 (0 -> 9) is out of range for 3 nodes");
        assert_eq!(
            Error::malformed("missing `nodes` array").to_string(),
            "malformed document: missing `nodes` array"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
