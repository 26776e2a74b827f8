// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Longest-path tiering and left-to-right layout
//!
//! A node's tier is its longest-path depth from any root of the dependency
//! DAG. Tiers map to columns, declaration order within a tier maps to rows.

use crate::error::{Error, Result};
use crate::types::Position;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Assumed node width on the canvas
pub const NODE_WIDTH: f64 = 200.0;
/// Horizontal gap between columns
pub const COLUMN_GAP: f64 = 100.0;
/// Distance between the left edges of adjacent tiers
pub const COLUMN_SPACING: f64 = NODE_WIDTH + COLUMN_GAP;
/// Assumed node height on the canvas
pub const NODE_HEIGHT: f64 = 90.0;
/// Vertical gap between rows
pub const ROW_GAP: f64 = 60.0;
/// Distance between the top edges of adjacent rows
pub const ROW_SPACING: f64 = NODE_HEIGHT + ROW_GAP;

/// Compute the tier of every node in `0..node_count`.
///
/// `edges` are `(source, target)` index pairs. Roots get tier 0, every other
/// node gets one more than its deepest predecessor. Fails with
/// [`Error::CyclicGraph`] if the edges contain a cycle (self-loops included);
/// no partial result is produced.
pub fn compute_tiers(node_count: usize, edges: &[(usize, usize)]) -> Result<Vec<usize>> {
    compute_tiers_with_floor(node_count, edges, &[])
}

/// Like [`compute_tiers`], but no node is placed below `floor[i]`.
///
/// Missing floor entries count as 0. Ghost overlays use this to push every
/// suggested node past the last core column while keeping edges left-to-right.
pub fn compute_tiers_with_floor(
    node_count: usize,
    edges: &[(usize, usize)],
    floor: &[usize],
) -> Result<Vec<usize>> {
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(node_count, edges.len());
    let indices: Vec<NodeIndex> = (0..node_count).map(|_| graph.add_node(())).collect();

    for (index, &(from, to)) in edges.iter().enumerate() {
        if from >= node_count || to >= node_count {
            return Err(Error::EdgeOutOfRange {
                index,
                from,
                to,
                node_count,
            });
        }
        graph.add_edge(indices[from], indices[to], ());
    }

    let order = toposort(&graph, None).map_err(|cycle| Error::CyclicGraph {
        node: cycle.node_id().index(),
    })?;

    let mut tiers: Vec<usize> = (0..node_count)
        .map(|i| floor.get(i).copied().unwrap_or(0))
        .collect();

    // Predecessors come first in topological order, so each tier is final
    // by the time it is pushed to successors.
    for node in order {
        let next = tiers[node.index()] + 1;
        for succ in graph.neighbors_directed(node, Direction::Outgoing) {
            let slot = &mut tiers[succ.index()];
            if *slot < next {
                *slot = next;
            }
        }
    }

    Ok(tiers)
}

/// Canvas position of the `row`-th node in `tier`, shifted by `origin`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn tier_position(tier: usize, row: usize, origin: Position) -> Position {
    Position::new(
        origin.x + tier as f64 * COLUMN_SPACING,
        origin.y + row as f64 * ROW_SPACING,
    )
}

/// Row of every node within its tier, in declaration order
#[must_use]
pub fn assign_rows(tiers: &[usize]) -> Vec<usize> {
    let mut next_row: HashMap<usize, usize> = HashMap::new();
    tiers
        .iter()
        .map(|tier| {
            let row = next_row.entry(*tier).or_insert(0);
            let current = *row;
            *row += 1;
            current
        })
        .collect()
}

/// Positions for nodes already assigned to tiers
#[must_use]
pub fn assign_positions(tiers: &[usize], origin: Position) -> Vec<Position> {
    tiers
        .iter()
        .zip(assign_rows(tiers))
        .map(|(tier, row)| tier_position(*tier, row, origin))
        .collect()
}

/// Tier, then lay out, a graph given as index pairs
pub fn layout(
    node_count: usize,
    edges: &[(usize, usize)],
    origin: Position,
) -> Result<Vec<Position>> {
    let tiers = compute_tiers(node_count, edges)?;
    Ok(assign_positions(&tiers, origin))
}
