// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Property tests: random edit sequences never break the graph

use dappcanvas::document;
use dappcanvas::graph::BlueprintSession;
use dappcanvas::layout::compute_tiers;
use dappcanvas::types::{NodeUpdate, Position};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    AddNode(usize),
    RemoveNode(usize),
    AddEdge(usize, usize),
    RemoveEdge(usize),
    Move(usize, f64, f64),
}

const KINDS: &[&str] = &["erc20-stylus", "staking", "indexer", "frontend-scaffold", "custom"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..KINDS.len()).prop_map(Op::AddNode),
        1 => any::<usize>().prop_map(Op::RemoveNode),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::AddEdge(a, b)),
        1 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => (any::<usize>(), -1e4..1e4f64, -1e4..1e4f64).prop_map(|(i, x, y)| Op::Move(i, x, y)),
    ]
}

fn pick(ids: &[String], index: usize) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

fn apply(session: &mut BlueprintSession, op: &Op) {
    let node_ids: Vec<String> = session.nodes().iter().map(|n| n.id.clone()).collect();
    let edge_ids: Vec<String> = session.edges().iter().map(|e| e.id.clone()).collect();

    match op {
        Op::AddNode(kind) => {
            session.add_node(KINDS[*kind], Position::default(), None);
        }
        Op::RemoveNode(i) => {
            if let Some(id) = pick(&node_ids, *i) {
                session.remove_node(&id);
            }
        }
        Op::AddEdge(a, b) => {
            if let (Some(source), Some(target)) = (pick(&node_ids, *a), pick(&node_ids, *b)) {
                session.add_edge(&source, &target);
            }
        }
        Op::RemoveEdge(i) => {
            if let Some(id) = pick(&edge_ids, *i) {
                session.remove_edge(&id);
            }
        }
        Op::Move(i, x, y) => {
            if let Some(id) = pick(&node_ids, *i) {
                session.update_node(&id, NodeUpdate::position(Position::new(*x, *y)));
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_edits_preserve_invariants(ops in prop::collection::vec(op(), 0..60)) {
        let mut session = BlueprintSession::new();
        let mut stamps = vec![session.blueprint().updated_at];

        for op in &ops {
            apply(&mut session, op);
            stamps.push(session.blueprint().updated_at);
        }

        let blueprint = session.blueprint();
        prop_assert!(document::validate(blueprint).is_ok());

        let node_ids: HashSet<&str> = blueprint.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut pairs = HashSet::new();
        for edge in &blueprint.edges {
            prop_assert!(node_ids.contains(edge.source.as_str()));
            prop_assert!(node_ids.contains(edge.target.as_str()));
            prop_assert_ne!(&edge.source, &edge.target);
            prop_assert!(pairs.insert((edge.source.as_str(), edge.target.as_str())));
        }

        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(blueprint.updated_at >= blueprint.created_at);
    }

    #[test]
    fn prop_export_import_round_trip(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = BlueprintSession::new();
        for op in &ops {
            apply(&mut session, op);
        }

        let original = session.blueprint().clone();
        let mut restored = document::import(&session.export().unwrap()).unwrap();

        prop_assert!(restored.updated_at >= original.updated_at);
        restored.updated_at = original.updated_at;
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn prop_tiers_respect_edges(
        node_count in 1usize..12,
        raw in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        // Only forward pairs, so the graph is a DAG
        let edges: Vec<(usize, usize)> = raw
            .into_iter()
            .map(|(a, b)| (a % node_count, b % node_count))
            .filter(|(a, b)| a < b)
            .collect();

        let tiers = compute_tiers(node_count, &edges).unwrap();

        for (source, target) in &edges {
            prop_assert!(tiers[*source] < tiers[*target]);
        }
        for (node, tier) in tiers.iter().enumerate() {
            if *tier > 0 {
                prop_assert!(edges.iter().any(|(s, t)| *t == node && tiers[*s] + 1 == *tier));
            }
        }
    }
}
