// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use dappcanvas::layout::compute_tiers;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    node_count: u8,
    edges: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
    let node_count = usize::from(input.node_count);
    let edges: Vec<(usize, usize)> = input
        .edges
        .iter()
        .map(|(a, b)| (usize::from(*a), usize::from(*b)))
        .collect();

    // Out-of-range and cyclic inputs are errors, never panics
    if let Ok(tiers) = compute_tiers(node_count, &edges) {
        for (source, target) in &edges {
            assert!(tiers[*source] < tiers[*target]);
        }
    }
});
