// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use dappcanvas::document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that imports must validate and survive a second pass
    if let Ok(blueprint) = document::import(text) {
        assert!(document::validate(&blueprint).is_ok());
        let exported = document::export(&blueprint).unwrap();
        let again = document::import(&exported).unwrap();
        assert_eq!(again.nodes, blueprint.nodes);
        assert_eq!(again.edges, blueprint.edges);
    }
});
