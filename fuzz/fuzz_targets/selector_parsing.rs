// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the selector parser.
//!
//! Configuration is user input. Any string either parses or is rejected with
//! an error, and a parsed selector round-trips through its source text.

#![no_main]

use glint::testing::portfolio_page;
use glint::{ContentTree, Selector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|source: &str| {
    static TREE: std::sync::OnceLock<ContentTree> = std::sync::OnceLock::new();
    let tree = TREE.get_or_init(|| ContentTree::from_page(&portfolio_page()));

    let Ok(selector) = Selector::parse(source) else {
        return;
    };
    assert_eq!(selector.as_str(), source);

    let reparsed = Selector::parse(selector.as_str()).expect("parsed once, parses again");
    assert_eq!(tree.select(&selector), tree.select(&reparsed));
});
