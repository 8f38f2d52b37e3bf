// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the engine's keystroke path.
//!
//! Replays an arbitrary sequence of queries, submits, dismissals and
//! suggestion picks against the portfolio page. Nothing may panic, and
//! clearing the query at the end must restore every display and remove every
//! marker.

#![no_main]

use arbitrary::Arbitrary;
use glint::highlight::count_markers;
use glint::testing::portfolio_page;
use glint::{ContentTree, EngineConfig, SearchEngine};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Type(String),
    Submit,
    Dismiss,
    Pick(u8),
    Reindex,
}

fuzz_target!(|actions: Vec<Action>| {
    if actions.len() > 32 {
        return;
    }

    let mut tree = ContentTree::from_page(&portfolio_page());
    let root = tree.root();
    let pristine = tree.to_page(root);
    let Ok(mut engine) = SearchEngine::new(&EngineConfig::default()) else {
        return;
    };
    engine.reindex(&mut tree);

    for action in actions {
        match action {
            Action::Type(query) => {
                let query: String = query.chars().take(64).collect();
                engine.on_query_changed(&mut tree, &query);
            }
            Action::Submit => engine.on_submit(&mut tree),
            Action::Dismiss => engine.dismiss_suggestions(),
            Action::Pick(index) => {
                engine.on_suggestion_activated(&mut tree, usize::from(index));
            }
            Action::Reindex => {
                engine.reindex(&mut tree);
            }
        }
        // INVARIANT: the dropdown is visible exactly when it has entries
        assert_eq!(engine.dropdown().visible, !engine.dropdown().is_empty());
    }

    engine.clear(&mut tree);
    assert_eq!(count_markers(&tree, root), 0);

    // The pulse class is the only change a pick may leave behind.
    if engine.navigator().pulsing().is_none() {
        assert_eq!(tree.to_page(root), pristine);
    }
});
