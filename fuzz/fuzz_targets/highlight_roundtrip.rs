// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for highlight reversibility.
//!
//! Arbitrary text split across arbitrary nodes, arbitrary query. Applying and
//! then removing markers must leave the tree exactly as it was, and a second
//! apply must never nest markers.

#![no_main]

use arbitrary::Arbitrary;
use glint::highlight::{self, Matcher};
use glint::{ContentTree, Element};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    texts: Vec<(String, bool)>,
    query: String,
}

fuzz_target!(|input: Input| {
    if input.texts.len() > 64 || input.query.len() > 256 {
        return;
    }

    let mut tree = ContentTree::new();
    let root = tree.root();
    let Some(p) = tree.append_element(root, Element::new("p")) else {
        return;
    };
    for (text, wrapped) in &input.texts {
        if *wrapped {
            if let Some(em) = tree.append_element(p, Element::new("em")) {
                tree.append_text(em, text);
            }
        } else {
            tree.append_text(p, text);
        }
    }

    let before = tree.to_page(root);
    let text_before = tree.text_content(root);
    let matcher = Matcher::new(&input.query);

    // INVARIANT 1: highlighting never changes the text
    let added = highlight::apply(&mut tree, root, &matcher);
    assert_eq!(tree.text_content(root), text_before);

    // INVARIANT 2: no nesting, no double highlighting
    assert_eq!(highlight::apply(&mut tree, root, &matcher), 0);

    // INVARIANT 3: removal is the exact inverse
    assert_eq!(highlight::remove_all(&mut tree, root), added);
    assert_eq!(tree.to_page(root), before);
});
