// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: one read-only pass over the content tree.
//!
//! Two kinds of node become items:
//! - **Landmarks** (section titles) yield an item whose node is the enclosing
//!   section, whose text is the cleaned title, and which carries a suggestion
//!   label plus the section's id as anchor.
//! - **Bulk content** (cards, prose) yields an item with the node's full text
//!   and no suggestion.
//!
//! A landmark without a section, or whose section has no id, cannot be
//! navigated to and is skipped. That is logged, never an error.

use crate::config::CompiledConfig;
use crate::tree::ContentTree;
use crate::types::{Anchor, Index, SearchableItem};
use tracing::{debug, trace};

/// Build a fresh index generation from `tree`. Does not touch the tree.
pub fn collect(tree: &ContentTree, config: &CompiledConfig, generation: u64) -> Index {
    let mut items = Vec::new();

    for title in tree.select(&config.landmarks) {
        let Some(section) = tree.closest(title, &config.sections) else {
            debug!(node = %title, selector = %config.sections, "landmark outside any section, skipped");
            continue;
        };
        let Some(anchor) = tree
            .element(section)
            .and_then(|element| element.id.as_deref())
            .and_then(Anchor::new)
        else {
            debug!(node = %title, section = %section, "landmark section has no id, skipped");
            continue;
        };

        let label = config.clean_label(&tree.text_content(title));
        match SearchableItem::landmark(section, &label, anchor) {
            Some(item) => {
                trace!(label = %label, section = %section, "landmark indexed");
                items.push(item);
            }
            None => debug!(node = %title, "landmark with blank label, skipped"),
        }
    }

    let mut content = 0usize;
    for node in tree.select(&config.content) {
        if let Some(item) = SearchableItem::content(node, &tree.text_content(node)) {
            items.push(item);
            content += 1;
        }
    }

    let sections = tree.select(&config.sections);
    debug!(
        generation,
        landmarks = items.len() - content,
        content,
        sections = sections.len(),
        "index collected"
    );

    Index::new(generation, items, sections)
}
