// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Live filtering: which items stay visible for a query, and making it so.
//!
//! Split into a pure decision and a mutation:
//!
//! - [`plan`] reads the index (and the tree, for ancestry) and returns a
//!   [`FilterPlan`]: one [`Visibility`] per item and per section. Testable
//!   without ever touching a tree.
//! - [`apply_plan`] clears all markers under every item, sets displays, then
//!   highlights the visible items.
//!
//! # Rules
//!
//! - Empty query: everything shown, no markers, displays restored.
//! - Otherwise an item is shown iff its normalized text contains the
//!   lowercased query.
//! - A section is shown iff at least one item inside it (itself included) is
//!   shown, so a section whose title did not match survives as long as some
//!   of its content did. Sections with no items at all follow
//!   [`EmptySectionPolicy`].
//!
//! Displays are restored from a [`DisplaySnapshot`] taken the first time the
//! engine touches a node, because a node's natural display (block, flex,
//! inline...) is not known up front.

use crate::config::EmptySectionPolicy;
use crate::highlight::{self, Matcher};
use crate::tree::{ContentTree, Display, NodeId};
use crate::types::{normalize_query, Index};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    #[inline]
    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

/// The pure outcome of filtering: what should be visible, nothing applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPlan {
    raw_query: String,
    query: String,
    items: Vec<Visibility>,
    sections: Vec<(NodeId, Visibility)>,
}

impl FilterPlan {
    /// The normalized (lowercased) query this plan was made for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query as typed; highlighting is compiled from this.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// One decision per index item, in index order.
    pub fn items(&self) -> &[Visibility] {
        &self.items
    }

    pub fn sections(&self) -> &[(NodeId, Visibility)] {
        &self.sections
    }
}

/// Decide visibility for every item and section. Reads only.
pub fn plan(tree: &ContentTree, index: &Index, raw_query: &str, policy: EmptySectionPolicy) -> FilterPlan {
    let query = normalize_query(raw_query);

    let items: Vec<Visibility> = index
        .items()
        .iter()
        .map(|item| {
            if query.is_empty() || item.matches(&query) {
                Visibility::Shown
            } else {
                Visibility::Hidden
            }
        })
        .collect();

    let sections = index
        .sections()
        .iter()
        .map(|&section| {
            if query.is_empty() {
                return (section, Visibility::Shown);
            }
            let mut contains_items = false;
            let mut any_shown = false;
            for (item, visibility) in index.items().iter().zip(&items) {
                if tree.is_ancestor_or_self(section, item.node()) {
                    contains_items = true;
                    if visibility.is_shown() {
                        any_shown = true;
                        break;
                    }
                }
            }
            let visibility = match (any_shown, contains_items, policy) {
                (true, _, _) => Visibility::Shown,
                (false, false, EmptySectionPolicy::Show) => Visibility::Shown,
                _ => Visibility::Hidden,
            };
            (section, visibility)
        })
        .collect();

    FilterPlan {
        raw_query: raw_query.to_string(),
        query,
        items,
        sections,
    }
}

/// Original display of every node the engine has evaluated.
///
/// The first observation wins; later calls never overwrite it, because by
/// then the engine itself may have changed the node's display.
#[derive(Debug, Clone, Default)]
pub struct DisplaySnapshot {
    original: HashMap<NodeId, Display>,
}

impl DisplaySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node's original display, capturing it now if this is the first
    /// observation. `None` if the node is missing or not an element.
    pub fn capture(&mut self, tree: &ContentTree, node: NodeId) -> Option<Display> {
        if let Some(display) = self.original.get(&node) {
            return Some(display.clone());
        }
        let display = tree.display(node)?.clone();
        self.original.insert(node, display.clone());
        Some(display)
    }

    pub fn original(&self, node: NodeId) -> Option<&Display> {
        self.original.get(&node)
    }

    /// Forget nodes that no longer exist.
    pub fn retain_live(&mut self, tree: &ContentTree) {
        self.original.retain(|node, _| tree.contains(*node));
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Display to use when showing a node whose original display was `original`.
///
/// A node that started out hidden is shown as a block.
pub fn shown_display(original: &Display) -> Display {
    if original.is_hidden() {
        Display::Block
    } else {
        original.clone()
    }
}

/// Summary of one applied filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub generation: u64,
    pub query: String,
    pub visible: usize,
    pub hidden: usize,
    pub sections_shown: usize,
    pub sections_hidden: usize,
    /// Highlight markers present after the pass.
    pub markers: usize,
    /// Items whose node disappeared from the tree since indexing.
    pub stale: usize,
}

/// Apply a plan to the tree.
///
/// Item nodes that no longer exist are skipped without affecting the rest.
pub fn apply_plan(
    tree: &mut ContentTree,
    index: &Index,
    plan: &FilterPlan,
    snapshot: &mut DisplaySnapshot,
) -> FilterOutcome {
    let mut outcome = FilterOutcome {
        generation: index.generation(),
        query: plan.query.clone(),
        ..FilterOutcome::default()
    };

    for item in index.items() {
        highlight::remove_all(tree, item.node());
    }

    for (item, visibility) in index.items().iter().zip(&plan.items) {
        let node = item.node();
        let Some(original) = snapshot.capture(tree, node) else {
            trace!(node = %node, "stale item skipped");
            outcome.stale += 1;
            continue;
        };
        if visibility.is_shown() {
            tree.set_display(node, shown_display(&original));
            outcome.visible += 1;
        } else {
            tree.set_display(node, Display::None);
            outcome.hidden += 1;
        }
    }

    for &(section, visibility) in &plan.sections {
        let Some(original) = snapshot.capture(tree, section) else {
            continue;
        };
        if visibility.is_shown() {
            tree.set_display(section, shown_display(&original));
            outcome.sections_shown += 1;
        } else {
            tree.set_display(section, Display::None);
            outcome.sections_hidden += 1;
        }
    }

    let matcher = Matcher::new(&plan.raw_query);
    if !matcher.is_empty() {
        for (item, visibility) in index.items().iter().zip(&plan.items) {
            if visibility.is_shown() {
                outcome.markers += highlight::apply(tree, item.node(), &matcher);
            }
        }
    }

    debug!(
        generation = outcome.generation,
        query = %outcome.query,
        visible = outcome.visible,
        hidden = outcome.hidden,
        sections_hidden = outcome.sections_hidden,
        markers = outcome.markers,
        "filter applied"
    );
    outcome
}

/// Plan and apply in one step.
pub fn filter(
    tree: &mut ContentTree,
    index: &Index,
    query: &str,
    policy: EmptySectionPolicy,
    snapshot: &mut DisplaySnapshot,
) -> FilterOutcome {
    let plan = plan(tree, index, query, policy);
    apply_plan(tree, index, &plan, snapshot)
}
