// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an index generation.
//!
//! # Invariants
//!
//! - **SearchableItem**: `normalized_text` is never empty, and
//!   `suggestion_label.is_some() == target_anchor.is_some()`. The
//!   constructors are the only way to build an item, so both hold by
//!   construction.
//!
//! - **Index**: items are in document order, landmarks first. An index is
//!   replaced wholesale on every collect; nothing mutates one in place.

use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier used to locate a node for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(String);

impl Anchor {
    /// Returns `None` for an empty or whitespace-only id.
    pub fn new(id: &str) -> Option<Self> {
        let id = id.trim();
        (!id.is_empty()).then(|| Anchor(id.to_string()))
    }

    /// The bare element id, without the leading `#`.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One searchable node of the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableItem {
    node: NodeId,
    normalized_text: String,
    suggestion_label: Option<String>,
    target_anchor: Option<Anchor>,
}

impl SearchableItem {
    /// A landmark: searchable by its label and offered as a suggestion.
    ///
    /// Returns `None` if the label is blank.
    pub fn landmark(node: NodeId, label: &str, anchor: Anchor) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self {
            node,
            normalized_text: label.to_lowercase(),
            suggestion_label: Some(label.to_string()),
            target_anchor: Some(anchor),
        })
    }

    /// Bulk content: filtered and highlighted, never suggested.
    ///
    /// Returns `None` if the text has nothing but whitespace.
    pub fn content(node: NodeId, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            node,
            normalized_text: text.to_lowercase(),
            suggestion_label: None,
            target_anchor: None,
        })
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn suggestion_label(&self) -> Option<&str> {
        self.suggestion_label.as_deref()
    }

    pub fn target_anchor(&self) -> Option<&Anchor> {
        self.target_anchor.as_ref()
    }

    pub fn is_landmark(&self) -> bool {
        self.suggestion_label.is_some()
    }

    /// Substring test against an already-lowercased query.
    #[inline]
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.normalized_text.contains(normalized_query)
    }
}

/// One index generation: everything `collect` found in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    pub(crate) generation: u64,
    pub(crate) items: Vec<SearchableItem>,
    pub(crate) sections: Vec<NodeId>,
}

impl Index {
    pub fn new(generation: u64, items: Vec<SearchableItem>, sections: Vec<NodeId>) -> Self {
        Self {
            generation,
            items,
            sections,
        }
    }

    /// Monotonic counter; 0 is the empty index a new engine starts with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    /// Section containers subject to the ancestor-visibility rule.
    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &SearchableItem> {
        self.items.iter().filter(|item| item.is_landmark())
    }
}

/// Normalize a raw query the same way item text is normalized.
#[inline]
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}
