// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reversible in-place highlighting.
//!
//! Highlighting is a two-phase edit:
//!
//! 1. **Plan** (pure): walk the subtree, and for every text node compute the
//!    non-overlapping match spans with [`Matcher::find_spans`].
//! 2. **Edit**: replace each affected text node with its fragments in a single
//!    structural edit: plain text before, a marker per match, plain text after.
//!    Empty fragments are never created.
//!
//! All fragments cut from one text node share a `SplitId`. [`remove_all`]
//! collapses each run of same-id siblings back into one plain text node, so
//! `remove_all` after `apply` restores the exact text *and* the exact node
//! structure, for every query.
//!
//! # Query safety
//!
//! Queries are escaped before they are compiled, so `(test)` or `[a-z]` match
//! literally and no query can produce a pattern compilation fault. Should the
//! regex engine still refuse a pattern (size limits on absurdly long input),
//! matching falls back to a char-wise literal comparison. Either way the
//! caller never sees an error.

use crate::tree::{ContentTree, Highlight, NodeId, NodeKind, Text};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::ops::Range;
use tracing::warn;

/// A compiled, case-insensitive, literal query.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Empty query: matches nothing, highlights nothing.
    Empty,
    Pattern(Regex),
    /// Lowercased needle compared char by char.
    Literal(String),
}

impl Matcher {
    /// Compile the query as typed.
    ///
    /// Queries holding a character whose lowercase form is more than one
    /// char (`İ` becomes `i̇`) use the literal comparison, which folds the
    /// same way visibility does; simple case folding in the regex engine
    /// would not match them.
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Matcher::Empty;
        }
        if query.chars().any(|c| c.to_lowercase().nth(1).is_some()) {
            return Matcher::literal(query);
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Matcher::Pattern(pattern),
            Err(err) => {
                warn!(%err, query_len = query.len(), "query pattern rejected, using literal comparison");
                Matcher::literal(query)
            }
        }
    }

    /// Literal matcher that bypasses the regex engine.
    pub fn literal(query: &str) -> Self {
        if query.is_empty() {
            Matcher::Empty
        } else {
            Matcher::Literal(query.to_lowercase())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Matcher::Empty)
    }

    /// Byte ranges of leftmost, non-overlapping, non-empty matches in `text`.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Matcher::Empty => Vec::new(),
            Matcher::Pattern(pattern) => pattern
                .find_iter(text)
                .map(|m| m.range())
                .filter(|range| !range.is_empty())
                .collect(),
            Matcher::Literal(needle) => literal_spans(text, needle),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.find_spans(text).is_empty()
    }
}

fn literal_spans(text: &str, needle: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match literal_match_len(&text[start..], needle) {
            Some(len) => {
                spans.push(start..start + len);
                start += len;
            }
            None => start += text[start..].chars().next().map_or(1, char::len_utf8),
        }
    }
    spans
}

/// Length in bytes of the prefix of `haystack` whose lowercase form is `needle`.
fn literal_match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut expected = needle.chars();
    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
        if expected.as_str().is_empty() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

/// Wrap every match under `node` in a highlight marker.
///
/// Text already inside a marker is never touched, so repeated calls do not
/// nest or double-highlight. A missing node is a no-op. Returns the number of
/// markers inserted.
pub fn apply(tree: &mut ContentTree, node: NodeId, matcher: &Matcher) -> usize {
    if matcher.is_empty() || !tree.contains(node) {
        return 0;
    }

    // Phase 1: spans for every plain text node, computed before any edit.
    let plan: Vec<(NodeId, Vec<Range<usize>>)> = tree
        .descendants(node)
        .into_iter()
        .filter_map(|id| match tree.get(id)?.kind() {
            NodeKind::Text(text) => {
                let spans = matcher.find_spans(&text.value);
                (!spans.is_empty()).then_some((id, spans))
            }
            _ => None,
        })
        .collect();

    // Phase 2: one structural edit per affected text node.
    let mut inserted = 0;
    for (id, spans) in plan {
        if split_text_node(tree, id, &spans) {
            inserted += spans.len();
        }
    }
    inserted
}

fn split_text_node(tree: &mut ContentTree, id: NodeId, spans: &[Range<usize>]) -> bool {
    let Some((value, existing)) = tree.get(id).and_then(|node| match node.kind() {
        NodeKind::Text(text) => Some((text.value.clone(), text.split)),
        _ => None,
    }) else {
        return false;
    };
    let Some(parent) = tree.parent(id) else {
        return false;
    };
    let Some(position) = tree.children(parent).iter().position(|child| *child == id) else {
        return false;
    };

    // A fragment left over from an earlier pass keeps its group, so one
    // removal still re-joins the whole original node.
    let split = existing.unwrap_or_else(|| tree.next_split_id());
    let fragment = |value: &str| {
        NodeKind::Text(Text {
            value: value.to_string(),
            split: Some(split),
        })
    };

    let mut pieces = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last = 0;
    for span in spans {
        if span.start > last {
            pieces.push(fragment(&value[last..span.start]));
        }
        pieces.push(NodeKind::Highlight(Highlight {
            value: value[span.clone()].to_string(),
            split,
        }));
        last = span.end;
    }
    if last < value.len() {
        pieces.push(fragment(&value[last..]));
    }

    tree.replace_leaves(parent, position..position + 1, pieces)
        .is_some()
}

/// Remove every highlight marker under `node`, restoring the original text
/// nodes. Safe to call when nothing is highlighted. Returns the number of
/// markers removed.
pub fn remove_all(tree: &mut ContentTree, node: NodeId) -> usize {
    let parents: Vec<NodeId> = tree
        .descendants(node)
        .into_iter()
        .filter(|id| {
            tree.children(*id)
                .iter()
                .any(|child| tree.get(*child).is_some_and(|c| c.kind().split().is_some()))
        })
        .collect();

    let mut removed = 0;
    for parent in parents {
        // Back to front so earlier ranges stay valid after each splice.
        for run in fragment_runs(tree, parent).into_iter().rev() {
            let restored = NodeKind::Text(Text {
                value: run.value,
                split: None,
            });
            if tree
                .replace_leaves(parent, run.range, vec![restored])
                .is_some()
            {
                removed += run.markers;
            }
        }
    }
    removed
}

struct FragmentRun {
    range: Range<usize>,
    value: String,
    markers: usize,
}

/// Maximal runs of consecutive children of `parent` sharing one `SplitId`.
fn fragment_runs(tree: &ContentTree, parent: NodeId) -> Vec<FragmentRun> {
    let mut runs: Vec<FragmentRun> = Vec::new();
    let mut current = None;

    for (index, child) in tree.children(parent).iter().enumerate() {
        let Some(kind) = tree.get(*child).map(|node| node.kind()) else {
            current = None;
            continue;
        };
        let Some(split) = kind.split() else {
            current = None;
            continue;
        };
        let text = kind.own_text().unwrap_or_default();
        let is_marker = matches!(kind, NodeKind::Highlight(_));

        match runs.last_mut() {
            Some(run) if current == Some(split) && run.range.end == index => {
                run.range.end = index + 1;
                run.value.push_str(text);
                run.markers += usize::from(is_marker);
            }
            _ => runs.push(FragmentRun {
                range: index..index + 1,
                value: text.to_string(),
                markers: usize::from(is_marker),
            }),
        }
        current = Some(split);
    }
    runs
}

/// Number of highlight markers under `node`.
pub fn count_markers(tree: &ContentTree, node: NodeId) -> usize {
    tree.descendants(node)
        .into_iter()
        .filter(|id| matches!(tree.get(*id).map(|n| n.kind()), Some(NodeKind::Highlight(_))))
        .count()
}

/// A piece of display text, marked or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

/// Text under `node` as segments, with each highlight marker as a matched one.
///
/// Adjacent plain text is merged, so the result reads the same regardless of
/// how the text is split across nodes.
pub fn marked_text(tree: &ContentTree, node: NodeId) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for id in tree.descendants(node) {
        let (text, matched) = match tree.get(id).map(|n| n.kind()) {
            Some(NodeKind::Text(text)) => (text.value.as_str(), false),
            Some(NodeKind::Highlight(mark)) => (mark.value.as_str(), true),
            _ => continue,
        };
        if text.is_empty() {
            continue;
        }
        match segments.last_mut() {
            Some(last) if !last.matched && !matched => last.text.push_str(text),
            _ => segments.push(Segment {
                text: text.to_string(),
                matched,
            }),
        }
    }
    segments
}

/// Split `text` into marked and unmarked segments without touching any tree.
pub fn mark_segments(text: &str, matcher: &Matcher) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for span in matcher.find_spans(text) {
        if span.start > last {
            segments.push(Segment {
                text: text[last..span.start].to_string(),
                matched: false,
            });
        }
        segments.push(Segment {
            text: text[span.clone()].to_string(),
            matched: true,
        });
        last = span.end;
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment {
            text: text[last..].to_string(),
            matched: false,
        });
    }
    segments
}
