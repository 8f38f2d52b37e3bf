// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The content tree: an arena of elements, text and highlight markers.
//!
//! The search engine never owns the tree. Callers build it (from a page
//! description or by hand), hand it to the engine by reference, and keep it
//! alive for as long as an index generation refers to it. The engine stores
//! only `NodeId`s.
//!
//! # Invariants
//!
//! - **Handles are never reused.** Removing a node frees its slot forever, so
//!   a stale `NodeId` held by an old index generation resolves to `None`
//!   instead of silently pointing at a different node.
//! - **Markers are leaves.** A `Highlight` node carries its matched text
//!   directly and never has children, which makes nested highlighting
//!   structurally impossible.
//! - **Split provenance.** Every fragment produced from one original text node
//!   shares a `SplitId`. Removal re-joins exactly one run of fragments per
//!   `SplitId`, so the original node structure comes back, not merely the
//!   original text. Markers that arrive with a page description share one
//!   `SplitId` with the text leaves around them, so removing them leaves a
//!   single text node.

mod page;
mod selector;

pub use page::{PageElement, PageNode};
pub use selector::Selector;

use crate::error::{GlintError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::Path;

// =============================================================================
// HANDLES
// =============================================================================

/// Handle to a node in a [`ContentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Convert to usize for arena indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Provenance tag shared by the fragments of one split text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SplitId(u32);

// =============================================================================
// DISPLAY
// =============================================================================

/// CSS-style display state of an element.
///
/// `None` is the only hidden state. Everything else counts as visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Display {
    Block,
    Flex,
    Grid,
    Inline,
    InlineBlock,
    None,
    Other(String),
}

impl Display {
    pub fn as_str(&self) -> &str {
        match self {
            Display::Block => "block",
            Display::Flex => "flex",
            Display::Grid => "grid",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::None => "none",
            Display::Other(value) => value,
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Display::None)
    }

    /// Natural display of a freshly created element with this tag.
    pub fn default_for_tag(tag: &str) -> Display {
        match tag.to_ascii_lowercase().as_str() {
            "a" | "b" | "code" | "em" | "i" | "label" | "small" | "span" | "strong" => {
                Display::Inline
            }
            "img" | "button" => Display::InlineBlock,
            _ => Display::Block,
        }
    }
}

impl From<&str> for Display {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" => Display::Block,
            "flex" => Display::Flex,
            "grid" => Display::Grid,
            "inline" => Display::Inline,
            "inline-block" => Display::InlineBlock,
            "none" => Display::None,
            other => Display::Other(other.to_string()),
        }
    }
}

impl From<String> for Display {
    fn from(value: String) -> Self {
        Display::from(value.as_str())
    }
}

impl From<Display> for String {
    fn from(value: Display) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub display: Display,
}

impl Element {
    /// Element with the natural display for its tag and no id or classes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            display: Display::default_for_tag(tag),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    /// Set while this node is a fragment of a highlighted text node.
    pub split: Option<SplitId>,
}

/// Highlight marker wrapping one matched substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub value: String,
    pub split: SplitId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(Text),
    Highlight(Highlight),
}

impl NodeKind {
    /// Text carried directly by this node (none for elements).
    pub fn own_text(&self) -> Option<&str> {
        match self {
            NodeKind::Element(_) => None,
            NodeKind::Text(text) => Some(&text.value),
            NodeKind::Highlight(mark) => Some(&mark.value),
        }
    }

    /// Split group this node belongs to, if it is a highlight fragment.
    pub fn split(&self) -> Option<SplitId> {
        match self {
            NodeKind::Element(_) => None,
            NodeKind::Text(text) => text.split,
            NodeKind::Highlight(mark) => Some(mark.split),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }
}

// =============================================================================
// TREE
// =============================================================================

/// Arena-backed content tree rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct ContentTree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    next_split: u32,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(Element::new("body")),
        };
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
            next_split: 0,
        }
    }

    /// Build a tree whose body contains `page`.
    pub fn from_page(page: &PageNode) -> Self {
        let mut tree = Self::new();
        let root = tree.root();
        tree.append_page(root, page);
        tree
    }

    /// Parse a JSON page description into a tree.
    pub fn from_json(json: &str) -> Result<Self> {
        let page: PageNode = serde_json::from_str(json)?;
        Ok(Self::from_page(&page))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GlintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_usize()).and_then(Option::as_ref)
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_usize()).and_then(Option::as_mut)
    }

    /// Whether `id` still refers to a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.element(parent)?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        }));
        self.get_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Append an element as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is gone or is not an element.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        self.push(parent, NodeKind::Element(element))
    }

    pub fn append_text(&mut self, parent: NodeId, value: &str) -> Option<NodeId> {
        self.push(
            parent,
            NodeKind::Text(Text {
                value: value.to_string(),
                split: None,
            }),
        )
    }

    /// Append a page description under `parent`, returning the new subtree root.
    pub fn append_page(&mut self, parent: NodeId, page: &PageNode) -> Option<NodeId> {
        match page {
            PageNode::Text(value) => self.append_text(parent, value),
            PageNode::Mark { mark } => {
                let split = self.next_split_id();
                self.push(
                    parent,
                    NodeKind::Highlight(Highlight {
                        value: mark.clone(),
                        split,
                    }),
                )
            }
            PageNode::Element(spec) => {
                let id = self.append_element(parent, spec.to_element())?;
                for child in &spec.children {
                    self.append_page(id, child);
                }
                self.group_loaded_markers(id);
                Some(id)
            }
        }
    }

    /// Put every run of adjacent leaves under `parent` that holds a marker
    /// into one split group.
    fn group_loaded_markers(&mut self, parent: NodeId) {
        let children = self.children(parent).to_vec();
        let mut run: Vec<NodeId> = Vec::new();
        for child in children.into_iter().map(Some).chain(std::iter::once(None)) {
            let leaf = child.filter(|id| {
                matches!(
                    self.get(*id).map(Node::kind),
                    Some(NodeKind::Text(_) | NodeKind::Highlight(_))
                )
            });
            match leaf {
                Some(id) => run.push(id),
                None => {
                    self.share_split(&run);
                    run.clear();
                }
            }
        }
    }

    fn share_split(&mut self, run: &[NodeId]) {
        let has_marker = run
            .iter()
            .any(|id| matches!(self.get(*id).map(Node::kind), Some(NodeKind::Highlight(_))));
        if !has_marker {
            return;
        }
        let split = self.next_split_id();
        for id in run {
            match self.get_mut(*id).map(|node| &mut node.kind) {
                Some(NodeKind::Text(text)) => text.split = Some(split),
                Some(NodeKind::Highlight(mark)) => mark.split = split,
                _ => {}
            }
        }
    }

    /// Detach `id` from its parent and free its whole subtree.
    ///
    /// The root cannot be removed. Returns `false` if nothing was removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.parent(id).and_then(|p| self.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        self.free_subtree(id);
        true
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.as_usize()).and_then(Option::take) {
                stack.extend(node.children);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// All nodes under `id` in document order, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Concatenated text of every text and marker node under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.get(node).and_then(|n| n.kind.own_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// First element in document order carrying this id.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root).into_iter().find(|node| {
            self.element(*node)
                .is_some_and(|element| element.id.as_deref() == Some(id))
        })
    }

    /// Every element under the root matching `selector`, document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect()
    }

    /// Nearest ancestor-or-self of `id` matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if selector.matches(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    // -------------------------------------------------------------------------
    // Presentation state
    // -------------------------------------------------------------------------

    pub fn display(&self, id: NodeId) -> Option<&Display> {
        self.element(id).map(|element| &element.display)
    }

    /// Set an element's display. Returns `false` for missing or non-element nodes.
    pub fn set_display(&mut self, id: NodeId, display: Display) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.display = display;
                true
            }
            None => false,
        }
    }

    /// Whether `id` and all of its ancestors are displayed.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.display(node).is_some_and(Display::is_hidden) {
                return false;
            }
            current = self.parent(node);
        }
        self.contains(id)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                if !element.has_class(class) {
                    element.classes.push(class.to_string());
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                let before = element.classes.len();
                element.classes.retain(|c| c != class);
                element.classes.len() != before
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Structural edits used by the highlighter
    // -------------------------------------------------------------------------

    pub(crate) fn next_split_id(&mut self) -> SplitId {
        let id = SplitId(self.next_split);
        self.next_split = self.next_split.wrapping_add(1);
        id
    }

    /// Replace the leaf children at `range` of `parent` with fresh leaves.
    ///
    /// This is the only structural edit the highlighter performs: one call per
    /// affected text node (apply) or per fragment run (removal). Returns the
    /// ids of the inserted nodes, or `None` if the edit does not apply (parent
    /// missing, range out of bounds, or a replaced child is not a leaf).
    pub(crate) fn replace_leaves(
        &mut self,
        parent: NodeId,
        range: Range<usize>,
        replacement: Vec<NodeKind>,
    ) -> Option<Vec<NodeId>> {
        let children = self.children(parent);
        if range.end > children.len() || range.start > range.end {
            return None;
        }
        let old: Vec<NodeId> = children[range.clone()].to_vec();
        if old.iter().any(|child| !self.children(*child).is_empty()) {
            return None;
        }
        if replacement
            .iter()
            .any(|kind| matches!(kind, NodeKind::Element(_)))
        {
            return None;
        }

        let mut inserted = Vec::with_capacity(replacement.len());
        for kind in replacement {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(Some(Node {
                parent: Some(parent),
                children: Vec::new(),
                kind,
            }));
            inserted.push(id);
        }
        for child in old {
            self.nodes[child.as_usize()] = None;
        }
        self.get_mut(parent)?
            .children
            .splice(range, inserted.iter().copied());
        Some(inserted)
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Structural snapshot of the subtree at `id`.
    ///
    /// Two snapshots compare equal only if both the text and the node
    /// structure (including how text is split across nodes) are identical.
    pub fn to_page(&self, id: NodeId) -> Option<PageNode> {
        let node = self.get(id)?;
        Some(match &node.kind {
            NodeKind::Text(text) => PageNode::Text(text.value.clone()),
            NodeKind::Highlight(mark) => PageNode::Mark {
                mark: mark.value.clone(),
            },
            NodeKind::Element(element) => PageNode::Element(PageElement::from_element(
                element,
                node.children
                    .iter()
                    .filter_map(|child| self.to_page(*child))
                    .collect(),
            )),
        })
    }
}
