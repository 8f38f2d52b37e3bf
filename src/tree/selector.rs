// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A small CSS selector subset.
//!
//! Enough to name landmarks, sections and bulk content the way a stylesheet
//! would: comma-separated alternatives, each a chain of compound selectors
//! joined by the descendant combinator. A compound is any of `tag`, `*`,
//! `.class` and `#id`, e.g. `.skills-container h1.main-title`.
//!
//! Child (`>`), sibling and attribute selectors are rejected at parse time.

use super::{ContentTree, NodeId};
use crate::error::{GlintError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Vec<Compound>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for alternative in source.split(',') {
            let compounds = alternative
                .split_whitespace()
                .map(|part| parse_compound(source, part))
                .collect::<Result<Vec<_>>>()?;
            if compounds.is_empty() {
                return Err(GlintError::selector(source, "empty alternative"));
            }
            alternatives.push(compounds);
        }
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the element at `node` matches any alternative.
    pub fn matches(&self, tree: &ContentTree, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| matches_chain(tree, node, chain))
    }
}

impl FromStr for Selector {
    type Err = GlintError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(source: &str, part: &str) -> Result<Compound> {
    let mut compound = Compound::default();
    let mut rest = part;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else {
        let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if end > 0 {
            compound.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
        }
    }

    while let Some(sigil) = rest.chars().next() {
        let body = &rest[sigil.len_utf8()..];
        let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
        if end == 0 {
            return Err(GlintError::selector(
                source,
                format!("expected a name after `{}` in `{}`", sigil, part),
            ));
        }
        let name = body[..end].to_string();
        match sigil {
            '.' => compound.classes.push(name),
            '#' => {
                if compound.id.replace(name).is_some() {
                    return Err(GlintError::selector(source, format!("two ids in `{}`", part)));
                }
            }
            other => {
                return Err(GlintError::selector(
                    source,
                    format!("unsupported `{}` in `{}`", other, part),
                ))
            }
        }
        rest = &body[end..];
    }

    Ok(compound)
}

impl Compound {
    fn matches(&self, tree: &ContentTree, node: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

/// Right-to-left match: the last compound must match `node`, each earlier one
/// some strictly higher ancestor. Taking the nearest matching ancestor for each
/// step is sufficient because the only combinator is "descendant".
fn matches_chain(tree: &ContentTree, node: NodeId, chain: &[Compound]) -> bool {
    let Some((last, rest)) = chain.split_last() else {
        return false;
    };
    if !last.matches(tree, node) {
        return false;
    }
    let mut current = tree.parent(node);
    for compound in rest.iter().rev() {
        loop {
            let Some(ancestor) = current else {
                return false;
            };
            current = tree.parent(ancestor);
            if compound.matches(tree, ancestor) {
                break;
            }
        }
    }
    true
}
