// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON page descriptions.
//!
//! A page is a nested list of elements and text, the shape a renderer or an
//! asynchronous item loader produces before the result is inserted into the
//! content tree:
//!
//! ```json
//! { "tag": "section", "id": "skills", "class": "skills-container",
//!   "children": [ { "tag": "h1", "class": "main-title", "children": ["# Skills"] } ] }
//! ```

use super::{Display, Element};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageNode {
    /// Plain text.
    Text(String),
    // Tried before `Mark`: `tag` is required, so an object with a stray
    // `mark` key still keeps its tag, attributes and children.
    Element(PageElement),
    /// A highlight marker.
    Mark { mark: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class list, as in HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Explicit display; omitted means the tag's natural display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageNode>,
}

impl PageNode {
    pub fn text(value: &str) -> Self {
        PageNode::Text(value.to_string())
    }

    pub fn element(tag: &str) -> PageElement {
        PageElement {
            tag: tag.to_string(),
            id: None,
            class: None,
            display: None,
            children: Vec::new(),
        }
    }
}

impl PageElement {
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn child(mut self, child: impl Into<PageNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, value: &str) -> Self {
        self.child(PageNode::text(value))
    }

    pub(super) fn to_element(&self) -> Element {
        let mut element = Element::new(&self.tag);
        element.id = self.id.clone();
        if let Some(class) = &self.class {
            element = element.with_class(class);
        }
        if let Some(display) = &self.display {
            element.display = display.clone();
        }
        element
    }

    pub(super) fn from_element(element: &Element, children: Vec<PageNode>) -> Self {
        PageElement {
            tag: element.tag.clone(),
            id: element.id.clone(),
            class: (!element.classes.is_empty()).then(|| element.classes.join(" ")),
            display: Some(element.display.clone()),
            children,
        }
    }
}

impl From<PageElement> for PageNode {
    fn from(element: PageElement) -> Self {
        PageNode::Element(element)
    }
}

impl From<&str> for PageNode {
    fn from(value: &str) -> Self {
        PageNode::text(value)
    }
}
