// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical page fixtures to avoid duplication.

#![doc(hidden)]

use crate::tree::{PageElement, PageNode};

/// A section container with a `main-title` landmark and arbitrary content.
pub fn make_section(id: &str, class: &str, title: &str, content: Vec<PageNode>) -> PageElement {
    let mut section = PageNode::element("div")
        .id(id)
        .class(class)
        .child(PageNode::element("h1").class("main-title").text(title));
    section.children.extend(content);
    section
}

/// A bulk content block with the given class and text.
pub fn make_block(class: &str, text: &str) -> PageNode {
    PageNode::element("div").class(class).text(text).into()
}

/// A project card: title, description and a details link.
pub fn make_project_card(title: &str, description: &str) -> PageNode {
    PageNode::element("div")
        .class("project-card")
        .display(crate::tree::Display::Flex)
        .child(PageNode::element("h3").text(title))
        .child(PageNode::element("p").text(description))
        .child(PageNode::element("a").text("View Details"))
        .into()
}

/// The portfolio page: Portfolio, Experience and Skills sections, plus an
/// empty project grid that loaders fill in later.
pub fn portfolio_page() -> PageNode {
    PageNode::element("main")
        .child(make_section(
            "portfolio",
            "portfolio-container",
            "# Portfolio",
            vec![make_block("about-me", "Software developer who likes tidy systems.")],
        ))
        .child(make_section(
            "experience",
            "experience-container",
            "# Experience",
            vec![
                make_block("experience-section", "Berlin-based engineer at a logistics company"),
                make_block("experience-section", "Intern, data platform team (2019)"),
            ],
        ))
        .child(make_section(
            "skills",
            "skills-container",
            "# Skills",
            vec![PageNode::element("div")
                .class("skill-item")
                .display(crate::tree::Display::Flex)
                .text("Rust")
                .into()],
        ))
        .child(make_section(
            "projects",
            "projects-container",
            "# Projects",
            vec![PageNode::element("div").class("project-grid").into()],
        ))
        .into()
}

/// A synthetic page with `sections` sections of `cards` project cards each.
pub fn synthetic_page(sections: usize, cards: usize) -> PageNode {
    const WORDS: [&str; 12] = [
        "rust", "search", "index", "berlin", "engine", "filter", "portfolio", "cloud", "data",
        "pipeline", "graph", "render",
    ];
    let mut main = PageNode::element("main");
    for s in 0..sections {
        let content = (0..cards)
            .map(|c| {
                let description: Vec<&str> = (0..8).map(|w| WORDS[(s * 7 + c * 3 + w) % WORDS.len()]).collect();
                make_project_card(&format!("Project {}-{}", s, c), &description.join(" "))
            })
            .collect();
        main = main.child(make_section(
            &format!("section-{}", s),
            "projects-container",
            &format!("# Section {}", s),
            content,
        ));
    }
    main.into()
}
