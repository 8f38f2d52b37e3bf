//! Shared test utilities and fixtures.

#![allow(dead_code)]

use glint::{ContentTree, EngineConfig, NodeId, PageNode, SearchEngine};

// Re-export canonical fixtures from glint::testing
pub use glint::testing::{make_block, make_project_card, make_section, portfolio_page, synthetic_page};

// ============================================================================
// PAGES
// ============================================================================

/// Three titled sections and one bulk block, none of the titles but
/// "Experience" containing an `e`.
pub fn three_landmarks() -> PageNode {
    PageNode::element("main")
        .child(make_section("portfolio", "portfolio-container", "# Portfolio", vec![]))
        .child(make_section(
            "experience",
            "experience-container",
            "# Experience",
            vec![make_block("experience-section", "Berlin-based engineer")],
        ))
        .child(make_section("skills", "skills-container", "# Skills", vec![]))
        .into()
}

// ============================================================================
// ENGINE HELPERS
// ============================================================================

/// A tree for `page` and an engine already indexed over it.
pub fn indexed(page: &PageNode) -> (ContentTree, SearchEngine) {
    let mut tree = ContentTree::from_page(page);
    let mut engine = SearchEngine::new(&EngineConfig::default()).expect("default config compiles");
    engine.reindex(&mut tree);
    (tree, engine)
}

pub fn section(tree: &ContentTree, id: &str) -> NodeId {
    tree.find_by_id(id)
        .unwrap_or_else(|| panic!("no element with id {:?}", id))
}

/// Labels currently in the dropdown, in order.
pub fn suggestion_labels(engine: &SearchEngine) -> Vec<String> {
    engine
        .dropdown()
        .suggestions
        .iter()
        .map(|s| s.label.clone())
        .collect()
}

/// Whole-tree structural snapshot.
pub fn snapshot(tree: &ContentTree) -> PageNode {
    tree.to_page(tree.root()).expect("root always exists")
}
