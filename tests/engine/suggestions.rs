//! Dropdown contents: which landmarks are offered, and in what order.

use crate::common::{indexed, make_section, portfolio_page, section, suggestion_labels};
use glint::suggest;
use glint::PageNode;

fn duplicate_titles() -> PageNode {
    PageNode::element("main")
        .child(make_section("skills-2023", "skills-container", "# Skills", vec![]))
        .child(make_section("skills-2024", "skills-container", "## Skills ##", vec![]))
        .child(make_section("projects", "projects-container", "# Side Projects", vec![]))
        .into()
}

#[test]
fn test_duplicate_labels_collapse_to_first() {
    let (mut tree, mut engine) = indexed(&duplicate_titles());
    engine.on_query_changed(&mut tree, "s");

    assert_eq!(suggestion_labels(&engine), vec!["Skills", "Side Projects"]);
    assert_eq!(engine.dropdown().suggestions[0].anchor.id(), "skills-2023");
}

#[test]
fn test_vanished_anchor_yields_to_later_duplicate() {
    let (mut tree, engine) = indexed(&duplicate_titles());
    let first = section(&tree, "skills-2023");
    assert!(tree.remove(first));

    let suggestions = suggest::build(&tree, engine.index(), "skill");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].anchor.id(), "skills-2024");
}

#[test]
fn test_suggestions_follow_page_order() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "o");
    assert_eq!(suggestion_labels(&engine), vec!["Portfolio", "Projects"]);
}

#[test]
fn test_content_never_suggested() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "logistics");
    assert!(engine.dropdown().suggestions.is_empty());
    assert_eq!(engine.last_outcome().unwrap().visible, 1);
}

#[test]
fn test_suggestion_segments_mark_query() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "SKI");
    let suggestion = &engine.dropdown().suggestions[0];
    assert_eq!(suggestion.label, "Skills");
    assert!(suggestion.segments[0].matched);
    assert_eq!(suggestion.segments[0].text, "Ski");
}

#[test]
fn test_dropdown_visibility_tracks_results() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "exp");
    assert!(engine.dropdown().visible);
    engine.on_query_changed(&mut tree, "expx");
    assert!(!engine.dropdown().visible);
    assert!(engine.dropdown().is_empty());
}
