//! The canonical search-box walkthroughs.

use crate::common::{indexed, section, snapshot, suggestion_labels, three_landmarks};
use glint::highlight::count_markers;
use glint::{Display, EngineState, PageNode};

#[test]
fn test_single_letter_suggests_only_matching_landmark() {
    let (mut tree, mut engine) = indexed(&three_landmarks());
    engine.on_query_changed(&mut tree, "e");

    assert_eq!(suggestion_labels(&engine), vec!["Experience"]);
    assert_eq!(engine.dropdown().suggestions[0].anchor.id(), "experience");
    assert!(engine.dropdown().visible);
}

#[test]
fn test_single_letter_hides_unmatched_sections() {
    let (mut tree, mut engine) = indexed(&three_landmarks());
    engine.on_query_changed(&mut tree, "e");

    assert_eq!(tree.display(section(&tree, "portfolio")), Some(&Display::None));
    assert_eq!(tree.display(section(&tree, "skills")), Some(&Display::None));
    let experience = section(&tree, "experience");
    assert!(tree.is_rendered(experience));
    assert!(count_markers(&tree, experience) > 0);
}

#[test]
fn test_metacharacter_query_highlights_literally() {
    let page: PageNode = PageNode::element("main")
        .child(crate::common::make_section(
            "projects",
            "projects-container",
            "# Projects",
            vec![crate::common::make_project_card("Parser", "(test) case")],
        ))
        .into();
    let (mut tree, mut engine) = indexed(&page);
    let before = tree.text_content(tree.root());

    engine.on_query_changed(&mut tree, "(test)");

    let outcome = engine.last_outcome().unwrap();
    assert_eq!(outcome.markers, 1);
    assert_eq!(outcome.visible, 1);
    assert_eq!(tree.text_content(tree.root()), before);
    assert!(engine.dropdown().suggestions.is_empty());
}

#[test]
fn test_case_insensitive_queries_agree() {
    let (mut lower_tree, mut lower) = indexed(&three_landmarks());
    let (mut upper_tree, mut upper) = indexed(&three_landmarks());

    lower.on_query_changed(&mut lower_tree, "experience");
    upper.on_query_changed(&mut upper_tree, "EXPERIENCE");

    assert_eq!(suggestion_labels(&lower), suggestion_labels(&upper));
    assert_eq!(lower.last_outcome().unwrap().visible, upper.last_outcome().unwrap().visible);
    assert_eq!(lower.last_outcome().unwrap().markers, upper.last_outcome().unwrap().markers);
    assert_eq!(snapshot(&lower_tree), snapshot(&upper_tree));
}

#[test]
fn test_content_match_keeps_enclosing_section_visible() {
    let (mut tree, mut engine) = indexed(&three_landmarks());
    engine.on_query_changed(&mut tree, "berlin");

    // The "Experience" title does not match, the block inside it does.
    assert!(engine.dropdown().suggestions.is_empty());
    assert!(!engine.dropdown().visible);
    let experience = section(&tree, "experience");
    assert!(tree.is_rendered(experience));
    assert_eq!(count_markers(&tree, experience), 1);
    assert_eq!(tree.display(section(&tree, "skills")), Some(&Display::None));
}

#[test]
fn test_clearing_query_restores_page() {
    let (mut tree, mut engine) = indexed(&three_landmarks());
    let pristine = snapshot(&tree);

    engine.on_query_changed(&mut tree, "e");
    assert_ne!(snapshot(&tree), pristine);

    engine.on_query_changed(&mut tree, "");
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(!engine.dropdown().visible);
    assert_eq!(engine.last_outcome().unwrap().markers, 0);
    assert_eq!(snapshot(&tree), pristine);
}

#[test]
fn test_picking_suggestion_navigates_and_restores() {
    let (mut tree, mut engine) = indexed(&three_landmarks());
    engine.on_query_changed(&mut tree, "e");

    let anchor = engine.on_suggestion_activated(&mut tree, 0).unwrap();

    assert_eq!(anchor.id(), "experience");
    assert_eq!(engine.query(), "");
    assert!(!engine.dropdown().visible);
    for id in ["portfolio", "experience", "skills"] {
        assert!(tree.is_rendered(section(&tree, id)), "{} should be visible", id);
    }
    let experience = section(&tree, "experience");
    assert!(tree.has_class(experience, "highlight-neon"));
    assert_eq!(engine.navigator().pulsing(), Some(experience));
    assert_eq!(count_markers(&tree, tree.root()), 0);
}
