//! Visibility decisions and how they land on the tree.

use crate::common::{indexed, make_project_card, make_section, section, snapshot};
use glint::query::{self, DisplaySnapshot};
use glint::{Display, EmptySectionPolicy, EngineConfig, PageNode, SearchEngine, Visibility};

fn projects_page() -> PageNode {
    PageNode::element("main")
        .child(make_section(
            "projects",
            "projects-container",
            "# Projects",
            vec![
                make_project_card("Glint", "in-page search for static sites"),
                make_project_card("Tide", "cloud cost reports"),
            ],
        ))
        .child(make_section("skills", "skills-container", "# Skills", vec![]))
        .into()
}

fn cards(tree: &glint::ContentTree) -> Vec<glint::NodeId> {
    tree.select(&glint::Selector::parse(".project-card").unwrap())
}

#[test]
fn test_plan_is_pure() {
    let (tree, engine) = indexed(&projects_page());
    let before = snapshot(&tree);

    let plan = query::plan(&tree, engine.index(), "cloud", EmptySectionPolicy::Show);

    assert_eq!(snapshot(&tree), before);
    assert_eq!(plan.query(), "cloud");
    assert_eq!(plan.items().len(), engine.index().len());
    let shown = plan.items().iter().filter(|v| v.is_shown()).count();
    assert_eq!(shown, 1);
}

#[test]
fn test_shown_card_keeps_its_own_display() {
    let (mut tree, mut engine) = indexed(&projects_page());
    engine.on_query_changed(&mut tree, "cloud");

    let cards = cards(&tree);
    assert_eq!(tree.display(cards[0]), Some(&Display::None));
    assert_eq!(tree.display(cards[1]), Some(&Display::Flex));

    // Repeated filtering must not lose the original flex display.
    engine.on_query_changed(&mut tree, "search");
    engine.on_query_changed(&mut tree, "");
    assert_eq!(tree.display(cards[0]), Some(&Display::Flex));
    assert_eq!(tree.display(cards[1]), Some(&Display::Flex));
}

#[test]
fn test_initially_hidden_item_is_shown_as_block() {
    let page: PageNode = PageNode::element("main")
        .child(make_section(
            "experience",
            "experience-container",
            "# Experience",
            vec![PageNode::element("div")
                .class("experience-section")
                .display(Display::None)
                .text("Collapsed entry")
                .into()],
        ))
        .into();
    let (mut tree, mut engine) = indexed(&page);
    engine.on_query_changed(&mut tree, "collapsed");

    let entry = tree
        .select(&glint::Selector::parse(".experience-section").unwrap())[0];
    assert_eq!(tree.display(entry), Some(&Display::Block));
    assert_eq!(engine.snapshot().original(entry), Some(&Display::None));
}

#[test]
fn test_section_without_items_follows_policy() {
    let page: PageNode = PageNode::element("main")
        .child(make_section(
            "projects",
            "projects-container",
            "# Projects",
            vec![make_project_card("Glint", "search")],
        ))
        // A section container with no title and no content items.
        .child(PageNode::element("div").id("empty").class("skills-container"))
        .into();

    let (mut tree, mut engine) = indexed(&page);
    engine.on_query_changed(&mut tree, "search");
    assert!(tree.is_rendered(section(&tree, "empty")));

    let config = EngineConfig {
        empty_sections: EmptySectionPolicy::Hide,
        ..EngineConfig::default()
    };
    let mut tree = glint::ContentTree::from_page(&page);
    let mut engine = SearchEngine::new(&config).unwrap();
    engine.reindex(&mut tree);
    engine.on_query_changed(&mut tree, "search");
    assert_eq!(tree.display(section(&tree, "empty")), Some(&Display::None));
    assert!(tree.is_rendered(section(&tree, "projects")));
}

#[test]
fn test_no_match_hides_everything() {
    let (mut tree, mut engine) = indexed(&projects_page());
    engine.on_query_changed(&mut tree, "kubernetes");

    let outcome = engine.last_outcome().unwrap();
    assert_eq!(outcome.visible, 0);
    assert_eq!(outcome.markers, 0);
    assert_eq!(outcome.sections_shown, 0);
    assert!(!engine.dropdown().visible);
    assert!(!tree.is_rendered(section(&tree, "projects")));
}

#[test]
fn test_removed_item_is_skipped() {
    let (mut tree, mut engine) = indexed(&projects_page());
    let gone = cards(&tree)[0];
    assert!(tree.remove(gone));

    engine.on_query_changed(&mut tree, "cloud");

    let outcome = engine.last_outcome().unwrap();
    assert_eq!(outcome.stale, 1);
    assert_eq!(outcome.visible, 1);
    assert!(tree.is_rendered(section(&tree, "projects")));
}

#[test]
fn test_filter_without_engine() {
    let (mut tree, engine) = indexed(&projects_page());
    let mut displays = DisplaySnapshot::new();

    let outcome = query::filter(&mut tree, engine.index(), "Tide", EmptySectionPolicy::Show, &mut displays);

    assert_eq!(outcome.query, "tide");
    assert_eq!(outcome.visible, 1);
    assert_eq!(outcome.markers, 1);
    assert!(!displays.is_empty());
    let plan = query::plan(&tree, engine.index(), "tide", EmptySectionPolicy::Show);
    let sections: Vec<Visibility> = plan.sections().iter().map(|(_, v)| *v).collect();
    assert_eq!(sections, vec![Visibility::Shown, Visibility::Hidden]);
}
