//! Content arriving after the first index pass.

use crate::common::{indexed, make_project_card, portfolio_page, section, snapshot};
use glint::highlight::count_markers;
use glint::{Display, EngineState, Selector};

fn project_grid(tree: &glint::ContentTree) -> glint::NodeId {
    tree.select(&Selector::parse(".project-grid").unwrap())[0]
}

#[test]
fn test_loaded_cards_are_searchable_after_reindex() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    let before = engine.index().len();

    let grid = project_grid(&tree);
    tree.append_page(grid, &make_project_card("Tide", "cloud cost reports"));
    tree.append_page(grid, &make_project_card("Glint", "in-page search"));

    engine.on_query_changed(&mut tree, "cloud");
    assert_eq!(engine.last_outcome().unwrap().visible, 0);

    let index = engine.reindex(&mut tree);
    assert_eq!(index.len(), before + 2);
    assert_eq!(index.generation(), 2);

    // The active query was re-applied to the new cards.
    let outcome = engine.last_outcome().unwrap();
    assert_eq!(outcome.generation, 2);
    assert_eq!(outcome.visible, 1);
    assert!(tree.is_rendered(section(&tree, "projects")));
    let cards = tree.select(&Selector::parse(".project-card").unwrap());
    assert_eq!(tree.display(cards[0]), Some(&Display::Flex));
    assert_eq!(tree.display(cards[1]), Some(&Display::None));
}

#[test]
fn test_reindex_while_filtering_leaves_one_set_of_markers() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "berlin");
    let markers = count_markers(&tree, tree.root());
    assert_eq!(markers, 1);

    engine.reindex(&mut tree);
    engine.reindex(&mut tree);

    assert_eq!(engine.state(), EngineState::Filtering);
    assert_eq!(count_markers(&tree, tree.root()), markers);
}

#[test]
fn test_reindex_when_idle_changes_nothing() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    let before = snapshot(&tree);
    engine.reindex(&mut tree);
    assert_eq!(snapshot(&tree), before);
    assert_eq!(engine.index().generation(), 2);
}

#[test]
fn test_removed_section_drops_out_of_next_generation() {
    let (mut tree, mut engine) = indexed(&portfolio_page());
    engine.on_query_changed(&mut tree, "s");
    let skills = section(&tree, "skills");
    assert!(engine.snapshot().original(skills).is_some());
    assert!(tree.remove(skills));

    engine.reindex(&mut tree);
    assert!(engine.index().landmarks().all(|item| item.suggestion_label() != Some("Skills")));
    assert!(engine.snapshot().original(skills).is_none());
}
