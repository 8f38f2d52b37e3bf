//! Filter properties over synthetic pages.
//!
//! 1. **Deterministic**: the same query on the same page gives the same tree
//! 2. **Restorable**: clearing the query restores the page exactly
//! 3. **Ancestor rule**: a shown item is never inside a hidden section
//! 4. **Case-insensitive**: query case does not affect the outcome

use crate::common::{indexed, snapshot, synthetic_page};
use glint::Display;
use proptest::prelude::*;

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "rust".to_string(),
            "Berlin".to_string(),
            "PROJECT 1".to_string(),
            "cloud data".to_string(),
            "section".to_string(),
        ]),
        prop::string::string_regex("[a-z ]{1,3}").unwrap(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: two runs over identical pages end in identical trees.
    #[test]
    fn prop_filter_deterministic(
        sections in 1usize..4,
        cards in 0usize..5,
        query in query_strategy(),
    ) {
        let page = synthetic_page(sections, cards);
        let (mut a_tree, mut a) = indexed(&page);
        let (mut b_tree, mut b) = indexed(&page);

        a.on_query_changed(&mut a_tree, &query);
        b.on_query_changed(&mut b_tree, &query);

        prop_assert_eq!(a.last_outcome(), b.last_outcome());
        prop_assert_eq!(snapshot(&a_tree), snapshot(&b_tree));
        prop_assert_eq!(a.dropdown(), b.dropdown());
    }

    /// Property: any sequence of queries followed by "" restores the page.
    #[test]
    fn prop_empty_query_restores(
        cards in 0usize..5,
        queries in prop::collection::vec(query_strategy(), 1..4),
    ) {
        let (mut tree, mut engine) = indexed(&synthetic_page(2, cards));
        let pristine = snapshot(&tree);

        for query in &queries {
            engine.on_query_changed(&mut tree, query);
        }
        engine.on_query_changed(&mut tree, "");

        prop_assert_eq!(snapshot(&tree), pristine);
    }

    /// Property: shown items are rendered; sections holding one are too.
    #[test]
    fn prop_shown_items_are_rendered(cards in 1usize..5, query in query_strategy()) {
        let (mut tree, mut engine) = indexed(&synthetic_page(3, cards));
        engine.on_query_changed(&mut tree, &query);

        let normalized = query.to_lowercase();
        for item in engine.index().items() {
            if item.matches(&normalized) {
                prop_assert!(tree.is_rendered(item.node()), "{} matched but is not rendered", item.node());
            } else if !item.is_landmark() {
                // Landmark nodes are sections, which follow the ancestor rule instead.
                prop_assert_eq!(tree.display(item.node()), Some(&Display::None));
            }
        }
    }

    /// Property: upper- and lower-case queries produce the same page.
    #[test]
    fn prop_filter_case_insensitive(cards in 0usize..4, query in query_strategy()) {
        let page = synthetic_page(2, cards);
        let (mut lower_tree, mut lower) = indexed(&page);
        let (mut upper_tree, mut upper) = indexed(&page);

        lower.on_query_changed(&mut lower_tree, &query.to_lowercase());
        upper.on_query_changed(&mut upper_tree, &query.to_uppercase());

        prop_assert_eq!(snapshot(&lower_tree), snapshot(&upper_tree));
        prop_assert_eq!(lower.dropdown(), upper.dropdown());
    }
}
