//! Highlight properties over arbitrary text and queries.
//!
//! 1. **Reversible**: `remove_all` after `apply` restores text and structure
//! 2. **Idempotent**: a second `apply` with the same query adds nothing
//! 3. **Text-preserving**: highlighting never changes the visible text
//! 4. **Exact**: one marker per match span

use crate::common::snapshot;
use glint::highlight::{self, count_markers};
use glint::{ContentTree, Element, Matcher, NodeId};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words with regex metacharacters and multi-byte characters mixed in.
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z]{1,6}").unwrap(),
        prop::sample::select(vec![
            "(test)".to_string(),
            "a.b".to_string(),
            "[x]".to_string(),
            "c++".to_string(),
            "$5^2".to_string(),
            "café".to_string(),
            "naïve".to_string(),
        ]),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..8).prop_map(|words| words.join(" "))
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z().+\\[\\]$^ ]{1,4}").unwrap(),
        word_strategy(),
    ]
}

/// A paragraph holding `texts`, alternating plain text and `<em>` children.
fn paragraph(texts: &[String]) -> (ContentTree, NodeId) {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let p = tree.append_element(root, Element::new("p")).unwrap();
    for (i, text) in texts.iter().enumerate() {
        if i % 2 == 0 {
            tree.append_text(p, text).unwrap();
        } else {
            let em = tree.append_element(p, Element::new("em")).unwrap();
            tree.append_text(em, text).unwrap();
        }
    }
    (tree, p)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: apply then remove_all is the identity on the tree.
    #[test]
    fn prop_highlight_reversible(
        texts in prop::collection::vec(text_strategy(), 1..4),
        query in query_strategy(),
    ) {
        let (mut tree, p) = paragraph(&texts);
        let before = snapshot(&tree);

        let added = highlight::apply(&mut tree, p, &Matcher::new(&query));
        let removed = highlight::remove_all(&mut tree, p);

        prop_assert_eq!(added, removed);
        prop_assert_eq!(snapshot(&tree), before);
    }

    /// Property: highlighting twice equals highlighting once.
    #[test]
    fn prop_highlight_idempotent(text in text_strategy(), query in query_strategy()) {
        let (mut tree, p) = paragraph(&[text]);
        let matcher = Matcher::new(&query);

        highlight::apply(&mut tree, p, &matcher);
        let once = snapshot(&tree);
        let again = highlight::apply(&mut tree, p, &matcher);

        prop_assert_eq!(again, 0);
        prop_assert_eq!(snapshot(&tree), once);
    }

    /// Property: the visible text never changes.
    #[test]
    fn prop_highlight_preserves_text(
        texts in prop::collection::vec(text_strategy(), 1..4),
        query in query_strategy(),
    ) {
        let (mut tree, p) = paragraph(&texts);
        let before = tree.text_content(p);
        highlight::apply(&mut tree, p, &Matcher::new(&query));
        prop_assert_eq!(tree.text_content(p), before);
    }

    /// Property: one marker per span, and every marker matches the query.
    #[test]
    fn prop_markers_equal_spans(text in text_strategy(), query in query_strategy()) {
        let matcher = Matcher::new(&query);
        let spans = matcher.find_spans(&text);
        let (mut tree, p) = paragraph(&[text.clone()]);

        let added = highlight::apply(&mut tree, p, &matcher);

        prop_assert_eq!(added, spans.len());
        prop_assert_eq!(count_markers(&tree, p), spans.len());
        for span in spans {
            prop_assert_eq!(text[span].to_lowercase(), query.to_lowercase());
        }
    }

    /// Property: regex and literal matching agree on ASCII input.
    #[test]
    fn prop_literal_fallback_agrees(
        text in prop::string::string_regex("[a-cA-C(). ]{0,24}").unwrap(),
        query in prop::string::string_regex("[a-cA-C().]{1,3}").unwrap(),
    ) {
        prop_assert_eq!(
            Matcher::new(&query).find_spans(&text),
            Matcher::literal(&query).find_spans(&text)
        );
    }

    /// Property: the case of the query does not affect what gets marked.
    #[test]
    fn prop_highlight_case_insensitive(
        text in prop::string::string_regex("[a-zA-Z ]{0,32}").unwrap(),
        query in prop::string::string_regex("[a-zA-Z]{1,3}").unwrap(),
    ) {
        let (mut lower, p) = paragraph(&[text.clone()]);
        let (mut upper, q) = paragraph(&[text]);

        let a = highlight::apply(&mut lower, p, &Matcher::new(&query.to_lowercase()));
        let b = highlight::apply(&mut upper, q, &Matcher::new(&query.to_uppercase()));

        prop_assert_eq!(a, b);
        prop_assert_eq!(snapshot(&lower), snapshot(&upper));
    }
}
