// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The host-facing search engine.
//!
//! Owns exactly one index generation plus the little state a search box
//! needs: the current query, the dropdown, and the display snapshot. The
//! content tree stays with the host and is passed into every call.
//!
//! ```text
//!            ┌────────── query cleared / suggestion picked ──────────┐
//!            ▼                                                        │
//!       ┌─────────┐   non-empty query    ┌─────────────┐              │
//!       │  Idle   │ ───────────────────▶ │  Filtering  │ ─────────────┘
//!       └─────────┘                      └─────────────┘
//! ```
//!
//! There is no error state. A query that matches nothing hides every item
//! (sections follow the ancestor rule) and shows an empty dropdown.
//!
//! Wiring is explicit: the navigator is a type parameter chosen at
//! construction, and hosts observe query/dropdown changes through an
//! [`EngineObserver`] registered with [`SearchEngine::with_observer`].

use crate::config::{CompiledConfig, EngineConfig};
use crate::error::Result;
use crate::highlight;
use crate::index;
use crate::navigate::{Navigator, PulseNavigator};
use crate::query::{self, DisplaySnapshot, FilterOutcome};
use crate::suggest::{self, Dropdown};
use crate::tree::ContentTree;
use crate::types::{Anchor, Index};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// Empty query: everything visible, dropdown hidden.
    Idle,
    /// Non-empty query: visibility and highlights applied.
    Filtering,
}

/// Callbacks for the host UI. Every method defaults to doing nothing.
pub trait EngineObserver {
    /// The engine replaced the query (e.g. cleared it after a suggestion was
    /// picked); the host should update its input box.
    fn query_replaced(&mut self, _query: &str) {}

    fn dropdown_changed(&mut self, _dropdown: &Dropdown) {}

    fn filtered(&mut self, _outcome: &FilterOutcome) {}
}

struct NoopObserver;

impl EngineObserver for NoopObserver {}

pub struct SearchEngine<N: Navigator = PulseNavigator> {
    config: CompiledConfig,
    index: Index,
    snapshot: DisplaySnapshot,
    query: String,
    dropdown: Dropdown,
    last_outcome: Option<FilterOutcome>,
    navigator: N,
    observer: Box<dyn EngineObserver>,
}

impl SearchEngine<PulseNavigator> {
    /// Engine with the stock navigator configured from `config.pulse`.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Self::with_navigator(config, PulseNavigator::new(config.pulse.clone()))
    }
}

impl<N: Navigator> SearchEngine<N> {
    pub fn with_navigator(config: &EngineConfig, navigator: N) -> Result<Self> {
        Ok(Self {
            config: config.compile()?,
            index: Index::default(),
            snapshot: DisplaySnapshot::new(),
            query: String::new(),
            dropdown: Dropdown::hidden(),
            last_outcome: None,
            navigator,
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn EngineObserver>) -> Self {
        self.observer = observer;
        self
    }

    // -------------------------------------------------------------------------
    // Host entry points
    // -------------------------------------------------------------------------

    /// Rebuild the index from `tree`, replacing the previous generation.
    ///
    /// Call after initial render and again whenever content is inserted.
    /// Markers left by the previous generation are removed first. If a query
    /// is active it is re-applied, so freshly loaded content is filtered too.
    pub fn reindex(&mut self, tree: &mut ContentTree) -> &Index {
        for item in self.index.items() {
            highlight::remove_all(tree, item.node());
        }
        let generation = self.index.generation() + 1;
        self.index = index::collect(tree, &self.config, generation);
        self.snapshot.retain_live(tree);

        if self.state() == EngineState::Filtering {
            self.run_filter(tree);
            self.refresh_dropdown(tree);
        }
        &self.index
    }

    /// Input changed: filter and rebuild suggestions.
    pub fn on_query_changed(&mut self, tree: &mut ContentTree, query: &str) {
        self.query = query.to_string();
        self.run_filter(tree);
        self.refresh_dropdown(tree);
    }

    /// Search button: filter with the current query, leave the dropdown alone.
    pub fn on_submit(&mut self, tree: &mut ContentTree) {
        self.run_filter(tree);
    }

    /// A suggestion was picked: clear the query, hide the dropdown, navigate,
    /// then restore full visibility.
    ///
    /// Returns the anchor navigated to, or `None` if `index` is out of range.
    pub fn on_suggestion_activated(&mut self, tree: &mut ContentTree, index: usize) -> Option<Anchor> {
        let anchor = self.dropdown.get(index)?.anchor.clone();

        self.query.clear();
        self.observer.query_replaced("");
        self.set_dropdown(Dropdown::hidden());
        if !self.navigator.scroll_and_pulse(tree, &anchor) {
            debug!(%anchor, "suggestion target vanished before navigation");
        }
        self.run_filter(tree);
        Some(anchor)
    }

    /// Click outside the dropdown: hide it, keep the query and filter.
    pub fn dismiss_suggestions(&mut self) {
        self.set_dropdown(Dropdown::hidden());
    }

    /// Manual clear of the search box.
    pub fn clear(&mut self, tree: &mut ContentTree) {
        self.on_query_changed(tree, "");
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn state(&self) -> EngineState {
        if self.query.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Filtering
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }

    pub fn last_outcome(&self) -> Option<&FilterOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn run_filter(&mut self, tree: &mut ContentTree) {
        let outcome = query::filter(
            tree,
            &self.index,
            &self.query,
            self.config.empty_sections,
            &mut self.snapshot,
        );
        self.observer.filtered(&outcome);
        self.last_outcome = Some(outcome);
    }

    fn refresh_dropdown(&mut self, tree: &ContentTree) {
        let suggestions = suggest::build(tree, &self.index, &self.query);
        self.set_dropdown(Dropdown::from_suggestions(suggestions));
    }

    fn set_dropdown(&mut self, dropdown: Dropdown) {
        if dropdown != self.dropdown {
            self.dropdown = dropdown;
            self.observer.dropdown_changed(&self.dropdown);
        }
    }
}
