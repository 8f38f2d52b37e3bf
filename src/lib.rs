// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-page content search: live filtering, reversible highlighting, and
//! section suggestions over a content tree.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   tree      │────▶│  index.rs    │────▶│  query.rs    │──┐
//! │ (ContentTree│     │  (collect)   │     │ (plan, apply)│  │
//! │  Selector)  │     └──────────────┘     └──────────────┘  │
//! └─────────────┘            │                    │          │
//!                            ▼                    ▼          │
//!                     ┌──────────────┐     ┌──────────────┐  │
//!                     │  suggest.rs  │     │ highlight.rs │  │
//!                     │  (build)     │     │ (apply,      │  │
//!                     └──────────────┘     │  remove_all) │  │
//!                            │             └──────────────┘  │
//!                            ▼                               │
//!                     ┌──────────────┐     ┌──────────────┐  │
//!                     │ navigate.rs  │◀────│  engine.rs   │◀─┘
//!                     │ (Navigator)  │     │ (SearchEngine│
//!                     └──────────────┘     └──────────────┘
//! ```
//!
//! The engine is synchronous and single-threaded. Every call runs to
//! completion, so the tree is never observed half-highlighted or half-hidden.
//!
//! # Usage
//!
//! ```
//! use glint::{ContentTree, EngineConfig, SearchEngine};
//!
//! let mut tree = ContentTree::from_json(r##"{
//!     "tag": "div", "id": "experience", "class": "experience-container",
//!     "children": [
//!         { "tag": "h1", "class": "main-title", "children": ["# Experience"] },
//!         { "tag": "div", "class": "experience-section", "children": ["Berlin-based engineer"] }
//!     ]
//! }"##).unwrap();
//!
//! let mut engine = SearchEngine::new(&EngineConfig::default()).unwrap();
//! engine.reindex(&mut tree);
//! engine.on_query_changed(&mut tree, "berlin");
//!
//! assert_eq!(engine.last_outcome().unwrap().markers, 1);
//! assert!(engine.dropdown().suggestions.is_empty());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod index;
pub mod navigate;
pub mod query;
pub mod suggest;
pub mod testing;
pub mod tree;
mod types;

pub use config::{CompiledConfig, EmptySectionPolicy, EngineConfig, PulseConfig};
pub use engine::{EngineObserver, EngineState, SearchEngine};
pub use error::{GlintError, Result};
pub use highlight::{mark_segments, marked_text, Matcher, Segment};
pub use index::collect;
pub use navigate::{Navigator, PulseNavigator, ScrollRequest};
pub use query::{DisplaySnapshot, FilterOutcome, FilterPlan, Visibility};
pub use suggest::{Dropdown, Suggestion};
pub use tree::{ContentTree, Display, Element, NodeId, NodeKind, PageElement, PageNode, Selector};
pub use types::{normalize_query, Anchor, Index, SearchableItem};
