// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Which nodes are landmarks, which are sections, which are bulk content,
//! and how navigation pulses look. Defaults describe the portfolio layout the
//! engine was written for, so `EngineConfig::default()` works out of the box
//! on such pages. Everything is overridable from JSON:
//!
//! ```json
//! { "landmarks": "section h2", "content": ".card", "emptySections": "hide" }
//! ```
//!
//! Selectors are parsed once in [`EngineConfig::compile`], so a bad selector
//! fails when the engine is constructed, never in the middle of a keystroke.

use crate::error::{GlintError, Result};
use crate::tree::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What to do with a section that contains no searchable items at all while
/// a non-empty query is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySectionPolicy {
    /// Leave it displayed.
    #[default]
    Show,
    /// Hide it like any section without a visible item.
    Hide,
}

/// Visual emphasis applied by the navigator after scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PulseConfig {
    /// Class added to the target for the duration of the pulse.
    pub class: String,
    pub duration_ms: u64,
    /// Where the target should land, as a fraction of viewport height from the top.
    pub viewport_ratio: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            class: "highlight-neon".to_string(),
            duration_ms: 1500,
            viewport_ratio: 0.25,
        }
    }
}

impl PulseConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

const SECTION_CLASSES: [&str; 4] = [
    "portfolio-container",
    "experience-container",
    "skills-container",
    "projects-container",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Landmark title nodes; their text becomes a suggestion label.
    pub landmarks: String,
    /// Section containers. A landmark's anchor is the id of its nearest
    /// section, and sections follow the ancestor-visibility rule.
    pub sections: String,
    /// Bulk content nodes, filtered and highlighted but never suggested.
    pub content: String,
    /// Characters trimmed from both ends of landmark labels.
    pub label_trim: String,
    pub empty_sections: EmptySectionPolicy,
    pub pulse: PulseConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            landmarks: SECTION_CLASSES
                .iter()
                .map(|class| format!(".{} h1.main-title", class))
                .collect::<Vec<_>>()
                .join(", "),
            sections: SECTION_CLASSES
                .iter()
                .map(|class| format!(".{}", class))
                .collect::<Vec<_>>()
                .join(", "),
            content: ".project-card, .experience-section, .about-me".to_string(),
            label_trim: "#".to_string(),
            empty_sections: EmptySectionPolicy::Show,
            pulse: PulseConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GlintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse every selector up front.
    pub fn compile(&self) -> Result<CompiledConfig> {
        Ok(CompiledConfig {
            landmarks: Selector::parse(&self.landmarks)?,
            sections: Selector::parse(&self.sections)?,
            content: Selector::parse(&self.content)?,
            label_trim: self.label_trim.chars().collect(),
            empty_sections: self.empty_sections,
            pulse: self.pulse.clone(),
        })
    }
}

/// Configuration with selectors parsed, ready for the indexer.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub landmarks: Selector,
    pub sections: Selector,
    pub content: Selector,
    pub label_trim: Vec<char>,
    pub empty_sections: EmptySectionPolicy,
    pub pulse: PulseConfig,
}

impl CompiledConfig {
    /// Trim decoration and whitespace from a landmark's raw text.
    pub fn clean_label(&self, raw: &str) -> String {
        raw.trim()
            .trim_matches(|c: char| self.label_trim.contains(&c))
            .trim()
            .to_string()
    }
}
