// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scroll-and-pulse navigation to an anchor.
//!
//! The engine only consumes the [`Navigator`] trait; hosts with a real
//! viewport plug in their own. [`PulseNavigator`] is the stock version: it
//! records where the host should scroll and marks the target with a pulse
//! class until the pulse expires. At most one node carries the pulse.

use crate::config::PulseConfig;
use crate::tree::{ContentTree, NodeId};
use crate::types::Anchor;
use std::time::{Duration, Instant};
use tracing::debug;

pub trait Navigator {
    /// Scroll to `anchor` and emphasize it briefly.
    ///
    /// Returns `false` if the anchor does not resolve; that is not an error.
    fn scroll_and_pulse(&mut self, tree: &mut ContentTree, anchor: &Anchor) -> bool;
}

/// Where the host should bring into view, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub node: NodeId,
    pub anchor: Anchor,
    /// Target position as a fraction of viewport height from the top.
    pub viewport_ratio: f32,
}

#[derive(Debug)]
pub struct PulseNavigator {
    config: PulseConfig,
    active: Option<(NodeId, Instant)>,
    last_scroll: Option<ScrollRequest>,
}

impl PulseNavigator {
    pub fn new(config: PulseConfig) -> Self {
        Self {
            config,
            active: None,
            last_scroll: None,
        }
    }

    /// Same as [`Navigator::scroll_and_pulse`] with an explicit clock.
    pub fn scroll_and_pulse_at(&mut self, tree: &mut ContentTree, anchor: &Anchor, now: Instant) -> bool {
        let Some(node) = tree.find_by_id(anchor.id()) else {
            debug!(%anchor, "navigation target not found");
            return false;
        };

        if let Some((previous, _)) = self.active.take() {
            tree.remove_class(previous, &self.config.class);
        }
        tree.add_class(node, &self.config.class);
        self.active = Some((node, now + self.config.duration()));
        self.last_scroll = Some(ScrollRequest {
            node,
            anchor: anchor.clone(),
            viewport_ratio: self.config.viewport_ratio,
        });
        debug!(%anchor, node = %node, "scrolled and pulsed");
        true
    }

    /// Remove the pulse if it has run its course by `now`.
    ///
    /// Returns `true` if a pulse was removed.
    pub fn expire(&mut self, tree: &mut ContentTree, now: Instant) -> bool {
        match self.active {
            Some((node, until)) if now >= until => {
                tree.remove_class(node, &self.config.class);
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// The node currently pulsing, if any.
    pub fn pulsing(&self) -> Option<NodeId> {
        self.active.map(|(node, _)| node)
    }

    /// Time left on the current pulse.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active.map(|(_, until)| until.saturating_duration_since(now))
    }

    pub fn last_scroll(&self) -> Option<&ScrollRequest> {
        self.last_scroll.as_ref()
    }
}

impl Default for PulseNavigator {
    fn default() -> Self {
        Self::new(PulseConfig::default())
    }
}

impl Navigator for PulseNavigator {
    fn scroll_and_pulse(&mut self, tree: &mut ContentTree, anchor: &Anchor) -> bool {
        self.scroll_and_pulse_at(tree, anchor, Instant::now())
    }
}
