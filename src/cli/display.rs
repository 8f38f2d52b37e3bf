// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the glint CLI.
//!
//! Colors are named by role (a match, a landmark, a muted aside) rather than
//! by hue, and each role maps to a dark and a light rendition. `GLINT_THEME`
//! picks between them; dark is the default. `NO_COLOR` and non-TTY stdout
//! disable color entirely.

use glint::{Segment, Visibility};
use std::sync::OnceLock;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(value: &str) -> Option<Theme> {
    match value.trim().to_lowercase().as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        _ => None,
    }
}

pub fn theme() -> Theme {
    *THEME.get_or_init(|| {
        std::env::var("GLINT_THEME")
            .ok()
            .as_deref()
            .and_then(parse_theme)
            .unwrap_or(Theme::Dark)
    })
}

/// What a piece of output means; the theme decides how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Box borders, anchors, placeholders.
    Frame,
    Heading,
    Match,
    Landmark,
    Content,
    Shown,
    /// A count of zero.
    Empty,
    Count,
}

impl Role {
    fn rgb(self, theme: Theme) -> (u8, u8, u8) {
        match (self, theme) {
            (Role::Frame, Theme::Dark) => (92, 99, 112),
            (Role::Frame, Theme::Light) => (160, 161, 167),
            (Role::Heading, Theme::Dark) => (86, 182, 194),
            (Role::Heading, Theme::Light) => (1, 132, 188),
            (Role::Match, Theme::Dark) => (229, 192, 123),
            (Role::Match, Theme::Light) => (193, 132, 1),
            (Role::Landmark, Theme::Dark) => (198, 120, 221),
            (Role::Landmark, Theme::Light) => (166, 38, 164),
            (Role::Content, Theme::Dark) => (97, 175, 239),
            (Role::Content, Theme::Light) => (64, 120, 242),
            (Role::Shown, Theme::Dark) => (152, 195, 121),
            (Role::Shown, Theme::Light) => (80, 161, 79),
            (Role::Empty, Theme::Dark) => (224, 108, 117),
            (Role::Empty, Theme::Light) => (228, 86, 73),
            (Role::Count, Theme::Dark) => (102, 217, 239),
            (Role::Count, Theme::Light) => (1, 112, 158),
        }
    }

    fn escape(self) -> String {
        let (r, g, b) = self.rgb(theme());
        rgb(r, g, b)
    }
}

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// `text` in the color for `role`, optionally bold or dim.
pub fn paint(role: Role, style: Style, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let modifier = match style {
        Style::Plain => "",
        Style::Bold => BOLD,
        Style::Dim => DIM,
    };
    format!("{}{}{}{}", modifier, role.escape(), text, RESET)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Dim,
}

/// Length in chars, not counting ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip to the terminating 'm' of the SGR sequence.
            chars.by_ref().find(|&c| c == 'm');
        } else {
            len += 1;
        }
    }
    len
}

/// Truncate to `max` visible characters, appending `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let edge = paint(Role::Frame, Style::Plain, "│");
    println!("{}{}{}{}", edge, content, " ".repeat(pad), edge);
}

fn labelled_rule(left: char, right: char, label: &str) {
    let label_part = format!("─ {} ", paint(Role::Heading, Style::Bold, label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        paint(Role::Frame, Style::Plain, &left.to_string()),
        label_part,
        paint(Role::Frame, Style::Plain, &format!("{}{}", "─".repeat(remaining), right))
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labelled_rule('┌', '┐', label);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labelled_rule('├', '┤', label);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", paint(Role::Frame, Style::Plain, &format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Item kind badge: landmark items can become suggestions.
pub fn kind_badge(is_landmark: bool) -> String {
    if is_landmark {
        paint(Role::Landmark, Style::Bold, "[LMK]")
    } else {
        paint(Role::Content, Style::Plain, "[TXT]")
    }
}

pub fn visibility_badge(visibility: Visibility) -> String {
    match visibility {
        Visibility::Shown => paint(Role::Shown, Style::Plain, "shown "),
        Visibility::Hidden => paint(Role::Frame, Style::Dim, "hidden"),
    }
}

pub fn muted(text: &str) -> String {
    paint(Role::Frame, Style::Plain, text)
}

/// Render segments with matches emphasized. Without color, matches are
/// wrapped in `[` `]` so they stay visible in pipelines.
pub fn render_segments(segments: &[Segment]) -> String {
    let colors = use_colors();
    segments
        .iter()
        .map(|segment| match (segment.matched, colors) {
            (false, _) => segment.text.clone(),
            (true, true) => paint(Role::Match, Style::Bold, &segment.text),
            (true, false) => format!("[{}]", segment.text),
        })
        .collect()
}

/// Count with a color that flags zero.
pub fn count(value: usize) -> String {
    if value == 0 {
        paint(Role::Empty, Style::Plain, "0")
    } else {
        paint(Role::Count, Style::Bold, &value.to_string())
    }
}
