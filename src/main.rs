// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use glint::highlight::{mark_segments, marked_text};
use glint::{
    ContentTree, EngineConfig, FilterOutcome, Matcher, SearchEngine, SearchableItem, Segment, Suggestion,
    Visibility,
};

mod cli;
use cli::display::{self, row, section_bot, section_mid, section_top};
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("GLINT_LOG").unwrap_or_else(|_| "glint=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Inspect { page, config } => run_inspect(&page, config.as_deref()),
        Commands::Search {
            page,
            query,
            config,
            json,
            all,
        } => run_search(&page, &query, config.as_deref(), json, all),
        Commands::Suggest {
            page,
            query,
            config,
            json,
        } => run_suggest(&page, &query, config.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

fn load(page: &Path, config: Option<&Path>) -> Result<(ContentTree, SearchEngine)> {
    let config = match config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let tree = ContentTree::from_path(page).with_context(|| format!("loading page {}", page.display()))?;
    let engine = SearchEngine::new(&config).context("compiling selectors")?;
    Ok((tree, engine))
}

/// Display text for an item: the cleaned label for landmarks, the live
/// (possibly highlighted) text for content.
fn item_segments(tree: &ContentTree, item: &SearchableItem, matcher: &Matcher) -> Vec<Segment> {
    match item.suggestion_label() {
        Some(label) => mark_segments(label, matcher),
        None => marked_text(tree, item.node()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(page: &Path, config: Option<&Path>) -> Result<()> {
    let (mut tree, mut engine) = load(page, config)?;
    engine.reindex(&mut tree);
    let index = engine.index();

    section_top("INDEX");
    row(&format!(
        " generation {}   items {}   landmarks {}   sections {}",
        index.generation(),
        display::count(index.len()),
        display::count(index.landmarks().count()),
        display::count(index.sections().len())
    ));
    section_mid("ITEMS");
    for item in index.items() {
        let target = item.target_anchor().map(|a| a.to_string()).unwrap_or_default();
        let text = item.suggestion_label().unwrap_or_else(|| item.normalized_text());
        row(&format!(
            " {} {:>5} {:<14} {}",
            display::kind_badge(item.is_landmark()),
            item.node().to_string(),
            display::truncate(&target, 14),
            display::truncate(text, 44)
        ));
    }
    section_mid("SECTIONS");
    for &section in index.sections() {
        let id = tree.element(section).and_then(|e| e.id.clone()).unwrap_or_default();
        row(&format!(" {:>5} {}", section.to_string(), display::truncate(&id, 60)));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemReport {
    node: String,
    landmark: bool,
    visibility: Visibility,
    segments: Vec<Segment>,
}

#[derive(Serialize)]
struct SearchReport {
    outcome: FilterOutcome,
    items: Vec<ItemReport>,
    suggestions: Vec<Suggestion>,
}

fn run_search(page: &Path, query: &str, config: Option<&Path>, json: bool, all: bool) -> Result<()> {
    let (mut tree, mut engine) = load(page, config)?;
    engine.reindex(&mut tree);
    engine.on_query_changed(&mut tree, query);

    let matcher = Matcher::new(query);
    let items: Vec<ItemReport> = engine
        .index()
        .items()
        .iter()
        .map(|item| ItemReport {
            node: item.node().to_string(),
            landmark: item.is_landmark(),
            visibility: if tree.is_rendered(item.node()) {
                Visibility::Shown
            } else {
                Visibility::Hidden
            },
            segments: item_segments(&tree, item, &matcher),
        })
        .filter(|report| all || report.visibility.is_shown())
        .collect();

    let report = SearchReport {
        outcome: engine.last_outcome().cloned().unwrap_or_default(),
        items,
        suggestions: engine.dropdown().suggestions.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let outcome = &report.outcome;
    section_top(&format!("SEARCH \"{}\"", display::truncate(query, 40)));
    row(&format!(
        " visible {}   hidden {}   sections {}/{}   markers {}",
        display::count(outcome.visible),
        outcome.hidden,
        display::count(outcome.sections_shown),
        outcome.sections_shown + outcome.sections_hidden,
        display::count(outcome.markers)
    ));
    section_mid("ITEMS");
    for item in &report.items {
        let text = display::render_segments(&item.segments);
        row(&format!(
            " {} {} {}",
            display::visibility_badge(item.visibility),
            display::kind_badge(item.landmark),
            text
        ));
    }
    print_suggestions(&report.suggestions);
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SUGGEST
// ═══════════════════════════════════════════════════════════════════════════

fn run_suggest(page: &Path, query: &str, config: Option<&Path>, json: bool) -> Result<()> {
    let (mut tree, mut engine) = load(page, config)?;
    engine.reindex(&mut tree);
    engine.on_query_changed(&mut tree, query);
    let suggestions = &engine.dropdown().suggestions;

    if json {
        println!("{}", serde_json::to_string_pretty(suggestions)?);
        return Ok(());
    }

    section_top(&format!("SUGGEST \"{}\"", display::truncate(query, 40)));
    print_suggestions(suggestions);
    section_bot();
    Ok(())
}

fn print_suggestions(suggestions: &[Suggestion]) {
    section_mid("SUGGESTIONS");
    if suggestions.is_empty() {
        row(&display::muted(" (none)"));
    }
    for (i, suggestion) in suggestions.iter().enumerate() {
        row(&format!(
            " {:>2}. {}  {}",
            i + 1,
            display::render_segments(&suggestion.segments),
            display::muted(&suggestion.anchor.to_string())
        ));
    }
}
