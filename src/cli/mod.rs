// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the glint command-line interface.
//!
//! Three subcommands over a JSON page description: `inspect` to list what
//! the indexer finds, `search` to run a query end to end (visibility,
//! highlights, suggestions), and `suggest` for the dropdown alone. Handy for
//! checking selectors against a real page before wiring the engine into a UI.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glint",
    about = "In-page content search: filter, highlight and suggest",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the index built from a page
    Inspect {
        /// Page description (JSON)
        page: PathBuf,

        /// Engine configuration (JSON); defaults to the portfolio layout
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run a query and show what stays visible
    Search {
        /// Page description (JSON)
        page: PathBuf,

        /// Search query
        query: String,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Also list hidden items
        #[arg(long)]
        all: bool,
    },

    /// Show the suggestion dropdown for a query
    Suggest {
        /// Page description (JSON)
        page: PathBuf,

        /// Search query
        query: String,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}
