//! CLI module - Command-line interface for the series catalog
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Series catalog - series, seasons and episodes with their media files
#[derive(Parser)]
#[command(name = "series-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage series
    Series {
        #[command(subcommand)]
        command: SeriesCommands,
    },

    /// Manage seasons
    Season {
        #[command(subcommand)]
        command: SeasonCommands,
    },

    /// Manage episodes
    Episode {
        #[command(subcommand)]
        command: EpisodeCommands,
    },
}

#[derive(Subcommand)]
pub enum SeriesCommands {
    /// List series ordered by title
    #[command(alias = "ls")]
    List {
        /// Only titles containing this text
        #[arg(long)]
        search: Option<String>,
        /// Only series released in this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show a series with its seasons
    Show {
        /// Series ID or slug
        series: String,
    },
    /// Add a series
    #[command(alias = "a")]
    Add {
        /// Title
        #[arg(required = true)]
        title: Vec<String>,
        /// URL slug; derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Remove a series with all of its seasons and episodes
    #[command(alias = "rm")]
    Remove {
        /// Series ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SeasonCommands {
    /// List the seasons of a series
    #[command(alias = "ls")]
    List {
        /// Series ID
        series_id: String,
    },
    /// Add a season to a series
    #[command(alias = "a")]
    Add {
        /// Series ID
        series_id: String,
        /// Season number
        number: i32,
        /// Title; defaults to "Season {number}"
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Remove a season with all of its episodes
    #[command(alias = "rm")]
    Remove {
        /// Season ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum EpisodeCommands {
    /// List the episodes of a season
    #[command(alias = "ls")]
    List {
        /// Season ID
        season_id: String,
    },
    /// Show an episode with its series, URL and video path
    Show {
        /// Episode ID
        id: String,
    },
    /// Add an episode and copy its video into the media root
    #[command(alias = "a")]
    Add {
        /// Season ID
        season_id: String,
        /// Episode number
        number: i32,
        /// Title
        #[arg(required = true)]
        title: Vec<String>,
        /// Video file to store
        #[arg(long)]
        video: PathBuf,
        /// URL slug; derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Duration in seconds
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Remove an episode
    #[command(alias = "rm")]
    Remove {
        /// Episode ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub use commands::*;
