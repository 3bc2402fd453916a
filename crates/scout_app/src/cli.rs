use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scout_core::{
    DatePosted, Filters, JobTypeFilter, ListingId, LocationType, PageSize, Query, SavedSort,
};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Debug, Parser)]
#[command(name = "scout")]
#[command(about = "Search remote job listings and keep a list of saved jobs")]
#[command(version)]
pub struct Cli {
    /// Path to the RON config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Country code sent with every search (overrides config)
    #[arg(long, global = true)]
    pub country: Option<String>,

    /// Directory holding saved jobs (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one search and print the accumulated listings
    Search(SearchArgs),

    /// List saved jobs
    Saved {
        /// Sort order: date, company or title
        #[arg(long, default_value = "date")]
        sort: SavedSort,
    },

    /// Fetch a listing by id and add it to the saved jobs
    SaveId {
        id: ListingId,
    },

    /// Remove a listing from the saved jobs
    Unsave {
        id: ListingId,
    },

    /// Interactive session
    Shell,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search words; empty uses the configured default term
    pub term: Vec<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// any, full-time, part-time, internship, contract
    #[arg(long, default_value = "any")]
    pub job_type: JobTypeFilter,

    /// all, today, 3days, week, month
    #[arg(long, default_value = "all")]
    pub date_posted: DatePosted,

    /// any, remote, onsite, hybrid
    #[arg(long, default_value = "any")]
    pub location_type: LocationType,

    /// Results per request in tens (1-4)
    #[arg(long, default_value = "1")]
    pub page_size: PageSize,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

impl SearchArgs {
    pub fn to_query(&self) -> Query {
        let query = Query::new(self.term.join(" ")).with_filters(Filters {
            job_type: self.job_type,
            date_posted: self.date_posted,
            location_type: self.location_type,
            page_size: self.page_size,
        });
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => query.with_location(location),
            _ => query,
        }
    }
}
