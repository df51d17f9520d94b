//! Command-line surface for `fxw`.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fxw", about = "Fixwell back office", version)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe the store, rebuilding the connection once if needed.
    Health,
    /// Install default settings and demo content on a fresh store.
    Seed,
    /// Manage marketplace listings.
    Listing {
        #[command(subcommand)]
        action: ListingCommands,
    },
    /// Moderate customer reviews.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Edit site content key/value settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListingCommands {
    /// Create a draft listing.
    Add {
        title: String,
        #[arg(long)]
        category: String,
        /// Price in whole currency units, e.g. 275.00.
        #[arg(long)]
        price: f64,
        /// like_new | good | fair | for_parts
        #[arg(long, default_value = "good")]
        condition: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List listings, optionally by status (active | sold | draft | archived).
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one listing as JSON.
    Show { id: String },
    /// Move a listing to a new status.
    SetStatus { id: String, status: String },
    /// Toggle carousel placement.
    Feature {
        id: String,
        #[arg(long)]
        off: bool,
    },
    /// Delete a listing.
    Rm { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommands {
    /// Record a review (manual entry).
    Add {
        author: String,
        #[arg(long)]
        rating: i64,
        #[arg(long)]
        body: String,
    },
    /// List reviews; `--published` hides the moderation queue.
    List {
        #[arg(long)]
        published: bool,
    },
    /// Publish a review.
    Publish { id: String },
    /// Unpublish a review.
    Unpublish { id: String },
    /// Delete a review.
    Rm { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print one setting's value.
    Get { key: String },
    /// Upsert a setting.
    Set { key: String, value: String },
    /// List all settings.
    List,
    /// Remove a setting.
    Rm { key: String },
}
