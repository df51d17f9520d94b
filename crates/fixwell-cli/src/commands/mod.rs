//! Subcommand implementations. Each module takes the shared [`StoreService`]
//! and prints human-readable output; JSON where a structure is worth piping.

use fixwell_config::FixwellConfig;
use fixwell_db::StoreService;

use crate::cli::Commands;

mod health;
mod listing;
mod review;
mod seed;
mod settings;

pub async fn dispatch(
    command: &Commands,
    service: &StoreService,
    config: &FixwellConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Health => health::run(service).await,
        Commands::Seed => seed::run(service, config).await,
        Commands::Listing { action } => listing::run(service, action, config.site.page_size).await,
        Commands::Review { action } => review::run(service, action, config.site.page_size).await,
        Commands::Settings { action } => settings::run(service, action).await,
    }
}

/// First `page_size` items plus the count left unprinted. A `page_size` of
/// zero means no limit.
fn first_page<T>(items: &[T], page_size: u32) -> (&[T], usize) {
    let limit = if page_size == 0 {
        items.len()
    } else {
        (page_size as usize).min(items.len())
    };
    (&items[..limit], items.len() - limit)
}

/// Parse a lowercase keyword (e.g. `good`, `for_parts`) into one of the
/// snake_case-serialized domain enums.
fn parse_keyword<T: serde::de::DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| anyhow::anyhow!("unrecognized value '{raw}'"))
}
