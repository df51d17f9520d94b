use fixwell_config::FixwellConfig;
use fixwell_db::StoreService;
use tracing::info;

pub async fn run(service: &StoreService, config: &FixwellConfig) -> anyhow::Result<()> {
    let report = service.seed(&config.site.contact_phone).await?;
    info!(
        settings = report.settings_added,
        listings = report.listings_added,
        reviews = report.reviews_added,
        "seed finished"
    );
    println!(
        "seeded {}: {} settings, {} listings, {} reviews added",
        config.site.business_name,
        report.settings_added,
        report.listings_added,
        report.reviews_added
    );
    Ok(())
}
