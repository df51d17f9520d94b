use anyhow::Context;
use fixwell_core::entities::ListingDraft;
use fixwell_core::errors::CoreError;
use fixwell_db::StoreService;

use crate::cli::ListingCommands;

use super::{first_page, parse_keyword};

#[allow(clippy::cast_possible_truncation)]
fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub async fn run(
    service: &StoreService,
    action: &ListingCommands,
    page_size: u32,
) -> anyhow::Result<()> {
    match action {
        ListingCommands::Add {
            title,
            category,
            price,
            condition,
            brand,
            description,
        } => {
            let draft = ListingDraft {
                title: title.clone(),
                description: description.clone(),
                brand: brand.clone(),
                category: category.clone(),
                condition: parse_keyword(condition)?,
                price_cents: to_cents(*price),
                image_url: None,
            };
            let listing = service.create_listing(&draft).await?;
            println!("{} created as draft", listing.id);
        }
        ListingCommands::List { status } => {
            let status = status.as_deref().map(parse_keyword).transpose()?;
            let listings = service.list_listings(status).await?;
            let (page, rest) = first_page(&listings, page_size);
            for listing in page {
                println!(
                    "{}  {:<9}  {:>5}.{:02}  {}",
                    listing.id,
                    listing.status.as_str(),
                    listing.price_cents / 100,
                    listing.price_cents % 100,
                    listing.title
                );
            }
            if rest > 0 {
                println!("{} listing(s), {rest} more not shown", listings.len());
            } else {
                println!("{} listing(s)", listings.len());
            }
        }
        ListingCommands::Show { id } => {
            let listing = service
                .get_listing(id)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity_type: "listing".into(),
                    id: id.clone(),
                })?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        ListingCommands::SetStatus { id, status } => {
            service
                .set_listing_status(id, parse_keyword(status)?)
                .await
                .with_context(|| format!("no listing with id '{id}'"))?;
            println!("{id} -> {status}");
        }
        ListingCommands::Feature { id, off } => {
            service
                .set_listing_featured(id, !off)
                .await
                .with_context(|| format!("no listing with id '{id}'"))?;
            println!(
                "{id} {} the carousel",
                if *off { "removed from" } else { "added to" }
            );
        }
        ListingCommands::Rm { id } => {
            if service.delete_listing(id).await? {
                println!("{id} deleted");
            } else {
                println!("{id} not found");
            }
        }
    }
    Ok(())
}
