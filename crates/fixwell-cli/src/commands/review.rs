use anyhow::Context;
use fixwell_core::entities::ReviewDraft;
use fixwell_core::enums::ReviewSource;
use fixwell_core::errors::CoreError;
use fixwell_db::StoreService;

use crate::cli::ReviewCommands;

use super::first_page;

pub async fn run(
    service: &StoreService,
    action: &ReviewCommands,
    page_size: u32,
) -> anyhow::Result<()> {
    match action {
        ReviewCommands::Add {
            author,
            rating,
            body,
        } => {
            if !(1..=5).contains(rating) {
                return Err(CoreError::Validation(format!(
                    "rating must be between 1 and 5, got {rating}"
                ))
                .into());
            }
            let draft = ReviewDraft {
                author: author.clone(),
                rating: *rating,
                body: body.clone(),
                source: ReviewSource::Manual,
            };
            let review = service.create_review(&draft).await?;
            println!("{} recorded (unpublished)", review.id);
        }
        ReviewCommands::List { published } => {
            let reviews = service.list_reviews(*published).await?;
            let (page, rest) = first_page(&reviews, page_size);
            for review in page {
                println!(
                    "{}  {}★  {}  {}  {}",
                    review.id,
                    review.rating,
                    if review.published { "live " } else { "queue" },
                    review.author,
                    review.body
                );
            }
            if rest > 0 {
                println!("{} review(s), {rest} more not shown", reviews.len());
            } else {
                println!("{} review(s)", reviews.len());
            }
        }
        ReviewCommands::Publish { id } => {
            service
                .set_review_published(id, true)
                .await
                .with_context(|| format!("no review with id '{id}'"))?;
            println!("{id} published");
        }
        ReviewCommands::Unpublish { id } => {
            service
                .set_review_published(id, false)
                .await
                .with_context(|| format!("no review with id '{id}'"))?;
            println!("{id} unpublished");
        }
        ReviewCommands::Rm { id } => {
            if service.delete_review(id).await? {
                println!("{id} deleted");
            } else {
                println!("{id} not found");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn out_of_range_rating_is_a_validation_error() {
        let svc = StoreService::open_local(":memory:").await.unwrap();
        let action = ReviewCommands::Add {
            author: "A. Tester".into(),
            rating: 6,
            body: "too enthusiastic".into(),
        };

        let error = run(&svc, &action, 20).await.unwrap_err();
        let core = error.downcast_ref::<CoreError>();
        assert!(matches!(core, Some(CoreError::Validation(_))), "{error}");
        // Nothing reaches the store.
        assert!(svc.list_reviews(false).await.unwrap().is_empty());
    }
}
