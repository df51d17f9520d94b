//! Repository methods, implemented on [`crate::service::StoreService`].
//!
//! Each method is one retry-wrapped unit of work. Reads that back the public
//! storefront additionally carry the fresh-client fallback tier.

mod listing;
mod review;
mod settings;

pub use settings::HOMEPAGE_DEFAULTS;
