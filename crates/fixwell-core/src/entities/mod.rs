//! Entity structs for all Fixwell domain records.
//!
//! These are plain rows. Field presence is the only invariant; everything
//! interesting about this system lives in the data-access layer, not here.

mod listing;
mod review;
mod setting;

pub use listing::{Listing, ListingDraft};
pub use review::{Review, ReviewDraft};
pub use setting::SiteSetting;
