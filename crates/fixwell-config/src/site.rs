//! Site-level configuration: business identity and storefront defaults.

use serde::{Deserialize, Serialize};

/// Default page size for back-office listings.
const fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Business display name, used by the seed command.
    #[serde(default = "default_business_name")]
    pub business_name: String,

    /// Contact phone shown on the site; seeded into site settings.
    #[serde(default)]
    pub contact_phone: String,

    /// Default page size for list commands.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_business_name() -> String {
    "Fixwell Appliance Repair".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            contact_phone: String::new(),
            page_size: default_page_size(),
        }
    }
}
