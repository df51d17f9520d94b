//! Entity ID prefixes.
//!
//! Every row gets a prefixed 8-char hex ID (e.g., `lst-a3f8b2c1`), generated
//! server-side by the database layer.

/// Used-appliance listing.
pub const LISTING: &str = "lst";

/// Customer review.
pub const REVIEW: &str = "rev";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[LISTING, REVIEW];

/// Check whether an ID carries the given prefix and a plausible hex tail.
#[must_use]
pub fn is_valid_id(id: &str, prefix: &str) -> bool {
    let Some(tail) = id.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')) else {
        return false;
    };
    tail.len() == 8 && tail.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_id_accepted() {
        assert!(is_valid_id("lst-a3f8b2c1", LISTING));
        assert!(is_valid_id("rev-00000000", REVIEW));
    }

    #[test]
    fn invalid_ids_rejected() {
        assert!(!is_valid_id("lst-xyz", LISTING));
        assert!(!is_valid_id("rev-a3f8b2c1", LISTING));
        assert!(!is_valid_id("lsta3f8b2c1", LISTING));
        assert!(!is_valid_id("lst-a3f8b2c1ff", LISTING));
    }
}
