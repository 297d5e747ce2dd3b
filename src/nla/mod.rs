// src/nla/mod.rs
pub mod client;
pub mod models;

/// The staff-papers listing scraped when no `--url` is given.
pub const DEFAULT_LISTING_URL: &str = "https://www.nla.gov.au/our-publications/staff-papers";

/// Scheme and host prepended to the relative links found in each listing.
pub const SITE_ORIGIN: &str = "https://www.nla.gov.au";
