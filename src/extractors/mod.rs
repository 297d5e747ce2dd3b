// src/extractors/mod.rs
pub mod papers;

// Re-export key extraction types for convenience
pub use papers::{ListingMarkers, PaperExtractor};
