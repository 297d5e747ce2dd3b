// src/nla/models.rs
use serde::{Deserialize, Serialize};

/// One staff paper as listed on the page.
///
/// Field order here is the field order of the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub url: String,
    pub authors: Vec<String>,
    pub date: String, // ISO-8601, YYYY-MM-DD
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub topics: Vec<String>,
}
