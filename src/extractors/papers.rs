// src/extractors/papers.rs

// --- Imports ---
use crate::nla::models::PaperRecord;
use crate::utils::error::{DateError, ExtractError, PaperField};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- Constants ---
// Dates on the listing look like "12 March 2021". English month names only.
const SOURCE_DATE_FORMAT: &str = "%d %B %Y";
const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

// --- CSS Selectors (Lazy Static) ---
static LISTING_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li").expect("Failed to compile LISTING_ITEM_SELECTOR")
});

// First heading-level element inside a listing carries the title and link
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("Failed to compile HEADING_SELECTOR")
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a").expect("Failed to compile LINK_SELECTOR")
});

// The text-bearing span nested inside author/topic/date blocks
static FIELD_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.field-content").expect("Failed to compile FIELD_CONTENT_SELECTOR")
});

// --- Data Structures ---

/// Class-attribute substrings that identify each part of the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingMarkers {
    pub results: String,
    pub authors: String,
    pub topics: String,
    pub abstract_text: String,
    pub pubdate: String,
}

impl Default for ListingMarkers {
    fn default() -> Self {
        Self {
            results: "search-results".to_string(),
            authors: "paper-author".to_string(),
            topics: "paper-topics".to_string(),
            abstract_text: "paper-abstract".to_string(),
            pubdate: "paper-pubdate".to_string(),
        }
    }
}

struct MarkerSelectors {
    results: Selector,
    authors: Selector,
    topics: Selector,
    abstract_text: Selector,
    pubdate: Selector,
}

impl MarkerSelectors {
    fn compile(markers: &ListingMarkers) -> Result<Self, ExtractError> {
        Ok(Self {
            results: class_contains(&markers.results)?,
            authors: class_contains(&markers.authors)?,
            topics: class_contains(&markers.topics)?,
            abstract_text: class_contains(&markers.abstract_text)?,
            pubdate: class_contains(&markers.pubdate)?,
        })
    }
}

/// Builds a selector matching any element whose class attribute contains `marker`.
fn class_contains(marker: &str) -> Result<Selector, ExtractError> {
    let invalid = |reason: String| ExtractError::Selector {
        marker: marker.to_string(),
        reason,
    };

    if marker.is_empty() {
        return Err(invalid("marker is empty".to_string()));
    }
    if marker.contains(['"', '\\']) {
        return Err(invalid("marker may not contain quotes or backslashes".to_string()));
    }

    let css = format!("[class*=\"{}\"]", marker);
    Selector::parse(&css).map_err(|e| invalid(e.to_string()))
}

// --- Pure Helpers ---

/// Splits a comma-delimited blob and trims each piece. Empty pieces are kept.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(',').map(|piece| piece.trim().to_string()).collect()
}

/// Reformats a "DD Month YYYY" date as ISO-8601 (`YYYY-MM-DD`).
///
/// Day is 1-2 digits, month a full English name (any case), year exactly
/// 4 digits, separated by whitespace. chrono alone also takes abbreviated
/// months, short years and missing separators, so the shape is checked first.
pub fn normalize_date(raw: &str) -> Result<String, DateError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let [day, month, year] = tokens.as_slice() else {
        return Err(DateError::Shape);
    };

    let day_ok = (1..=2).contains(&day.len()) && day.bytes().all(|b| b.is_ascii_digit());
    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    let month = MONTH_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(month))
        .ok_or(DateError::Shape)?;
    if !day_ok || !year_ok {
        return Err(DateError::Shape);
    }

    let normalized = format!("{} {} {}", day, month, year);
    let date = NaiveDate::parse_from_str(&normalized, SOURCE_DATE_FORMAT)?;
    Ok(date.format(OUTPUT_DATE_FORMAT).to_string())
}

fn field_error(index: usize, field: PaperField, reason: impl Into<String>) -> ExtractError {
    ExtractError::Field {
        index,
        field,
        reason: reason.into(),
    }
}

// --- Main Extractor Structure ---

/// Turns a parsed staff-papers listing into paper records.
///
/// Holds no state besides its configuration; every method is a pure read of
/// the document it is given.
pub struct PaperExtractor {
    site_origin: String,
    markers: ListingMarkers,
    selectors: MarkerSelectors,
}

impl PaperExtractor {
    pub fn new(site_origin: &str, markers: ListingMarkers) -> Result<Self, ExtractError> {
        let selectors = MarkerSelectors::compile(&markers)?;
        Ok(Self {
            site_origin: site_origin.trim_end_matches('/').to_string(),
            markers,
            selectors,
        })
    }

    /// Parses raw markup and runs the extraction pipeline over it.
    pub fn extract_from_html(&self, html_content: &str) -> Result<Vec<PaperRecord>, ExtractError> {
        let document = Html::parse_document(html_content);
        self.extract_papers(&document)
    }

    /// Extracts one record per listing node, in document order.
    ///
    /// The first malformed listing aborts the whole extraction; no partial
    /// result is returned.
    pub fn extract_papers(&self, document: &Html) -> Result<Vec<PaperRecord>, ExtractError> {
        let nodes = self.locate_nodes(document)?;
        tracing::info!("Found {} paper listings", nodes.len());

        let papers = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| self.node_to_record(node, index))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Extracted {} paper records", papers.len());
        Ok(papers)
    }

    /// Finds the results container and returns every `li` inside it.
    pub fn locate_nodes<'a>(&self, document: &'a Html) -> Result<Vec<ElementRef<'a>>, ExtractError> {
        let container = document
            .select(&self.selectors.results)
            .next()
            .ok_or_else(|| {
                tracing::error!("Results container '{}' missing from page", self.markers.results);
                ExtractError::Structure {
                    marker: self.markers.results.clone(),
                }
            })?;

        tracing::trace!("Results container is <{}>", container.value().name());
        Ok(container.select(&LISTING_ITEM_SELECTOR).collect())
    }

    /// Assembles a single record from one listing node. `index` is the node's
    /// position among the located listings and is only used in errors.
    pub fn node_to_record(&self, node: ElementRef<'_>, index: usize) -> Result<PaperRecord, ExtractError> {
        let heading = node
            .select(&HEADING_SELECTOR)
            .next()
            .ok_or_else(|| field_error(index, PaperField::Title, "no heading element in listing"))?;
        let title: String = heading.text().collect();

        let link = heading
            .select(&LINK_SELECTOR)
            .next()
            .ok_or_else(|| field_error(index, PaperField::Url, "no link inside heading"))?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| field_error(index, PaperField::Url, "heading link has no href"))?;
        let url = format!("{}{}", self.site_origin, href);

        let record = PaperRecord {
            title,
            url,
            authors: self.extract_authors(node, index)?,
            date: self.extract_date(node, index)?,
            abstract_text: self.extract_abstract(node, index)?,
            topics: self.extract_topics(node, index)?,
        };

        tracing::debug!("Paper #{}: '{}' ({})", index, record.title, record.date);
        Ok(record)
    }

    fn extract_authors(&self, node: ElementRef<'_>, index: usize) -> Result<Vec<String>, ExtractError> {
        let raw = field_content(node, &self.selectors.authors, index, PaperField::Authors)?;
        Ok(split_delimited(&raw))
    }

    fn extract_topics(&self, node: ElementRef<'_>, index: usize) -> Result<Vec<String>, ExtractError> {
        let raw = field_content(node, &self.selectors.topics, index, PaperField::Topics)?;
        Ok(split_delimited(&raw))
    }

    fn extract_abstract(&self, node: ElementRef<'_>, index: usize) -> Result<String, ExtractError> {
        let block = marked_block(node, &self.selectors.abstract_text, index, PaperField::Abstract)?;
        Ok(block.text().collect::<String>().trim().to_string())
    }

    fn extract_date(&self, node: ElementRef<'_>, index: usize) -> Result<String, ExtractError> {
        let raw = field_content(node, &self.selectors.pubdate, index, PaperField::Date)?;
        normalize_date(&raw).map_err(|e| {
            field_error(
                index,
                PaperField::Date,
                format!("'{}' is not a 'DD Month YYYY' date: {}", raw.trim(), e),
            )
        })
    }
}

fn marked_block<'a>(
    node: ElementRef<'a>,
    marker: &Selector,
    index: usize,
    field: PaperField,
) -> Result<ElementRef<'a>, ExtractError> {
    node.select(marker)
        .next()
        .ok_or_else(|| field_error(index, field, "marker element not found"))
}

/// Text of the `span.field-content` inside the marked block.
fn field_content(
    node: ElementRef<'_>,
    marker: &Selector,
    index: usize,
    field: PaperField,
) -> Result<String, ExtractError> {
    let block = marked_block(node, marker, index, field)?;
    let span = block
        .select(&FIELD_CONTENT_SELECTOR)
        .next()
        .ok_or_else(|| field_error(index, field, "no span.field-content inside marker element"))?;
    Ok(span.text().collect())
}
