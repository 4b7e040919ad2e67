//! Field resolvers
//!
//! Every output field is resolved by an ordered list of probes. A probe reads
//! one candidate source and returns `Some` only for a usable, cleaned value;
//! [`first_some`] runs the probes in order and keeps the first hit. Sites
//! compose the probes into their own chains.

pub mod article;
pub mod images;
pub mod links;
pub mod product;
pub mod text;

use serde_json::Value;

use crate::document::ParsedDocument;
use crate::extractors::gtin::GtinValidator;
use crate::extractors::jsonld_extractor::locate;
use crate::extractors::meta_extractor::{meta_content, meta_text, MetaKey};
use crate::sites::SiteSelectors;

/// Everything a probe may read for one extraction call.
pub struct Page<'a> {
    pub document: &'a ParsedDocument,
    pub jsonld: Vec<Value>,
    pub selectors: &'a SiteSelectors,
    pub gtin: &'a dyn GtinValidator,
}

impl<'a> Page<'a> {
    pub fn new(
        document: &'a ParsedDocument,
        selectors: &'a SiteSelectors,
        gtin: &'a dyn GtinValidator,
    ) -> Self {
        Self {
            document,
            jsonld: locate(document),
            selectors,
            gtin,
        }
    }

    pub fn meta(&self, key: MetaKey) -> Option<String> {
        meta_text(self.document, key)
    }

    pub fn raw_meta(&self, key: MetaKey) -> Option<&str> {
        meta_content(self.document, key)
    }
}

/// One candidate source for a field.
pub type Probe<T> = fn(&Page<'_>) -> Option<T>;

/// Run `probes` in order and return the first value found.
pub fn first_some<T>(page: &Page<'_>, probes: &[Probe<T>]) -> Option<T> {
    probes.iter().find_map(|probe| probe(page))
}

/// Trimmed copy of `text`, `None` when blank.
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
