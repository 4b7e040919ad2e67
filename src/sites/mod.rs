//! Site profiles
//!
//! A profile is a table of site-specific CSS selectors plus the composition
//! of field resolvers into the record the site produces. Selector tables are
//! plain data: they deserialize from JSON so hosts can ship overrides without
//! rebuilding.

pub mod americanas;
pub mod casasbahia;
pub mod macmagazine;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::document::ParsedDocument;
use crate::error::{ExtractError, Result};
use crate::extractors::gtin::{ChecksumGtin, GtinValidator};
use crate::fields::Page;
use crate::records::ExtractionResult;

/// Read `attr` from the first element matching `selector`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrProbe {
    pub selector: String,
    pub attr: String,
}

impl AttrProbe {
    pub fn new(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attr: attr.to_string(),
        }
    }
}

/// Site-specific selectors read by the DOM probes.
///
/// Lists are tried in order; an empty list (or `images: None`) disables the
/// probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub breadcrumb_links: Vec<String>,
    pub headline: Vec<String>,
    pub category_name: Vec<String>,
    pub authors: Vec<String>,
    /// One selector list (comma-joined) so candidates keep document order.
    pub images: Option<String>,
    pub article_body: Vec<String>,
    pub published_time: Vec<AttrProbe>,
}

/// Supported sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Americanas,
    CasasBahia,
    MacMagazine,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::Americanas, Site::CasasBahia, Site::MacMagazine];

    pub fn id(self) -> &'static str {
        match self {
            Site::Americanas => "americanas",
            Site::CasasBahia => "casasbahia",
            Site::MacMagazine => "macmagazine",
        }
    }

    pub fn host(self) -> &'static str {
        match self {
            Site::Americanas => "americanas.com.br",
            Site::CasasBahia => "casasbahia.com.br",
            Site::MacMagazine => "macmagazine.com.br",
        }
    }

    pub fn default_selectors(self) -> &'static SiteSelectors {
        match self {
            Site::Americanas => &americanas::SELECTORS,
            Site::CasasBahia => &casasbahia::SELECTORS,
            Site::MacMagazine => &macmagazine::SELECTORS,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Accepts a site id (`"americanas"`) or its host, with or without `www.`.
impl FromStr for Site {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("www.").unwrap_or(&key);
        Site::ALL
            .into_iter()
            .find(|site| site.id() == key || site.host() == key)
            .ok_or_else(|| ExtractError::UnknownSite(s.to_string()))
    }
}

/// Extract the site's record with its default selectors.
pub fn extract(site: Site, document: &ParsedDocument) -> ExtractionResult {
    extract_with(site, document, site.default_selectors(), &ChecksumGtin)
}

/// Extract the site's record with caller-provided selectors and validator.
pub fn extract_with(
    site: Site,
    document: &ParsedDocument,
    selectors: &SiteSelectors,
    gtin: &dyn GtinValidator,
) -> ExtractionResult {
    let span = debug_span!("extract", site = %site, url = %document.url());
    let _guard = span.enter();

    let page = Page::new(document, selectors, gtin);
    debug!(blocks = page.jsonld.len(), "located JSON-LD blocks");

    match site {
        Site::Americanas => ExtractionResult::Product(americanas::product(&page)),
        Site::CasasBahia => ExtractionResult::ProductList(casasbahia::product_list(&page)),
        Site::MacMagazine => ExtractionResult::Article(macmagazine::article(&page)),
    }
}

/// Parse `html` fetched from `url` and extract the site's record.
pub fn extract_html(site: Site, html: &str, url: &str) -> Result<ExtractionResult> {
    let document = ParsedDocument::parse(html, url)?;
    Ok(extract(site, &document))
}
