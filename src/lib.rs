//! Rust HTML Parser for structured page records
//!
//! Turns a fetched page of a supported site into a typed record:
//! - americanas.com.br product pages → `Product`
//! - casasbahia.com.br listings → `ProductList`
//! - macmagazine.com.br posts → `Article`
//!
//! Sources are JSON-LD (with @graph support), meta tags and site-specific CSS
//! selectors, each field falling back through them in a fixed order. A C ABI
//! is exported for embedding the parser in a host crawler.

pub mod document;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod fields;
pub mod records;
pub mod sites;

pub use document::ParsedDocument;
pub use error::{ExtractError, Result};
pub use ffi::*;
pub use records::*;
pub use sites::{extract, extract_html, extract_with, Site, SiteSelectors};
