//! HTML extraction primitives
//!
//! Each module reads one kind of source out of a parsed page: JSON-LD blocks,
//! meta tags, element text, URLs and image candidates. They know nothing
//! about sites or output records.

pub mod css_extractor;
pub mod gtin;
pub mod image_extractor;
pub mod jsonld_extractor;
pub mod meta_extractor;
pub mod url_normalizer;
