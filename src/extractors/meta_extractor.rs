//! Meta tag lookup
//!
//! OpenGraph (`property="og:*"`), product/article namespaces, plain
//! `name=` metas and microdata `itemprop=` metas.

use crate::document::ParsedDocument;

/// Which attribute identifies a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Property(&'static str),
    Name(&'static str),
    ItemProp(&'static str),
}

impl MetaKey {
    fn selector(self) -> String {
        let (attr, value) = match self {
            MetaKey::Property(v) => ("property", v),
            MetaKey::Name(v) => ("name", v),
            MetaKey::ItemProp(v) => ("itemprop", v),
        };
        format!(r#"meta[{attr}="{value}"]"#)
    }
}

/// Raw `content` of the first matching meta tag that has one.
pub fn meta_content(document: &ParsedDocument, key: MetaKey) -> Option<&str> {
    document.first_attr(&key.selector(), "content")
}

/// Trimmed `content`, `None` when missing or blank.
pub fn meta_text(document: &ParsedDocument, key: MetaKey) -> Option<String> {
    meta_content(document, key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// First of `keys` with a non-blank `content`.
pub fn first_meta(document: &ParsedDocument, keys: &[MetaKey]) -> Option<String> {
    keys.iter().find_map(|key| meta_text(document, *key))
}
