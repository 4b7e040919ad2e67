//! Text fields: names, headings, descriptions, article body

use serde_json::Value;

use super::{first_some, non_blank, Page};
use crate::extractors::css_extractor::{article_body, decode_entities, first_own_text, html_to_text};
use crate::extractors::jsonld_extractor::{has_type, top_level_entries};
use crate::extractors::meta_extractor::{first_meta, MetaKey};

fn meta_as_text(page: &Page<'_>, key: MetaKey) -> Option<String> {
    page.raw_meta(key).and_then(|raw| non_blank(&html_to_text(raw)))
}

pub fn name_from_og_title(page: &Page<'_>) -> Option<String> {
    meta_as_text(page, MetaKey::Property("og:title"))
}

pub fn name_from_jsonld(page: &Page<'_>) -> Option<String> {
    top_level_entries(&page.jsonld)
        .into_iter()
        .find_map(|entry| {
            entry
                .get("name")
                .and_then(Value::as_str)
                .and_then(|name| non_blank(&decode_entities(name)))
        })
}

pub fn name(page: &Page<'_>) -> Option<String> {
    first_some(page, &[name_from_og_title, name_from_jsonld])
}

pub fn headline(page: &Page<'_>) -> Option<String> {
    first_own_text(page.document, &page.selectors.headline)
}

pub fn category_name(page: &Page<'_>) -> Option<String> {
    first_own_text(page.document, &page.selectors.category_name)
}

pub fn description_from_product(page: &Page<'_>) -> Option<String> {
    top_level_entries(&page.jsonld)
        .into_iter()
        .filter(|entry| has_type(entry, &["Product"]))
        .find_map(|entry| {
            entry
                .get("description")
                .and_then(Value::as_str)
                .and_then(|desc| non_blank(&html_to_text(desc)))
        })
}

pub fn description_from_meta_text(page: &Page<'_>) -> Option<String> {
    meta_as_text(page, MetaKey::Name("description"))
}

pub fn description_from_og_text(page: &Page<'_>) -> Option<String> {
    meta_as_text(page, MetaKey::Property("og:description"))
}

const DESCRIPTION_METAS: [MetaKey; 3] = [
    MetaKey::Name("description"),
    MetaKey::Property("og:description"),
    MetaKey::ItemProp("description"),
];

/// First description meta, entity-decoded.
pub fn description_from_metas(page: &Page<'_>) -> Option<String> {
    first_meta(page.document, &DESCRIPTION_METAS)
        .and_then(|desc| non_blank(&decode_entities(&desc)))
}

pub fn body(page: &Page<'_>) -> Option<String> {
    article_body(page.document, &page.selectors.article_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::{document, page, NO_SELECTORS};

    #[test]
    fn test_name_chain() {
        let html = r#"
            <meta property="og:title" content="  ">
            <script type="application/ld+json">[{"@type": "BreadcrumbList"}, {"@type": "Product", "name": " Sofá 3 Lugares "}]</script>
        "#;
        let doc = document(html);
        assert_eq!(
            name(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("Sofá 3 Lugares")
        );
    }

    #[test]
    fn test_jsonld_name_is_entity_decoded() {
        let html = r#"<script type="application/ld+json">{"@type": "Product", "name": "Sofá &amp; Cia"}</script>"#;
        let doc = document(html);
        assert_eq!(name(&page(&doc, &NO_SELECTORS)).as_deref(), Some("Sofá & Cia"));
    }

    #[test]
    fn test_product_description_is_plain_text() {
        let html = r#"
            <meta name="description" content="Meta description">
            <script type="application/ld+json">{"@type": "Product", "description": "<p>Ar   condicionado</p><p>8.500 BTUs</p>"}</script>
        "#;
        let doc = document(html);
        let page = page(&doc, &NO_SELECTORS);
        assert_eq!(
            description_from_product(&page).as_deref(),
            Some("Ar condicionado 8.500 BTUs")
        );
        assert_eq!(description_from_meta_text(&page).as_deref(), Some("Meta description"));
    }

    #[test]
    fn test_description_from_metas() {
        let html = r#"
            <meta property="og:description" content="Apple lança &amp;quot;iPhone&amp;quot;">
            <meta itemprop="description" content="ignored">
        "#;
        let doc = document(html);
        assert_eq!(
            description_from_metas(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("Apple lança \"iPhone\"")
        );
    }
}
