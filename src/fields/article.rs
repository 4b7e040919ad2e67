//! Article fields: publication dates, authors, language

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde_json::Value;

use super::{first_some, non_blank, Page, Probe};
use crate::extractors::css_extractor::collapse_whitespace;
use crate::extractors::jsonld_extractor::{find_key_map, graph_entries};
use crate::extractors::meta_extractor::MetaKey;
use crate::extractors::url_normalizer::normalize;
use crate::records::Author;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn jsonld_string(page: &Page<'_>, key: &str) -> Option<String> {
    graph_entries(&page.jsonld)
        .into_iter()
        .find_map(|entry| entry.get(key).and_then(Value::as_str).and_then(non_blank))
}

pub fn published_from_meta(page: &Page<'_>) -> Option<String> {
    page.meta(MetaKey::Property("article:published_time"))
}

pub fn published_from_jsonld(page: &Page<'_>) -> Option<String> {
    jsonld_string(page, "datePublished")
}

/// Attribute probes over the site's time elements, in configured order.
pub fn published_from_time_element(page: &Page<'_>) -> Option<String> {
    page.selectors.published_time.iter().find_map(|probe| {
        page.document
            .select(&probe.selector)
            .iter()
            .find_map(|el| el.value().attr(&probe.attr))
            .and_then(non_blank)
    })
}

pub fn modified_from_meta(page: &Page<'_>) -> Option<String> {
    page.meta(MetaKey::Property("article:modified_time"))
}

pub fn modified_from_og_updated(page: &Page<'_>) -> Option<String> {
    page.meta(MetaKey::Property("og:updated_time"))
}

/// `key` on a node, else on its @graph members, recursively.
fn graph_string(node: &Value, key: &str) -> Option<String> {
    match node {
        Value::Object(obj) => obj
            .get(key)
            .and_then(Value::as_str)
            .and_then(non_blank)
            .or_else(|| obj.get("@graph").and_then(|graph| graph_string(graph, key))),
        Value::Array(items) => items.iter().find_map(|item| graph_string(item, key)),
        _ => None,
    }
}

pub fn modified_from_jsonld(page: &Page<'_>) -> Option<String> {
    page.jsonld
        .iter()
        .find_map(|block| graph_string(block, "dateModified"))
}

pub fn date_published_raw(page: &Page<'_>) -> Option<String> {
    const CHAIN: &[Probe<String>] = &[
        published_from_meta,
        published_from_jsonld,
        published_from_time_element,
    ];
    first_some(page, CHAIN)
}

pub fn date_published(page: &Page<'_>) -> Option<String> {
    date_published_raw(page).map(|raw| normalize_date(&raw))
}

/// Modification date, or the publication date when the page never says.
pub fn date_modified_raw(page: &Page<'_>) -> Option<String> {
    const CHAIN: &[Probe<String>] = &[
        modified_from_meta,
        modified_from_og_updated,
        modified_from_jsonld,
        date_published_raw,
    ];
    first_some(page, CHAIN)
}

pub fn date_modified(page: &Page<'_>) -> Option<String> {
    date_modified_raw(page).map(|raw| normalize_date(&raw))
}

/// Re-emit a date in ISO 8601.
///
/// Offset date-times keep their offset (`Z` for UTC), naive date-times and
/// bare dates stay naive. Anything unparseable is returned trimmed.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return dt.format("%Y-%m-%dT%H:%M:%S").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }

    raw.to_string()
}

/// Author links matched by the site's selectors; the first selector that
/// yields anything wins.
pub fn authors_from_selectors(page: &Page<'_>) -> Option<Vec<Author>> {
    page.selectors.authors.iter().find_map(|css| {
        let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
        let authors: Vec<Author> = page
            .document
            .select(css)
            .iter()
            .filter_map(|el| {
                let url = normalize(el.value().attr("href"), page.document);
                let name_raw = non_blank(&el.text().collect::<String>());
                let name = name_raw
                    .as_deref()
                    .and_then(|raw| non_blank(&collapse_whitespace(raw)));
                if url.is_none() && name.is_none() {
                    return None;
                }
                seen.insert((url.clone(), name.clone())).then_some(Author {
                    email: None,
                    url,
                    name,
                    name_raw,
                })
            })
            .collect();
        (!authors.is_empty()).then_some(authors)
    })
}

pub fn authors_from_meta(page: &Page<'_>) -> Option<Vec<Author>> {
    let raw = page.meta(MetaKey::Name("author"))?;
    Some(vec![Author {
        email: None,
        url: None,
        name: non_blank(&collapse_whitespace(&raw)),
        name_raw: Some(raw),
    }])
}

pub fn authors(page: &Page<'_>) -> Option<Vec<Author>> {
    first_some(page, &[authors_from_selectors, authors_from_meta])
}

pub fn language_from_jsonld(page: &Page<'_>) -> Option<String> {
    page.jsonld.iter().find_map(|block| {
        find_key_map(block, &|key: &str| key == "inLanguage", &|value: &Value| {
            value.as_str().and_then(non_blank)
        })
    })
}

pub fn language_from_og_locale(page: &Page<'_>) -> Option<String> {
    page.meta(MetaKey::Property("og:locale"))
}

pub fn language_from_html_lang(page: &Page<'_>) -> Option<String> {
    page.document.first_attr("html", "lang").and_then(non_blank)
}

/// Primary language subtag: `pt_BR` and `pt-BR` both become `pt`.
pub fn normalize_language(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase().replace('_', "-");
    lowered.split('-').next().and_then(non_blank)
}

pub fn in_language(page: &Page<'_>) -> Option<String> {
    const CHAIN: &[Probe<String>] = &[
        language_from_jsonld,
        language_from_og_locale,
        language_from_html_lang,
    ];
    first_some(page, CHAIN).and_then(|raw| normalize_language(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::{document, page, NO_SELECTORS};
    use crate::sites::{AttrProbe, SiteSelectors};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn time_selectors() -> SiteSelectors {
        SiteSelectors {
            published_time: vec![
                AttrProbe::new("time.post-date", "data-published"),
                AttrProbe::new("time.post-date", "datetime"),
            ],
            ..SiteSelectors::default()
        }
    }

    #[rstest]
    #[case("2024-05-10T09:30:00-03:00", "2024-05-10T09:30:00-03:00")]
    #[case("2024-05-10T12:00:00+00:00", "2024-05-10T12:00:00Z")]
    #[case(" 2024-05-10T12:00:00.250Z ", "2024-05-10T12:00:00.250Z")]
    #[case("2024-05-10 09:30:00", "2024-05-10T09:30:00")]
    #[case("2024-05-10T09:30:00", "2024-05-10T09:30:00")]
    #[case("2024-05-10", "2024-05-10")]
    #[case(" 10 de maio de 2024 ", "10 de maio de 2024")]
    fn test_normalize_date(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_date(raw), expected);
    }

    #[test]
    fn test_published_meta_first() {
        let html = r#"
            <meta property="article:published_time" content=" 2024-05-10T12:00:00+00:00 ">
            <script type="application/ld+json">{"datePublished": "2020-01-01"}</script>
        "#;
        let doc = document(html);
        let page = page(&doc, &NO_SELECTORS);
        assert_eq!(
            date_published_raw(&page).as_deref(),
            Some("2024-05-10T12:00:00+00:00")
        );
        assert_eq!(date_published(&page).as_deref(), Some("2024-05-10T12:00:00Z"));
    }

    #[test]
    fn test_published_from_graph_and_time_element() {
        let html = r#"<script type="application/ld+json">{"@graph": [
            {"@type": "WebSite"},
            {"@type": "NewsArticle", "datePublished": "2024-03-01 08:00:00"}
        ]}</script>"#;
        let doc = document(html);
        assert_eq!(
            date_published(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("2024-03-01T08:00:00")
        );

        let html = r#"<time class="post-date" datetime="2024-03-02T10:00:00-03:00">2 de março</time>"#;
        let doc = document(html);
        let selectors = time_selectors();
        assert_eq!(
            date_published_raw(&page(&doc, &selectors)).as_deref(),
            Some("2024-03-02T10:00:00-03:00")
        );
        assert_eq!(date_published_raw(&page(&doc, &NO_SELECTORS)), None);
    }

    #[test]
    fn test_time_element_prefers_data_published() {
        let html = r#"<time class="post-date" datetime="2024-03-02" data-published="2024-03-01T23:00:00-03:00"></time>"#;
        let doc = document(html);
        let selectors = time_selectors();
        assert_eq!(
            published_from_time_element(&page(&doc, &selectors)).as_deref(),
            Some("2024-03-01T23:00:00-03:00")
        );
    }

    #[test]
    fn test_modified_chain() {
        let html = r#"
            <meta property="og:updated_time" content="2024-05-11T08:00:00-03:00">
            <script type="application/ld+json">{"dateModified": "2024-05-12"}</script>
        "#;
        let doc = document(html);
        assert_eq!(
            date_modified_raw(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("2024-05-11T08:00:00-03:00")
        );

        let html = r#"<script type="application/ld+json">{"@graph": [{"dateModified": "2024-05-12"}]}</script>"#;
        let doc = document(html);
        assert_eq!(
            date_modified(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("2024-05-12")
        );
    }

    #[test]
    fn test_modified_from_nested_graph() {
        let html = r#"<script type="application/ld+json">[
            {"@type": "WebSite"},
            {"@graph": [{"@graph": [{"@type": "NewsArticle", "dateModified": " 2024-05-13T07:00:00-03:00 "}]}]}
        ]</script>"#;
        let doc = document(html);
        assert_eq!(
            modified_from_jsonld(&page(&doc, &NO_SELECTORS)).as_deref(),
            Some("2024-05-13T07:00:00-03:00")
        );
    }

    #[test]
    fn test_modified_falls_back_to_published() {
        let html = r#"<meta property="article:published_time" content="2024-05-10 09:30:00">"#;
        let doc = document(html);
        let page = page(&doc, &NO_SELECTORS);
        assert_eq!(date_modified_raw(&page).as_deref(), Some("2024-05-10 09:30:00"));
        assert_eq!(date_modified(&page).as_deref(), Some("2024-05-10T09:30:00"));
    }

    #[test]
    fn test_authors_dedupe_and_skip_empty() {
        let html = r#"
            <div class="cs-meta-author">
                <a href="/author/ana/">  Ana
                    Souza </a>
                <a href="/author/ana/">Ana Souza</a>
                <a href="/author/bruno/">Bruno</a>
                <a>   </a>
            </div>
        "#;
        let doc = document(html);
        let selectors = SiteSelectors {
            authors: vec![
                ".cs-entry__author .cs-entry__author-name".to_string(),
                ".cs-meta-author a".to_string(),
            ],
            ..SiteSelectors::default()
        };

        assert_eq!(
            authors(&page(&doc, &selectors)),
            Some(vec![
                Author {
                    email: None,
                    url: Some("https://www.example.com.br/author/ana/".to_string()),
                    name: Some("Ana Souza".to_string()),
                    name_raw: Some("Ana\n                    Souza".to_string()),
                },
                Author {
                    email: None,
                    url: Some("https://www.example.com.br/author/bruno/".to_string()),
                    name: Some("Bruno".to_string()),
                    name_raw: Some("Bruno".to_string()),
                },
            ])
        );
    }

    #[test]
    fn test_authors_from_meta() {
        let doc = document(r#"<meta name="author" content=" Redação ">"#);
        assert_eq!(
            authors(&page(&doc, &NO_SELECTORS)),
            Some(vec![Author {
                email: None,
                url: None,
                name: Some("Redação".to_string()),
                name_raw: Some("Redação".to_string()),
            }])
        );
    }

    #[rstest]
    #[case("pt-BR", Some("pt"))]
    #[case("PT_br", Some("pt"))]
    #[case(" en ", Some("en"))]
    #[case("-", None)]
    fn test_normalize_language(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_language(raw).as_deref(), expected);
    }

    #[test]
    fn test_language_chain() {
        let html = r#"<html lang="en-US"><head>
            <meta property="og:locale" content="pt_BR">
            <script type="application/ld+json">{"@graph": [{"@type": "WebPage", "inLanguage": "es-ES"}]}</script>
        </head></html>"#;
        let doc = document(html);
        assert_eq!(in_language(&page(&doc, &NO_SELECTORS)).as_deref(), Some("es"));

        let doc = document(r#"<html lang="en-US"><meta property="og:locale" content="pt_BR"></html>"#);
        assert_eq!(in_language(&page(&doc, &NO_SELECTORS)).as_deref(), Some("pt"));

        let doc = document(r#"<html lang="en-US"></html>"#);
        assert_eq!(in_language(&page(&doc, &NO_SELECTORS)).as_deref(), Some("en"));
    }
}
