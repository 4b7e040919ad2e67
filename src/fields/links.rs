//! URL-valued fields: canonical URL and breadcrumbs

use serde_json::Value;

use super::{first_some, non_blank, Page};
use crate::extractors::css_extractor::{decode_entities, element_text, own_text};
use crate::extractors::jsonld_extractor::{find_all_by_type, has_type, is_present, top_level_entries};
use crate::extractors::meta_extractor::MetaKey;
use crate::extractors::url_normalizer::normalize;
use crate::records::Breadcrumb;

const BREADCRUMB_ITEM_KEYS: [&str; 3] = ["itemListElement", "itemListElements", "itemList"];

pub fn canonical_from_og_url(page: &Page<'_>) -> Option<String> {
    normalize(page.raw_meta(MetaKey::Property("og:url")), page.document)
}

pub fn canonical_from_link(page: &Page<'_>) -> Option<String> {
    normalize(
        page.document.first_attr(r#"link[rel="canonical"]"#, "href"),
        page.document,
    )
}

pub fn canonical_from_response(page: &Page<'_>) -> Option<String> {
    Some(page.document.url().to_string())
}

fn string_at<'v>(node: &'v Value, key: &str) -> Option<&'v str> {
    node.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// `url`/`@id` of a `WebPage` or `Article` entry, or of its
/// `mainEntityOfPage`; failing that, the `url`/`@id` of any entry.
pub fn canonical_from_jsonld(page: &Page<'_>) -> Option<String> {
    let entries = top_level_entries(&page.jsonld);
    let resolve = |raw: &str| normalize(Some(raw), page.document);

    let typed = entries
        .iter()
        .filter(|entry| has_type(entry, &["WebPage", "Article"]))
        .find_map(|entry| {
            let own = ["url", "@id"].iter().find_map(|key| string_at(entry, key));
            let main_entity = || {
                let main = entry.get("mainEntityOfPage")?;
                ["@id", "url"].iter().find_map(|key| string_at(main, key))
            };
            own.or_else(main_entity).and_then(resolve)
        });

    typed.or_else(|| {
        entries.iter().find_map(|entry| {
            ["url", "@id"]
                .iter()
                .find_map(|key| string_at(entry, key))
                .and_then(resolve)
        })
    })
}

/// Numeric `position` of a list item; missing counts as 0, null is unreadable.
fn position(item: &Value) -> Option<i64> {
    match item.get("position") {
        None => Some(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}

/// Items sorted by position, or left as found when any position is unreadable.
fn sorted_by_position(items: &[Value]) -> Vec<&Value> {
    let mut items: Vec<&Value> = items.iter().filter(|item| item.is_object()).collect();
    let positions: Option<Vec<i64>> = items.iter().map(|item| position(item)).collect();

    if let Some(positions) = positions {
        let mut keyed: Vec<(i64, &Value)> = positions.into_iter().zip(items).collect();
        keyed.sort_by_key(|(pos, _)| *pos);
        items = keyed.into_iter().map(|(_, item)| item).collect();
    }
    items
}

fn item_url(item: &Value) -> Option<&str> {
    match item.get("item") {
        Some(Value::String(url)) if !url.is_empty() => Some(url.as_str()),
        Some(target @ Value::Object(_)) => ["@id", "id", "url"]
            .iter()
            .find_map(|key| string_at(target, key)),
        _ => string_at(item, "url"),
    }
}

fn jsonld_crumb(item: &Value, page: &Page<'_>) -> Breadcrumb {
    Breadcrumb {
        name: item
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| non_blank(&decode_entities(name))),
        url: normalize(item_url(item), page.document),
    }
}

/// `BreadcrumbList` items, position-sorted.
pub fn breadcrumbs_from_jsonld(page: &Page<'_>) -> Option<Vec<Breadcrumb>> {
    find_all_by_type(&page.jsonld, &["BreadcrumbList"])
        .into_iter()
        .find_map(|list| {
            let items = BREADCRUMB_ITEM_KEYS
                .iter()
                .find_map(|key| list.get(*key).filter(|v| is_present(v)))?;
            let Value::Array(items) = items else {
                return None;
            };
            let crumbs: Vec<Breadcrumb> = sorted_by_position(items)
                .into_iter()
                .map(|item| jsonld_crumb(item, page))
                .collect();
            (!crumbs.is_empty()).then_some(crumbs)
        })
}

/// Breadcrumb anchors matched by the site's selectors, first selector that
/// matches anything wins.
pub fn breadcrumbs_from_dom(page: &Page<'_>) -> Option<Vec<Breadcrumb>> {
    page.selectors.breadcrumb_links.iter().find_map(|css| {
        let links = page.document.select(css);
        if links.is_empty() {
            return None;
        }
        let crumbs: Vec<Breadcrumb> = links
            .iter()
            .map(|link| Breadcrumb {
                name: own_text(link).or_else(|| non_blank(&element_text(link))),
                url: normalize(link.value().attr("href"), page.document),
            })
            .collect();
        Some(crumbs)
    })
}

pub fn breadcrumbs(page: &Page<'_>) -> Option<Vec<Breadcrumb>> {
    first_some(page, &[breadcrumbs_from_jsonld, breadcrumbs_from_dom])
}
