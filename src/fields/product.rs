//! Product fields: availability, brand, price, currency, identifiers

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{first_some, non_blank, Page, Probe};
use crate::extractors::css_extractor::decode_entities;
use crate::extractors::jsonld_extractor::{
    bfs_with_graph, find_all_by_type, find_key_map, graph_entries, has_type, is_present,
    top_level_entries,
};
use crate::extractors::meta_extractor::{first_meta, MetaKey};
use crate::records::{Brand, Gtin};

static PRODUCT_ID_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d+)/p/?$").expect("PRODUCT_ID_IN_URL is a valid regex"));

const IN_STOCK: &str = "InStock";
const OUT_OF_STOCK: &str = "OutOfStock";

/// Offers held by an entry: the entry itself when typed `Offer`, else its `offers`.
fn offers_of(entry: &Value) -> Vec<&Value> {
    if has_type(entry, &["Offer"]) {
        return vec![entry];
    }
    match entry.get("offers") {
        Some(Value::Array(offers)) => offers.iter().collect(),
        Some(offer) if is_present(offer) => vec![offer],
        _ => Vec::new(),
    }
}

/// `InStock` if any offer says so, otherwise `OutOfStock` if any offer says so.
pub fn availability(page: &Page<'_>) -> Option<String> {
    let mut in_stock = false;
    let mut out_of_stock = false;

    for entry in graph_entries(&page.jsonld) {
        for offer in offers_of(entry) {
            let Some(label) = offer.get("availability").and_then(Value::as_str) else {
                continue;
            };
            match label.rsplit('/').next() {
                Some(IN_STOCK) => in_stock = true,
                Some(OUT_OF_STOCK) => out_of_stock = true,
                _ => {}
            }
        }
    }

    if in_stock {
        Some(IN_STOCK.to_string())
    } else if out_of_stock {
        Some(OUT_OF_STOCK.to_string())
    } else {
        None
    }
}

fn brand_of(node: &Value) -> Option<Brand> {
    let raw = match node.get("brand")? {
        Value::String(name) => name.as_str(),
        Value::Object(brand) => brand.get("name").and_then(Value::as_str)?,
        _ => return None,
    };
    let name = non_blank(&decode_entities(raw))?;
    Some(Brand { name })
}

pub fn brand_from_product(page: &Page<'_>) -> Option<Brand> {
    find_all_by_type(&page.jsonld, &["Product"])
        .into_iter()
        .find_map(brand_of)
}

pub fn brand_from_any_entry(page: &Page<'_>) -> Option<Brand> {
    top_level_entries(&page.jsonld)
        .into_iter()
        .find_map(brand_of)
}

pub fn brand(page: &Page<'_>) -> Option<Brand> {
    first_some(page, &[brand_from_product, brand_from_any_entry])
}

/// Trim and turn a lone decimal comma into a dot.
///
/// `"1,234"` becomes `"1.234"`: a comma is only rewritten when no dot is
/// present, so thousands separators are read as decimals.
pub fn normalize_price(raw: &str) -> Option<String> {
    let price = non_blank(raw)?;
    if price.contains(',') && !price.contains('.') {
        Some(price.replace(',', "."))
    } else {
        Some(price)
    }
}

pub fn price_from_meta(page: &Page<'_>) -> Option<String> {
    page.raw_meta(MetaKey::Property("product:price:amount"))
        .and_then(normalize_price)
}

pub fn price_from_offers(page: &Page<'_>) -> Option<String> {
    top_level_entries(&page.jsonld)
        .into_iter()
        .filter(|entry| entry.get("offers").is_some_and(is_present))
        .flat_map(offers_of)
        .find_map(|offer| match offer.get("price")? {
            Value::String(s) => normalize_price(s),
            Value::Number(n) => normalize_price(&n.to_string()),
            _ => None,
        })
}

pub fn price(page: &Page<'_>) -> Option<String> {
    first_some(page, &[price_from_meta, price_from_offers])
}

const CURRENCY_METAS: [MetaKey; 2] = [
    MetaKey::Property("product:price:currency"),
    MetaKey::ItemProp("priceCurrency"),
];

pub fn currency(page: &Page<'_>) -> Option<String> {
    first_meta(page.document, &CURRENCY_METAS)
}

/// Like [`currency`], also reading `meta[name=currency]`; `-` means unset.
pub fn currency_raw(page: &Page<'_>) -> Option<String> {
    CURRENCY_METAS
        .iter()
        .chain([MetaKey::Name("currency")].iter())
        .filter_map(|key| page.meta(*key))
        .find(|value| value != "-")
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First `gtin*` value of a JSON-LD block that passes validation.
pub fn gtin(page: &Page<'_>) -> Option<Vec<Gtin>> {
    page.jsonld
        .iter()
        .find_map(|block| {
            let candidate =
                find_key_map(block, &|key: &str| key.starts_with("gtin"), &scalar_string)?;
            page.gtin.validate(&candidate)
        })
        .map(|gtin| vec![gtin])
}

/// `sku` of the first `Product` node, breadth-first through @graph.
pub fn sku(page: &Page<'_>) -> Option<String> {
    page.jsonld.iter().find_map(|block| {
        bfs_with_graph(block)
            .into_iter()
            .filter(|node| has_type(node, &["Product"]))
            .find_map(|node| match node.get("sku")? {
                Value::String(s) => non_blank(s),
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
                _ => None,
            })
    })
}

/// Trailing numeric id of `og:url`, as in `.../nome-do-produto-7513301760/p`.
pub fn product_id_from_og_url(page: &Page<'_>) -> Option<String> {
    let og_url = page.raw_meta(MetaKey::Property("og:url"))?;
    PRODUCT_ID_IN_URL
        .captures(og_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn product_id(page: &Page<'_>) -> Option<String> {
    const CHAIN: &[Probe<String>] = &[sku, product_id_from_og_url];
    first_some(page, CHAIN)
}
