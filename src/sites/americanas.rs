//! americanas.com.br product pages
//!
//! Everything comes from JSON-LD and meta tags; the DOM is never queried.

use std::sync::LazyLock;

use super::SiteSelectors;
use crate::fields::images::{images_from_jsonld, images_from_og, og_image};
use crate::fields::links::{
    breadcrumbs, canonical_from_link, canonical_from_og_url, canonical_from_response,
};
use crate::fields::product::{
    availability, brand, currency, currency_raw, gtin, price, product_id, sku,
};
use crate::fields::text::{
    description_from_meta_text, description_from_og_text, description_from_product, name,
};
use crate::fields::{first_some, Page};
use crate::records::{Image, Product};

pub static SELECTORS: LazyLock<SiteSelectors> = LazyLock::new(SiteSelectors::default);

fn images(page: &Page<'_>) -> Option<Vec<Image>> {
    first_some(page, &[images_from_jsonld, images_from_og])
}

fn main_image(page: &Page<'_>) -> Option<Image> {
    images(page)
        .and_then(|images| images.into_iter().next())
        .or_else(|| og_image(page))
}

pub fn product(page: &Page<'_>) -> Product {
    Product {
        url: page.document.url().to_string(),
        availability: availability(page),
        brand: brand(page),
        breadcrumbs: breadcrumbs(page),
        canonical_url: first_some(
            page,
            &[canonical_from_og_url, canonical_from_link, canonical_from_response],
        ),
        currency: currency(page),
        currency_raw: currency_raw(page),
        description: first_some(
            page,
            &[
                description_from_product,
                description_from_meta_text,
                description_from_og_text,
            ],
        ),
        gtin: gtin(page),
        images: images(page),
        main_image: main_image(page),
        name: name(page),
        price: price(page),
        product_id: product_id(page),
        sku: sku(page),
    }
}
