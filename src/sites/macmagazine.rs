//! macmagazine.com.br articles

use std::sync::LazyLock;

use super::{AttrProbe, SiteSelectors};
use crate::fields::article::{
    authors, date_modified, date_modified_raw, date_published, date_published_raw, in_language,
};
use crate::fields::images::{images_from_dom, images_from_og, og_image};
use crate::fields::links::{breadcrumbs, canonical_from_jsonld, canonical_from_link, canonical_from_og_url};
use crate::fields::text::{body, description_from_metas, headline};
use crate::fields::{first_some, Page};
use crate::records::{Article, Image};

pub static SELECTORS: LazyLock<SiteSelectors> = LazyLock::new(|| SiteSelectors {
    headline: vec![
        "h1.cs-entry__title span".to_string(),
        "h1.cs-entry__title".to_string(),
        "h1".to_string(),
        "title".to_string(),
    ],
    authors: vec![
        ".cs-entry__author .cs-entry__author-name".to_string(),
        ".cs-meta-author a.cs-meta-author-inner".to_string(),
        ".cs-meta-author a".to_string(),
    ],
    images: Some(
        [
            "picture source",
            "picture img",
            "figure.cs-entry__post-media source",
            "figure.cs-entry__post-media img",
            "figure.wp-block-image source",
            "figure.wp-block-image img",
            ".entry-content source",
            ".entry-content img",
        ]
        .join(", "),
    ),
    article_body: vec!["div.entry-content".to_string()],
    published_time: vec![
        AttrProbe::new("time.post-date", "data-published"),
        AttrProbe::new("time.post-date", "datetime"),
    ],
    ..SiteSelectors::default()
});

fn images(page: &Page<'_>) -> Option<Vec<Image>> {
    first_some(page, &[images_from_dom, images_from_og])
}

fn main_image(page: &Page<'_>) -> Option<Image> {
    images(page)
        .and_then(|images| images.into_iter().next())
        .or_else(|| og_image(page))
}

pub fn article(page: &Page<'_>) -> Article {
    Article {
        url: page.document.url().to_string(),
        headline: headline(page),
        date_published: date_published(page),
        date_published_raw: date_published_raw(page),
        date_modified: date_modified(page),
        date_modified_raw: date_modified_raw(page),
        authors: authors(page),
        breadcrumbs: breadcrumbs(page),
        in_language: in_language(page),
        main_image: main_image(page),
        images: images(page),
        description: description_from_metas(page),
        article_body: body(page),
        canonical_url: first_some(
            page,
            &[canonical_from_link, canonical_from_og_url, canonical_from_jsonld],
        ),
    }
}
