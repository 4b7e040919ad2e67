//! Image candidate discovery and grouping
//!
//! Pages serve one picture in several sizes and formats (`srcset`, lazy-load
//! `data-*` attributes, `<picture>` sources). Candidates are grouped by file
//! stem with the `-<w>x<h>` size suffix removed, and each group is emitted
//! preferred format first, unsized file first.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::url_normalizer::{is_data_url, normalize};
use crate::document::ParsedDocument;

static SIZE_BEFORE_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+x\d+\.").expect("SIZE_BEFORE_DOT is a valid regex"));
static SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+x\d+(?:[.?]|$)").expect("SIZE_SUFFIX is a valid regex"));
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-zA-Z0-9]+)(?:$|\?)").expect("EXTENSION is a valid regex"));

const PREFERRED_EXTENSIONS: [&str; 6] = ["avif", "jpg", "jpeg", "png", "webp", "gif"];

/// Attributes read from non-`<source>` elements, in priority order.
const IMAGE_ATTRS: [&str; 7] = [
    "data-orig-file",
    "data-large-file",
    "data-medium-file",
    "data-src",
    "data-srcset",
    "srcset",
    "src",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub group_key: String,
    pub extension: String,
}

impl ImageCandidate {
    pub fn new(url: String) -> Self {
        Self {
            group_key: group_key(&url),
            extension: extension(&url),
            url,
        }
    }
}

/// Filename stem without size suffix: `.../photo-300x200.jpg` -> `photo`.
pub fn group_key(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    let filename = path.rsplit('/').next().unwrap_or_default();
    let unsized_name = SIZE_BEFORE_DOT.replace_all(filename, ".");
    unsized_name
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Lowercased file extension, empty when the URL has none.
pub fn extension(url: &str) -> String {
    EXTENSION
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn has_size_suffix(url: &str) -> bool {
    SIZE_SUFFIX.is_match(url)
}

/// URLs of a `srcset` value: the first token of each comma-separated entry.
pub fn srcset_urls(srcset: &str) -> Vec<&str> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .collect()
}

/// Candidates bucketed by group key and extension.
#[derive(Debug, Default)]
pub struct ImageGroups {
    order: Vec<String>,
    buckets: HashMap<String, HashMap<String, Vec<String>>>,
}

impl ImageGroups {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn add(&mut self, candidate: ImageCandidate) {
        if !self.buckets.contains_key(&candidate.group_key) {
            self.order.push(candidate.group_key.clone());
        }
        let group = self.buckets.entry(candidate.group_key).or_default();
        let urls = group.entry(candidate.extension).or_default();
        if !urls.contains(&candidate.url) {
            urls.push(candidate.url);
        }
    }

    /// Normalize a raw attribute value and add it when it survives.
    pub fn add_raw(&mut self, raw: &str, document: &ParsedDocument) {
        if let Some(url) = normalize(Some(raw), document) {
            self.add(ImageCandidate::new(url));
        }
    }

    /// Flatten into the final ordering.
    pub fn into_ordered(mut self) -> Vec<String> {
        let mut images = Vec::new();

        for key in &self.order {
            let Some(mut by_ext) = self.buckets.remove(key) else {
                continue;
            };

            for ext in PREFERRED_EXTENSIONS {
                if let Some(urls) = by_ext.remove(ext) {
                    images.extend(unsized_first(urls));
                }
            }

            let mut rest: Vec<(String, Vec<String>)> = by_ext.into_iter().collect();
            rest.sort_by(|a, b| a.0.cmp(&b.0));
            for (_, urls) in rest {
                images.extend(unsized_first(urls));
            }
        }

        images
    }
}

fn unsized_first(urls: Vec<String>) -> Vec<String> {
    let (sized, mut plain): (Vec<String>, Vec<String>) =
        urls.into_iter().partition(|u| has_size_suffix(u));
    plain.extend(sized);
    plain
}

/// Gather candidates from every element matched by `selector`.
///
/// `<source>` elements contribute their `srcset` (or `data-srcset`); other
/// elements contribute every lazy-load and `src` attribute they carry.
pub fn collect_dom_images(document: &ParsedDocument, selector: &str) -> ImageGroups {
    let mut groups = ImageGroups::default();

    for element in document.select(selector) {
        let attrs = element.value();

        if attrs.name() == "source" {
            let srcset = attrs
                .attr("srcset")
                .filter(|s| !s.is_empty())
                .or_else(|| attrs.attr("data-srcset"))
                .unwrap_or_default();
            for url in srcset_urls(srcset) {
                groups.add_raw(url, document);
            }
            continue;
        }

        for name in IMAGE_ATTRS {
            let Some(value) = attrs.attr(name).filter(|v| !v.is_empty()) else {
                continue;
            };
            if is_data_url(value.trim_start()) {
                continue;
            }
            if value.contains(',') {
                for url in srcset_urls(value) {
                    groups.add_raw(url, document);
                }
            } else {
                groups.add_raw(value, document);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(html: &str) -> ParsedDocument {
        ParsedDocument::parse(html, "https://macmagazine.com.br/post/").unwrap()
    }

    #[test]
    fn test_group_key_and_extension() {
        let url = "https://cdn.example.com/uploads/photo-300x200.jpg?ver=2";
        assert_eq!(group_key(url), "photo");
        assert_eq!(extension(url), "jpg");
        assert!(has_size_suffix(url));

        assert_eq!(group_key("https://cdn.example.com/a/photo.webp"), "photo");
        assert_eq!(extension("https://cdn.example.com/a/photo"), "");
        assert!(!has_size_suffix("https://cdn.example.com/a/photo.JPG"));
        assert_eq!(extension("https://cdn.example.com/a/photo.JPG"), "jpg");
    }

    #[test]
    fn test_srcset_urls() {
        let srcset = " a-300x200.jpg 300w, b.jpg 2x ,, c.webp";
        assert_eq!(srcset_urls(srcset), vec!["a-300x200.jpg", "b.jpg", "c.webp"]);
    }

    #[test]
    fn test_sized_variants_collapse_unsized_first() {
        let mut groups = ImageGroups::default();
        for url in [
            "https://x.com/photo-300x200.jpg",
            "https://x.com/photo-600x400.jpg",
            "https://x.com/photo.jpg",
        ] {
            groups.add(ImageCandidate::new(url.to_string()));
        }

        assert_eq!(
            groups.into_ordered(),
            vec![
                "https://x.com/photo.jpg",
                "https://x.com/photo-300x200.jpg",
                "https://x.com/photo-600x400.jpg",
            ]
        );
    }

    #[test]
    fn test_extension_preference_and_group_order() {
        let mut groups = ImageGroups::default();
        for url in [
            "https://x.com/b.webp",
            "https://x.com/a.tiff",
            "https://x.com/a.bmp",
            "https://x.com/a.webp",
            "https://x.com/a.jpg",
            "https://x.com/b.avif",
            "https://x.com/a.jpg",
        ] {
            groups.add(ImageCandidate::new(url.to_string()));
        }

        assert_eq!(
            groups.into_ordered(),
            vec![
                "https://x.com/b.avif",
                "https://x.com/b.webp",
                "https://x.com/a.jpg",
                "https://x.com/a.webp",
                "https://x.com/a.bmp",
                "https://x.com/a.tiff",
            ]
        );
    }

    #[test]
    fn test_collect_dom_images() {
        let html = r#"
        <figure class="wp-block-image">
            <picture>
                <source srcset="/img/cover.avif 1x, /img/cover-300x200.avif 300w">
                <img src="/img/cover-1024x768.jpg"
                     data-orig-file="/img/cover.jpg"
                     srcset="/img/cover-300x200.jpg 300w, /img/cover-1024x768.jpg 1024w">
            </picture>
        </figure>
        <img src="data:image/gif;base64,R0lGOD" data-src="/img/other.png">
        "#;
        let doc = doc(html);
        let images = collect_dom_images(&doc, "picture source, picture img, img").into_ordered();

        assert_eq!(
            images,
            vec![
                "https://macmagazine.com.br/img/cover.avif",
                "https://macmagazine.com.br/img/cover-300x200.avif",
                "https://macmagazine.com.br/img/cover.jpg",
                "https://macmagazine.com.br/img/cover-300x200.jpg",
                "https://macmagazine.com.br/img/cover-1024x768.jpg",
                "https://macmagazine.com.br/img/other.png",
            ]
        );
    }
}
