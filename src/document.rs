//! Parsed HTML document with its response and base URLs

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::error::{ExtractError, Result};

/// A parsed page plus the URL it was fetched from.
///
/// Relative URLs resolve against the `<base href>` when the page declares one,
/// otherwise against the response URL.
pub struct ParsedDocument {
    html: Html,
    url: Url,
    base: Url,
}

impl ParsedDocument {
    /// Parse `html` fetched from `url`.
    ///
    /// Fails only when `url` itself is not an absolute URL.
    pub fn parse(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|source| ExtractError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let html = Html::parse_document(html);
        let base = declared_base(&html, &url).unwrap_or_else(|| url.clone());

        Ok(Self { html, url, base })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// All elements matching a CSS selector, in document order.
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(err) => {
                warn!(selector = css, error = ?err, "invalid CSS selector");
                Vec::new()
            }
        }
    }

    /// Attribute of the first matching element that carries it.
    pub fn first_attr(&self, css: &str, attr: &str) -> Option<&str> {
        self.select(css)
            .into_iter()
            .find_map(|el| el.value().attr(attr))
    }

    /// Resolve a possibly relative URL against the base URL.
    pub fn urljoin(&self, raw: &str) -> Result<Url> {
        self.base.join(raw).map_err(|source| ExtractError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
    }
}

fn declared_base(html: &Html, url: &Url) -> Option<Url> {
    let selector = Selector::parse("base[href]").ok()?;
    let href = html.select(&selector).next()?.value().attr("href")?;
    url.join(href.trim()).ok()
}
