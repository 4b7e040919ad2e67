//! CSS selector-based text extraction
//!
//! Uses the scraper crate to pull own text, full text and article bodies out
//! of selected elements.

use scraper::{ElementRef, Html, Node};

use crate::document::ParsedDocument;

const TEXT_BLOCKS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote"];
const LIST_BLOCKS: &[&str] = &["ul", "ol"];
const BREAKING_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "tr",
    "td", "th", "section", "article", "table",
];

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode HTML character references (`&amp;`, `&#233;`, ...).
///
/// Markup is left alone: `a<b` stays `a<b`.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Visible text of an HTML snippet, tags stripped and whitespace collapsed.
///
/// Block-level elements start a new word so adjacent paragraphs don't run
/// together.
pub fn html_to_text(snippet: &str) -> String {
    let fragment = Html::parse_fragment(snippet);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if BREAKING_TAGS.contains(&el.name()) => text.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

/// First non-blank text node that is a direct child of `element`, trimmed.
pub fn own_text(element: &ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(String::from)
}

/// All descendant text, whitespace collapsed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Own text of the first element matched by the first selector that yields one.
pub fn first_own_text(document: &ParsedDocument, selectors: &[String]) -> Option<String> {
    selectors.iter().find_map(|css| {
        document
            .select(css)
            .iter()
            .find_map(|element| own_text(element))
    })
}

/// Text blocks of every matched container, one line per block.
///
/// Direct `p`, heading and `blockquote` children become one line each; a
/// `ul`/`ol` child becomes one line of its items joined by spaces.
pub fn article_body(document: &ParsedDocument, containers: &[String]) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for css in containers {
        for container in document.select(css) {
            for child in container.children().filter_map(ElementRef::wrap) {
                let tag = child.value().name();
                let text = if LIST_BLOCKS.contains(&tag) {
                    list_text(&child)
                } else if TEXT_BLOCKS.contains(&tag) {
                    element_text(&child)
                } else {
                    continue;
                };
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn list_text(list: &ElementRef<'_>) -> String {
    list.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(|li| element_text(&li))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
