//! URL normalization shared by every URL-valued field

use tracing::debug;

use super::css_extractor::decode_entities;
use crate::document::ParsedDocument;

/// Absolute form of `raw`, or `None` for blank, `data:` or unjoinable input.
pub fn normalize(raw: Option<&str>, document: &ParsedDocument) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let decoded = decode_entities(raw);
    let candidate = decoded.trim();

    if candidate.is_empty() || is_data_url(candidate) {
        return None;
    }

    match document.urljoin(candidate) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            debug!(error = %err, "dropping unjoinable url");
            None
        }
    }
}

pub(crate) fn is_data_url(candidate: &str) -> bool {
    candidate
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc() -> ParsedDocument {
        ParsedDocument::parse("<html></html>", "https://a.com/dir/page.html").unwrap()
    }

    #[rstest]
    #[case::data_url("data:image/png;base64,xxx", None)]
    #[case::data_url_upper("  DATA:image/gif;base64,R0l", None)]
    #[case::empty("", None)]
    #[case::blank("   ", None)]
    #[case::protocol_relative("//x", Some("https://x/"))]
    #[case::relative("img/a.jpg", Some("https://a.com/dir/img/a.jpg"))]
    #[case::root_relative("/p/1", Some("https://a.com/p/1"))]
    #[case::entities(
        "https://cdn.a.com/i.jpg?w=10&amp;h=20",
        Some("https://cdn.a.com/i.jpg?w=10&h=20")
    )]
    #[case::unjoinable("http://[::1", None)]
    fn test_normalize(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize(Some(raw), &doc()).as_deref(), expected);
    }

    #[test]
    fn test_normalize_none() {
        assert_eq!(normalize(None, &doc()), None);
    }
}
