//! Image fields

use serde_json::Value;

use super::Page;
use crate::extractors::image_extractor::collect_dom_images;
use crate::extractors::jsonld_extractor::top_level_entries;
use crate::extractors::meta_extractor::MetaKey;
use crate::extractors::url_normalizer::normalize;
use crate::records::Image;

fn image_url(value: &Value) -> Option<&str> {
    match value {
        Value::String(url) => Some(url.as_str()),
        Value::Object(obj) => ["url", "contentUrl"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

/// `image` of the first JSON-LD entry that yields at least one URL.
pub fn images_from_jsonld(page: &Page<'_>) -> Option<Vec<Image>> {
    top_level_entries(&page.jsonld).into_iter().find_map(|entry| {
        let values: Vec<&Value> = match entry.get("image")? {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };
        let images: Vec<Image> = values
            .into_iter()
            .filter_map(image_url)
            .filter_map(|raw| normalize(Some(raw), page.document))
            .map(|url| Image { url })
            .collect();
        (!images.is_empty()).then_some(images)
    })
}

/// Page images grouped by file stem, see `image_extractor`.
pub fn images_from_dom(page: &Page<'_>) -> Option<Vec<Image>> {
    let selector = page.selectors.images.as_deref()?;
    let groups = collect_dom_images(page.document, selector);
    let images: Vec<Image> = groups
        .into_ordered()
        .into_iter()
        .map(|url| Image { url })
        .collect();
    (!images.is_empty()).then_some(images)
}

/// The `og:image` meta, normalized.
pub fn og_image(page: &Page<'_>) -> Option<Image> {
    normalize(page.raw_meta(MetaKey::Property("og:image")), page.document).map(|url| Image { url })
}

pub fn images_from_og(page: &Page<'_>) -> Option<Vec<Image>> {
    og_image(page).map(|image| vec![image])
}
