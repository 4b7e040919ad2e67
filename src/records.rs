//! Output records
//!
//! Every field is independently optional and serializes as `null` when no
//! source resolved it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gtin {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub email: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub name_raw: Option<String>,
}

/// Product detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub url: String,
    pub availability: Option<String>,
    pub brand: Option<Brand>,
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
    pub canonical_url: Option<String>,
    pub currency: Option<String>,
    pub currency_raw: Option<String>,
    pub description: Option<String>,
    pub gtin: Option<Vec<Gtin>>,
    pub images: Option<Vec<Image>>,
    pub main_image: Option<Image>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub product_id: Option<String>,
    pub sku: Option<String>,
}

/// Category or search listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    pub url: String,
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
    pub category_name: Option<String>,
}

/// News or blog article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub headline: Option<String>,
    pub date_published: Option<String>,
    pub date_published_raw: Option<String>,
    pub date_modified: Option<String>,
    pub date_modified_raw: Option<String>,
    pub authors: Option<Vec<Author>>,
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
    pub in_language: Option<String>,
    pub main_image: Option<Image>,
    pub images: Option<Vec<Image>>,
    pub description: Option<String>,
    pub article_body: Option<String>,
    pub canonical_url: Option<String>,
}

/// The record produced for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Product(Product),
    ProductList(ProductList),
    Article(Article),
}

impl ExtractionResult {
    pub fn url(&self) -> &str {
        match self {
            ExtractionResult::Product(p) => &p.url,
            ExtractionResult::ProductList(p) => &p.url,
            ExtractionResult::Article(a) => &a.url,
        }
    }
}
