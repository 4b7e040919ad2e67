//! casasbahia.com.br category and search listings

use std::sync::LazyLock;

use super::SiteSelectors;
use crate::fields::links::breadcrumbs;
use crate::fields::text::category_name;
use crate::fields::Page;
use crate::records::ProductList;

pub static SELECTORS: LazyLock<SiteSelectors> = LazyLock::new(|| SiteSelectors {
    breadcrumb_links: vec![
        r#"div.dsvia-breadcrumb[data-testid="categorias-breadcrumb"] a"#.to_string(),
        "div.dsvia-breadcrumb a".to_string(),
    ],
    category_name: vec![r#"h1[class*="TermSearch"]"#.to_string(), "h1".to_string()],
    ..SiteSelectors::default()
});

pub fn product_list(page: &Page<'_>) -> ProductList {
    ProductList {
        url: page.document.url().to_string(),
        breadcrumbs: breadcrumbs(page),
        category_name: category_name(page),
    }
}

#[cfg(test)]
mod tests {
    use crate::document::ParsedDocument;
    use crate::records::{Breadcrumb, ExtractionResult, ProductList};
    use crate::sites::{extract, Site};
    use pretty_assertions::assert_eq;

    const URL: &str = "https://www.casasbahia.com.br/eletrodomesticos/geladeiras/b";

    fn extract_list(html: &str) -> ProductList {
        let document = ParsedDocument::parse(html, URL).unwrap();
        match extract(Site::CasasBahia, &document) {
            ExtractionResult::ProductList(list) => list,
            other => panic!("expected a product list, got {other:?}"),
        }
    }

    fn crumb(name: &str, url: &str) -> Breadcrumb {
        Breadcrumb {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn test_category_page() {
        let html = r#"<html><body>
            <div class="dsvia-breadcrumb" data-testid="outro-breadcrumb">
                <a href="/ignored">Ignorado</a>
            </div>
            <div class="dsvia-breadcrumb" data-testid="categorias-breadcrumb">
                <a href="https://www.casasbahia.com.br/">Casas Bahia</a>
                <a href="/eletrodomesticos/b?filtro=d1&amp;ordem=1"> Eletrodomésticos </a>
                <a href="/eletrodomesticos/geladeiras/b">Geladeiras</a>
            </div>
            <h1 class="Title">Outro título</h1>
            <h1 class="css-1x2y TermSearch-title">
                Geladeiras
            </h1>
        </body></html>"#;

        assert_eq!(
            extract_list(html),
            ProductList {
                url: URL.to_string(),
                breadcrumbs: Some(vec![
                    crumb("Casas Bahia", "https://www.casasbahia.com.br/"),
                    crumb(
                        "Eletrodomésticos",
                        "https://www.casasbahia.com.br/eletrodomesticos/b?filtro=d1&ordem=1"
                    ),
                    crumb(
                        "Geladeiras",
                        "https://www.casasbahia.com.br/eletrodomesticos/geladeiras/b"
                    ),
                ]),
                category_name: Some("Geladeiras".to_string()),
            }
        );
    }

    #[test]
    fn test_generic_breadcrumb_and_plain_heading() {
        let html = r#"<html><body>
            <div class="dsvia-breadcrumb">
                <a href="/">Home</a>
                <a href="/busca/fogao">Busca</a>
            </div>
            <h1>  fogão 4 bocas  </h1>
        </body></html>"#;
        let list = extract_list(html);

        assert_eq!(
            list.breadcrumbs,
            Some(vec![
                crumb("Home", "https://www.casasbahia.com.br/"),
                crumb("Busca", "https://www.casasbahia.com.br/busca/fogao"),
            ])
        );
        assert_eq!(list.category_name.as_deref(), Some("fogão 4 bocas"));
    }

    #[test]
    fn test_empty_listing() {
        let list = extract_list("<html><body><p>Nada aqui</p></body></html>");
        assert_eq!(list.url, URL);
        assert_eq!(list.breadcrumbs, None);
        assert_eq!(list.category_name, None);
    }
}
