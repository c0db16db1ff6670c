//! Cursor pagination for Admin REST list endpoints.
//!
//! List responses carry a `Link` header with the adjacent pages; the cursor
//! lives in the `page_info` query parameter of the `rel="next"` URL:
//!
//! ```text
//! <https://acme.myshopify.com/admin/api/2024-01/products.json?limit=250&page_info=PREV>; rel="previous",
//! <https://acme.myshopify.com/admin/api/2024-01/products.json?limit=250&page_info=NEXT>; rel="next"
//! ```

use reqwest::Url;

/// Returns the `page_info` cursor of the `rel="next"` link, or `None` on the
/// last page (no header, no next link, or a next link without a cursor).
#[must_use]
pub fn next_page_cursor(link_header: Option<&str>) -> Option<String> {
    link_header?
        .split(',')
        .map(str::trim)
        .find(|directive| is_next_relation(directive))
        .and_then(bracketed_url)
        .and_then(|raw| Url::parse(raw).ok())
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "page_info")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|cursor| !cursor.is_empty())
}

fn is_next_relation(directive: &str) -> bool {
    directive
        .split(';')
        .skip(1)
        .map(str::trim)
        .any(|param| param == r#"rel="next""# || param == "rel=next")
}

fn bracketed_url(directive: &str) -> Option<&str> {
    let start = directive.find('<')? + 1;
    let end = directive.find('>')?;
    (start < end).then(|| &directive[start..end])
}
