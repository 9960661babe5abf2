//! Terminal presentation layer: form validation, search matching and
//! plain-text rendering for the catalog commands.

pub mod form;
pub mod render;

use crate::core::catalog::Product;

/// Route parameters arrive as text. An id that does not parse is treated
/// exactly like an id with no product behind it.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Case-insensitive substring match against a product's title or
/// description. An empty term matches everything.
pub fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.title.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// The list page's two controls: an optional search term and a
/// favorites-only switch. Order is preserved.
pub fn filter_products<'a>(
    items: &'a [Product],
    term: &str,
    favorites_only: bool,
) -> Vec<&'a Product> {
    items
        .iter()
        .filter(|p| !favorites_only || p.is_liked)
        .filter(|p| matches_search(p, term))
        .collect()
}
