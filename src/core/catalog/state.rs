use log::warn;

use crate::core::catalog::product::Product;

/// The store's held value: the product collection plus the last seed-fetch
/// failure. The in-flight flag lives next to the lock, not in here, so an
/// abandoned fetch can clear it without reacquiring the state.
#[derive(Debug, Default)]
pub(super) struct CatalogState {
    pub items: Vec<Product>,
    pub error: Option<String>,
}

impl CatalogState {
    pub fn with_items(items: Vec<Product>) -> Self {
        Self { items, error: None }
    }

    pub fn snapshot(&self, loading: bool) -> CatalogSnapshot {
        CatalogSnapshot {
            items: self.items.clone(),
            loading,
            error: self.error.clone(),
        }
    }
}

/// Owned copy of the catalog state, handed to the view layer for rendering.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub items: Vec<Product>,
    /// True only while the seed fetch is in flight.
    pub loading: bool,
    /// Human-readable seed-fetch failure, if the last fetch failed.
    pub error: Option<String>,
}

/// Decode slot contents into a collection. Absent or unreadable contents are
/// an empty catalog, never an error; corruption is logged and discarded.
pub(super) fn decode_slot(contents: Option<&str>) -> Vec<Product> {
    match contents {
        Some(raw) => match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("Discarding unreadable catalog slot contents: {e}");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

pub(super) fn encode_slot(items: &[Product]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}
