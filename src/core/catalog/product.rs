use serde::{Deserialize, Serialize};

/// One catalog entry.
///
/// The serde layout doubles as the durable slot format: `isLiked` is the only
/// locally-owned field and defaults to `false` so slot contents written before
/// the flag existed (and remote payloads, which never carry it) still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
    #[serde(skip)]
    pub(super) _guard: (),
}

/// Input for creating a product: everything except the id and the like flag,
/// which the store assigns.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}
