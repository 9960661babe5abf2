pub mod core;
pub mod view;

pub use crate::core::catalog::{
    CatalogSnapshot, CatalogStore, DEFAULT_ENDPOINT, FileSlot, HttpSeed, MemorySlot, NewProduct,
    Product, SeedSource, SlotStorage,
};
