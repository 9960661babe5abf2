#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shopkeep for tests
pub use shopkeep::core::catalog::{
    CatalogSnapshot, CatalogStore, FileSlot, LOCAL_ID_FLOOR, MemorySlot, NewProduct, Product,
    RemoteProduct, SeedSource, SlotStorage,
};
