use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, oneshot};

use shopkeep::core::catalog::{CatalogStore, MemorySlot, NewProduct, Product, RemoteProduct};
use shopkeep::{SeedSource, SlotStorage};

/// Seed source serving a fixed payload. Counts how often it is asked, so
/// tests can assert the network is consulted exactly when it should be.
#[derive(Clone, Default)]
pub struct StaticSeed {
    products: Vec<RemoteProduct>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl StaticSeed {
    pub fn with_products(products: Vec<RemoteProduct>) -> Self {
        Self {
            products,
            ..Default::default()
        }
    }

    /// A seed source whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SeedSource for StaticSeed {
    async fn fetch(&self) -> anyhow::Result<Vec<RemoteProduct>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.products.clone())
    }
}

/// Seed source that parks every fetch until the test fires the gate,
/// keeping the fetch in flight for as long as the test needs.
pub struct GatedSeed {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    products: Vec<RemoteProduct>,
}

impl GatedSeed {
    pub fn new(products: Vec<RemoteProduct>) -> (Self, oneshot::Sender<()>) {
        let (open, gate) = oneshot::channel();
        let seed = Self {
            gate: Mutex::new(Some(gate)),
            products,
        };
        (seed, open)
    }
}

impl SeedSource for GatedSeed {
    async fn fetch(&self) -> anyhow::Result<Vec<RemoteProduct>> {
        let gate = self.gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self.products.clone())
    }
}

/// Creates a remote payload entry with recognizable test data.
pub fn remote_product(id: i64, title: &str) -> RemoteProduct {
    RemoteProduct {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        price: 9.99,
        image: format!("https://img.example/{id}.png"),
        category: "electronics".to_string(),
    }
}

/// Creates a NewProduct with test data.
pub fn make_fields(title: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: format!("{title} description"),
        price: 42.5,
        image: "https://img.example/new.png".to_string(),
        category: "handmade".to_string(),
    }
}

/// Creates a store over a fresh in-memory slot, seeded with `count` remote
/// products (ids 1..=count) via one completed load. Returns the slot and
/// seed handles for inspection; the seed's call count is already 1.
pub async fn seeded_store(
    count: usize,
) -> (CatalogStore<MemorySlot, StaticSeed>, MemorySlot, StaticSeed) {
    let products = (1..=count)
        .map(|i| remote_product(i as i64, &format!("Product {i}")))
        .collect();
    let slot = MemorySlot::new();
    let seed = StaticSeed::with_products(products);
    let store = CatalogStore::open(slot.clone(), seed.clone()).await;
    store.load().await;
    (store, slot, seed)
}

/// Decodes whatever the store last persisted into the slot.
pub async fn slot_items(slot: &MemorySlot) -> Vec<Product> {
    let raw = slot
        .get()
        .await
        .expect("Failed to read memory slot")
        .expect("Slot should have been written");
    serde_json::from_str(&raw).expect("Slot contents should decode")
}
