mod product;
mod remote;
mod state;
mod storage;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use time::OffsetDateTime;
use tokio::sync::RwLock;

use state::CatalogState;

pub use product::{NewProduct, Product};
pub use remote::{DEFAULT_ENDPOINT, HttpSeed, RemoteProduct, SeedSource};
pub use state::CatalogSnapshot;
pub use storage::{FileSlot, MemorySlot, SlotStorage};

/// Locally generated ids start here, clear of the small fixture ids the demo
/// API hands out.
pub const LOCAL_ID_FLOOR: i64 = 1000;

/// Single owner of the product collection.
///
/// Every mutation rewrites the whole collection to the durable slot before it
/// returns, so slot and memory never diverge after a completed operation. The
/// seed fetch issued by [`CatalogStore::load`] is the only network access in
/// the system.
pub struct CatalogStore<S, R> {
    storage: S,
    remote: R,
    loading: AtomicBool,
    state: RwLock<CatalogState>,
}

/// Guard tracking the in-flight seed fetch. Raised when the fetch starts
/// and cleared on drop, so a caller that abandons `load()` mid-fetch
/// cannot leave the flag stuck with nothing in flight.
struct LoadingFlag<'a>(&'a AtomicBool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: SlotStorage, R: SeedSource> CatalogStore<S, R> {
    /// Open the store, restoring the collection from the durable slot.
    /// A missing or unreadable slot is an empty catalog, never an error.
    pub async fn open(storage: S, remote: R) -> Self {
        let items = match storage.get().await {
            Ok(contents) => state::decode_slot(contents.as_deref()),
            Err(e) => {
                warn!("Failed to read catalog slot, starting empty: {e:#}");
                Vec::new()
            }
        };
        debug!("Opened catalog with {} product(s)", items.len());
        Self {
            storage,
            remote,
            loading: AtomicBool::new(false),
            state: RwLock::new(CatalogState::with_items(items)),
        }
    }

    /// Current state, for rendering.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state
            .read()
            .await
            .snapshot(self.loading.load(Ordering::SeqCst))
    }

    /// Seed the catalog from the remote source if it is empty.
    ///
    /// A non-empty collection is authoritative: it is returned as-is and the
    /// network is never consulted. Otherwise one fetch runs; on success the
    /// fetched items arrive tagged not-liked and the collection is persisted,
    /// on failure the error lands in the snapshot and the collection keeps
    /// its last-known-good contents. Safe to call repeatedly, and safe to
    /// abandon: dropping the returned future cancels the fetch and clears
    /// the loading flag, and a later call starts over.
    pub async fn load(&self) -> CatalogSnapshot {
        {
            let mut state = self.state.write().await;
            if !state.items.is_empty() {
                return state.snapshot(self.loading.load(Ordering::SeqCst));
            }
            state.error = None;
        }

        // The write lock is not held while the fetch is in flight, so local
        // mutations keep working; whatever they add is merged below rather
        // than overwritten.
        let in_flight = LoadingFlag::raise(&self.loading);
        let fetched = self.remote.fetch().await;
        drop(in_flight);

        let mut state = self.state.write().await;
        match fetched {
            Ok(remote_items) => {
                let known: HashSet<i64> = state.items.iter().map(|p| p.id).collect();
                let fresh = remote_items
                    .into_iter()
                    .filter(|r| !known.contains(&r.id))
                    .map(RemoteProduct::into_product);
                state.items.extend(fresh);
                state.error = None;
                debug!("Seeded catalog, now {} product(s)", state.items.len());
                self.persist(&state.items).await;
            }
            Err(e) => {
                warn!("Seed fetch failed: {e:#}");
                state.error = Some(format!("Failed to fetch products: {e:#}"));
            }
        }
        state.snapshot(self.loading.load(Ordering::SeqCst))
    }

    /// Add a user-created product at the front of the collection and return
    /// it with its assigned id.
    pub async fn create(&self, fields: NewProduct) -> Product {
        let mut state = self.state.write().await;
        let product = Product {
            id: next_local_id(&state.items),
            title: fields.title,
            description: fields.description,
            price: fields.price,
            image: fields.image,
            category: fields.category,
            is_liked: false,
            _guard: (),
        };
        debug!("Creating product {}", product.id);
        state.items.insert(0, product.clone());
        self.persist(&state.items).await;
        product
    }

    /// Replace the record with the matching id in place, preserving its
    /// position. Returns `false` when the id is unknown; nothing is written
    /// then.
    pub async fn update(&self, product: Product) -> bool {
        let mut state = self.state.write().await;
        let Some(index) = state.items.iter().position(|p| p.id == product.id) else {
            debug!("Update for unknown product {}", product.id);
            return false;
        };
        state.items[index] = product;
        self.persist(&state.items).await;
        true
    }

    /// Remove every entry with the given id (at most one in practice).
    /// Returns whether anything matched.
    pub async fn delete(&self, id: i64) -> bool {
        let mut state = self.state.write().await;
        let before = state.items.len();
        state.items.retain(|p| p.id != id);
        if state.items.len() == before {
            debug!("Delete for unknown product {id}");
            return false;
        }
        self.persist(&state.items).await;
        true
    }

    /// Flip the like flag of the matching product and return the new value,
    /// or `None` when the id is unknown.
    pub async fn toggle_like(&self, id: i64) -> Option<bool> {
        let mut state = self.state.write().await;
        let item = state.items.iter_mut().find(|p| p.id == id)?;
        item.is_liked = !item.is_liked;
        let flag = item.is_liked;
        self.persist(&state.items).await;
        Some(flag)
    }

    /// Write the whole collection to the durable slot. Failures are logged
    /// and swallowed; memory stays correct for the rest of the process.
    async fn persist(&self, items: &[Product]) {
        match state::encode_slot(items) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(&raw).await {
                    warn!("Failed to persist catalog: {e:#}");
                }
            }
            Err(e) => warn!("Failed to serialize catalog: {e}"),
        }
    }
}

/// `max(1000, now in milliseconds)`, bumped past the current maximum id so
/// that two creates inside the same millisecond cannot collide. The bump
/// saturates: a hand-edited slot can hold an id at the integer ceiling.
fn next_local_id(items: &[Product]) -> i64 {
    let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let candidate = LOCAL_ID_FLOOR.max(now_ms);
    match items.iter().map(|p| p.id).max() {
        Some(max_id) if max_id >= candidate => max_id.saturating_add(1),
        _ => candidate,
    }
}
