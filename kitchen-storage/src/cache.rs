//! TTL read cache over chef rows.
//!
//! Roster resolution during cookoff prep reads the same chefs
//! repeatedly; this cache bounds the staleness of those reads instead of
//! hitting the database every time. Entries expire after a fixed TTL and
//! are refreshed from the store on the next read.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use kitchen_core::{Chef, ChefId, StorageError};

struct CachedChef {
    chef: Chef,
    cached_at: Instant,
}

/// A bounded-staleness cache keyed by chef id.
pub struct ChefCache {
    ttl: Duration,
    entries: Mutex<HashMap<ChefId, CachedChef>>,
}

impl ChefCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached chef if present and younger than the TTL.
    /// Expired entries are evicted on the way out.
    pub fn get(&self, id: ChefId) -> Result<Option<Chef>, StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        match entries.get(&id) {
            Some(entry) if entry.cached_at.elapsed() < self.ttl => Ok(Some(entry.chef.clone())),
            Some(_) => {
                entries.remove(&id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub fn put(&self, chef: Chef) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(
            chef.id,
            CachedChef {
                chef,
                cached_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Read through: serve from cache when fresh, otherwise call `fetch`
    /// and cache its result.
    pub fn get_or_fetch<F>(&self, id: ChefId, fetch: F) -> Result<Chef, StorageError>
    where
        F: FnOnce() -> Result<Chef, StorageError>,
    {
        if let Some(chef) = self.get(id)? {
            tracing::debug!(chef_id = id, "chef cache hit");
            return Ok(chef);
        }
        tracing::debug!(chef_id = id, "chef cache miss, fetching from store");
        let chef = fetch()?;
        self.put(chef.clone())?;
        Ok(chef)
    }

    /// Drop a single entry (after a mutation of that chef).
    pub fn invalidate(&self, id: ChefId) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.remove(&id);
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }
}
