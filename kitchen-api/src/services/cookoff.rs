//! Kitchen roster and cookoff engine.
//!
//! The kitchen is an in-memory roster of chef ids. Chefs enter ahead of a
//! cookoff; the cookoff scores every chef present, draws a winner from
//! the cumulative skill distribution, records one win and the losses,
//! and empties the kitchen.

use std::sync::Mutex;
use std::time::Duration;

use kitchen_core::{
    cookoff_skill, Chef, ChefId, CookoffError, CookoffResult, Cuisine, KitchenError, StorageError,
};
use kitchen_storage::{ChefCache, ChefStore};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

/// Outcome of a cookoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CookoffSummary {
    pub cuisine: Cuisine,
    /// The winning chef with stats already updated.
    pub winner: Chef,
    /// How many chefs took part.
    pub participants: usize,
}

// ============================================================================
// KITCHEN
// ============================================================================

/// Roster of chefs preparing for a cookoff.
pub struct Kitchen {
    capacity: usize,
    roster: Mutex<Vec<ChefId>>,
    cache: ChefCache,
    chefs: ChefStore,
}

impl Kitchen {
    pub fn new(chefs: ChefStore, capacity: usize, cache_ttl: Duration) -> Self {
        Self {
            capacity,
            roster: Mutex::new(Vec::new()),
            cache: ChefCache::new(cache_ttl),
            chefs,
        }
    }

    fn lock_roster(&self) -> Result<std::sync::MutexGuard<'_, Vec<ChefId>>, KitchenError> {
        self.roster
            .lock()
            .map_err(|_| KitchenError::Storage(StorageError::LockPoisoned))
    }

    /// Add a chef to the roster. The chef must exist; the roster is
    /// bounded by the kitchen capacity and rejects duplicates.
    pub fn enter(&self, chef_id: ChefId) -> Result<Chef, KitchenError> {
        // Verify existence first so an unknown id is a 404, not a roster
        // mutation.
        let chef = self.chefs.get(chef_id)?;

        let mut roster = self.lock_roster()?;
        if roster.len() >= self.capacity {
            tracing::error!(chef_id, "kitchen is full, cannot add chef");
            return Err(CookoffError::KitchenFull {
                capacity: self.capacity,
            }
            .into());
        }
        if roster.contains(&chef_id) {
            return Err(CookoffError::AlreadyEntered { chef_id }.into());
        }

        roster.push(chef_id);
        self.cache.put(chef.clone())?;
        tracing::info!(chef_id, name = %chef.name, "chef entered the kitchen");
        Ok(chef)
    }

    /// Resolve the roster to chef rows through the TTL cache.
    pub fn roster_chefs(&self) -> Result<Vec<Chef>, KitchenError> {
        let ids: Vec<ChefId> = self.lock_roster()?.clone();
        if ids.is_empty() {
            tracing::warn!("retrieving chefs from an empty kitchen");
        }

        let mut chefs = Vec::with_capacity(ids.len());
        for id in ids {
            let chef = self.cache.get_or_fetch(id, || self.chefs.get(id))?;
            chefs.push(chef);
        }
        Ok(chefs)
    }

    /// Empty the roster. Clearing an already-empty kitchen is a warning,
    /// not an error.
    pub fn clear(&self) -> Result<(), KitchenError> {
        let mut roster = self.lock_roster()?;
        if roster.is_empty() {
            tracing::warn!("attempted to clear an empty kitchen");
            return Ok(());
        }
        tracing::info!(count = roster.len(), "clearing chefs from the kitchen");
        roster.clear();
        Ok(())
    }

    /// Number of chefs currently in the kitchen.
    pub fn len(&self) -> Result<usize, KitchenError> {
        Ok(self.lock_roster()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, KitchenError> {
        Ok(self.lock_roster()?.is_empty())
    }

    /// Run a cookoff in the given cuisine with a process-RNG draw.
    pub fn cookoff(&self, cuisine: Cuisine) -> Result<CookoffSummary, KitchenError> {
        let draw = rand::rng().random_range(0.0..1.0);
        self.cookoff_with_draw(cuisine, draw)
    }

    /// Cookoff with an explicit draw in `[0, 1)`, so tests can pin the
    /// winner.
    pub fn cookoff_with_draw(
        &self,
        cuisine: Cuisine,
        draw: f64,
    ) -> Result<CookoffSummary, KitchenError> {
        let contenders = self.roster_chefs()?;
        if contenders.len() < 2 {
            tracing::error!(
                count = contenders.len(),
                "not enough chefs for a cookoff"
            );
            return Err(CookoffError::NotEnoughChefs {
                count: contenders.len(),
            }
            .into());
        }

        tracing::info!(cuisine = %cuisine, count = contenders.len(), "cookoff begins");

        // Negative scores cannot be draw weights; clamp at zero. If every
        // weight clamps to zero the draw degenerates to uniform.
        let mut weights: Vec<f64> = contenders
            .iter()
            .map(|chef| {
                let skill = cookoff_skill(chef, cuisine);
                tracing::info!(name = %chef.name, skill, "cooking skill computed");
                skill.max(0.0)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            weights = vec![1.0; contenders.len()];
        }
        let total: f64 = weights.iter().sum();

        tracing::info!(draw, "random draw for the cookoff");

        let mut winner_idx = contenders.len() - 1;
        let mut progress = 0.0;
        for (idx, weight) in weights.iter().enumerate() {
            progress += weight / total;
            if draw < progress {
                winner_idx = idx;
                break;
            }
        }
        let winner_id = contenders[winner_idx].id;

        for chef in &contenders {
            let result = if chef.id == winner_id {
                CookoffResult::Win
            } else {
                CookoffResult::Loss
            };
            self.chefs.record_result(chef.id, result)?;
            self.cache.invalidate(chef.id)?;
        }

        let winner = self.chefs.get(winner_id)?;
        tracing::info!(winner = %winner.name, "cookoff winner");

        self.clear()?;

        Ok(CookoffSummary {
            cuisine,
            winner,
            participants: contenders.len(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
