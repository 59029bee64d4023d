//! Chefs Kitchen Core - Domain Types
//!
//! Pure data types and rules shared by the storage and API layers:
//! chef records, cuisine taxonomy, cookoff skill scoring, leaderboard
//! ordering, and the error taxonomy. No I/O lives here.

pub mod chef;
pub mod cuisine;
pub mod error;
pub mod leaderboard;
pub mod skill;

pub use chef::{Chef, ChefId, CookoffResult, NewChef, MAX_AGE, MIN_AGE};
pub use cuisine::Cuisine;
pub use error::{
    CookoffError, KitchenError, KitchenResult, StorageError, ValidationError,
};
pub use leaderboard::{sort_leaderboard, LeaderboardSort};
pub use skill::cookoff_skill;
