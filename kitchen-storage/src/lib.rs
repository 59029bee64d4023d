//! Chefs Kitchen Storage - SQLite persistence
//!
//! Owns the database schema (chefs and users tables), the stores that
//! operate on them, and a TTL read cache over chef rows. The engine is
//! embedded SQLite via rusqlite; constraint violations surface as typed
//! [`StorageError`](kitchen_core::StorageError)s.

pub mod cache;
pub mod chef_store;
pub mod db;
pub mod error;
pub mod schema;
pub mod user_store;

pub use cache::ChefCache;
pub use chef_store::ChefStore;
pub use db::Database;
pub use user_store::UserStore;
