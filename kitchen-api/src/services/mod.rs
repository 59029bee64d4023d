//! Service layer: stateful engines that sit between routes and storage.

pub mod cookoff;

pub use cookoff::{CookoffSummary, Kitchen};
