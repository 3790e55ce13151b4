//! Circulating supply computation.
//!
//! `normalize` turns raw base-unit quantities into exact decimal token
//! amounts; `aggregator` orchestrates the parallel provider queries and
//! the subtraction itself.

pub mod aggregator;
pub mod normalize;

pub use aggregator::{compute_supply_snapshot, NormalizedBalance, SupplySnapshot};
