//! Weighted candidate pools.
//!
//! Enemies and loot are both drawn from pools assembled out of filters. Every
//! filter whose predicate matches the [`PoolContext`] contributes its weighted
//! entries; duplicate identities have their weights summed. Draws use the
//! classic cumulative-weight method over the merged candidates.

mod context;
mod filter;
mod loot;
mod select;

pub use context::PoolContext;
pub use filter::{FilterKind, PoolCatalog, PoolFilter, Resolution, WeightedEntry};
pub use loot::{LootRoll, LootTable};
pub use select::{draw_weighted, total_weight};
