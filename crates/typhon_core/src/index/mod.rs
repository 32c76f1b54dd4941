//! # Pool Index
//!
//! The generic open-addressing table that maps component-type ids to their
//! pools. Kept separate from the ECS modules: the table has no notion of
//! entities or components and is reusable for any fixed-size key.

mod table;

pub use table::{IndexTable, KeyEqFn, KeyHashFn};
