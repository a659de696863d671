//! RPG demo content schema.
//!
//! Declares buffs, entries, equipment trees, accessories with random pools,
//! and characters with physics shapes against `respack`. [`declare_sample`]
//! fills a registry with a small content set that exercises every kind.

pub mod accessory;
pub mod buff;
pub mod character;
pub mod entry;
pub mod equipment;
pub mod levels;
pub mod random;
pub mod sample;
pub mod script;
pub mod shape;
pub mod vocab;

pub use sample::{SAMPLE_IDS, declare_sample};
