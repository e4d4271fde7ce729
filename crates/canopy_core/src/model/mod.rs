//! Input records consumed by page components.
//!
//! # Responsibility
//! - Define the immutable data shapes components render and animate.
//!
//! # Invariants
//! - Records are never mutated by components; rendering only reads them.
//! - A project's `category` is the only key used for filtering.

pub mod counter;
pub mod project;
