//! Domain model for the week plan.
//!
//! # Responsibility
//! - Define the canonical shapes for days, foods, meals and the plan grid.
//! - Keep plan reconciliation a pure, storage-free computation.
//!
//! # Invariants
//! - A plan always holds one entry per day, in day order.
//! - Each entry's slot list mirrors the current meals, in meal order.

pub mod plan;
pub mod reconcile;
