//! Week store orchestration.
//!
//! # Responsibility
//! - Bridge the in-memory collections and persisted key-value storage.
//! - Keep the plan grid consistent with days and meals on every change.
//!
//! # Invariants
//! - All four collections are exclusively owned by the store; screens go
//!   through its accessors and mutators only.

pub mod week_store;
