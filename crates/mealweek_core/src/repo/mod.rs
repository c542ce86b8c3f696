//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value data access contract the week store sits on.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repository APIs expose text payloads only; JSON encoding and schema
//!   versioning stay above this boundary.

pub mod kv_repo;
