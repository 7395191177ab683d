//! Core operations - framework-agnostic create/read/update/delete access per entity.
//!
//! Nothing here implements pricing or stock rules. Functions validate field shapes
//! (lengths, finite prices), then let the database enforce keys and uniqueness.

/// Category operations
pub mod category;
/// Comment operations
pub mod comment;
/// Argon2id password hashing
pub mod password;
/// Product operations
pub mod product;
/// Receipt and receipt line operations, including checkout
pub mod receipt;
/// Demo data for a fresh database
pub mod seed;
/// Tag operations and product tagging
pub mod tag;
/// User account operations
pub mod user;
/// Field checks shared by the entity operations
pub mod validation;
