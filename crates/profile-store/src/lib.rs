//! # CodeQuest Profile Store
//!
//! This crate owns the user's persisted profile record. It is the system's
//! "save file."
//!
//! ## Architectural Principles
//!
//! - **Explicit Context, Not a Singleton:** The store is an ordinary value
//!   constructed with a file path and passed to whatever needs it. Nothing
//!   here is process-global.
//! - **Hydrate Before Read:** The store starts cold. `hydrate` loads the
//!   document from disk and flips the ready flag; every read on a cold store
//!   is an error rather than a silent `None`, so "not loaded yet" can never
//!   be mistaken for "no user."
//! - **Write-Through Persistence:** Every mutation is persisted immediately,
//!   via a temp-file rename so a crash mid-write cannot corrupt the document.
//!
//! ## Public API
//!
//! - `ProfileStore`: The main struct that owns the document and its path.
//! - `StoreError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use store::ProfileStore;
