// SPDX-License-Identifier: PMPL-1.0-or-later
//! MnemoDB Graph Storage Engine
//!
//! This crate owns the canonical knowledge graph for the duration of one
//! operation: every mutation or query loads the persisted state through a
//! pluggable `GraphBackend`, applies itself to a private in-memory copy, and
//! persists the result in full. The backend is the seam that lets the
//! whole-file log rewrite be swapped for another storage strategy without
//! changing the engine's contract.
//!
//! # Modules
//!
//! - [`backend`] -- The `GraphBackend` trait defining the load/save interface.
//! - [`error`] -- The `StoreError` enum covering engine failure modes.
//! - [`log_backend`] -- The default file-log backend (whole-file rewrite).
//! - [`memory`] -- An in-memory backend for testing and ephemeral workloads.
//! - [`metrics`] -- A transparent wrapper that collects operation statistics.
//! - [`config`] -- Environment-driven log path resolution.
//! - [`store`] -- The `GraphStore` engine with the public operation surface.
//!
//! # Example
//!
//! ```rust
//! use mnemo_store::{GraphStore, InMemoryBackend};
//! use mnemo_model::Entity;
//!
//! # tokio_test::block_on(async {
//! let store = GraphStore::new(InMemoryBackend::new());
//!
//! let created = store
//!     .create_entities(vec![Entity::new("Alice", "person")])
//!     .await
//!     .unwrap();
//! assert_eq!(created.len(), 1);
//! # });
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod log_backend;
pub mod memory;
pub mod metrics;
pub mod store;

// Re-export the most commonly used types at the crate root for convenience.
pub use backend::GraphBackend;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use log_backend::LogBackend;
pub use memory::InMemoryBackend;
pub use metrics::{MetricsBackend, StoreStats};
pub use store::GraphStore;
