//! # Sift Architecture
//!
//! Sift is a **headless controller for admin list screens**: free-text search,
//! typed filters with saved presets, multi-select with a tri-state "select
//! all", and bulk actions with confirmation, live progress, partial failure
//! and cancellation.
//!
//! It renders nothing and fetches nothing. The host hands it records (through
//! the [`model::Record`] trait) and a per-item effect for each bulk action, and
//! reads back plain Rust values to draw.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One SiftApi per screen                                   │
//! │  - Keeps filter results, selection and bulk flow in sync    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines                                                    │
//! │  - filter/     query, fields, matching, presets             │
//! │  - suggest.rs  search suggestions                           │
//! │  - selection.rs                                             │
//! │  - bulk/       catalog, confirmation, executor, progress    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PresetStore trait                                        │
//! │  - FilePresetStore (JSON), InMemoryPresetStore              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Outside `store/` and `config.rs`, code:
//! - **Never** touches the filesystem or network
//! - **Never** reads the clock for decisions (the host passes `Instant`s)
//! - **Never** installs a `tracing` subscriber; it only emits events
//!
//! Every engine is usable on its own; [`api::SiftApi`] is a convenience that
//! wires them together along the usual flow:
//! filter → select → trigger → confirm → run → retain → clear + refresh.
//!
//! ## Testing Strategy
//!
//! 1. **Engines**: thorough unit tests beside each module. This is where the
//!    lion's share of testing lives.
//! 2. **API** (`api.rs`): tests that the engines stay consistent with each
//!    other across the whole flow.
//! 3. **Integration** (`tests/`): a host-defined record type driven end to end,
//!    and the file preset store against a real directory.
//!
//! ## Module Overview
//!
//! - [`api`]: the screen facade
//! - [`bulk`]: bulk actions, confirmation, execution and progress
//! - [`config`]: layered configuration
//! - [`error`]: crate error type
//! - [`filter`]: the filter engine
//! - [`model`]: fields, values, presets and the `Record` trait
//! - [`selection`]: multi-select
//! - [`store`]: preset persistence
//! - [`suggest`]: search suggestions

pub mod api;
pub mod bulk;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod selection;
pub mod store;
pub mod suggest;

#[cfg(test)]
mod test_utils;
