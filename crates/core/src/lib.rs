//! PC build compatibility engine.
//!
//! Pure logic, no I/O: component catalog, build selection, derived metrics,
//! rule evaluation and the per-session [`engine::CompatibilityEngine`]. The
//! HTTP service in `buildcheck-api` wraps this crate.

pub mod catalog;
pub mod category;
pub mod component;
pub mod engine;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod metrics;
pub mod power;
pub mod rules;
pub mod selection;
pub mod types;
