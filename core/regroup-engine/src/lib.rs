//! FILENAME: core/regroup-engine/src/lib.rs
//! Value-column regrouping for categorical data views.
//!
//! This crate keeps the grouped-by-series view of a table's value columns in
//! sync with its flat column sequence. It depends on `dataview` for the table
//! model and the copy-on-write helper.
//!
//! Layers:
//! - `config`: Regroup settings
//! - `regroup`: The regrouping engine (HOW groups are rebuilt)
//! - `projection`: Column rewrites that trigger a regroup
//! - `error`: Projection errors

pub mod config;
pub mod error;
pub mod projection;
pub mod regroup;

pub use config::RegroupConfig;
pub use error::ProjectionError;
pub use projection::{project_value_columns, retain_value_columns};
pub use regroup::{apply, IdentityEq, Regrouper};
