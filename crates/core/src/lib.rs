#![warn(clippy::all, missing_docs)]

//! Core logic for the game catalog screen.
//!
//! This crate hosts the game records, the bundled catalog, name search,
//! the selection state behind the detail modal and configuration handling
//! used by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;
pub mod selection;
pub mod trailer;

pub use catalog::{Catalog, CatalogError};
pub use config::AppConfig;
pub use filter::filter_catalog;
pub use models::GameRecord;
pub use selection::{ScreenState, Selection, SelectionError};
