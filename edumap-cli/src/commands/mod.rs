//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`summary`] - Load the dataset and report row counts
//! - [`listing`] - County and type option lists
//! - [`filter`] - Visible markers for a filter, optional GeoJSON export
//! - [`repair`] - Coordinate repair of a CSV file
//! - [`config`] - Configuration management (get, set, list, path)

pub mod config;
pub mod filter;
pub mod listing;
pub mod repair;
pub mod summary;
