//! EduMap - Educational institutions on a map
//!
//! This library loads a CSV list of schools, high schools, kindergartens and
//! colleges, validates their coordinates, builds one marker per institution and
//! filters the markers by county, type and free-text search.
//!
//! # High-Level API
//!
//! For most use cases, the [`session`] module ties the pieces together:
//!
//! ```ignore
//! use edumap::loader::{AsyncReqwestClient, DataSource, Loader};
//! use edumap::session::MapSession;
//! use edumap::filter::MarkerLayer;
//!
//! let loader = Loader::new(AsyncReqwestClient::new()?);
//! let mut session = MapSession::new(MarkerLayer::new());
//!
//! let outcome = loader.load(&DataSource::parse("data/locatii.csv")).await;
//! session.complete_load(outcome);
//! session.set_county("Cluj");
//! println!("{} visible", session.stats().visible);
//! ```

pub mod config;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod marker;
pub mod session;

/// Version of the EduMap library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
