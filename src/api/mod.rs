//! API client for the remote catalog.
//!
//! - [`CatalogApi`]: reqwest client for the catalog REST endpoints
//! - [`CatalogSource`]: the trait views are written against

pub mod client;
pub mod source;

pub use client::CatalogApi;
pub use source::CatalogSource;
