#![warn(clippy::all, missing_docs)]

//! Core domain logic for dealshelf.
//!
//! This crate hosts the deal models, the store table, configuration
//! handling, the deals API client and the catalog pipeline used by
//! the terminal UI and any future frontends.

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod normalize;
pub mod stores;

pub use api::{DealsClient, FetchError, FetchRequest};
pub use catalog::{
    Catalog, CatalogMode, EmptyReason, FetchOutcome, FetchTicket, SortMode, StoreFilter, ViewState,
};
pub use config::AppConfig;
pub use models::GameRecord;
