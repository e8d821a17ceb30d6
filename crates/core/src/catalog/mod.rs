//! Catalog pipeline: store filter, sort order and incremental reveal over
//! the last fetched deal list, plus the browse/search state machine that
//! decides which list that is.

/// Filter, sort and pagination stages.
pub mod pipeline;
/// Sort modes.
pub mod sort;
/// Catalog state and fetch bookkeeping.
pub mod state;

pub use pipeline::StoreFilter;
pub use sort::SortMode;
pub use state::{Catalog, CatalogMode, EmptyReason, FetchOutcome, FetchTicket, ViewState};
