#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    api::{FetchError, FetchRequest},
    config::AppConfig,
    models::GameRecord,
    stores,
};

use super::{
    pipeline::{self, StoreFilter},
    sort::SortMode,
};

/// Which feed currently backs the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogMode {
    /// Storewide deals feed.
    #[default]
    Browse,
    /// Results of a title search.
    Search {
        /// Submitted query, trimmed.
        query: String,
    },
}

/// Handle for an issued fetch; carry it back to [`Catalog::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic request generation.
    pub generation: u64,
    /// Request to perform.
    pub request: FetchRequest,
    target: CatalogMode,
}

impl FetchTicket {
    /// Mode the catalog enters when this fetch succeeds.
    pub fn target(&self) -> &CatalogMode {
        &self.target
    }
}

/// Result of handing a finished fetch to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Data replaced.
    Loaded {
        /// Number of records now in the catalog.
        total: usize,
    },
    /// Fetch failed; previous data kept.
    Failed(String),
    /// A newer request was issued meanwhile; response discarded.
    Stale,
}

/// Why there is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing has loaded yet.
    NotLoaded,
    /// The source returned no records.
    NoMatches,
    /// Records exist but none pass the store filter.
    FilteredOut,
}

/// What the renderer should present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed.
    Error(String),
    /// No records to list.
    Empty(EmptyReason),
    /// Records are available.
    Results,
}

/// Catalog of deals with its store filter, sort order and reveal page.
///
/// `filtered` is always `all` restricted by `store_filter` and stably sorted
/// by `sort_mode`; `page` resets whenever either of them or the data changes.
#[derive(Debug, Clone)]
pub struct Catalog {
    config: AppConfig,
    all: Vec<GameRecord>,
    filtered: Vec<GameRecord>,
    store_filter: StoreFilter,
    sort_mode: SortMode,
    page: usize,
    page_size: usize,
    mode: CatalogMode,
    generation: u64,
    in_flight: Option<u64>,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Empty catalog in browse mode.
    pub fn new(config: AppConfig) -> Self {
        let page_size = config.page_size.max(1);
        Self {
            config,
            all: Vec::new(),
            filtered: Vec::new(),
            store_filter: StoreFilter::All,
            sort_mode: SortMode::Default,
            page: 0,
            page_size,
            mode: CatalogMode::Browse,
            generation: 0,
            in_flight: None,
            last_error: None,
            fetched_at: None,
        }
    }

    pub fn mode(&self) -> &CatalogMode {
        &self.mode
    }

    pub fn store_filter(&self) -> &StoreFilter {
        &self.store_filter
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Every record of the last successful fetch.
    pub fn all_games(&self) -> &[GameRecord] {
        &self.all
    }

    /// Filtered and sorted records, before pagination.
    pub fn filtered_games(&self) -> &[GameRecord] {
        &self.filtered
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the current data set arrived.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Load the deals feed.
    pub fn begin_browse(&mut self) -> FetchTicket {
        self.issue(CatalogMode::Browse)
    }

    /// Search by title. A blank query returns to the deals feed via [`Catalog::reset`].
    pub fn submit_search(&mut self, query: &str) -> FetchTicket {
        let query = query.trim();
        if query.is_empty() {
            return self.reset();
        }
        self.issue(CatalogMode::Search {
            query: query.to_string(),
        })
    }

    /// Clear filter and sort, then reload the deals feed.
    pub fn reset(&mut self) -> FetchTicket {
        self.store_filter = StoreFilter::All;
        self.sort_mode = SortMode::Default;
        self.recompute();
        self.issue(CatalogMode::Browse)
    }

    /// Re-run the request backing the current mode.
    pub fn refresh(&mut self) -> FetchTicket {
        let mode = self.mode.clone();
        self.issue(mode)
    }

    fn issue(&mut self, target: CatalogMode) -> FetchTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.last_error = None;
        let request = match &target {
            CatalogMode::Browse => self.config.deals_request(),
            CatalogMode::Search { query } => self.config.search_request(query.clone()),
        };
        info!(generation = self.generation, ?target, "Fetch issued");
        FetchTicket {
            generation: self.generation,
            request,
            target,
        }
    }

    /// Record the result of a fetch issued by this catalog.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<GameRecord>, FetchError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale response"
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(records) => {
                self.all = records;
                self.mode = ticket.target.clone();
                self.last_error = None;
                self.fetched_at = Some(Utc::now());
                self.recompute();
                info!(total = self.all.len(), shown = self.filtered.len(), "Catalog loaded");
                FetchOutcome::Loaded {
                    total: self.all.len(),
                }
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "Fetch failed; keeping previous data");
                self.last_error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    pub fn set_store_filter(&mut self, filter: StoreFilter) {
        self.store_filter = filter;
        self.recompute();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.recompute();
    }

    /// Step through "all stores" followed by every known store.
    pub fn cycle_store_filter(&mut self, forward: bool) {
        let mut options = vec![StoreFilter::All];
        options.extend(
            stores::known_stores()
                .into_iter()
                .map(|(id, _)| StoreFilter::Store(id)),
        );
        let current = options
            .iter()
            .position(|option| *option == self.store_filter)
            .unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.set_store_filter(options.swap_remove(next));
    }

    pub fn cycle_sort_mode(&mut self, forward: bool) {
        let next = if forward {
            self.sort_mode.next()
        } else {
            self.sort_mode.previous()
        };
        self.set_sort_mode(next);
    }

    fn recompute(&mut self) {
        self.filtered = pipeline::derive(&self.all, &self.store_filter, self.sort_mode);
        self.page = 0;
    }

    /// Reveal one more page. Returns `false` once everything is shown.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn visible_count(&self) -> usize {
        pipeline::visible_prefix(self.filtered.len(), self.page, self.page_size)
    }

    /// Cumulative revealed prefix of the filtered records.
    pub fn visible(&self) -> &[GameRecord] {
        &self.filtered[..self.visible_count()]
    }

    pub fn remaining(&self) -> usize {
        self.filtered.len() - self.visible_count()
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    /// Result counter, e.g. `Showing 12 of 60 games (Store: Steam, Sorted: Best discount)`.
    pub fn summary(&self) -> Option<String> {
        let total = self.filtered.len();
        if total == 0 {
            return None;
        }
        let mut active = Vec::new();
        if let StoreFilter::Store(id) = &self.store_filter {
            active.push(format!("Store: {}", stores::store_name(id)));
        }
        if self.sort_mode != SortMode::Default {
            active.push(format!("Sorted: {}", self.sort_mode.label()));
        }
        let suffix = if active.is_empty() {
            String::new()
        } else {
            format!(" ({})", active.join(", "))
        };
        Some(format!(
            "Showing {} of {} games{}",
            self.visible_count(),
            total,
            suffix
        ))
    }

    /// Label for the load-more action, `None` when nothing is left.
    pub fn load_more_label(&self) -> Option<String> {
        let remaining = self.remaining();
        (remaining > 0).then(|| format!("Show more games ({remaining} remaining)"))
    }

    /// Look up a filtered record by id.
    pub fn find(&self, id: &str) -> Option<&GameRecord> {
        self.filtered.iter().find(|game| game.id == id)
    }

    pub fn view_state(&self) -> ViewState {
        if self.in_flight.is_some() {
            return ViewState::Loading;
        }
        if let Some(message) = &self.last_error {
            return ViewState::Error(message.clone());
        }
        if !self.filtered.is_empty() {
            return ViewState::Results;
        }
        let reason = if self.fetched_at.is_none() {
            EmptyReason::NotLoaded
        } else if self.all.is_empty() {
            EmptyReason::NoMatches
        } else {
            EmptyReason::FilteredOut
        };
        ViewState::Empty(reason)
    }
}
