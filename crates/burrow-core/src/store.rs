//! Store — the normalised rows of the latest fetch plus every view derived
//! from them.
//!
//! The base row list is immutable once installed. Buckets are recomputed when
//! the rows change; the filtered view and pager are recomputed when the rows
//! or the query change. The UI reads from the store, never from a source.

use crate::bucket::{bucket, DEFAULT_UTC_OFFSET_MINUTES};
use crate::chart::{self, ChartPoint, CountryCount};
use crate::paginate::{Pager, DEFAULT_PAGE_SIZE};
use crate::search;
use crate::types::{LogRow, TimeBucket};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LogStore {
    rows: Arc<[LogRow]>,
    buckets: Vec<TimeBucket>,
    query: String,
    filtered: Vec<LogRow>,
    pager: Pager,
    utc_offset_minutes: i32,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_UTC_OFFSET_MINUTES)
    }
}

impl LogStore {
    pub fn new(page_size: usize, utc_offset_minutes: i32) -> Self {
        Self {
            rows: Arc::from(Vec::<LogRow>::new()),
            buckets: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            pager: Pager::new(page_size),
            utc_offset_minutes,
        }
    }

    /// Install a freshly normalised (and already sorted) row list.
    pub fn replace(&mut self, rows: Vec<LogRow>) {
        self.rows = Arc::from(rows);
        self.buckets = bucket(&self.rows, self.utc_offset_minutes);
        self.refilter();
        tracing::debug!(
            rows = self.rows.len(),
            buckets = self.buckets.len(),
            "store: rows replaced"
        );
    }

    /// Change the search query. Filters the rows already held; never fetches.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
        tracing::debug!(query = %self.query, matches = self.filtered.len(), "store: query changed");
    }

    fn refilter(&mut self) {
        self.filtered = search::filter(&self.rows, &self.query);
        self.pager.reset(self.filtered.len());
    }

    /// Every row of the latest fetch, ascending by timestamp.
    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    /// Shared handle to the base rows.
    pub fn rows_shared(&self) -> Arc<[LogRow]> {
        Arc::clone(&self.rows)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows matching the current query.
    pub fn filtered(&self) -> &[LogRow] {
        &self.filtered
    }

    /// Rows on the current page of the filtered view.
    pub fn page(&self) -> &[LogRow] {
        self.pager.slice(&self.filtered)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn goto_page(&mut self, page: usize) {
        self.pager.goto(page);
    }

    /// True when the current view has nothing to show ("No logs found").
    pub fn is_empty_view(&self) -> bool {
        self.page().is_empty()
    }

    pub fn buckets(&self) -> &[TimeBucket] {
        &self.buckets
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        chart::series(&self.buckets)
    }

    pub fn top_countries(&self, n: usize) -> Vec<CountryCount> {
        chart::top_countries(&self.rows, n)
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}
