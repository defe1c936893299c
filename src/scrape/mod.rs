// src/scrape/mod.rs
//
// The three pipelines. Each one reads its dataset's seen set, reconciles the
// candidates it lists, and merges the result back in a single write.
//
//   previous  listing → new events → event pages → fight rows      → ufc_events
//   upcoming  listing → next event → event page  → fight previews  → ufc_upcoming_events
//   details   ufc_events fight_link → fight page + 2 profiles → rounds → ufc_fight_details

mod details;
mod events;
mod upcoming;

pub use details::scrape_details;
pub use events::scrape_previous;
pub use upcoming::scrape_upcoming;

use std::time::Duration;

use crate::{
    config::options::{Phase, ScrapeOptions},
    core::Fetch,
    error::FetchError,
    model::EventListing,
    reconcile::{MergeSummary, Outcome, ReconcileOptions},
    specs,
};

/// What one phase did.
#[derive(Debug)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Candidates fetched this run.
    pub fetched: usize,
    /// Candidates already held.
    pub skipped: usize,
    /// Keys that failed and will be retried next run.
    pub failed: Vec<String>,
    pub merge: MergeSummary,
}

impl PhaseReport {
    /// Nothing to do this run.
    fn idle(phase: Phase) -> Self {
        Self { phase, fetched: 0, skipped: 0, failed: Vec::new(), merge: MergeSummary::default() }
    }

    fn new(phase: Phase, outcome: &Outcome, merge: MergeSummary) -> Self {
        Self {
            phase,
            fetched: outcome.fetched,
            skipped: outcome.skipped,
            failed: outcome.failures.iter().map(|f| f.key.clone()).collect(),
            merge,
        }
    }
}

/// Fetch and parse the events listing.
fn fetch_listing<F: Fetch>(fetcher: &F, opts: &ScrapeOptions) -> Result<Vec<EventListing>, FetchError> {
    let url = opts.events_listing_url();
    log::info!("Fetching events listing {url}");
    let html = fetcher.fetch(&url)?;
    Ok(specs::events::parse_doc(&html))
}

fn reconcile_options(opts: &ScrapeOptions, pause: Duration, limit: Option<usize>) -> ReconcileOptions {
    ReconcileOptions { pause, limit, workers: opts.workers.max(1) }
}
