// src/scrape/events.rs
use std::collections::HashSet;

use crate::{
    config::{consts::{EVENT_LINK, FIGHT_LINK}, options::{Phase, ScrapeOptions}},
    core::Fetch,
    error::{ItemError, ScrapeError},
    model::{EventListing, Record},
    normalize::normalize_listing,
    progress::Progress,
    reconcile::{load_seen_keys, merge_and_save, reconcile_parallel},
    specs,
    store::Store,
};

use super::{fetch_listing, reconcile_options, PhaseReport};

/// Completed events: every listed event not yet in the events dataset contributes
/// its fight rows. Fights already stored under another event are left out.
pub fn scrape_previous<F: Fetch + Sync>(
    fetcher: &F,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<PhaseReport, ScrapeError> {
    let store = Store::for_phase(opts, Phase::Previous);
    let seen_events = load_seen_keys(&store, EVENT_LINK)?;
    let seen_fights = load_seen_keys(&store, FIGHT_LINK)?;

    let mut listing: Vec<EventListing> = fetch_listing(fetcher, opts)?
        .into_iter()
        .filter(|e| !e.upcoming)
        .collect();
    if let Some(n) = opts.events_limit {
        listing.truncate(n);
    }
    log::info!("{} completed events listed", listing.len());

    let ropts = reconcile_options(opts, opts.listing_pause(), None);
    let outcome = reconcile_parallel(
        &listing,
        &seen_events,
        |event| event_fights(fetcher, event, &seen_fights),
        &ropts,
        progress,
    );

    let merge = merge_and_save(&store, &outcome.records, FIGHT_LINK)?;
    Ok(PhaseReport::new(Phase::Previous, &outcome, merge))
}

/// Fight rows of one event page, minus fights already stored.
pub(crate) fn event_fights<F: Fetch>(
    fetcher: &F,
    event: &EventListing,
    seen_fights: &HashSet<String>,
) -> Result<Vec<Record>, ItemError> {
    let html = fetcher.fetch(&event.event_link)?;
    let fights = specs::event::parse_doc(&html);
    if fights.is_empty() {
        return Err(ItemError::Incomplete(format!("no fights listed on {}", event.event_link)));
    }

    let mut event = event.clone();
    if event.event_location.is_none() {
        event.event_location = specs::event::parse_header(&html).remove("event_location");
    }

    let fresh: Vec<Record> = fights
        .iter()
        .filter(|f| !seen_fights.contains(&f.fight_link))
        .map(|f| normalize_listing(&event, f))
        .collect();
    if fresh.is_empty() {
        // no row carries this event_link, so the page is fetched again next run
        log::info!(
            "{}: all {} fights already stored under other events; will revisit",
            event.event_name,
            fights.len()
        );
    } else {
        log::debug!("{}: {} fights, {} new", event.event_name, fights.len(), fresh.len());
    }
    Ok(fresh)
}
