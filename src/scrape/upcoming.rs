// src/scrape/upcoming.rs
use crate::{
    config::{consts::{EVENT_NAME, FIGHT_LINK}, options::{Phase, ScrapeOptions}},
    core::Fetch,
    error::{ItemError, ScrapeError},
    model::{EventListing, FightListing, Record},
    normalize::{normalize_listing, normalize_preview},
    progress::Progress,
    reconcile::{load_seen_keys, merge_and_save, reconcile_parallel},
    specs,
    store::Store,
};

use super::{fetch_listing, reconcile_options, PhaseReport};

/// The next scheduled event, once per event name: its fight rows enriched from
/// each fight's preview page.
pub fn scrape_upcoming<F: Fetch + Sync>(
    fetcher: &F,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<PhaseReport, ScrapeError> {
    let store = Store::for_phase(opts, Phase::Upcoming);
    let seen_names = load_seen_keys(&store, EVENT_NAME)?;
    let seen_fights = load_seen_keys(&store, FIGHT_LINK)?;

    let Some(event) = fetch_listing(fetcher, opts)?.into_iter().find(|e| e.upcoming) else {
        log::info!("No upcoming event listed");
        return Ok(PhaseReport::idle(Phase::Upcoming));
    };
    if seen_names.contains(&event.event_name) {
        log::info!("Upcoming event already stored: {}", event.event_name);
        let mut report = PhaseReport::idle(Phase::Upcoming);
        report.skipped = 1;
        return Ok(report);
    }
    log::info!("Upcoming event: {} ({})", event.event_name, event.event_date.as_deref().unwrap_or("date unknown"));

    let fights = match fetcher.fetch(&event.event_link) {
        Ok(html) => specs::event::parse_doc(&html),
        Err(e) => {
            log::warn!("{}: {e}", event.event_link);
            let mut report = PhaseReport::idle(Phase::Upcoming);
            report.fetched = 1;
            report.failed.push(event.event_link);
            return Ok(report);
        }
    };
    log::info!("{} fights on the card", fights.len());

    let ropts = reconcile_options(opts, opts.listing_pause(), None);
    let outcome = reconcile_parallel(
        &fights,
        &seen_fights,
        |fight| fight_preview(fetcher, &event, fight),
        &ropts,
        progress,
    );

    let merge = merge_and_save(&store, &outcome.records, FIGHT_LINK)?;
    Ok(PhaseReport::new(Phase::Upcoming, &outcome, merge))
}

fn fight_preview<F: Fetch>(fetcher: &F, event: &EventListing, fight: &FightListing) -> Result<Vec<Record>, ItemError> {
    let listing = normalize_listing(event, fight);
    let html = fetcher.fetch(&fight.fight_link)?;
    let page = specs::fight::parse_doc(&html);
    Ok(vec![normalize_preview(listing, &page)])
}
