// src/scrape/details.rs
use crate::{
    config::{consts::{FIGHT_LINK, FIGHT_URL, ROUND}, options::{Phase, ScrapeOptions}},
    core::Fetch,
    error::{ItemError, ScrapeError, StoreError},
    model::{RawFields, Record, Side},
    normalize::normalize_fight,
    progress::Progress,
    reconcile::{load_seen_keys, merge_and_save_by, reconcile_parallel},
    specs,
    store::Store,
};

use super::{reconcile_options, PhaseReport};

/// Per-round statistics for every fight in the events dataset not yet in the
/// details dataset, at most `max_fights` of them per run.
pub fn scrape_details<F: Fetch + Sync>(
    fetcher: &F,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<PhaseReport, ScrapeError> {
    let events = Store::for_phase(opts, Phase::Previous);
    let store = Store::for_phase(opts, Phase::Details);

    let fight_urls = stored_fight_links(&events)?;
    let seen = load_seen_keys(&store, FIGHT_URL)?;
    log::info!("{} fights in {}", fight_urls.len(), events.path().display());

    let ropts = reconcile_options(opts, opts.detail_pause(), opts.max_fights);
    let outcome = reconcile_parallel(&fight_urls, &seen, |url| fight_rounds(fetcher, url), &ropts, progress);

    let merge = merge_and_save_by(&store, &outcome.records, &[FIGHT_URL, ROUND])?;
    Ok(PhaseReport::new(Phase::Details, &outcome, merge))
}

/// Non-empty fight links of the events dataset, in stored order.
fn stored_fight_links(events: &Store) -> Result<Vec<String>, StoreError> {
    if !events.exists() {
        log::warn!("{} not found; run the previous-events phase first", events.path().display());
        return Ok(Vec::new());
    }
    let ds = events.read_all()?;
    if ds.headers.is_empty() {
        return Ok(Vec::new());
    }
    let links = ds.column_values(FIGHT_LINK).ok_or_else(|| StoreError::MissingColumn {
        path: events.path().to_path_buf(),
        column: s!(FIGHT_LINK),
    })?;
    Ok(links.filter(|l| !l.trim().is_empty()).map(str::to_string).collect())
}

/// Fight page + both fighter profiles → one record per round.
fn fight_rounds<F: Fetch>(fetcher: &F, url: &String) -> Result<Vec<Record>, ItemError> {
    let html = fetcher.fetch(url)?;
    let page = specs::fight::parse_doc(&html);
    if page.round_count() == 0 {
        return Err(ItemError::Incomplete(format!("no round statistics on {url}")));
    }

    let profiles = Side::BOTH.map(|side| fighter_profile(fetcher, page.fighter_link(side)));
    Ok(normalize_fight(url, &page, &profiles))
}

/// A missing profile leaves the attributes empty; the fight is still recorded.
fn fighter_profile<F: Fetch>(fetcher: &F, link: Option<&str>) -> RawFields {
    let Some(link) = link else { return RawFields::new() };
    match fetcher.fetch(link) {
        Ok(html) => specs::fighter::parse_doc(&html),
        Err(e) => {
            log::warn!("Fighter profile unavailable: {e}");
            RawFields::new()
        }
    }
}
