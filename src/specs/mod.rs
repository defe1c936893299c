// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction rules for ufcstats.com. Each submodule covers a single page
//! type and encodes *where the ground truth lives in the HTML* and *how to read it
//! tolerantly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of already-fetched documents (`scraper` selectors over
//!   the `core::html` helpers).
//! - **Flat output**: every field is a name → text pair. An element missing from the
//!   page is a missing key, never an error.
//! - **Typed views** where the rest of the pipeline needs fixed fields
//!   (`EventListing`, `FightListing`, `fight::FightPage`).
//!
//! ## What does **not** live here
//! - Fetching, pacing, seen-set bookkeeping (`reconcile`, `scrape::*`).
//! - Value cleanup such as "X of Y" splitting or the per-round pivot (`normalize`).
//! - Persistence (`store`).
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::<phase> → Fetch::fetch(url) → specs::<page>::parse_doc()
//!                                              ↘ normalize::* → reconcile::merge_and_save
//! ```
//!
//! ## Current specs
//! - `events` – completed/upcoming events listing (one row per event).
//! - `event` – one event page: header and fight rows.
//! - `fight` – one fight page: result, persons, per-round tables, preview table.
//! - `fighter` – one fighter profile: physical attributes.
//!
//! ## Testing notes
//! Every parser is tested offline against inline HTML that mirrors the live markup.

pub mod event;
pub mod events;
pub mod fight;
pub mod fighter;

use crate::model::RawFields;

/// Page types understood by [`extract`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    /// Events listing: one mapping per event.
    EventListing,
    /// Event page: one mapping per fight, with the event header merged in.
    EventDetail,
    /// Fight page: one mapping with every field the page yields.
    FightDetail,
    /// Fighter profile: one mapping of physical attributes.
    FighterProfile,
    /// Fight page: one mapping per round and fighter of the strike breakdown.
    RoundBreakdown,
}

/// Generic entry point: field mappings for a document of the given kind.
/// Unrecognized markup yields fewer mappings or fewer fields, never an error.
pub fn extract(document: &str, kind: PageKind) -> Vec<RawFields> {
    match kind {
        PageKind::EventListing => events::parse_doc(document).iter().map(events::to_fields).collect(),
        PageKind::EventDetail => {
            let header = event::parse_header(document);
            event::parse_doc(document)
                .iter()
                .map(|fl| {
                    let mut f = header.clone();
                    f.extend(event::to_fields(fl));
                    f
                })
                .collect()
        }
        PageKind::FightDetail => {
            let page = fight::parse_doc(document);
            let mut f = page.info;
            f.extend(page.rounds);
            f.extend(page.breakdown);
            f.extend(page.preview);
            if f.is_empty() { vec![] } else { vec![f] }
        }
        PageKind::FighterProfile => {
            let f = fighter::parse_doc(document);
            if f.is_empty() { vec![] } else { vec![f] }
        }
        PageKind::RoundBreakdown => breakdown_rows(&fight::parse_doc(document).breakdown),
    }
}

/// Regroup `r{n}_p{i}_{stat}` keys into one mapping per (round, fighter).
fn breakdown_rows(breakdown: &RawFields) -> Vec<RawFields> {
    let mut rows: std::collections::BTreeMap<(usize, String), RawFields> = Default::default();
    for (key, value) in breakdown {
        let mut parts = key.splitn(3, '_');
        let (Some(r), Some(p), Some(stat)) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let Some(round) = r.strip_prefix('r').and_then(|n| n.parse::<usize>().ok()) else {
            continue;
        };
        let row = rows.entry((round, s!(p))).or_default();
        row.insert(s!("round"), round.to_string());
        row.insert(s!(stat), value.clone());
    }
    rows.into_values().collect()
}
