// src/specs/events.rs
//! Parser for the events listing (`/statistics/events/completed?page=all`).
//!
//! Every event is a `tr.b-statistics__table-row` holding a link, a date span and a
//! location cell. The next scheduled event is the row additionally classed
//! `b-statistics__table-row_type_first`; spacer rows without a link are dropped.

use scraper::Html;

use crate::core::html::{has_class, select_attr, select_text, text_of};
use crate::model::{EventListing, RawFields};

/// Parse every event row, upcoming first if present, in page order.
pub fn parse_doc(html_doc: &str) -> Vec<EventListing> {
    let doc = Html::parse_document(html_doc);
    let mut out = Vec::new();

    for row in doc.select(selector!("tr.b-statistics__table-row")) {
        let Some(event_link) = select_attr(row, selector!("td a.b-link"), "href") else {
            continue; // spacer row
        };
        let event_name = select_text(row, selector!("td a.b-link")).unwrap_or_default();
        let event_date = select_text(row, selector!("span.b-statistics__date"));
        let event_location = row
            .select(selector!("td.b-statistics__table-col_style_big-top-padding"))
            .next()
            .map(text_of)
            .filter(|t| !t.is_empty());

        out.push(EventListing {
            event_link,
            event_name,
            event_date,
            event_location,
            upcoming: has_class(row, "b-statistics__table-row_type_first"),
        });
    }

    log::debug!("Events listing: {} rows", out.len());
    out
}

/// Flat view for the generic extractor.
pub fn to_fields(e: &EventListing) -> RawFields {
    let mut f = RawFields::new();
    f.insert(s!("event_link"), e.event_link.clone());
    f.insert(s!("event_name"), e.event_name.clone());
    if let Some(d) = &e.event_date { f.insert(s!("event_date"), d.clone()); }
    if let Some(l) = &e.event_location { f.insert(s!("event_location"), l.clone()); }
    f
}
