// src/specs/event.rs
//! Parser for one event page (`/event-details/<id>`).
//!
//! Fight rows are `tr.b-fight-details__table-row[data-link]`; the link is the fight's
//! identifier. Column layout of a completed event:
//!
//! ```text
//! 0 W/L | 1 Fighters | 2 KD | 3 Str | 4 Td | 5 Sub | 6 Weight class | 7 Method | 8 Round | 9 Time
//! ```
//!
//! Upcoming events print the same row with the result columns empty.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

use crate::core::html::{select_texts, text_of};
use crate::core::sanitize::{field_key, is_blank, strip_label};
use crate::model::{FightListing, RawFields};

const COL_WEIGHT_CLASS: usize = 6;
const COL_METHOD: usize = 7;
const COL_ROUND: usize = 8;
const COL_TIME: usize = 9;

/// Fight rows in page order (main event first).
pub fn parse_doc(html_doc: &str) -> Vec<FightListing> {
    let doc = Html::parse_document(html_doc);
    doc.select(selector!("tr.b-fight-details__table-row[data-link]"))
        .filter_map(parse_row)
        .collect()
}

fn parse_row(row: ElementRef<'_>) -> Option<FightListing> {
    let fight_link = row.value().attr("data-link")?.trim().to_string();
    if fight_link.is_empty() {
        return None;
    }

    let mut fighters = select_texts(row, selector!("td a.b-link.b-link_style_black")).into_iter();
    let cells: Vec<ElementRef<'_>> = row.select(selector!("td.b-fight-details__table-col")).collect();
    let cell = |i: usize| cells.get(i).map(|c| text_of(*c)).filter(|t| !is_blank(t));

    let mut extra = BTreeMap::new();
    if let Some(r) = cell(COL_ROUND) { extra.insert(s!("final_round"), r); }
    if let Some(t) = cell(COL_TIME) { extra.insert(s!("final_time"), t); }

    Some(FightListing {
        fight_link,
        fighter1: fighters.next().filter(|n| !n.is_empty()),
        fighter2: fighters.next().filter(|n| !n.is_empty()),
        weight_class: cell(COL_WEIGHT_CLASS),
        method: cell(COL_METHOD),
        extra,
    })
}

/// Event name, date and location from the page header.
pub fn parse_header(html_doc: &str) -> RawFields {
    let doc = Html::parse_document(html_doc);
    let mut f = RawFields::new();

    if let Some(name) = doc.select(selector!("h2.b-content__title")).next().map(text_of) {
        if !name.is_empty() { f.insert(s!("event_name"), name); }
    }
    for item in doc.select(selector!("li.b-list__box-list-item")) {
        let Some(title) = item.select(selector!("i.b-list__box-item-title")).next().map(text_of) else {
            continue;
        };
        let key = match field_key(&title).as_str() {
            "date" => "event_date",
            "location" => "event_location",
            _ => continue,
        };
        let value = strip_label(&text_of(item), title.trim_end_matches(':')).to_string();
        if !is_blank(&value) {
            f.insert(s!(key), value);
        }
    }
    f
}

/// Flat view for the generic extractor.
pub fn to_fields(fl: &FightListing) -> RawFields {
    let mut f: RawFields = fl.extra.clone();
    f.insert(s!("fight_link"), fl.fight_link.clone());
    if let Some(v) = &fl.fighter1 { f.insert(s!("fighter1"), v.clone()); }
    if let Some(v) = &fl.fighter2 { f.insert(s!("fighter2"), v.clone()); }
    if let Some(v) = &fl.weight_class { f.insert(s!("weight_class"), v.clone()); }
    if let Some(v) = &fl.method { f.insert(s!("method"), v.clone()); }
    f
}
