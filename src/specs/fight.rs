// src/specs/fight.rs
//! Parser for one fight page (`/fight-details/<id>`).
//!
//! A completed fight page has four parts we read:
//!
//! - header: event link (`h2.b-content__title a`) and the bout title
//! - result box: `i.b-fight-details__label` items ("Method:", "Round:", …)
//! - persons: two `div.b-fight-details__person`, red first
//! - per-round tables: every `thead` reading "Round N" is followed by a `tbody`
//!   holding one row of two-valued cells. The totals table has 10 columns, the
//!   significant-strikes breakdown 9.
//!
//! Upcoming fights have no result box or round tables; they carry a
//! `tr.b-fight-details__table-row-preview` comparison table instead.

use scraper::{ElementRef, Html};

use crate::core::html::{next_element_sibling, select_attr, select_text, select_texts, text_of};
use crate::core::sanitize::{field_key, is_blank, normalize_ws, strip_label};
use crate::model::{RawFields, Side};

/// Columns of the per-round totals table after the fighter column.
pub const TOTALS_STATS: [&str; 9] = [
    "kd", "sig_str", "sig_str_pct", "total_str", "td", "td_pct", "sub_att", "rev", "ctrl",
];

/// Columns of the per-round significant-strikes breakdown after the fighter column.
pub const BREAKDOWN_STATS: [&str; 8] = [
    "sig_str", "sig_str_pct", "head", "body", "leg", "distance", "clinch", "ground",
];

/// Everything one fight page yields, still unnormalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FightPage {
    /// Round-invariant facts: event, bout, result and both fighters.
    pub info: RawFields,
    /// `{side}_r{n}_{stat}` from the totals tables.
    pub rounds: RawFields,
    /// `r{n}_p{i}_{stat}` and `r{n}_p{i}_fighter` from the breakdown tables,
    /// `p{i}` in page order; the side is resolved during normalization.
    pub breakdown: RawFields,
    /// `fighter{1,2}_{stat}` from the upcoming-fight comparison table.
    pub preview: RawFields,
}

impl FightPage {
    pub fn fighter_link(&self, side: Side) -> Option<&str> {
        self.info.get(&format!("{}_fighter_link", side.prefix())).map(String::as_str)
    }

    pub fn fighter_name(&self, side: Side) -> Option<&str> {
        self.info.get(&format!("{}_fighter_name", side.prefix())).map(String::as_str)
    }

    pub fn round_count(&self) -> usize {
        self.rounds
            .keys()
            .chain(self.breakdown.keys())
            .filter_map(|k| round_of(k))
            .max()
            .unwrap_or(0)
    }
}

/// Round number out of a round-scoped key (`red_r2_kd`, `r2_p0_head`).
pub fn round_of(key: &str) -> Option<usize> {
    key.split('_')
        .find_map(|part| part.strip_prefix('r').and_then(|n| n.parse().ok()))
}

pub fn parse_doc(html_doc: &str) -> FightPage {
    let doc = Html::parse_document(html_doc);
    let root = doc.root_element();

    let mut page = FightPage::default();
    parse_basics(root, &mut page.info);
    parse_persons(root, &mut page.info);
    parse_round_tables(root, &mut page);
    parse_preview(root, &mut page.preview);

    log::debug!(
        "Fight page: {} info, {} round, {} breakdown, {} preview fields",
        page.info.len(),
        page.rounds.len(),
        page.breakdown.len(),
        page.preview.len()
    );
    page
}

fn parse_basics(root: ElementRef<'_>, f: &mut RawFields) {
    if let Some(name) = select_text(root, selector!("h2.b-content__title a")) {
        f.insert(s!("event_name"), name);
    }
    if let Some(link) = select_attr(root, selector!("h2.b-content__title a"), "href") {
        f.insert(s!("event_link"), link);
    }
    if let Some(title) = select_text(root, selector!("i.b-fight-details__fight-title")) {
        f.insert(s!("fight_type"), title);
    }

    for label in root.select(selector!("i.b-fight-details__label")) {
        let label_text = text_of(label);
        let key = match field_key(&label_text).as_str() {
            "method" => "method",
            "round" => "final_round",
            "time" => "final_time",
            "time_format" => "time_format",
            "referee" => "referee",
            "details" => "finish_details",
            _ => continue,
        };
        // The value is a sibling of the label, or of the label's wrapper ("Details:").
        let label_name = label_text.trim_end_matches(':');
        let value = label
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take(2)
            .map(text_of)
            .find(|whole| !is_blank(strip_label(whole, label_name)))
            .map(|whole| normalize_ws(strip_label(&whole, label_name)));
        if let Some(value) = value {
            f.insert(s!(key), value);
        }
    }
}

fn parse_persons(root: ElementRef<'_>, f: &mut RawFields) {
    for (i, person) in root.select(selector!("div.b-fight-details__person")).take(2).enumerate() {
        let side = Side::from_index(i).prefix();
        let a = selector!("h3.b-fight-details__person-name a");

        if let Some(v) = select_text(person, selector!("i.b-fight-details__person-status")) {
            f.insert(format!("{side}_fighter_status"), v);
        }
        if let Some(v) = select_text(person, a) {
            f.insert(format!("{side}_fighter_name"), v);
        }
        if let Some(v) = select_attr(person, a, "href") {
            f.insert(format!("{side}_fighter_link"), v);
        }
        if let Some(v) = select_text(person, selector!("p.b-fight-details__person-title")) {
            f.insert(format!("{side}_fighter_nickname"), v);
        }
    }
}

fn parse_round_tables(root: ElementRef<'_>, page: &mut FightPage) {
    for head in root.select(selector!("thead")) {
        let Some(round) = round_header(&text_of(head)) else { continue };
        let Some(body) = next_element_sibling(head).filter(|b| b.value().name() == "tbody") else {
            continue;
        };
        let Some(row) = body.select(selector!("tr.b-fight-details__table-row")).next() else {
            continue;
        };
        let cells: Vec<Vec<String>> = row
            .select(selector!("td.b-fight-details__table-col"))
            .map(|td| select_texts(td, selector!("p.b-fight-details__table-text")))
            .collect();

        match cells.len() {
            10 => {
                for (stat, values) in TOTALS_STATS.iter().zip(&cells[1..]) {
                    for (i, v) in values.iter().take(2).enumerate() {
                        let side = Side::from_index(i).prefix();
                        page.rounds.insert(format!("{side}_r{round}_{stat}"), v.clone());
                    }
                }
            }
            9 => {
                for (i, name) in cells[0].iter().take(2).enumerate() {
                    page.breakdown.insert(format!("r{round}_p{i}_fighter"), name.clone());
                }
                for (stat, values) in BREAKDOWN_STATS.iter().zip(&cells[1..]) {
                    for (i, v) in values.iter().take(2).enumerate() {
                        page.breakdown.insert(format!("r{round}_p{i}_{stat}"), v.clone());
                    }
                }
            }
            n => log::debug!("Round {round} table with {n} columns skipped"),
        }
    }
}

/// "Round 3" → 3.
fn round_header(text: &str) -> Option<usize> {
    let rest = text.trim().strip_prefix("Round")?;
    rest.trim().parse().ok()
}

fn parse_preview(root: ElementRef<'_>, f: &mut RawFields) {
    for row in root.select(selector!("tr.b-fight-details__table-row-preview")) {
        let Some(label) = select_text(row, selector!("td.l-page_align_left p.b-fight-details__table-text")) else {
            continue;
        };
        let stat = field_key(&label);
        if stat.is_empty() {
            continue;
        }
        let values = select_texts(row, selector!("td:not(.l-page_align_left) p.b-fight-details__table-text"));
        if values.len() >= 2 {
            f.insert(format!("fighter1_{stat}"), values[0].clone());
            f.insert(format!("fighter2_{stat}"), values[1].clone());
        }
    }
}
