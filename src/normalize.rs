// src/normalize.rs
//
// Raw page fields → canonical records.
//
// Fight pages are read wide: every per-round value sits under `{side}_r{n}_{stat}`.
// `pivot_rounds` turns one wide mapping into one record per round with the keys
// stripped to `{side}_{stat}` and every round-invariant field copied along.
// Value cleanup happens before the pivot so every round sees the same rules:
//
//   "12 of 20" → `_landed` = 12, `_attempted` = 20   (anything else → 0 / 0)
//   "45%"      → 45
//   "", "---"  → 0

use std::collections::BTreeSet;

use crate::config::consts::{FIGHT_LINK, FIGHT_URL, MISSING_STAT, ROUND};
use crate::core::sanitize::is_blank;
use crate::model::{EventListing, FightListing, RawFields, Record, Side};
use crate::specs::fight::FightPage;
use crate::specs::fighter::ATTRIBUTES;

/// Stats printed as "landed of attempted".
pub const SPLIT_STATS: [&str; 9] = [
    "sig_str", "total_str", "td", "head", "body", "leg", "distance", "clinch", "ground",
];
/// Stats printed with a trailing percent sign.
pub const PCT_STATS: [&str; 2] = ["sig_str_pct", "td_pct"];
/// Stats copied as printed.
pub const PLAIN_STATS: [&str; 4] = ["kd", "sub_att", "rev", "ctrl"];

/// Leading columns of the events and upcoming datasets.
pub const LISTING_COLUMNS: [&str; 8] = [
    "event_name", "event_date", "event_location", "event_link",
    FIGHT_LINK, "fighter1", "fighter2", "weight_class",
];

const MATCH_COLUMNS: [&str; 9] = [
    "event_name", "event_link", "fight_type", "method", "final_round",
    "final_time", "time_format", "referee", "finish_details",
];
const PERSON_COLUMNS: [&str; 4] = ["name", "link", "status", "nickname"];

/// Split "X of Y" into (landed, attempted). Absent or malformed → ("0", "0").
pub fn split_of(value: Option<&str>) -> (String, String) {
    let zero = || (s!(MISSING_STAT), s!(MISSING_STAT));
    let Some(v) = value else { return zero() };
    match v.trim().split_once(" of ") {
        Some((landed, attempted)) if !landed.contains(" of ") && !attempted.contains(" of ") => {
            (plain(Some(landed)), plain(Some(attempted)))
        }
        _ => zero(),
    }
}

/// "45%" → "45". Absent or placeholder → "0".
pub fn strip_pct(value: Option<&str>) -> String {
    plain(value.map(|v| v.trim().trim_end_matches('%')))
}

/// Trimmed value, or "0" when absent or a placeholder.
pub fn plain(value: Option<&str>) -> String {
    match value {
        Some(v) if !is_blank(v) => v.trim().to_string(),
        _ => s!(MISSING_STAT),
    }
}

/// Per-side stat columns of one round record, without the side prefix.
pub fn stat_columns() -> Vec<String> {
    let mut cols = Vec::with_capacity(PLAIN_STATS.len() + PCT_STATS.len() + 2 * SPLIT_STATS.len());
    cols.extend(PLAIN_STATS.iter().map(|s| s.to_string()));
    cols.extend(PCT_STATS.iter().map(|s| s.to_string()));
    for stat in SPLIT_STATS {
        cols.push(format!("{stat}_landed"));
        cols.push(format!("{stat}_attempted"));
    }
    cols
}

/// A parsed `{side}_r{round}_{stat}` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKey<'a> {
    pub side: Side,
    pub round: usize,
    pub stat: &'a str,
}

pub fn parse_round_key(key: &str) -> Option<RoundKey<'_>> {
    let (side, rest) = key.split_once('_')?;
    let side = Side::parse(side)?;
    let (round, stat) = rest.split_once('_')?;
    let round = round.strip_prefix('r')?.parse().ok()?;
    if stat.is_empty() {
        return None;
    }
    Some(RoundKey { side, round, stat })
}

/// Map breakdown keys `r{n}_p{i}_{stat}` onto sides.
///
/// A participant whose printed name equals the red fighter's name exactly is red,
/// anyone else is blue. Name formatting differences can put both on blue; the
/// later participant then wins.
pub fn resolve_breakdown_sides(red_name: Option<&str>, breakdown: &RawFields) -> RawFields {
    let red_name = red_name.map(str::trim).unwrap_or_default();
    let mut out = RawFields::new();

    for (key, value) in breakdown {
        let mut parts = key.splitn(3, '_');
        let (Some(r), Some(p), Some(stat)) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        if stat == "fighter" {
            continue;
        }
        let name = breakdown.get(&format!("{r}_{p}_fighter")).map(|n| n.trim()).unwrap_or_default();
        let side = if !red_name.is_empty() && name == red_name { Side::Red } else { Side::Blue };
        out.insert(format!("{}_{r}_{stat}", side.prefix()), value.clone());
    }
    out
}

/// One record per round found among the round-scoped keys, in round order.
/// Non-round keys are copied into every record; a wide mapping without round
/// keys yields nothing.
pub fn pivot_rounds(wide: &RawFields) -> Vec<Record> {
    let rounds: BTreeSet<usize> = wide.keys().filter_map(|k| parse_round_key(k)).map(|k| k.round).collect();
    let invariant: Vec<(&String, &String)> =
        wide.iter().filter(|(k, _)| parse_round_key(k).is_none()).collect();

    rounds
        .into_iter()
        .map(|round| {
            let mut rec: Record = invariant.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            rec.set(ROUND, round.to_string());
            for (key, value) in wide {
                if let Some(rk) = parse_round_key(key).filter(|rk| rk.round == round) {
                    rec.set(format!("{}_{}", rk.side.prefix(), rk.stat), value.as_str());
                }
            }
            rec
        })
        .collect()
}

/// Clean round-scoped raw values into their canonical columns.
fn clean_round_stats(raw: &RawFields) -> RawFields {
    let mut out = RawFields::new();
    for (key, value) in raw {
        let Some(rk) = parse_round_key(key) else { continue };
        let base = format!("{}_r{}_{}", rk.side.prefix(), rk.round, rk.stat);
        if SPLIT_STATS.contains(&rk.stat) {
            let (landed, attempted) = split_of(Some(value));
            out.insert(format!("{base}_landed"), landed);
            out.insert(format!("{base}_attempted"), attempted);
        } else if PCT_STATS.contains(&rk.stat) {
            out.insert(base, strip_pct(Some(value)));
        } else {
            out.insert(base, plain(Some(value)));
        }
    }
    out
}

/// Column order of the details dataset, up to and including `round`.
pub fn detail_leading_columns() -> Vec<String> {
    let mut cols = vec![s!(FIGHT_URL)];
    cols.extend(MATCH_COLUMNS.iter().map(|c| c.to_string()));
    for side in Side::BOTH {
        let p = side.prefix();
        cols.extend(PERSON_COLUMNS.iter().map(|c| format!("{p}_fighter_{c}")));
        cols.extend(ATTRIBUTES.iter().map(|a| format!("{p}_fighter_{a}")));
    }
    cols.push(s!(ROUND));
    cols
}

/// Per-round records of one completed fight.
///
/// `profiles` holds the red and blue fighter attributes (empty when a profile
/// could not be read). Breakdown values override the totals table for the same
/// stat; stats missing for a side in a round are "0".
pub fn normalize_fight(fight_url: &str, page: &FightPage, profiles: &[RawFields; 2]) -> Vec<Record> {
    let mut raw = page.rounds.clone();
    raw.extend(resolve_breakdown_sides(page.fighter_name(Side::Red), &page.breakdown));

    let mut wide = page.info.clone();
    wide.insert(s!(FIGHT_URL), s!(fight_url));
    for (side, profile) in Side::BOTH.into_iter().zip(profiles) {
        for (attr, value) in profile {
            wide.insert(format!("{}_fighter_{attr}", side.prefix()), value.clone());
        }
    }
    wide.extend(clean_round_stats(&raw));

    let stats = stat_columns();
    let leading = detail_leading_columns();
    let leading: Vec<&str> = leading.iter().map(String::as_str).collect();

    pivot_rounds(&wide)
        .into_iter()
        .map(|mut rec| {
            for side in Side::BOTH {
                for stat in &stats {
                    let col = format!("{}_{stat}", side.prefix());
                    if rec.get(&col).is_none() {
                        rec.set(col, MISSING_STAT);
                    }
                }
            }
            rec.with_leading(&leading)
        })
        .collect()
}

/// One events-dataset row: event metadata plus the fight row.
pub fn normalize_listing(event: &EventListing, fight: &FightListing) -> Record {
    let mut rec = Record::new();
    rec.set("event_name", event.event_name.as_str());
    rec.set_opt("event_date", event.event_date.as_deref());
    rec.set_opt("event_location", event.event_location.as_deref());
    rec.set("event_link", event.event_link.as_str());
    rec.set(FIGHT_LINK, fight.fight_link.as_str());
    rec.set_opt("fighter1", fight.fighter1.as_deref());
    rec.set_opt("fighter2", fight.fighter2.as_deref());
    rec.set_opt("weight_class", fight.weight_class.as_deref());
    rec.set_opt("method", fight.method.as_deref());
    for (k, v) in &fight.extra {
        rec.set(k.as_str(), v.as_str());
    }
    rec.with_leading(&LISTING_COLUMNS)
}

/// Upcoming-fight row: the listing row enriched from the fight's preview page.
/// The page's bout title replaces the listing's weight class when present.
pub fn normalize_preview(listing: Record, page: &FightPage) -> Record {
    let mut rec = listing;
    rec.set_opt("weight_class", page.info.get("fight_type").map(String::as_str));
    for (i, side) in Side::BOTH.into_iter().enumerate() {
        let p = side.prefix();
        let n = i + 1;
        rec.set_opt(&format!("fighter{n}_nickname"), page.info.get(&format!("{p}_fighter_nickname")).map(String::as_str));
        rec.set_opt(&format!("fighter{n}_link"), page.fighter_link(side));
    }
    for (k, v) in &page.preview {
        rec.set(k.as_str(), v.as_str());
    }
    rec.with_leading(&LISTING_COLUMNS)
}
