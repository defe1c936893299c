// tests/common/mod.rs
// In-memory site: canned pages keyed by URL, with a log of every request.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use ufc_scrape::config::options::{ExportFormat, Phase, ScrapeOptions};
use ufc_scrape::core::Fetch;
use ufc_scrape::error::FetchError;

pub const BASE: &str = "http://ufcstats.test";

#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls().iter().filter(|u| u.contains(needle)).count()
    }
}

impl Fetch for MapFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { url: url.to_string() })
    }
}

pub fn options(dir: &Path, phases: &[Phase]) -> ScrapeOptions {
    ScrapeOptions {
        phases: phases.to_vec(),
        data_dir: dir.to_path_buf(),
        format: ExportFormat::Csv,
        pause: Some(std::time::Duration::ZERO),
        base_url: BASE.to_string(),
        ..ScrapeOptions::default()
    }
}

pub fn listing_url() -> String {
    format!("{BASE}/statistics/events/completed?page=all")
}

pub fn event_url(id: &str) -> String {
    format!("{BASE}/event-details/{id}")
}

pub fn fight_url(id: &str) -> String {
    format!("{BASE}/fight-details/{id}")
}

pub fn fighter_url(id: &str) -> String {
    format!("{BASE}/fighter-details/{id}")
}

/* ---------------- Page builders ---------------- */

/// (event id, name, upcoming)
pub fn listing_page(events: &[(&str, &str, bool)]) -> String {
    let rows: String = events
        .iter()
        .map(|(id, name, upcoming)| {
            let class = if *upcoming {
                "b-statistics__table-row b-statistics__table-row_type_first"
            } else {
                "b-statistics__table-row"
            };
            format!(
                r#"<tr class="{class}">
                     <td class="b-statistics__table-col">
                       <i class="b-statistics__table-content">
                         <a href="{url}" class="b-link b-link_style_black">{name}</a>
                         <span class="b-statistics__date">January 1, 2024</span>
                       </i>
                     </td>
                     <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">Las Vegas, Nevada, USA</td>
                   </tr>"#,
                url = event_url(id)
            )
        })
        .collect();
    format!(
        r#"<html><body><table class="b-statistics__table-events"><tbody>
             <tr class="b-statistics__table-row"><td class="b-statistics__table-col b-statistics__table-col_type_clear"></td></tr>
             {rows}
           </tbody></table></body></html>"#
    )
}

fn col(values: &[&str]) -> String {
    let ps: String = values
        .iter()
        .map(|v| format!(r#"<p class="b-fight-details__table-text">{v}</p>"#))
        .collect();
    format!(r#"<td class="b-fight-details__table-col">{ps}</td>"#)
}

/// (fight id, fighter1, fighter2)
pub fn event_page(name: &str, fights: &[(&str, &str, &str)]) -> String {
    let rows: String = fights
        .iter()
        .map(|(id, f1, f2)| {
            format!(
                r#"<tr class="b-fight-details__table-row b-fight-details__table-row__hover" data-link="{link}">
                     {wl}
                     <td class="b-fight-details__table-col">
                       <p class="b-fight-details__table-text"><a class="b-link b-link_style_black" href="{BASE}/fighter-details/x">{f1}</a></p>
                       <p class="b-fight-details__table-text"><a class="b-link b-link_style_black" href="{BASE}/fighter-details/y">{f2}</a></p>
                     </td>
                     {kd}{st}{td}{sub}{wc}{method}{rnd}{time}
                   </tr>"#,
                link = fight_url(id),
                wl = col(&["win"]),
                kd = col(&["0", "0"]),
                st = col(&["10", "5"]),
                td = col(&["0", "0"]),
                sub = col(&["0", "0"]),
                wc = col(&["Lightweight"]),
                method = col(&["U-DEC"]),
                rnd = col(&["3"]),
                time = col(&["5:00"]),
            )
        })
        .collect();
    format!(
        r#"<html><body>
             <h2 class="b-content__title"><span class="b-content__title-highlight">{name}</span></h2>
             <ul><li class="b-list__box-list-item"><i class="b-list__box-item-title">Location:</i> Las Vegas, Nevada, USA</li></ul>
             <table class="b-fight-details__table"><tbody class="b-fight-details__table-body">{rows}</tbody></table>
           </body></html>"#
    )
}

fn round_table(round: usize, cells: &[[&str; 2]]) -> String {
    let tds: String = cells.iter().map(|c| col(c)).collect();
    format!(
        r#"<table class="b-fight-details__table">
             <thead class="b-fight-details__table-row b-fight-details__table-row_type_head">
               <tr><th class="b-fight-details__table-col">Round {round}</th></tr>
             </thead>
             <tbody class="b-fight-details__table-body"><tr class="b-fight-details__table-row">{tds}</tr></tbody>
           </table>"#
    )
}

/// Completed fight with `rounds` rounds; red knocks blue down once in round 1.
pub fn fight_page(red: &str, red_id: &str, blue: &str, blue_id: &str, rounds: usize) -> String {
    let mut tables = String::new();
    for r in 1..=rounds {
        let kd = if r == 1 { "1" } else { "0" };
        tables.push_str(&round_table(r, &[
            [red, blue], [kd, "0"], ["12 of 20", "8 of 20"], ["60%", "40%"], ["20 of 30", "15 of 25"],
            ["1 of 2", "0 of 0"], ["50%", "---"], ["0", "1"], ["0", "0"], ["1:02", "0:10"],
        ]));
    }
    for r in 1..=rounds {
        tables.push_str(&round_table(r, &[
            [red, blue], ["12 of 20", "8 of 20"], ["60%", "40%"], ["9 of 15", "6 of 14"], ["2 of 2", "1 of 3"],
            ["1 of 3", "1 of 3"], ["10 of 18", "7 of 19"], ["1 of 1", "1 of 1"], ["1 of 1", "0 of 0"],
        ]));
    }
    format!(
        r#"<html><body>
             <h2 class="b-content__title"><a class="b-link" href="{ev}">UFC Test Night</a></h2>
             <div class="b-fight-details__person">
               <i class="b-fight-details__person-status">W</i>
               <h3 class="b-fight-details__person-name"><a class="b-link" href="{red_url}">{red}</a></h3>
             </div>
             <div class="b-fight-details__person">
               <i class="b-fight-details__person-status">L</i>
               <h3 class="b-fight-details__person-name"><a class="b-link" href="{blue_url}">{blue}</a></h3>
             </div>
             <i class="b-fight-details__fight-title">Lightweight Bout</i>
             <p class="b-fight-details__text">
               <i class="b-fight-details__text-item_first"><i class="b-fight-details__label">Method:</i> Decision - Unanimous</i>
               <i class="b-fight-details__text-item"><i class="b-fight-details__label">Round:</i> {rounds}</i>
             </p>
             {tables}
           </body></html>"#,
        ev = event_url("e1"),
        red_url = fighter_url(red_id),
        blue_url = fighter_url(blue_id),
    )
}

/// Upcoming fight: persons and the comparison table only.
pub fn preview_page(f1: &str, f2: &str) -> String {
    format!(
        r#"<html><body>
             <div class="b-fight-details__person">
               <h3 class="b-fight-details__person-name"><a class="b-link" href="{BASE}/fighter-details/p1">{f1}</a></h3>
               <p class="b-fight-details__person-title">"One"</p>
             </div>
             <div class="b-fight-details__person">
               <h3 class="b-fight-details__person-name"><a class="b-link" href="{BASE}/fighter-details/p2">{f2}</a></h3>
               <p class="b-fight-details__person-title">"Two"</p>
             </div>
             <i class="b-fight-details__fight-title">Welterweight Bout</i>
             <table><tbody>
               <tr class="b-fight-details__table-row-preview">
                 <td class="b-fight-details__table-col l-page_align_left"><p class="b-fight-details__table-text">Reach</p></td>
                 <td class="b-fight-details__table-col"><p class="b-fight-details__table-text">74"</p></td>
                 <td class="b-fight-details__table-col"><p class="b-fight-details__table-text">71"</p></td>
               </tr>
             </tbody></table>
           </body></html>"#
    )
}

pub fn fighter_page(reach: &str) -> String {
    format!(
        r#"<html><body>
             <div class="b-list__info-box b-list__info-box_style_small-width">
               <ul>
                 <li class="b-list__box-list-item"><i class="b-list__box-item-title">Height:</i> 5' 11"</li>
                 <li class="b-list__box-list-item"><i class="b-list__box-item-title">Reach:</i> {reach}"</li>
                 <li class="b-list__box-list-item"><i class="b-list__box-item-title">STANCE:</i> Southpaw</li>
               </ul>
             </div>
           </body></html>"#
    )
}

pub fn dataset_path(opts: &ScrapeOptions, phase: Phase) -> std::path::PathBuf {
    opts.dataset_path(phase)
}
