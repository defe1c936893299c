// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// One pipeline of the scraper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Completed events and their fight lists.
    Previous,
    /// The next scheduled event, with per-fight preview details.
    Upcoming,
    /// Per-round statistics for every fight listed in the events dataset.
    Details,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Previous => "previous events",
            Phase::Upcoming => "upcoming event",
            Phase::Details => "fight details",
        }
    }

    /// Dataset file stem written by this phase.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Phase::Previous => EVENTS_FILE,
            Phase::Upcoming => UPCOMING_FILE,
            Phase::Details => DETAILS_FILE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Phases to run, in this order.
    pub phases: Vec<Phase>,
    /// Cap on listed events considered by the previous-events phase.
    pub events_limit: Option<usize>,
    /// Cap on new fights fetched by the details phase.
    pub max_fights: Option<usize>,
    pub data_dir: PathBuf,
    pub format: ExportFormat,
    pub workers: usize,
    /// Overrides both default pauses when set.
    pub pause: Option<Duration>,
    pub base_url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            phases: vec![Phase::Previous, Phase::Upcoming],
            events_limit: None,
            max_fights: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            format: ExportFormat::Csv,
            workers: WORKERS,
            pause: None,
            base_url: s!(BASE_URL),
        }
    }
}

impl ScrapeOptions {
    pub fn dataset_path(&self, phase: Phase) -> PathBuf {
        join_dir_and_stem(&self.data_dir, phase.file_stem(), self.format.ext())
    }

    pub fn listing_pause(&self) -> Duration {
        self.pause.unwrap_or(Duration::from_millis(LISTING_PAUSE_MS))
    }

    pub fn detail_pause(&self) -> Duration {
        self.pause.unwrap_or(Duration::from_millis(DETAIL_PAUSE_MS))
    }

    pub fn events_listing_url(&self) -> String {
        join!(self.base_url.trim_end_matches('/'), EVENTS_LISTING_PATH)
    }
}

fn join_dir_and_stem(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    dir.join(join!(stem, ".", ext))
}
