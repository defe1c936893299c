// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::consts::DEFAULT_DATA_DIR;
use crate::config::options::{ExportFormat, Phase, ScrapeOptions};
use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Incrementally scrape ufcstats.com into local CSV/TSV datasets.
///
/// Without a phase flag, previous and upcoming events are scraped.
#[derive(Debug, Parser)]
#[command(name = "ufc_scrape", version, about)]
pub struct Args {
    /// Scrape completed events and their fights.
    #[arg(long)]
    pub previous: bool,

    /// Scrape the next scheduled event with fight previews.
    #[arg(long)]
    pub upcoming: bool,

    /// Scrape per-round statistics for fights in the events dataset.
    #[arg(long)]
    pub details: bool,

    /// Only consider the first N completed events of the listing.
    #[arg(long, value_name = "N")]
    pub events: Option<usize>,

    /// Fetch at most N new fights in the details phase.
    #[arg(long, value_name = "N")]
    pub max_fights: Option<usize>,

    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Parallel fetches; 1 keeps the run strictly sequential.
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub workers: u16,

    /// Pause between fetches, overriding the per-phase defaults.
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,

    /// Append log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn phases(&self) -> Vec<Phase> {
        let picked: Vec<Phase> = [
            (self.previous, Phase::Previous),
            (self.upcoming, Phase::Upcoming),
            (self.details, Phase::Details),
        ]
        .into_iter()
        .filter_map(|(on, phase)| on.then_some(phase))
        .collect();

        if picked.is_empty() { vec![Phase::Previous, Phase::Upcoming] } else { picked }
    }

    pub fn to_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            phases: self.phases(),
            events_limit: self.events,
            max_fights: self.max_fights,
            data_dir: self.data_dir.clone(),
            format: self.format.into(),
            workers: usize::from(self.workers),
            pause: self.pause_ms.map(Duration::from_millis),
            ..ScrapeOptions::default()
        }
    }
}

/// Progress lines on stdout: `[ 3/12] ok   <key> (5 rows)`.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        if total == 0 {
            println!("Nothing new to fetch.");
        }
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, key: &str, records: usize) {
        self.done += 1;
        println!("[{:>3}/{}] ok   {key} ({records} rows)", self.done, self.total);
    }

    fn item_failed(&mut self, key: &str, reason: &str) {
        self.done += 1;
        println!("[{:>3}/{}] FAIL {key}: {reason}", self.done, self.total);
    }
}
