// src/runner.rs
use crate::{
    config::options::{Phase, ScrapeOptions},
    core::{Fetch, Session},
    error::ScrapeError,
    progress::{NullProgress, Progress},
    scrape::{self, PhaseReport},
};

/// Summary of what was produced, one report per phase in run order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub phases: Vec<PhaseReport>,
}

impl RunSummary {
    /// Keys that failed in any phase; they are retried on the next run.
    pub fn failed(&self) -> usize {
        self.phases.iter().map(|p| p.failed.len()).sum()
    }
}

/// Top-level runner: open one HTTP session and run the selected phases with it.
/// The session is dropped when the run ends, whatever the result.
pub fn run(opts: &ScrapeOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, ScrapeError> {
    let session = Session::with_base(&opts.base_url).map_err(ScrapeError::Session)?;
    run_with(&session, opts, progress)
}

/// Run the selected phases in order against any fetcher.
/// A store error stops the run; per-item failures only show up in the summary.
pub fn run_with<F: Fetch + Sync>(
    fetcher: &F,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let mut summary = RunSummary::default();
    for &phase in &opts.phases {
        log::info!("── {} ──", phase.label());
        progress.log(&format!("Scraping {}…", phase.label()));

        let report = match phase {
            Phase::Previous => scrape::scrape_previous(fetcher, opts, Some(&mut *progress)),
            Phase::Upcoming => scrape::scrape_upcoming(fetcher, opts, Some(&mut *progress)),
            Phase::Details => scrape::scrape_details(fetcher, opts, Some(&mut *progress)),
        }?;

        log::info!(
            "{}: fetched {}, skipped {}, failed {}, {} rows added",
            phase.label(),
            report.fetched,
            report.skipped,
            report.failed.len(),
            report.merge.added
        );
        summary.phases.push(report);
    }
    Ok(summary)
}
