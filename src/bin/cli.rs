// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use ufc_scrape::cli::{Args, ConsoleProgress};
use ufc_scrape::{log, runner};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    log::init(args.verbose, args.log_file.as_deref()).wrap_err("could not open log file")?;

    let opts = args.to_options();
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Some(&mut progress)).wrap_err("scrape aborted")?;

    for report in &summary.phases {
        println!(
            "{}: {} fetched, {} skipped, {} failed, {} rows added → {}",
            report.phase.label(),
            report.fetched,
            report.skipped,
            report.failed.len(),
            report.merge.added,
            opts.dataset_path(report.phase).display()
        );
    }
    if summary.failed() > 0 {
        println!("{} items failed and will be retried next run.", summary.failed());
    }
    Ok(())
}
