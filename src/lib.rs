// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod model;
pub mod specs;

pub mod file;
pub mod normalize;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod scrape;
pub mod store;

pub use error::{FetchError, ItemError, ScrapeError, StoreError};
pub use model::{Record, Side};
pub use reconcile::{load_seen_keys, merge_and_save, merge_and_save_by, reconcile, reconcile_parallel};
pub use store::{DataSet, Store};
