// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://ufcstats.com";
pub const EVENTS_LISTING_PATH: &str = "/statistics/events/completed?page=all";
pub const USER_AGENT: &str = concat!("ufc_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 30;

// Local store
pub const DEFAULT_DATA_DIR: &str = "data";
pub const EVENTS_FILE: &str = "ufc_events";
pub const UPCOMING_FILE: &str = "ufc_upcoming_events";
pub const DETAILS_FILE: &str = "ufc_fight_details";

// Key columns
pub const EVENT_LINK: &str = "event_link";
pub const EVENT_NAME: &str = "event_name";
pub const FIGHT_LINK: &str = "fight_link";
pub const FIGHT_URL: &str = "fight_url";
pub const ROUND: &str = "round";

// Normalization
pub const MISSING_STAT: &str = "0";

// Politeness
pub const LISTING_PAUSE_MS: u64 = 100; // between event pages
pub const DETAIL_PAUSE_MS: u64 = 500; // between fight pages (3 requests each)

// Concurrency
pub const WORKERS: usize = 1; // sequential unless asked otherwise
