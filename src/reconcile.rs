// src/reconcile.rs
//
// Incremental scraping core.
//
//   load_seen_keys   → what the dataset already holds
//   reconcile        → fetch + normalize only candidates not yet held
//   merge_and_save   → existing ∪ new, first occurrence of a key wins, one atomic write
//
// A failing candidate never stops the batch; it stays out of the dataset and is
// therefore picked up again next run.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use crate::{
    error::{ItemError, StoreError},
    model::{EventListing, FightListing, Record},
    progress::Progress,
    store::{DataSet, Store},
};

/// Anything that can be fetched and is identified by a stable key.
pub trait Candidate {
    fn key(&self) -> &str;
}

impl Candidate for String {
    fn key(&self) -> &str {
        self
    }
}

impl Candidate for EventListing {
    fn key(&self) -> &str {
        &self.event_link
    }
}

impl Candidate for FightListing {
    fn key(&self) -> &str {
        &self.fight_link
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Delay between consecutive fetches (per worker when parallel).
    pub pause: Duration,
    /// Cap on new candidates fetched this run.
    pub limit: Option<usize>,
    pub workers: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self { pause: Duration::ZERO, limit: None, workers: 1 }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub key: String,
    pub error: ItemError,
}

#[derive(Debug, Default)]
pub struct Outcome {
    /// New records, in candidate order.
    pub records: Vec<Record>,
    pub failures: Vec<Failure>,
    /// Candidates already held (or repeated within this run).
    pub skipped: usize,
    /// Candidates actually fetched, successful or not.
    pub fetched: usize,
}

/// Distinct non-empty values of `key_field` in the stored dataset.
/// A missing file is an empty set; a dataset without that column is an error.
pub fn load_seen_keys(store: &Store, key_field: &str) -> Result<HashSet<String>, StoreError> {
    if !store.exists() {
        log::debug!("{} not found; starting empty", store.path().display());
        return Ok(HashSet::new());
    }
    let ds = store.read_all()?;
    if ds.headers.is_empty() {
        return Ok(HashSet::new());
    }
    let values = ds.column_values(key_field).ok_or_else(|| StoreError::MissingColumn {
        path: store.path().to_path_buf(),
        column: s!(key_field),
    })?;
    let seen: HashSet<String> = values.filter(|v| !v.trim().is_empty()).map(str::to_string).collect();
    log::info!("{} already holds {} distinct {key_field}", store.path().display(), seen.len());
    Ok(seen)
}

/// Candidates still to fetch, in order, honoring the seen set and the limit.
fn pending<'c, C: Candidate>(
    candidates: &'c [C],
    seen: &HashSet<String>,
    limit: Option<usize>,
) -> (Vec<&'c C>, usize) {
    let mut queued: HashSet<&str> = HashSet::new();
    let mut todo = Vec::new();
    let mut skipped = 0;

    for c in candidates {
        let key = c.key();
        if seen.contains(key) || !queued.insert(key) {
            skipped += 1;
            continue;
        }
        todo.push(c);
    }

    if let Some(max) = limit {
        if todo.len() > max {
            log::info!("Limiting to {max} of {} new items", todo.len());
            todo.truncate(max);
        }
    }
    (todo, skipped)
}

fn report(progress: &mut Option<&mut dyn Progress>, key: &str, result: &Result<Vec<Record>, ItemError>) {
    match result {
        Ok(recs) => {
            log::debug!("{key}: {} records", recs.len());
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(key, recs.len());
            }
        }
        Err(e) => {
            log::warn!("{key}: {e}");
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(key, &e.to_string());
            }
        }
    }
}

fn collect(outcome: &mut Outcome, key: &str, result: Result<Vec<Record>, ItemError>) {
    outcome.fetched += 1;
    match result {
        Ok(mut recs) => outcome.records.append(&mut recs),
        Err(error) => outcome.failures.push(Failure { key: s!(key), error }),
    }
}

/// Fetch and normalize every candidate not in `seen`, one at a time.
pub fn reconcile<C, F>(
    candidates: &[C],
    seen: &HashSet<String>,
    mut fetch_and_normalize: F,
    opts: &ReconcileOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Outcome
where
    C: Candidate,
    F: FnMut(&C) -> Result<Vec<Record>, ItemError>,
{
    let (todo, skipped) = pending(candidates, seen, opts.limit);
    let mut outcome = Outcome { skipped, ..Outcome::default() };
    log::info!("{} new, {} already held", todo.len(), skipped);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(todo.len());
    }

    for (i, c) in todo.into_iter().enumerate() {
        if i > 0 && !opts.pause.is_zero() {
            thread::sleep(opts.pause); // be polite
        }
        let result = fetch_and_normalize(c);
        report(&mut progress, c.key(), &result);
        collect(&mut outcome, c.key(), result);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcome
}

/// Same contract as [`reconcile`], fetching on `opts.workers` scoped threads.
/// Results are put back in candidate order before they are returned.
pub fn reconcile_parallel<C, F>(
    candidates: &[C],
    seen: &HashSet<String>,
    fetch_and_normalize: F,
    opts: &ReconcileOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Outcome
where
    C: Candidate + Sync,
    F: Fn(&C) -> Result<Vec<Record>, ItemError> + Sync,
{
    if opts.workers <= 1 {
        return reconcile(candidates, seen, &fetch_and_normalize, opts, progress);
    }

    let (todo, skipped) = pending(candidates, seen, opts.limit);
    let mut outcome = Outcome { skipped, ..Outcome::default() };
    log::info!("{} new, {} already held, {} workers", todo.len(), skipped, opts.workers);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(todo.len());
    }

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Vec<Record>, ItemError>)>();
    let workers = opts.workers.min(todo.len()).max(1);
    let mut results: Vec<(usize, Result<Vec<Record>, ItemError>)> = Vec::with_capacity(todo.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (todo, counter, f) = (&todo, &counter, &fetch_and_normalize);
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= todo.len() {
                    break;
                }
                if tx.send((i, f(todo[i]))).is_err() {
                    break;
                }
                if !opts.pause.is_zero() {
                    thread::sleep(opts.pause); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            report(&mut progress, todo[i].key(), &result);
            results.push((i, result));
        }
    });

    results.sort_by_key(|(i, _)| *i);
    for (i, result) in results {
        collect(&mut outcome, todo[i].key(), result);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcome
}

/// What one merge did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Rows in the store before the merge.
    pub existing: usize,
    /// New rows that made it in.
    pub added: usize,
    /// Rows dropped because their key was already present.
    pub dropped_duplicates: usize,
    /// Rows in the store after the merge.
    pub total: usize,
}

/// [`merge_and_save_by`] with a single key column.
pub fn merge_and_save(store: &Store, new_records: &[Record], key_field: &str) -> Result<MergeSummary, StoreError> {
    merge_and_save_by(store, new_records, &[key_field])
}

/// Append `new_records` to the stored dataset and write it back.
///
/// Rows are unique by the combination of `key_fields`; the first occurrence wins,
/// so stored rows beat new ones. Columns are the stored columns followed by any new
/// ones in first-seen order. Nothing is written when `new_records` is empty.
pub fn merge_and_save_by(
    store: &Store,
    new_records: &[Record],
    key_fields: &[&str],
) -> Result<MergeSummary, StoreError> {
    if new_records.is_empty() {
        log::info!("No new rows for {}", store.path().display());
        return Ok(MergeSummary::default());
    }

    let mut ds = if store.exists() { store.read_all()? } else { DataSet::default() };
    let existing = ds.len();

    // A stored table without the key is never widened into one that has it.
    if !ds.headers.is_empty() {
        key_columns(&ds, key_fields, store)?;
    }

    for rec in new_records {
        ds.push_record(rec);
    }
    let cols = key_columns(&ds, key_fields, store)?;
    let before = ds.len();
    let kept_existing = dedup_first_wins(&mut ds, &cols, existing);

    let summary = MergeSummary {
        existing,
        added: ds.len() - kept_existing,
        dropped_duplicates: before - ds.len(),
        total: ds.len(),
    };

    store.write_all(&ds)?;
    log::info!(
        "{}: {} existing + {} new ({} duplicates dropped) = {} rows",
        store.path().display(),
        summary.existing,
        summary.added,
        summary.dropped_duplicates,
        summary.total
    );
    Ok(summary)
}

/// Column index of every key field, or the first one the table lacks.
fn key_columns(ds: &DataSet, key_fields: &[&str], store: &Store) -> Result<Vec<usize>, StoreError> {
    key_fields
        .iter()
        .map(|k| {
            ds.column(k).ok_or_else(|| StoreError::MissingColumn {
                path: store.path().to_path_buf(),
                column: s!(*k),
            })
        })
        .collect()
}

/// Keep the first row of every key. Returns how many of the first `existing`
/// rows survived.
fn dedup_first_wins(ds: &mut DataSet, cols: &[usize], existing: usize) -> usize {
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(ds.len());
    let mut kept_existing = 0;
    let mut idx = 0;

    ds.rows.retain(|row| {
        let key: Vec<String> = cols.iter().map(|&c| row[c].clone()).collect();
        let keep = seen.insert(key);
        if keep && idx < existing {
            kept_existing += 1;
        }
        idx += 1;
        keep
    });
    kept_existing
}
