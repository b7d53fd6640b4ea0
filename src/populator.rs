// src/populator.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard,
};
use tracing::{debug, error, info, warn};

use crate::{
    container::Container,
    fetch::CsvSource,
    fields::{build_field_pairs, DEFAULT_MAX_PAIRS},
    links::{extract_company_names, ParseMode},
};

/// Optional leading whitespace, optional sign, then digits. Anything after
/// the digits is ignored, so `"3 companies"` and `"2.9"` still count.
static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("leading-integer regex should compile"));

/// Parse the leading base-10 integer of `raw`. `None` when there is none or
/// it does not fit in an `i64`.
pub fn parse_count(raw: &str) -> Option<i64> {
    LEADING_INT
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Number of field pairs to render for `raw`, or `None` if nothing should be
/// rendered.
pub fn requested_pairs(raw: &str) -> Option<usize> {
    parse_count(raw)
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

/// What a single count-input event ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// The count was not a positive integer; no fetch was issued.
    Skipped,
    /// The count exceeded the configured maximum; no fetch was issued.
    TooMany { requested: usize, max: usize },
    /// `pairs` field pairs were rendered with `names` company options each.
    Rendered { pairs: usize, names: usize },
    /// The CSV could not be fetched; the container stays empty.
    FetchFailed,
    /// A later event started while this one was fetching; its result was
    /// discarded.
    Superseded,
}

/// Renders company/relationship field pairs into a shared container whenever
/// the count input changes.
///
/// Every event clears the container before anything else. Each event also
/// takes a generation ticket; a fetch that resolves after a newer event has
/// started is dropped instead of overwriting the newer state.
pub struct FormPopulator<S, C> {
    source: S,
    container: Arc<Mutex<C>>,
    parse_mode: ParseMode,
    max_pairs: usize,
    generation: AtomicU64,
}

impl<S, C> FormPopulator<S, C>
where
    S: CsvSource,
    C: Container,
{
    pub fn new(source: S, container: Arc<Mutex<C>>) -> Self {
        Self {
            source,
            container,
            parse_mode: ParseMode::default(),
            max_pairs: DEFAULT_MAX_PAIRS,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Counts above `max_pairs` render nothing.
    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    pub fn container(&self) -> &Arc<Mutex<C>> {
        &self.container
    }

    /// Handle a change of the count input. Never fails: every error ends in
    /// an empty container and is reported through the outcome and the log.
    pub async fn on_count_input(&self, raw: &str) -> PopulateOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock_container().clear();

        let Some(count) = requested_pairs(raw) else {
            debug!(raw, "count is not a positive integer; nothing to render");
            return PopulateOutcome::Skipped;
        };
        if count > self.max_pairs {
            warn!(
                requested = count,
                max = self.max_pairs,
                "count exceeds the field pair limit; nothing to render"
            );
            return PopulateOutcome::TooMany {
                requested: count,
                max: self.max_pairs,
            };
        }

        let body = match self.source.fetch_csv().await {
            Ok(body) => body,
            Err(e) => {
                error!(
                    source = %self.source.describe(),
                    error = %format!("{:#}", e),
                    "failed to fetch company CSV; check the path and try again"
                );
                return PopulateOutcome::FetchFailed;
            }
        };

        let names = extract_company_names(&body, self.parse_mode);
        let fields = build_field_pairs(count, &names);

        // Checked under the lock: a newer event bumps the generation before it
        // clears, so once we hold the lock with a current ticket nothing newer
        // has touched the container.
        let mut container = self.lock_container();
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, count, "discarding stale CSV response");
            return PopulateOutcome::Superseded;
        }
        for field in fields {
            container.append(field);
        }

        info!(pairs = count, names = names.len(), "rendered company fields");
        PopulateOutcome::Rendered {
            pairs: count,
            names: names.len(),
        }
    }

    fn lock_container(&self) -> MutexGuard<'_, C> {
        self.container
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
