//! Lazily built status code meters.

use crate::pairs::MetersPair;
use dashmap::DashMap;

/// Map from status code to its meters, filled on first use.
///
/// Entries are never removed. The map is sharded, so codes in different
/// shards never contend, and a missing code is inserted under its shard's
/// write lock: concurrent first uses of the same code build one pair.
#[derive(Debug, Default)]
pub struct StatusCodeMeters {
    meters: DashMap<i32, MetersPair>,
}

impl StatusCodeMeters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pair for `status_code`, building it with `create` if this
    /// is the first time the code is seen.
    ///
    /// `create` runs at most once per code, and never when the code is
    /// already present.
    pub fn get_or_create<F>(&self, status_code: i32, create: F) -> MetersPair
    where
        F: FnOnce() -> MetersPair,
    {
        if let Some(pair) = self.meters.get(&status_code) {
            return pair.value().clone();
        }

        self.meters
            .entry(status_code)
            .or_insert_with(create)
            .value()
            .clone()
    }

    /// Mark the pair for `status_code` in place, building it with `create`
    /// on first use. Same construction guarantee as
    /// [`StatusCodeMeters::get_or_create`], without cloning the handles.
    pub fn mark<F>(&self, status_code: i32, create: F)
    where
        F: FnOnce() -> MetersPair,
    {
        if let Some(pair) = self.meters.get(&status_code) {
            pair.mark();
            return;
        }

        self.meters.entry(status_code).or_insert_with(create).mark();
    }

    /// Number of distinct codes seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    #[must_use]
    pub fn contains(&self, status_code: i32) -> bool {
        self.meters.contains_key(&status_code)
    }

    /// Codes seen so far, ascending.
    #[must_use]
    pub fn status_codes(&self) -> Vec<i32> {
        let mut codes: Vec<i32> = self.meters.iter().map(|entry| *entry.key()).collect();
        codes.sort_unstable();
        codes
    }
}
