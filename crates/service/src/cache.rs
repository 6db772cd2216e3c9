//! Process-local cache of section values with per-entry expiry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::{mapref::entry::Entry, DashMap};
use tokio::time::Instant;

/// Far enough in the future to mean "never" without overflowing `Instant`.
const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Per-name slot. The slot outlives its value so the write sequence keeps counting.
struct Slot<V> {
    seq: u64,
    entry: Option<CacheEntry<V>>,
}

impl<V> Slot<V> {
    fn empty() -> Self {
        Self { seq: 0, entry: None }
    }

    fn replace(&mut self, entry: Option<CacheEntry<V>>) {
        self.seq += 1;
        self.entry = entry;
    }
}

/// Write position of one name, taken before a slow backend read.
///
/// Any `set` or `invalidate` touching the name afterwards makes the token stale,
/// and [`TtlCache::set_if_current`] then refuses to store the (older) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    seq: u64,
}

/// Map from section name to value with an absolute expiry per entry.
///
/// Expired entries are dropped lazily when read; there is no background sweep.
/// Uses `tokio::time::Instant` so paused-clock tests control expiry.
pub struct TtlCache<V> {
    slots: DashMap<String, Slot<V>>,
    /// Bumped by `invalidate(None)`.
    epoch: AtomicU64,
    default_ttl: Duration,
}

fn entry_for<V>(value: V, ttl: Duration) -> CacheEntry<V> {
    let now = Instant::now();
    let expires_at = now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now);
    CacheEntry { value, expires_at }
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self { slots: DashMap::new(), epoch: AtomicU64::new(0), default_ttl }
    }

    /// Value for `name` if present and not yet expired.
    pub fn get(&self, name: &str) -> Option<V> {
        let now = Instant::now();
        {
            let slot = self.slots.get(name)?;
            match &slot.entry {
                Some(e) if now < e.expires_at => return Some(e.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // re-check under the write lock: a concurrent `set` may have refreshed it
        if let Some(mut slot) = self.slots.get_mut(name) {
            if slot.entry.as_ref().is_some_and(|e| now >= e.expires_at) {
                slot.entry = None;
            }
        }
        None
    }

    pub fn set(&self, name: &str, value: V, ttl: Duration) {
        self.slots
            .entry(name.to_string())
            .or_insert_with(Slot::empty)
            .replace(Some(entry_for(value, ttl)));
    }

    pub fn set_default(&self, name: &str, value: V) {
        self.set(name, value, self.default_ttl);
    }

    /// Current write position of `name`.
    pub fn generation(&self, name: &str) -> Generation {
        let epoch = self.epoch.load(Ordering::Acquire);
        let seq = self.slots.get(name).map_or(0, |s| s.seq);
        Generation { epoch, seq }
    }

    /// Store `value` with the default TTL unless `name` was written or
    /// invalidated after `seen` was taken. Returns whether it was stored.
    pub fn set_if_current(&self, name: &str, value: V, seen: Generation) -> bool {
        let entry = self.slots.entry(name.to_string());
        if self.epoch.load(Ordering::Acquire) != seen.epoch {
            return false;
        }
        match entry {
            Entry::Occupied(mut o) if o.get().seq == seen.seq => {
                o.get_mut().replace(Some(entry_for(value, self.default_ttl)));
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(v) if seen.seq == 0 => {
                v.insert(Slot::empty()).replace(Some(entry_for(value, self.default_ttl)));
                true
            }
            Entry::Vacant(_) => false,
        }
    }

    /// Remove one entry, or every entry when `name` is `None`.
    pub fn invalidate(&self, name: Option<&str>) {
        match name {
            Some(n) => self.slots.entry(n.to_string()).or_insert_with(Slot::empty).replace(None),
            None => {
                self.epoch.fetch_add(1, Ordering::AcqRel);
                self.slots.iter_mut().for_each(|mut s| s.replace(None));
            }
        }
    }

    /// Number of stored values, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
