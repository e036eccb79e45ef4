//! Local mirror of the server's per-slot unavailability data.
//!
//! The cache is seeded from a full server snapshot and mutated
//! speculatively when the user saves or removes a selection, so the UI can
//! render the new state before any request completes. Mutations are
//! provisional: the cache only becomes authoritative again on the next
//! `seed`. On failure the whole cache is discarded and re-seeded, never
//! patched back.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::protocol::UnavailabilityDetails;
use crate::slot::{SlotKey, TimeOfDay};

type DaySlots = BTreeMap<TimeOfDay, Vec<String>>;

/// Per-slot ordered name lists, keyed by date then time of day.
///
/// Name lists behave as ordered sets: no duplicates, insertion order kept.
/// Slots and dates with no names are removed outright, so "has any
/// unavailability" checks stay cheap and exact.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptimisticCache {
    days: BTreeMap<NaiveDate, DaySlots>,
}

impl OptimisticCache {
    pub fn new() -> OptimisticCache {
        OptimisticCache::default()
    }

    /// Replace the cache wholesale with a copy of server data. Wire name
    /// lists are comma-joined; empty strings contribute no names.
    pub fn seed(&mut self, details: &UnavailabilityDetails) {
        self.days.clear();
        for (day, slots) in details {
            for (time, joined) in slots {
                let names: Vec<String> = joined
                    .split(',')
                    .filter(|n| !n.is_empty())
                    .map(String::from)
                    .collect();
                if !names.is_empty() {
                    self.days.entry(*day).or_default().insert(*time, names);
                }
            }
        }
    }

    /// Speculatively mark `name` unavailable on every given slot. Appending
    /// is idempotent: a name already present is left where it is.
    pub fn apply_add(&mut self, name: &str, keys: impl IntoIterator<Item = SlotKey>) {
        for key in keys {
            let names = self
                .days
                .entry(key.day)
                .or_default()
                .entry(key.time)
                .or_default();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    /// Speculatively remove `name` from every given slot, pruning slots and
    /// dates that end up empty.
    pub fn apply_remove(&mut self, name: &str, keys: impl IntoIterator<Item = SlotKey>) {
        for key in keys {
            let Some(slots) = self.days.get_mut(&key.day) else {
                continue;
            };
            if let Some(names) = slots.get_mut(&key.time) {
                names.retain(|n| n != name);
                if names.is_empty() {
                    slots.remove(&key.time);
                }
            }
            if slots.is_empty() {
                self.days.remove(&key.day);
            }
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> &BTreeMap<NaiveDate, DaySlots> {
        &self.days
    }

    pub fn names_at(&self, key: &SlotKey) -> &[String] {
        self.days
            .get(&key.day)
            .and_then(|slots| slots.get(&key.time))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count_at(&self, key: &SlotKey) -> usize {
        self.names_at(key).len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Back to the wire shape (comma-joined names).
    pub fn to_details(&self) -> UnavailabilityDetails {
        self.days
            .iter()
            .map(|(day, slots)| {
                let joined = slots
                    .iter()
                    .map(|(time, names)| (*time, names.join(",")))
                    .collect();
                (*day, joined)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn key(d: u32, time: TimeOfDay) -> SlotKey {
        SlotKey::new(date(d), time)
    }

    fn seeded() -> OptimisticCache {
        let mut details = UnavailabilityDetails::new();
        details
            .entry(date(1))
            .or_default()
            .insert(TimeOfDay::Morning, "ala,bartek".to_string());
        details
            .entry(date(2))
            .or_default()
            .insert(TimeOfDay::Evening, "ala".to_string());

        let mut cache = OptimisticCache::new();
        cache.seed(&details);
        cache
    }

    #[test]
    fn seed_splits_wire_name_lists() {
        let cache = seeded();
        assert_eq!(cache.names_at(&key(1, TimeOfDay::Morning)), ["ala", "bartek"]);
        assert_eq!(cache.count_at(&key(2, TimeOfDay::Evening)), 1);
        assert_eq!(cache.count_at(&key(2, TimeOfDay::Morning)), 0);
    }

    #[test]
    fn add_is_idempotent_and_preserves_order() {
        let mut cache = seeded();
        cache.apply_add("ala", [key(1, TimeOfDay::Morning)]);
        assert_eq!(cache.names_at(&key(1, TimeOfDay::Morning)), ["ala", "bartek"]);

        cache.apply_add("celina", [key(1, TimeOfDay::Morning)]);
        assert_eq!(
            cache.names_at(&key(1, TimeOfDay::Morning)),
            ["ala", "bartek", "celina"]
        );
    }

    #[test]
    fn remove_prunes_empty_slots_and_dates() {
        let mut cache = seeded();
        cache.apply_remove("ala", [key(2, TimeOfDay::Evening)]);

        assert!(!cache.snapshot().contains_key(&date(2)));
        assert!(cache.snapshot().contains_key(&date(1)));
    }

    #[test]
    fn remove_of_absent_name_is_noop() {
        let mut cache = seeded();
        let before = cache.clone();
        cache.apply_remove("nobody", [key(1, TimeOfDay::Morning), key(3, TimeOfDay::Noon)]);
        assert_eq!(cache, before);
    }

    #[test]
    fn add_then_remove_roundtrips() {
        let mut cache = seeded();
        let before = cache.clone();
        let slots = [key(1, TimeOfDay::Morning), key(3, TimeOfDay::Noon)];

        cache.apply_add("celina", slots);
        cache.apply_remove("celina", slots);

        assert_eq!(cache, before);
    }

    #[test]
    fn seed_discards_previous_state() {
        let mut cache = seeded();
        cache.apply_add("celina", [key(5, TimeOfDay::Noon)]);

        let fresh = UnavailabilityDetails::new();
        cache.seed(&fresh);
        assert!(cache.is_empty());
    }

    #[test]
    fn wire_roundtrip() {
        let cache = seeded();
        let mut restored = OptimisticCache::new();
        restored.seed(&cache.to_details());
        assert_eq!(restored, cache);
    }
}
