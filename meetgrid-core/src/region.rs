//! User-drawn selection regions, pending submission.
//!
//! A region is a set of slots the user has marked in one gesture (a drag,
//! a two-click range, or a single click). Regions never overlap: a slot
//! belongs to at most one region, and a region that loses its last slot is
//! deleted rather than kept empty.

use std::collections::BTreeSet;

use crate::slot::SlotKey;

pub type RegionId = u64;

/// One pending selection. Never empty while stored in a [`RegionSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    slots: BTreeSet<SlotKey>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn slots(&self) -> &BTreeSet<SlotKey> {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The maximal slot (latest date, then latest time of day). Anchors the
    /// per-region delete affordance deterministically.
    pub fn last_slot(&self) -> Option<SlotKey> {
        self.slots.iter().next_back().copied()
    }
}

/// The staging area of pending regions, insertion-ordered.
#[derive(Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    next_id: RegionId,
}

impl RegionSet {
    pub fn new() -> RegionSet {
        RegionSet::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Union of every region's slots.
    pub fn occupied(&self) -> BTreeSet<SlotKey> {
        self.regions
            .iter()
            .flat_map(|r| r.slots.iter().copied())
            .collect()
    }

    pub fn is_occupied(&self, key: &SlotKey) -> bool {
        self.regions.iter().any(|r| r.slots.contains(key))
    }

    /// Single-click behavior: remove the slot from whichever region owns it
    /// (dropping the region if that empties it), otherwise start a new
    /// singleton region. Toggling the same free slot twice restores the
    /// original occupied set.
    pub fn toggle(&mut self, key: SlotKey) {
        for i in 0..self.regions.len() {
            if self.regions[i].slots.remove(&key) {
                if self.regions[i].is_empty() {
                    self.regions.remove(i);
                }
                return;
            }
        }
        self.commit([key]);
    }

    /// Commit a candidate slot set as one new region, dropping any slots
    /// already owned by an existing region. Returns the created region, or
    /// `None` if nothing remained to claim; callers can use the returned
    /// slots to animate what was just added.
    pub fn commit(&mut self, keys: impl IntoIterator<Item = SlotKey>) -> Option<&Region> {
        let occupied = self.occupied();
        let slots: BTreeSet<SlotKey> = keys
            .into_iter()
            .filter(|k| !occupied.contains(k))
            .collect();

        if slots.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.regions.push(Region { id, slots });
        self.regions.last()
    }

    /// Remove a region by id. Unknown ids are ignored.
    pub fn delete(&mut self, id: RegionId) {
        self.regions.retain(|r| r.id != id);
    }

    /// Drop everything and reset the id counter. Ids are only local
    /// correlation handles, so reuse across sessions is harmless.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.next_id = 0;
    }

    /// All pending slots across every region, consumed by save/remove.
    pub fn all_slots(&self) -> BTreeSet<SlotKey> {
        self.occupied()
    }
}
