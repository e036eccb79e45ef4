//! Grid coordinates and range resolution over an event's calendar.
//!
//! The grid is the abstract addressable surface behind the rendered
//! calendar: an ordered list of selectable days (month padding cells are
//! not part of it), each with a fixed column of time-of-day slots. Range
//! selection between two cells follows "typewriter" semantics, like
//! selecting text across lines: day-major, slot-minor.

use chrono::NaiveDate;

use crate::slot::{SlotKey, TimeOfDay};

/// Position of a cell in the grid: index among selectable days, then index
/// within the day's slot column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GridCoord {
    pub day: usize,
    pub slot: usize,
}

impl GridCoord {
    pub fn new(day: usize, slot: usize) -> GridCoord {
        GridCoord { day, slot }
    }
}

/// The selectable surface of one event: every day from the event's
/// earliest to its latest date, inclusive.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    days: Vec<NaiveDate>,
}

impl SlotGrid {
    /// Build the grid for an event spanning `earliest..=latest`.
    /// An inverted span yields an empty grid.
    pub fn from_span(earliest: NaiveDate, latest: NaiveDate) -> SlotGrid {
        let days = earliest
            .iter_days()
            .take_while(|d| *d <= latest)
            .collect();
        SlotGrid { days }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn contains(&self, coord: GridCoord) -> bool {
        coord.day < self.days.len() && coord.slot < TimeOfDay::ALL.len()
    }

    /// Slot key at a grid coordinate, if the coordinate is on the grid.
    pub fn key_at(&self, coord: GridCoord) -> Option<SlotKey> {
        let day = *self.days.get(coord.day)?;
        let time = TimeOfDay::from_rank(coord.slot)?;
        Some(SlotKey::new(day, time))
    }

    /// Grid coordinate of a slot key, if its day is on the grid.
    pub fn coord_of(&self, key: &SlotKey) -> Option<GridCoord> {
        let day = self.days.iter().position(|d| *d == key.day)?;
        Some(GridCoord::new(day, key.time.rank()))
    }

    /// All slots between two cells, endpoints inclusive, in typewriter
    /// order: the boundary days contribute a partial slot range, interior
    /// days contribute their full column. Endpoints may be given in either
    /// order. An endpoint off the grid resolves to no slots at all.
    pub fn slots_between(&self, a: GridCoord, b: GridCoord) -> Vec<SlotKey> {
        if !self.contains(a) || !self.contains(b) {
            return Vec::new();
        }

        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let last_slot = TimeOfDay::ALL.len() - 1;

        let mut slots = Vec::new();
        for day in start.day..=end.day {
            let from = if day == start.day { start.slot } else { 0 };
            let to = if day == end.day { end.slot } else { last_slot };
            for slot in from..=to {
                // Both bounds checked against the grid above
                if let Some(key) = self.key_at(GridCoord::new(day, slot)) {
                    slots.push(key);
                }
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid() -> SlotGrid {
        SlotGrid::from_span(date(2024, 1, 1), date(2024, 1, 5))
    }

    #[test]
    fn builds_inclusive_day_list() {
        assert_eq!(grid().days().len(), 5);
        assert!(SlotGrid::from_span(date(2024, 1, 5), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn typewriter_span_across_days() {
        // (day 0, slot 2) -> (day 2, slot 0): day0 evening, all of day1, day2 morning
        let slots = grid().slots_between(GridCoord::new(0, 2), GridCoord::new(2, 0));
        let rendered: Vec<String> = slots.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "2024-01-01|evening",
                "2024-01-02|morning",
                "2024-01-02|noon",
                "2024-01-02|evening",
                "2024-01-03|morning",
            ]
        );
    }

    #[test]
    fn endpoints_normalize() {
        let g = grid();
        let forward = g.slots_between(GridCoord::new(0, 2), GridCoord::new(2, 0));
        let backward = g.slots_between(GridCoord::new(2, 0), GridCoord::new(0, 2));
        assert_eq!(forward, backward);
    }

    #[test]
    fn single_cell_span() {
        let slots = grid().slots_between(GridCoord::new(1, 1), GridCoord::new(1, 1));
        assert_eq!(slots, vec![SlotKey::new(date(2024, 1, 2), TimeOfDay::Noon)]);
    }

    #[test]
    fn same_day_partial_span() {
        let slots = grid().slots_between(GridCoord::new(3, 0), GridCoord::new(3, 1));
        assert_eq!(
            slots,
            vec![
                SlotKey::new(date(2024, 1, 4), TimeOfDay::Morning),
                SlotKey::new(date(2024, 1, 4), TimeOfDay::Noon),
            ]
        );
    }

    #[test]
    fn off_grid_endpoint_resolves_to_nothing() {
        let g = grid();
        assert!(g.slots_between(GridCoord::new(0, 0), GridCoord::new(7, 0)).is_empty());
        assert!(g.slots_between(GridCoord::new(0, 3), GridCoord::new(1, 0)).is_empty());
    }

    #[test]
    fn coord_key_roundtrip() {
        let g = grid();
        let key = SlotKey::new(date(2024, 1, 3), TimeOfDay::Evening);
        let coord = g.coord_of(&key).unwrap();
        assert_eq!(coord, GridCoord::new(2, 2));
        assert_eq!(g.key_at(coord), Some(key));
        assert_eq!(g.coord_of(&SlotKey::new(date(2024, 2, 1), TimeOfDay::Noon)), None);
    }
}
