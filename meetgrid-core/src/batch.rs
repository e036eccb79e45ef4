//! Compaction of sparse slot sets into minimal server requests.
//!
//! The server accepts one request per (contiguous date range, exact
//! time-of-day set). Compaction groups the input by date, canonicalizes
//! each date's time-of-day set into a signature, then run-length merges
//! consecutive dates sharing a signature. Two dates with different
//! signatures can never share a batch, even partially; that forces a
//! split, never a batch covering slots outside the input.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::slot::{SlotKey, TimeOfDay};

/// One compacted request unit: every day in `start_date..=end_date` has
/// exactly the times in `times_of_day` marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub times_of_day: Vec<TimeOfDay>,
}

impl Batch {
    /// The slots this batch covers, for expansion back into keys.
    pub fn slots(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .flat_map(|day| self.times_of_day.iter().map(move |t| SlotKey::new(day, *t)))
    }
}

/// Compact an arbitrary slot set into the minimal list of batches.
///
/// Output batches partition the input exactly and no two batches with the
/// same time-of-day signature cover adjacent date ranges. Batches come out
/// ordered by signature, then by start date.
pub fn compact(slots: impl IntoIterator<Item = SlotKey>) -> Vec<Batch> {
    // Group by date
    let mut by_date: BTreeMap<NaiveDate, BTreeSet<TimeOfDay>> = BTreeMap::new();
    for key in slots {
        by_date.entry(key.day).or_default().insert(key.time);
    }

    // Group dates by canonical time-of-day signature. Dates arrive in
    // ascending order from the BTreeMap, so each group stays sorted.
    let mut groups: BTreeMap<Vec<TimeOfDay>, Vec<NaiveDate>> = BTreeMap::new();
    for (date, times) in by_date {
        let signature: Vec<TimeOfDay> = times.into_iter().collect();
        groups.entry(signature).or_default().push(date);
    }

    // Run-length merge within each signature group
    let mut batches = Vec::new();
    for (signature, dates) in groups {
        let mut dates = dates.into_iter();
        // Groups are never empty by construction
        let Some(first) = dates.next() else { continue };
        let mut run_start = first;
        let mut run_end = first;

        for date in dates {
            if run_end.succ_opt() == Some(date) {
                run_end = date;
            } else {
                batches.push(Batch {
                    start_date: run_start,
                    end_date: run_end,
                    times_of_day: signature.clone(),
                });
                run_start = date;
                run_end = date;
            }
        }
        batches.push(Batch {
            start_date: run_start,
            end_date: run_end,
            times_of_day: signature,
        });
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys(specs: &[(i32, u32, u32, TimeOfDay)]) -> Vec<SlotKey> {
        specs
            .iter()
            .map(|(y, m, d, t)| SlotKey::new(date(*y, *m, *d), *t))
            .collect()
    }

    #[test]
    fn date_gap_splits_the_run() {
        let batches = compact(keys(&[
            (2024, 1, 1, TimeOfDay::Morning),
            (2024, 1, 2, TimeOfDay::Morning),
            (2024, 1, 4, TimeOfDay::Morning),
        ]));

        assert_eq!(
            batches,
            vec![
                Batch {
                    start_date: date(2024, 1, 1),
                    end_date: date(2024, 1, 2),
                    times_of_day: vec![TimeOfDay::Morning],
                },
                Batch {
                    start_date: date(2024, 1, 4),
                    end_date: date(2024, 1, 4),
                    times_of_day: vec![TimeOfDay::Morning],
                },
            ]
        );
    }

    #[test]
    fn same_day_times_collapse_into_one_batch() {
        let batches = compact(keys(&[
            (2024, 1, 1, TimeOfDay::Morning),
            (2024, 1, 1, TimeOfDay::Noon),
        ]));

        assert_eq!(
            batches,
            vec![Batch {
                start_date: date(2024, 1, 1),
                end_date: date(2024, 1, 1),
                times_of_day: vec![TimeOfDay::Morning, TimeOfDay::Noon],
            }]
        );
    }

    #[test]
    fn differing_signatures_split_even_on_adjacent_dates() {
        let batches = compact(keys(&[
            (2024, 1, 1, TimeOfDay::Morning),
            (2024, 1, 2, TimeOfDay::Morning),
            (2024, 1, 2, TimeOfDay::Evening),
        ]));

        // A batch never covers a date whose slot set differs from its
        // signature: Jan 2 gaining an evening forces a split.
        assert_eq!(
            batches,
            vec![
                Batch {
                    start_date: date(2024, 1, 1),
                    end_date: date(2024, 1, 1),
                    times_of_day: vec![TimeOfDay::Morning],
                },
                Batch {
                    start_date: date(2024, 1, 2),
                    end_date: date(2024, 1, 2),
                    times_of_day: vec![TimeOfDay::Morning, TimeOfDay::Evening],
                },
            ]
        );
    }

    #[test]
    fn runs_merge_across_month_and_year_boundaries() {
        let batches = compact(keys(&[
            (2024, 1, 31, TimeOfDay::Noon),
            (2024, 2, 1, TimeOfDay::Noon),
        ]));
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].start_date, date(2024, 1, 31));
        assert_eq!(batches[0].end_date, date(2024, 2, 1));

        let batches = compact(keys(&[
            (2023, 12, 31, TimeOfDay::Evening),
            (2024, 1, 1, TimeOfDay::Evening),
        ]));
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].end_date, date(2024, 1, 1));
    }

    #[test]
    fn leap_day_counts_as_contiguous() {
        let batches = compact(keys(&[
            (2024, 2, 28, TimeOfDay::Morning),
            (2024, 2, 29, TimeOfDay::Morning),
            (2024, 3, 1, TimeOfDay::Morning),
        ]));
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(compact(Vec::new()).is_empty());
    }

    #[test]
    fn batches_partition_the_input_exactly() {
        let input = keys(&[
            (2024, 1, 1, TimeOfDay::Morning),
            (2024, 1, 1, TimeOfDay::Evening),
            (2024, 1, 2, TimeOfDay::Morning),
            (2024, 1, 2, TimeOfDay::Evening),
            (2024, 1, 3, TimeOfDay::Noon),
            (2024, 1, 5, TimeOfDay::Noon),
            (2024, 1, 6, TimeOfDay::Morning),
            (2024, 1, 6, TimeOfDay::Noon),
            (2024, 1, 6, TimeOfDay::Evening),
        ]);
        let input_set: BTreeSet<SlotKey> = input.iter().copied().collect();

        let batches = compact(input.clone());

        let mut covered = BTreeSet::new();
        for batch in &batches {
            for slot in batch.slots() {
                assert!(covered.insert(slot), "batches overlap on {slot}");
            }
        }
        assert_eq!(covered, input_set);
    }

    #[test]
    fn compaction_is_maximal() {
        let input = keys(&[
            (2024, 1, 1, TimeOfDay::Morning),
            (2024, 1, 2, TimeOfDay::Morning),
            (2024, 1, 3, TimeOfDay::Morning),
            (2024, 1, 5, TimeOfDay::Morning),
            (2024, 1, 5, TimeOfDay::Noon),
            (2024, 1, 6, TimeOfDay::Morning),
        ]);

        let batches = compact(input);

        // No two batches with the same signature may cover adjacent ranges
        for a in &batches {
            for b in &batches {
                if a == b || a.times_of_day != b.times_of_day {
                    continue;
                }
                assert_ne!(
                    a.end_date.succ_opt(),
                    Some(b.start_date),
                    "adjacent same-signature batches {a:?} and {b:?} were not merged"
                );
            }
        }
    }
}
