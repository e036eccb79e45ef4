//! Terminal rendering for the heat-map calendar.
//!
//! Extension traits painting meetgrid-core types with owo_colors. The
//! heat-map shows, per slot, how many people are unavailable; pending
//! (not yet saved) selections are marked separately.

use chrono::{Datelike, NaiveDate};
use meetgrid_core::{EventSummary, OptimisticCache, RegionSet, SlotGrid, SlotKey, TimeOfDay};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventSummary {
    fn render(&self) -> String {
        format!(
            "📅 {} {}",
            self.name.bold(),
            format!("({} to {})", self.earliest, self.latest).dimmed()
        )
    }
}

/// One heat cell: unavailability count tinted by severity, capped at 5
/// like the web client's five color tiers.
fn heat_cell(count: usize, pending: bool) -> String {
    if pending {
        return " +".cyan().bold().to_string();
    }
    match count.min(5) {
        0 => " ·".dimmed().to_string(),
        tier @ (1 | 2) => format!("{tier:2}").yellow().to_string(),
        tier @ (3 | 4) => format!("{tier:2}").red().to_string(),
        _ => format!("{:2}", count.min(99)).bright_red().bold().to_string(),
    }
}

/// Render the full calendar: one row per selectable day, one column per
/// time of day, with a separator line per month.
pub fn render_calendar(grid: &SlotGrid, cache: &OptimisticCache, regions: &RegionSet) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{:17}mor noo eve", ""));

    let mut current_month = None;
    for day in grid.days() {
        let month = (day.year(), day.month());
        if current_month != Some(month) {
            current_month = Some(month);
            lines.push(day.format("%B %Y").to_string().bold().to_string());
        }

        let cells: Vec<String> = TimeOfDay::ALL
            .iter()
            .map(|time| {
                let key = SlotKey::new(*day, *time);
                format!(" {}", heat_cell(cache.count_at(&key), regions.is_occupied(&key)))
            })
            .collect();

        lines.push(format!(
            "  {} {}  {}",
            day.format("%a").to_string().dimmed(),
            day.format("%Y-%m-%d"),
            cells.join(" ")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  {}  {}  {}  {}",
        "· free".dimmed(),
        "1-2 some".yellow(),
        "3-4 many".red(),
        "+ pending".cyan()
    ));
    lines.join("\n")
}

/// Who is unavailable on one day, slot by slot.
pub fn render_day_names(cache: &OptimisticCache, day: NaiveDate) -> String {
    let mut lines = vec![day.format("%A, %Y-%m-%d").to_string().bold().to_string()];

    for time in TimeOfDay::ALL {
        let names = cache.names_at(&SlotKey::new(day, time));
        let rendered = if names.is_empty() {
            "everyone available".dimmed().to_string()
        } else {
            names.join(", ")
        };
        lines.push(format!("  {:8} {}", time.to_string(), rendered));
    }
    lines.join("\n")
}
