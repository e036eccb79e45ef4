use anyhow::Result;
use chrono::NaiveDate;
use meetgrid_core::{BatchAction, GridCoord, SaveOutcome, Session, SlotKey, TimeOfDay, User, compact};
use owo_colors::OwoColorize;

use super::{create_spinner, teardown_if_stale};
use crate::client::ApiClient;
use crate::config::Config;
use crate::render;

/// Shared implementation of `mark` (save) and `unmark` (remove).
pub async fn run(
    client: ApiClient,
    config: &mut Config,
    user: User,
    event: &str,
    start: &str,
    end: Option<&str>,
    action: BatchAction,
) -> Result<()> {
    let mut session = Session::new(client, user);

    let spinner = create_spinner("Fetching calendar".to_string());
    let result = session.open_event(event).await;
    spinner.finish_and_clear();
    result?;

    let (start_key, end_key) = range_keys(start, end)?;

    let a = coord_on_grid(&session, &start_key)?;
    let b = coord_on_grid(&session, &end_key)?;

    let selected = session.select_range(a, b)?;
    if selected.is_empty() {
        println!("{}", "Nothing to submit for that range.".dimmed());
        return Ok(());
    }
    let request_count = compact(selected.iter().copied()).len();

    let verb = match action {
        BatchAction::Add => "Marking",
        BatchAction::Remove => "Unmarking",
    };
    let spinner = create_spinner(format!("{verb} {} slots", selected.len()));
    let outcome = session.save(action).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(SaveOutcome::Submitted) => {
            println!(
                "{} {} slots in {} request{}",
                match action {
                    BatchAction::Add => "Marked".green().to_string(),
                    BatchAction::Remove => "Unmarked".green().to_string(),
                },
                selected.len(),
                request_count,
                if request_count == 1 { "" } else { "s" }
            );
            println!();
            println!(
                "{}",
                render::render_calendar(session.grid()?, session.cache()?, session.regions()?)
            );
            Ok(())
        }
        // One-shot commands cannot race themselves, but the outcome exists
        Ok(SaveOutcome::Busy) => {
            println!("{}", "Another save is still in flight.".yellow());
            Ok(())
        }
        Ok(SaveOutcome::NothingSelected) => {
            println!("{}", "Nothing to submit.".dimmed());
            Ok(())
        }
        Err(err) => {
            teardown_if_stale(&err, config)?;
            Err(err.into())
        }
    }
}

/// Resolve the two range endpoints into concrete slot keys. Endpoints may
/// be given in either order; dates are ordered before bare dates are
/// widened, so a reversed bare-date range still covers whole days.
fn range_keys(start: &str, end: Option<&str>) -> Result<(SlotKey, SlotKey)> {
    let mut first = parse_endpoint(start)?;
    let mut second = match end {
        Some(end) => parse_endpoint(end)?,
        None => first,
    };
    if second.0 < first.0 {
        std::mem::swap(&mut first, &mut second);
    }

    // A bare date spans the whole day
    Ok((
        SlotKey::new(first.0, first.1.unwrap_or(TimeOfDay::Morning)),
        SlotKey::new(second.0, second.1.unwrap_or(TimeOfDay::Evening)),
    ))
}

fn parse_endpoint(s: &str) -> Result<(NaiveDate, Option<TimeOfDay>)> {
    let (day, time) = match s.split_once(':') {
        Some((day, time)) => (day, Some(time.parse::<TimeOfDay>()?)),
        None => (s, None),
    };
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{day}'. Expected YYYY-MM-DD[:tod]"))?;
    Ok((day, time))
}

fn coord_on_grid(session: &Session<ApiClient>, key: &SlotKey) -> Result<GridCoord> {
    session.grid()?.coord_of(key).ok_or_else(|| {
        anyhow::anyhow!(
            "{} is outside this event's calendar ({} to {})",
            key.day,
            session.event().map(|e| e.earliest.to_string()).unwrap_or_default(),
            session.event().map(|e| e.latest.to_string()).unwrap_or_default(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_with_time_of_day() {
        let (day, time) = parse_endpoint("2024-01-05:noon").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(time, Some(TimeOfDay::Noon));
    }

    #[test]
    fn bare_date_endpoint() {
        let (day, time) = parse_endpoint("2024-01-05").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(time, None);
    }

    #[test]
    fn bad_endpoints_are_rejected() {
        assert!(parse_endpoint("05-01-2024").is_err());
        assert!(parse_endpoint("2024-01-05:midnight").is_err());
    }

    #[test]
    fn reversed_bare_date_range_still_spans_whole_days() {
        let (start, end) = range_keys("2024-01-05", Some("2024-01-03")).unwrap();
        assert_eq!(start.to_string(), "2024-01-03|morning");
        assert_eq!(end.to_string(), "2024-01-05|evening");
    }

    #[test]
    fn reversed_range_keeps_explicit_times() {
        let (start, end) = range_keys("2024-01-05:noon", Some("2024-01-03:noon")).unwrap();
        assert_eq!(start.to_string(), "2024-01-03|noon");
        assert_eq!(end.to_string(), "2024-01-05|noon");
    }

    #[test]
    fn single_bare_date_spans_that_day() {
        let (start, end) = range_keys("2024-01-05", None).unwrap();
        assert_eq!(start.to_string(), "2024-01-05|morning");
        assert_eq!(end.to_string(), "2024-01-05|evening");
    }
}
