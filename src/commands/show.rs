use anyhow::Result;
use chrono::NaiveDate;
use meetgrid_core::{Session, User};
use owo_colors::OwoColorize;

use super::create_spinner;
use crate::client::ApiClient;
use crate::render::{self, Render};

pub async fn run(client: ApiClient, user: User, event: &str, day: Option<String>) -> Result<()> {
    let mut session = Session::new(client, user);

    let spinner = create_spinner("Fetching calendar".to_string());
    let result = session.open_event(event).await;
    spinner.finish_and_clear();
    result?;

    match day {
        Some(day) => {
            let day = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid date '{day}'. Expected YYYY-MM-DD"))?;
            println!("{}", render::render_day_names(session.cache()?, day));
        }
        None => {
            if let Some(summary) = session.event() {
                println!("{}", summary.render());
            }
            println!();
            println!(
                "{}",
                render::render_calendar(session.grid()?, session.cache()?, session.regions()?)
            );
            if session.cache()?.is_empty() {
                println!("\n{}", "Nobody has marked anything yet.".dimmed());
            }
        }
    }
    Ok(())
}
