use anyhow::Result;
use dialoguer::Confirm;
use meetgrid_core::{Session, User};
use owo_colors::OwoColorize;

use super::{create_spinner, teardown_if_stale};
use crate::client::ApiClient;
use crate::config::Config;

pub async fn run(
    client: ApiClient,
    config: &mut Config,
    user: User,
    event: &str,
    yes: bool,
) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove ALL your marks from this event?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    let mut session = Session::new(client, user);
    session.open_event(event).await?;

    let spinner = create_spinner("Clearing your marks".to_string());
    let result = session.clear_all().await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{}", "All your marks were removed.".green());
            Ok(())
        }
        Err(err) => {
            teardown_if_stale(&err, config)?;
            Err(err.into())
        }
    }
}
