use anyhow::Result;
use owo_colors::OwoColorize;

use super::create_spinner;
use crate::client::ApiClient;
use crate::render::Render;

pub async fn run(client: &ApiClient) -> Result<()> {
    let spinner = create_spinner("Fetching events".to_string());
    let events = client.list_events().await;
    spinner.finish_and_clear();

    let events = events?;
    if events.is_empty() {
        println!("{}", "No events yet.".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}  {}", event.render(), event.public_id.dimmed());
        if let Some(description) = &event.description {
            println!("   {}", description.dimmed());
        }
    }
    Ok(())
}
