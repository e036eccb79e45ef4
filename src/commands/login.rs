use anyhow::Result;
use dialoguer::Confirm;
use meetgrid_core::LoginStatus;
use owo_colors::OwoColorize;

use crate::client::ApiClient;
use crate::config::Config;

pub async fn run(client: &ApiClient, config: &mut Config, name: &str) -> Result<()> {
    let response = client.login(name).await?;

    match response.status {
        LoginStatus::Created => {
            println!("Registered as {}", response.user.name.bold());
        }
        LoginStatus::Exists => {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Someone named '{}' already exists. Is that you?",
                    response.user.name
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                anyhow::bail!("Pick a different name and try again");
            }
            println!("Logged in as {}", response.user.name.bold());
        }
    }

    config.user = Some(response.user);
    config.save()
}

pub fn logout(config: &mut Config) -> Result<()> {
    config.clear_user()?;
    println!("Logged out.");
    Ok(())
}
