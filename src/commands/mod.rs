pub mod clear;
pub mod events;
pub mod login;
pub mod mark;
pub mod show;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use meetgrid_core::MeetgridError;
use owo_colors::OwoColorize;

use crate::config::Config;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Session teardown on stale identity: drop the stored login so the next
/// command prompts for login instead of failing the same way again.
pub fn teardown_if_stale(err: &MeetgridError, config: &mut Config) -> Result<()> {
    if matches!(err, MeetgridError::StaleIdentity) {
        config.clear_user()?;
        println!(
            "{}",
            "Your stored identity is no longer known to the server; you have been logged out."
                .red()
        );
    }
    Ok(())
}
