//! Stored CLI configuration: server address and the logged-in identity.

use std::path::PathBuf;

use anyhow::{Context, Result};
use meetgrid_core::User;
use serde::{Deserialize, Serialize};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global configuration at ~/.config/meetgrid/config.toml
///
/// Identity is whatever the server handed back at login; the client
/// never validates it, the server does (and a stale identity gets torn
/// down when the server rejects it).
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    pub user: Option<User>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("meetgrid");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Config> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config {
                server_url: default_server_url(),
                user: None,
            });
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// The logged-in user, or an error telling the reader how to log in.
    pub fn require_user(&self) -> Result<User> {
        self.user.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "Not logged in.\n\n\
                Log in with:\n  \
                meetgrid login <your-name>"
            )
        })
    }

    /// Drop the stored identity (logout, or stale-identity teardown).
    pub fn clear_user(&mut self) -> Result<()> {
        self.user = None;
        self.save()
    }
}
