pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use toml_config::MorningConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dog-morning")]
#[command(about = "Emails a good morning message written around a random dog photo")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Recipient address, repeatable; replaces the configured recipients
    #[arg(long)]
    pub to: Vec<String>,

    /// Directory the dog image is saved to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Keep the saved image after the run
    #[arg(long, overrides_with = "no_keep_image")]
    pub keep_image: bool,

    /// Delete the saved image after the run
    #[arg(long, overrides_with = "keep_image")]
    pub no_keep_image: bool,

    /// Fetch and generate, but print the message instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Builds the run configuration: TOML file (or defaults), then environment
    /// fallbacks for credentials, then command line overrides.
    pub fn resolve(&self) -> Result<MorningConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                MorningConfig::from_file(path)?
            }
            None => MorningConfig::default(),
        };

        config.apply_env_fallbacks();

        if !self.to.is_empty() {
            config.email.to = self.to.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
        }
        if let Some(keep_image) = self.keep_image_override() {
            config.output.keep_image = keep_image;
        }

        Ok(config)
    }

    fn keep_image_override(&self) -> Option<bool> {
        match (self.keep_image, self.no_keep_image) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
