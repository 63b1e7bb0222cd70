pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::MorningConfig};
pub use core::{
    dog_api::DogApiClient, etl::MorningEngine, generator::GeminiGenerator, mailer::SmtpMailer,
    pipeline::MorningPipeline,
};
pub use domain::model::{Breed, RunSummary};
pub use utils::error::{MorningError, Result};
