pub mod breed;
pub mod dog_api;
pub mod etl;
pub mod generator;
pub mod mailer;
pub mod pipeline;

pub use crate::domain::model::{DeliveryReport, FetchedDog, MorningMessage, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Mailer, Pipeline, Storage, TextGenerator};
pub use crate::utils::error::Result;
