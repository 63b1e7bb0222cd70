use crate::domain::model::{DeliveryReport, FetchedDog, MorningMessage, OutgoingMail};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn file_size(&self, path: &str) -> impl std::future::Future<Output = Result<u64>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, used in logs and reports.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn image_filename(&self) -> &str;
    fn keep_image(&self) -> bool;
    fn prompt_template(&self) -> &str;
    fn sender(&self) -> &str;
    fn recipients(&self) -> &[String];
    fn subject_template(&self) -> &str;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FetchedDog>;
    async fn transform(&self, dog: FetchedDog) -> Result<MorningMessage>;
    async fn load(&self, message: MorningMessage) -> Result<DeliveryReport>;
    /// Drops a message that will not be delivered, releasing whatever it holds.
    async fn discard(&self, message: MorningMessage) -> Result<()>;
}
