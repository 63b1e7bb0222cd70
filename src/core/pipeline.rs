use crate::core::dog_api::{content_type_for, DogApiClient};
use crate::domain::model::{
    Breed, DeliveryReport, FetchedDog, MailAttachment, MorningMessage, OutgoingMail, StoredImage,
};
use crate::domain::ports::{ConfigProvider, Mailer, Pipeline, Storage, TextGenerator};
use crate::utils::error::{MorningError, Result};
use chrono::{Local, Utc};

pub struct MorningPipeline<S, C, G, M>
where
    S: Storage,
    C: ConfigProvider,
    G: TextGenerator,
    M: Mailer,
{
    storage: S,
    config: C,
    dog_api: DogApiClient,
    generator: G,
    mailer: M,
}

impl<S, C, G, M> MorningPipeline<S, C, G, M>
where
    S: Storage,
    C: ConfigProvider,
    G: TextGenerator,
    M: Mailer,
{
    pub fn new(storage: S, config: C, dog_api: DogApiClient, generator: G, mailer: M) -> Self {
        Self {
            storage,
            config,
            dog_api,
            generator,
            mailer,
        }
    }

    /// Downloads and saves the image. Failures are returned so the caller can
    /// decide to carry on without it.
    async fn save_image(&self, image_url: &str) -> Result<StoredImage> {
        let file_name = self.config.image_filename();
        let data = self.dog_api.download_image(image_url).await?;
        self.storage.write_file(file_name, &data).await?;

        let size = self.storage.file_size(file_name).await?;
        if size != data.len() as u64 {
            return Err(MorningError::ProcessingError {
                message: format!(
                    "wrote {} bytes but {} bytes are on disk",
                    data.len(),
                    size
                ),
            });
        }

        Ok(StoredImage {
            file_name: file_name.to_string(),
            location: self.storage.location(file_name),
            content_type: content_type_for(image_url).to_string(),
            size,
        })
    }

    /// Removes the saved image unless the config keeps it. Failures only warn.
    async fn release_image(&self, image: Option<&StoredImage>) {
        let Some(image) = image else {
            return;
        };
        if self.config.keep_image() {
            return;
        }
        if let Err(e) = self.storage.remove_file(&image.file_name).await {
            tracing::warn!("Could not remove {}: {}", image.location, e);
        }
    }

    async fn read_attachment(&self, image: &StoredImage) -> Result<MailAttachment> {
        let data = self.storage.read_file(&image.file_name).await?;
        Ok(MailAttachment {
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            data,
        })
    }
}

pub fn render_prompt(template: &str, breed: &Breed) -> String {
    template.replace("{breed}", breed.as_str())
}

pub fn render_subject(template: &str) -> String {
    template.replace("{date}", &Local::now().format("%Y-%m-%d").to_string())
}

#[async_trait::async_trait]
impl<S, C, G, M> Pipeline for MorningPipeline<S, C, G, M>
where
    S: Storage,
    C: ConfigProvider,
    G: TextGenerator,
    M: Mailer,
{
    async fn extract(&self) -> Result<FetchedDog> {
        let image_url = self.dog_api.random_image_url().await?;
        tracing::info!("🐶 Image URL: {}", image_url);

        let breed = Breed::from_image_url(&image_url)?;
        tracing::debug!("Breed parsed from URL: {}", breed);

        let image = match self.save_image(&image_url).await {
            Ok(image) => {
                tracing::info!(
                    "Image saved to {} ({} bytes)",
                    image.location,
                    image.size
                );
                Some(image)
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not download image, continuing without it: {}", e);
                None
            }
        };

        Ok(FetchedDog {
            image_url,
            breed,
            image,
        })
    }

    async fn transform(&self, dog: FetchedDog) -> Result<MorningMessage> {
        let prompt = render_prompt(self.config.prompt_template(), &dog.breed);
        tracing::debug!("Prompt: {}", prompt);

        let text = self.generator.generate(&prompt).await?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(MorningError::GenerationError {
                message: "generator returned an empty message".to_string(),
            });
        }

        Ok(MorningMessage {
            breed: dog.breed,
            text,
            image: dog.image,
        })
    }

    async fn load(&self, message: MorningMessage) -> Result<DeliveryReport> {
        let attachment = match &message.image {
            Some(image) => Some(self.read_attachment(image).await?),
            None => None,
        };
        let attachment_bytes = attachment.as_ref().map(|a| a.data.len());

        let subject = render_subject(self.config.subject_template());
        let recipients = self.config.recipients().to_vec();

        self.mailer
            .send(OutgoingMail {
                from: self.config.sender().to_string(),
                to: recipients.clone(),
                subject: subject.clone(),
                body: message.text,
                attachment,
            })
            .await?;

        self.release_image(message.image.as_ref()).await;

        Ok(DeliveryReport {
            recipients,
            subject,
            attachment_bytes,
            sent_at: Utc::now(),
        })
    }

    async fn discard(&self, message: MorningMessage) -> Result<()> {
        self.release_image(message.image.as_ref()).await;
        Ok(())
    }
}
