use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use tracing::Instrument;

pub struct MorningEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> MorningEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// Stops after the message is generated; nothing is sent.
    pub fn new_dry_run(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: true,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting morning run...");

        let dog = self
            .pipeline
            .extract()
            .instrument(tracing::info_span!("extract"))
            .await?;
        tracing::info!(
            "Fetched a {} ({})",
            dog.breed,
            if dog.image.is_some() { "image saved" } else { "no image" }
        );

        let message = self
            .pipeline
            .transform(dog)
            .instrument(tracing::info_span!("transform"))
            .await?;
        tracing::info!("Generated a {} character message", message.text.chars().count());

        let breed = message.breed.clone();
        let text = message.text.clone();

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - skipping delivery");
            self.pipeline.discard(message).await?;
            return Ok(RunSummary {
                breed,
                message: text,
                delivery: None,
            });
        }

        let report = self
            .pipeline
            .load(message)
            .instrument(tracing::info_span!("load"))
            .await?;
        tracing::info!("Delivered to {}", report.recipients.join(", "));

        Ok(RunSummary {
            breed,
            message: text,
            delivery: Some(report),
        })
    }
}
