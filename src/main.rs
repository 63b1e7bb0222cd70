use clap::Parser;
use dog_morning::utils::{logger, validation::Validate};
use dog_morning::{
    CliConfig, DogApiClient, GeminiGenerator, LocalStorage, MorningEngine, MorningError,
    MorningPipeline, SmtpMailer,
};
use std::time::Duration;

fn report_failure(e: &MorningError) -> ! {
    tracing::error!(
        "❌ Morning run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}

fn or_exit<T>(result: dog_morning::Result<T>) -> T {
    result.unwrap_or_else(|e| report_failure(&e))
}

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting dog-morning");
    tracing::debug!("CLI args: {:?}", cli);

    let config = or_exit(cli.resolve());
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_failure(&e);
    }

    let storage = LocalStorage::new(config.output.path.clone());
    let dog_api = or_exit(DogApiClient::new(
        config.dog_api.endpoint.clone(),
        config.dog_api.timeout_seconds.map(Duration::from_secs),
    ));
    let generator = or_exit(GeminiGenerator::from_config(&config.generator));
    let mailer = or_exit(SmtpMailer::from_config(&config.email));
    tracing::debug!(
        "Using model {} and SMTP relay {}",
        generator.model(),
        mailer.host()
    );

    let pipeline = MorningPipeline::new(storage, config, dog_api, generator, mailer);
    let engine = if cli.dry_run {
        MorningEngine::new_dry_run(pipeline)
    } else {
        MorningEngine::new(pipeline)
    };

    match engine.run().await {
        Ok(summary) => match summary.delivery {
            Some(report) => {
                tracing::info!("✅ Morning message sent!");
                println!(
                    "✅ Sent a {} themed message to {}",
                    summary.breed,
                    report.recipients.join(", ")
                );
            }
            None => {
                println!("Breed: {}\n\n{}", summary.breed, summary.message);
            }
        },
        Err(e) => report_failure(&e),
    }
}
