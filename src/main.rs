use clap::Parser;
use span_similarity::utils::logger;
use span_similarity::{CliConfig, InferenceEngine, LogFormat, SimilarityError, SimilarityModel};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.load() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e);
        }
    };

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    let model = match settings.build_model() {
        Ok(model) => model,
        Err(e) => exit_with(&e),
    };
    tracing::info!(model = model.name(), "Scoring span pair");

    let engine = InferenceEngine::new(model);
    match engine.run(tokio::io::stdin(), tokio::io::stdout()).await {
        Ok(response) => {
            tracing::info!(similarity = response.similarity, "Similarity written to stdout");
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &SimilarityError) -> ! {
    tracing::error!(
        "❌ stgnn-infer failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.severity().exit_code().max(1));
}
