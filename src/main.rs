use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use slownews_narrator::controllers::chunks::ChunksController;
use slownews_narrator::controllers::narration::NarrationController;
use slownews_narrator::domain::narration::{NarrationOptions, NarrationService};
use slownews_narrator::error::AppError;
use slownews_narrator::infrastructure::cli::{run_chunks, run_narrate, Cli, Commands, OutputFormat};
use slownews_narrator::infrastructure::config::{Config, LogFormat, TtsProvider};
use slownews_narrator::infrastructure::repositories::{
    FsAudioRepository, GoogleTtsRepository, OpenAiTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let output_format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if output_format == OutputFormat::Json {
                if let Ok(json) = serde_json::to_string(&err.to_response()) {
                    eprintln!("{}", json);
                }
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // Load configuration
    let config = Config::from_env().map_err(|e| AppError::Config(format!("{:#}", e)))?;

    // Initialize logging
    init_logging(&config);

    let format = cli.format;
    match cli.command {
        // The dry run needs no provider, so it runs without credentials
        Commands::Chunks(args) => {
            let controller = ChunksController::new(config.chunk_bound());
            run_chunks(args, format, &controller).await
        }
        Commands::Narrate(args) => {
            let controller = build_narration_controller(&config)?;
            run_narrate(args, format, &controller).await
        }
    }
}

fn build_narration_controller(config: &Config) -> Result<NarrationController, AppError> {
    tracing::info!(
        provider = ?config.tts_provider,
        voice = %config.tts_voice_name,
        output_dir = %config.audio_output_dir.display(),
        "Starting slownews narrator"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the synthesis provider
    let tts_repo = create_tts_repository(config)?;
    tracing::info!(
        provider = tts_repo.provider_name(),
        max_input_bytes = tts_repo.max_input_bytes(),
        "TTS provider initialized"
    );

    // 2. Instantiate persistence
    let audio_repo = Arc::new(FsAudioRepository::new(config.audio_output_dir.clone()));

    // 3. Instantiate services
    let narration_service = Arc::new(NarrationService::new(
        tts_repo,
        audio_repo,
        NarrationOptions {
            format: config.audio_format,
            max_chunk_bytes: config.max_chunk_bytes,
            max_in_flight: config.synthesis_concurrency,
            timeout: config.synthesis_timeout(),
        },
    ));

    // 4. Instantiate controllers
    Ok(NarrationController::new(narration_service, config.audio_format))
}

fn create_tts_repository(config: &Config) -> Result<Arc<dyn TtsRepository>, AppError> {
    match config.tts_provider {
        TtsProvider::Google => {
            let api_key = config
                .google_tts_api_key
                .clone()
                .ok_or_else(|| AppError::Config("GOOGLE_TTS_API_KEY is not set".to_string()))?;
            Ok(Arc::new(GoogleTtsRepository::new(
                reqwest::Client::new(),
                api_key,
                config.tts_language_code.clone(),
                config.tts_voice_name.clone(),
                config.audio_format,
            )))
        }
        TtsProvider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;
            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            Ok(Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
                config.audio_format,
            )))
        }
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "slownews_narrator=debug"
    } else {
        "slownews_narrator=info"
    };

    // Logs go to stderr so stdout stays clean for command output
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
