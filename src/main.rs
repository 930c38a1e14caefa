use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use workout_cues::batch::{discover_scripts, status_report, watch_interrupts};
use workout_cues::config::{AppConfig, DEFAULT_CONFIG_FILE};
use workout_cues::services::tts::ElevenLabsService;
use workout_cues::{BatchOrchestrator, ComposeOptions, SpeechGenerator};

/// Turn timestamped workout scripts into spoken-cue audio tracks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config.json
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// ElevenLabs API key (overrides config and environment)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// ElevenLabs voice ID
    #[arg(long, global = true)]
    voice_id: Option<String>,

    /// Directory generated audio is written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate audio for one script or a whole scripts directory
    Generate {
        /// Process only this script file
        #[arg(long)]
        single_file: Option<PathBuf>,

        /// Directory containing script files
        #[arg(long)]
        scripts_dir: Option<PathBuf>,

        /// Regenerate even when the audio file already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show which scripts already have generated audio, without generating
    Status {
        /// Directory containing script files
        #[arg(long)]
        scripts_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(key) = cli.api_key {
        config.elevenlabs.api_key = key;
    }
    if let Some(voice) = cli.voice_id {
        config.elevenlabs.voice_id = voice;
    }
    if let Some(dir) = cli.output_dir {
        config.audio_settings.output_directory = dir;
    }

    match cli.command {
        Commands::Status { scripts_dir } => {
            let dir = scripts_dir.unwrap_or_else(|| config.audio_settings.scripts_directory.clone());
            let scripts = discover_scripts(&dir)?;
            let report = status_report(&scripts, &config.audio_settings.output_directory);

            println!("Scripts directory: {}", dir.display());
            for entry in &report {
                println!("  {}", entry);
            }
            let present = report.iter().filter(|s| s.present).count();
            println!("{}/{} audio files present", present, report.len());
            Ok(())
        }

        Commands::Generate {
            single_file,
            scripts_dir,
            force,
        } => {
            config.require_api_key()?;

            let settings = &config.audio_settings;
            tracing::info!(
                "Using voice: {} ({})",
                config.elevenlabs.voice_name,
                config.elevenlabs.voice_id
            );
            tracing::info!("Output directory: {}", settings.output_directory.display());

            let scripts = match single_file {
                Some(file) => vec![file],
                None => {
                    let dir = scripts_dir.unwrap_or_else(|| settings.scripts_directory.clone());
                    discover_scripts(&dir)?
                }
            };

            let backend = ElevenLabsService::new(&config.elevenlabs, settings.sample_rate);
            let generator = SpeechGenerator::new(
                backend,
                config.elevenlabs.voice_id.clone(),
                settings.sample_rate,
            );

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if let Some(code) = watch_interrupts(tokio::signal::ctrl_c, ctrl_c).await {
                    std::process::exit(code);
                }
            });

            let mut orchestrator = BatchOrchestrator::new(
                generator,
                settings.output_directory.clone(),
                ComposeOptions::from(settings),
            )
            .with_cancellation(cancel);

            let result = orchestrator.run(&scripts, force).await;
            println!("\n{}", result);

            if result.failed_count() > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
