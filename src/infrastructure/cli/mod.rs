use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::controllers::chunks::ChunksController;
use crate::controllers::narration::{NarrateRequest, NarrationController};
use crate::error::{AppError, AppResult};

/// Narrate Thai news text into a single spoken audio file.
#[derive(Parser, Debug)]
#[command(name = "slownews-narrator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize a text into one stitched audio file.
    Narrate(NarrateArgs),

    /// Print the chunks a text would be synthesized as.
    Chunks(ChunksArgs),
}

#[derive(Args, Debug)]
pub struct NarrateArgs {
    /// Text file to narrate, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Artifact file name inside the output directory.
    #[arg(short, long, conflicts_with = "daily")]
    pub name: Option<String>,

    /// Name the artifact after today's date (daily_summary_YYYY-MM-DD).
    #[arg(long)]
    pub daily: bool,
}

#[derive(Args, Debug)]
pub struct ChunksArgs {
    /// Text file to split, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Override the chunk size bound in bytes.
    #[arg(long)]
    pub max_bytes: Option<usize>,
}

/// Run `narrate` and print the result
pub async fn run_narrate(
    args: NarrateArgs,
    format: OutputFormat,
    controller: &NarrationController,
) -> AppResult<()> {
    let result = controller
        .narrate(NarrateRequest {
            input: args.input.into(),
            name: args.name,
            daily: args.daily,
        })
        .await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            println!("{}", result.path.display());
            println!(
                "chunks: {}, skipped: {}, audio: {} bytes, ~{:.1} min",
                result.chunk_count,
                result.skipped_chunks.len(),
                result.audio_size_bytes,
                result.duration_minutes
            );
            if result.is_partial() {
                println!("skipped chunk indices: {:?}", result.skipped_chunks);
            }
        }
    }

    Ok(())
}

/// Run the `chunks` dry run and print the plan
pub async fn run_chunks(
    args: ChunksArgs,
    format: OutputFormat,
    controller: &ChunksController,
) -> AppResult<()> {
    let chunks = controller.chunks(&args.input.into(), args.max_bytes).await?;

    match format {
        OutputFormat::Json => print_json(&chunks)?,
        OutputFormat::Text => {
            for c in &chunks {
                println!("[{}] {} bytes: {}", c.index, c.byte_size, c.content);
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
