//! Terminal front-end: the automation console and one-shot transcript summaries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use insightflow::commands::BANNER;
use insightflow::config::AppConfig;
use insightflow::console::{AutomationConsole, LogEvent};
use insightflow::core::MeetingStatus;
use insightflow::events::LoggingNotificationSink;
use insightflow::meetings::{
    export_meeting, read_transcript_file, render_export, HeuristicProcessor, MeetingWorkspace,
    TranscriptProcessor,
};
use insightflow::observability::{init_tracing, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "insightflow", version, about = "Meeting insights and automation pipeline console")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Completion-service credential (defaults to $PERPLEXITY_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive automation pipeline terminal over stdin/stdout
    Console,
    /// Summarize a transcript file and list its action items
    Summarize {
        /// Transcript file (UTF-8 text)
        file: PathBuf,
        /// Meeting title (defaults to the file name without extension)
        #[arg(long)]
        title: Option<String>,
        /// Write `<title>_summary.txt` into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Use the completion service instead of the built-in heuristics
        #[arg(long)]
        use_api: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    }
    .with_api_key(cli.api_key)
    .with_env_api_key();

    match cli.command {
        Commands::Console => run_console(config).await,
        Commands::Summarize {
            file,
            title,
            export_dir,
            use_api,
        } => run_summarize(config, file, title, export_dir, use_api).await,
    }
}

fn build_console(config: &AppConfig) -> anyhow::Result<AutomationConsole> {
    let mut console = AutomationConsole::new(config.pipeline.clone())
        .with_notifier(Arc::new(LoggingNotificationSink));
    if let Some(key) = &config.api_key {
        console = console.with_api_key(key);
    }
    #[cfg(feature = "http")]
    {
        let client = insightflow::providers::PerplexityClient::new(config.completion.clone())?;
        console = console.with_completion_service(Arc::new(client));
    }
    Ok(console)
}

async fn run_console(config: AppConfig) -> anyhow::Result<()> {
    let console = Arc::new(build_console(&config)?);

    for entry in console.log() {
        println!("{entry}");
    }

    let mut events = console.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LogEvent::Appended(entry)) => println!("{entry}"),
                Ok(LogEvent::Cleared) => {
                    print!("\x1B[2J\x1B[H");
                    for line in BANNER {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Terminal output lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Each line runs on its own task so `status` answers while a run is in flight.
    let mut pending = FuturesUnordered::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let console = Arc::clone(&console);
        pending.push(tokio::spawn(async move { console.submit(&line).await }));
    }

    while let Some(joined) = pending.next().await {
        joined.context("console command panicked")?;
    }
    info!(runs = console.runs().len(), "Console input closed");

    drop(console);
    printer.await?;
    Ok(())
}

fn api_processor(config: &AppConfig) -> anyhow::Result<Arc<dyn TranscriptProcessor>> {
    #[cfg(feature = "http")]
    {
        let key = config
            .api_key
            .clone()
            .context("--use-api needs --api-key or PERPLEXITY_API_KEY")?;
        let client = insightflow::providers::PerplexityClient::new(config.completion.clone())?;
        Ok(Arc::new(
            insightflow::meetings::CompletionTranscriptProcessor::new(Arc::new(client), key),
        ))
    }
    #[cfg(not(feature = "http"))]
    {
        let _ = config;
        bail!("--use-api requires the `http` feature")
    }
}

async fn run_summarize(
    config: AppConfig,
    file: PathBuf,
    title: Option<String>,
    export_dir: Option<PathBuf>,
    use_api: bool,
) -> anyhow::Result<()> {
    let input = read_transcript_file(&file).await?;
    let title = title.unwrap_or(input.title);

    let processor: Arc<dyn TranscriptProcessor> = if use_api {
        api_processor(&config)?
    } else {
        Arc::new(HeuristicProcessor::new(config.processing.clone()))
    };
    let workspace = MeetingWorkspace::new(processor, config.processing.clone())
        .with_notifier(Arc::new(LoggingNotificationSink));

    let meeting = workspace.upload(&input.transcript, &title).await?;
    if meeting.status == MeetingStatus::Error {
        bail!("failed to analyze {}", file.display());
    }

    print!("{}", render_export(&meeting));
    println!(
        "\nWords: {} | Pending tasks: {} | Completed tasks: {}",
        meeting.word_count(),
        meeting.pending_count(),
        meeting.completed_count()
    );

    if let Some(dir) = export_dir {
        let path = export_meeting(&meeting, dir).await?;
        println!("Exported to {}", path.display());
    }
    Ok(())
}
