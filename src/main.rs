//! Resumo CLI - text, document and webpage summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use resumo::{session, source, ui, Config, GeminiSummarizer, InputMode, Options, Submission, Summarizer};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resumo")]
#[command(author, version, about = "Summarise text, PDF, Word documents and web pages with Gemini", long_about = None)]
struct Cli {
    /// Path to a resumo.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise text, a PDF, a Word document or a webpage
    Summarise {
        /// Input source
        #[arg(value_enum)]
        mode: InputMode,
        /// The text itself ("-" reads stdin), a file path, or a URL
        input: String,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        /// Also show word statistics
        #[arg(long)]
        stats: bool,
        /// Skip the summary (implies --stats)
        #[arg(long)]
        no_summary: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Write the word cloud SVG to this path
        #[arg(long)]
        cloud: Option<PathBuf>,
    },
    /// Show word statistics without summarising
    Stats {
        #[arg(value_enum)]
        mode: InputMode,
        input: String,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        cloud: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Summarise {
            mode,
            input,
            raw,
            stats,
            no_summary,
            json,
            cloud,
        }) => {
            let submission = read_submission(mode, &input)?;

            if raw {
                // Just show raw extracted text
                let document = source::acquire(&submission).await?;
                if let Some(title) = &document.title {
                    println!("\n=== {} ===\n", title);
                }
                println!("{}", document.text);
                eprintln!("\n--- Extracted {} characters ---", document.text.len());
                return Ok(());
            }

            let options = Options {
                summarize: !no_summary,
                analytics: stats || no_summary || cloud.is_some(),
                ..Options::from_config(&config)
            };
            run_once(&submission, &options, &config, json, cloud).await
        }
        Some(Commands::Stats {
            mode,
            input,
            json,
            cloud,
        }) => {
            let submission = read_submission(mode, &input)?;
            let options = Options {
                summarize: false,
                analytics: true,
                ..Options::from_config(&config)
            };
            run_once(&submission, &options, &config, json, cloud).await
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "resumo", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // Default: interactive session
            ui::run(&config).await
        }
    }
}

async fn run_once(
    submission: &Submission,
    options: &Options,
    config: &Config,
    json: bool,
    cloud: Option<PathBuf>,
) -> anyhow::Result<()> {
    let summarizer = if options.summarize {
        match GeminiSummarizer::from_config(config) {
            Ok(summarizer) => Some(summarizer),
            Err(e) => {
                tracing::warn!(error = %e, "summariser unavailable");
                None
            }
        }
    } else {
        None
    };
    let summarizer = summarizer.as_ref().map(|s| s as &dyn Summarizer);

    let outcome = session::handle(submission, summarizer, options).await;

    if let (Some(path), Some(stats)) = (&cloud, &outcome.analytics) {
        std::fs::write(path, stats.word_cloud.to_svg())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for notice in &outcome.notices {
            ui::print_notice(notice);
        }
        if let Some(summary) = &outcome.summary {
            println!("{}", summary.text);
        }
        if let Some(stats) = &outcome.analytics {
            if outcome.summary.is_some() {
                println!();
            }
            println!("{}", resumo::analytics::format_top_words(&stats.top_words));
        }
    }

    if outcome.has_errors() {
        anyhow::bail!("{} failed", submission.mode());
    }
    Ok(())
}

/// Build a submission, reading stdin for `text -`
fn read_submission(mode: InputMode, input: &str) -> anyhow::Result<Submission> {
    if mode == InputMode::Text && input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(Submission::Text(text));
    }

    Submission::from_input(mode, input).with_context(|| format!("failed to read {}", input))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "resumo=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
