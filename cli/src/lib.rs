mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slide_common::Deck;
use slide_core::{client_for, Config, Synthesizer, USER_MESSAGE};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "slide")]
#[command(about = "Chat-driven presentation generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Model provider: gemini | openai
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Override model (e.g., gemini-2.0-flash-exp, gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Answer with a canned deck instead of calling a provider
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a presentation by chatting (default)
    Interactive {
        /// Start from a deck saved as JSON
        #[arg(long)]
        deck: Option<PathBuf>,
    },
    /// Generate a deck from a prompt
    Generate {
        prompt: String,
        /// Write the deck JSON here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also export a .pptx into the output directory
        #[arg(long)]
        export: bool,
    },
    /// Revise a saved deck
    Edit {
        /// Deck JSON to revise
        deck: PathBuf,
        instruction: String,
        /// Write the revised deck JSON here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also export a .pptx into the output directory
        #[arg(long)]
        export: bool,
    },
    /// Render a saved deck to .pptx
    Export {
        deck: PathBuf,
        /// Directory to write into (defaults to the configured output dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Browse a saved deck in the terminal
    Preview { deck: PathBuf },
    /// Serve the HTTP API
    Serve {
        /// Listen address (defaults to SLIDE_ADDR or 127.0.0.1:3000)
        #[arg(long)]
        addr: Option<String>,
    },
}

pub async fn run_cli() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(provider) = &cli.provider {
        std::env::set_var("SLIDE_PROVIDER", provider);
    }
    if let Some(model) = &cli.model {
        std::env::set_var("SLIDE_MODEL", model);
    }

    let mut config = Config::load().await;
    config.offline = cli.offline;

    let command = cli.command.unwrap_or(Commands::Interactive { deck: None });
    match &command {
        Commands::Interactive { .. } | Commands::Preview { .. } => {
            logging::init_file(&config.log_path, cli.debug)?;
        }
        _ => logging::init_stderr(cli.debug),
    }
    tracing::debug!(provider = ?config.provider, model = %config.model, offline = config.offline, "configuration loaded");

    match command {
        Commands::Interactive { deck } => {
            let deck = match deck {
                Some(path) => Some(slide_tui::load_deck(path).await?),
                None => None,
            };
            slide_tui::run_interactive(&config, deck).await?;
        }
        Commands::Generate {
            prompt,
            out,
            export,
        } => {
            let deck = synthesize(&config, &prompt, None).await?;
            finish(&config, &deck, out.as_deref(), export).await?;
        }
        Commands::Edit {
            deck,
            instruction,
            out,
            export,
        } => {
            let prior = slide_tui::load_deck(&deck).await?;
            let revised = synthesize(&config, &instruction, Some(&prior)).await?;
            finish(&config, &revised, out.as_deref(), export).await?;
        }
        Commands::Export { deck, out_dir } => {
            let deck = slide_tui::load_deck(&deck).await?;
            let dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            let path = slide_export::export_to_dir(&deck, &dir).await?;
            println!("{}", path.display());
        }
        Commands::Preview { deck } => {
            slide_tui::run_preview(&deck).await?;
        }
        Commands::Serve { addr } => {
            let addr = addr
                .or_else(|| std::env::var("SLIDE_ADDR").ok())
                .unwrap_or_else(|| slide_server::DEFAULT_ADDR.to_string());
            let state = slide_server::AppState {
                synthesizer: Synthesizer::new(client_for(&config)),
            };
            slide_server::serve(&addr, state).await?;
        }
    }

    Ok(())
}

async fn synthesize(config: &Config, instruction: &str, prior: Option<&Deck>) -> Result<Deck> {
    let synthesizer = Synthesizer::new(client_for(config));
    synthesizer
        .synthesize(instruction, prior)
        .await
        .map_err(|e| {
            tracing::error!(kind = ?e.kind(), "generation failed: {e}");
            anyhow::anyhow!(USER_MESSAGE)
        })
}

/// Emit the deck JSON and optionally export it.
async fn finish(config: &Config, deck: &Deck, out: Option<&Path>, export: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(deck)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                slide_common::ensure_dir(parent).await?;
            }
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "saved deck");
        }
        None => println!("{json}"),
    }
    if export {
        let path = slide_export::export_to_dir(deck, &config.output_dir).await?;
        eprintln!("Exported {}", path.display());
    }
    Ok(())
}
