//! Vocalis - Text and Voice Assistant
//!
//! Command line entry point: one-shot queries or a local socket server.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vocalis::assistant::Assistant;
use vocalis::config::Config;
use vocalis::ipc::IpcServer;
use vocalis::nlp;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Answer typed text
    Ask { text: String },

    /// Answer an audio file
    Listen {
        file: PathBuf,

        /// Write the spoken reply as WAV
        #[arg(long)]
        save_audio: Option<PathBuf>,
    },

    /// Show recent interactions
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print only the intent label for some text
    Classify { text: String },

    /// Serve requests over a Unix socket until Ctrl-C
    Serve {
        #[arg(long)]
        socket: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    // Setup logging
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🗣️ Vocalis v{} starting...", env!("CARGO_PKG_VERSION"));

    let mismatches = nlp::validate_templates();
    for m in &mismatches {
        warn!(
            "⚠️ {} template references unknown slot '{}': {}",
            m.intent, m.placeholder, m.template
        );
    }

    match args.command {
        Cmd::Classify { text } => {
            println!("{}", nlp::classify(&text));
        }
        Cmd::Ask { text } => {
            let assistant = Assistant::from_config(&config);
            let reply = assistant.process_text(&text);
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Cmd::Listen { file, save_audio } => {
            let assistant = Assistant::from_config(&config);
            let reply = assistant
                .process_audio(&file)
                .await
                .with_context(|| format!("Could not process {:?}", file))?;

            if let Some(out) = save_audio {
                if reply.audio_response.is_empty() {
                    warn!("No speech was synthesized, nothing written to {:?}", out);
                } else {
                    let bytes = BASE64.decode(&reply.audio_response)?;
                    std::fs::write(&out, bytes)
                        .with_context(|| format!("Could not write {:?}", out))?;
                    info!("🔊 Reply audio written to {:?}", out);
                }
            }
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Cmd::History { limit } => {
            let assistant = Assistant::from_config(&config);
            let history = assistant.history(limit)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Cmd::Serve { socket } => {
            let socket = socket.unwrap_or_else(|| PathBuf::from(&config.socket_path));
            let assistant = Arc::new(Assistant::from_config(&config));
            let server = IpcServer::bind(&socket, config.max_request_bytes)
                .with_context(|| format!("Could not bind {:?}", socket))?;

            info!("✅ Vocalis ready - send requests to {:?}", socket);
            tokio::select! {
                result = server.run(assistant) => result?,
                _ = tokio::signal::ctrl_c() => info!("👋 Shutting down"),
            }
        }
    }

    Ok(())
}
