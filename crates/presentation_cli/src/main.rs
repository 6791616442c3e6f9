//! Interpreter CLI
//!
//! Command-line client for a running interpreter server.

#![allow(clippy::print_stdout)]

mod client;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use client::{ApiClient, save_audio};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Interpreter CLI
#[derive(Debug, Parser)]
#[command(name = "interpreter-cli")]
#[command(author, version, about = "Chat interpreter CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "INTERPRETER_URL",
        default_value = "http://localhost:3000"
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Send a chat message as if it came from a conversation
    ///
    /// Example: interpreter-cli send chat-1 "/language es"
    Send {
        /// Conversation identifier
        conversation_id: String,

        /// Message text, commands included
        text: String,

        /// Where to write audio if the reply is spoken
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate text directly
    Translate {
        /// Text to translate
        text: String,

        /// Target language code
        #[arg(long)]
        to: String,

        /// Source language code (auto-detected if omitted)
        #[arg(long)]
        from: Option<String>,
    },

    /// Synthesize speech directly
    Speak {
        /// Text to speak
        text: String,

        /// Language code selecting the voice
        #[arg(short, long)]
        language: String,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List supported languages
    Languages,

    /// Show server status
    Status,

    /// Check readiness (used by Docker healthcheck)
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Human-readable rendering of an interpretation result
fn describe_reply(reply: &Value) -> String {
    match reply["kind"].as_str() {
        Some("text_reply") => reply["text"].as_str().unwrap_or_default().to_string(),
        Some("audio_reply") => format!(
            "🔊 Audio reply ({})",
            reply["audio_format"].as_str().unwrap_or("unknown format")
        ),
        Some("error_reply") => format!(
            "⚠️  {} [{}]",
            reply["error"]["message"].as_str().unwrap_or_default(),
            reply["error"]["kind"].as_str().unwrap_or("unknown")
        ),
        _ => serde_json::to_string_pretty(reply).unwrap_or_default(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ApiClient::new(&cli.url);

    match cli.command {
        Commands::Send {
            conversation_id,
            text,
            output,
        } => {
            println!("💬 [{conversation_id}] {text}");

            let reply = client.send_message(&conversation_id, &text).await?;
            println!("\n{}", describe_reply(&reply));

            if let Some(path) = output {
                if let Some(bytes) = save_audio(&reply, "audio", &path).await? {
                    println!("   📁 Wrote {bytes} bytes to {}", path.display());
                }
            }
        },

        Commands::Translate { text, to, from } => {
            let resp = client.translate(&text, from.as_deref(), &to).await?;

            let source = resp["source"].as_str().unwrap_or("auto");
            let target = resp["target"].as_str().unwrap_or(&to);
            println!("🌐 {source} → {target}");
            println!("{}", resp["text"].as_str().unwrap_or_default());
        },

        Commands::Speak {
            text,
            language,
            output,
        } => {
            let resp = client.speak(&text, &language).await?;

            let bytes = save_audio(&resp, "audio", &output).await?.unwrap_or(0);
            println!(
                "🔊 Wrote {bytes} bytes of {} to {}",
                resp["format"].as_str().unwrap_or("audio"),
                output.display()
            );
        },

        Commands::Languages => {
            let resp = client.languages().await?;
            let default = resp["default"].as_str().unwrap_or_default();

            println!("🗣️  Supported languages:");
            for lang in resp["languages"].as_array().into_iter().flatten() {
                let code = lang["code"].as_str().unwrap_or_default();
                let marker = if code == default { " (default)" } else { "" };
                println!(
                    "   {code} - {}{marker}",
                    lang["name"].as_str().unwrap_or_default()
                );
            }
        },

        Commands::Status => {
            let resp = client.status().await?;

            println!("📊 System Status:");
            println!("{}", serde_json::to_string_pretty(&resp)?);
        },

        Commands::Health => match client.is_ready().await {
            Ok(true) => {
                println!("✅ Healthy");
                std::process::exit(0);
            },
            Ok(false) => {
                println!("❌ Unhealthy: not ready");
                std::process::exit(1);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}
