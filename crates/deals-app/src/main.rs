//! `deals` binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize logging (stderr, so replies on stdout stay clean)
//! 3. Load the product corpus once from the configured provider
//! 4. Run the chat loop or a one-shot command

mod cli;
mod render;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use deals_chat::{Conversation, SubmitOutcome};
use deals_core::types::Product;
use deals_core::{top_deals, CatalogStats};
use deals_corpus::{load_or_empty, ConfiguredProvider};

use cli::{CliArgs, Command, LoadedConfig};

const PROMPT: &str = "> ";
const BUSY_NOTICE: &str = "Still thinking about the last request...";

/// Reply text for one input line, or `None` when there is nothing to print.
///
/// Submission errors are reported and the session carries on.
async fn respond(conversation: &Conversation, line: &str) -> Option<String> {
    match conversation.submit(line).await {
        Ok(SubmitOutcome::Accepted { reply }) => Some(reply.content),
        Ok(SubmitOutcome::RejectedEmpty) => None,
        Ok(SubmitOutcome::RejectedBusy) => Some(BUSY_NOTICE.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Message not answered");
            Some(format!("Error: {}", e))
        }
    }
}

/// Interactive loop: one line per request until EOF or `exit`/`quit`.
async fn chat_loop(conversation: &Conversation) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(greeting) = conversation.messages().first() {
        println!("{}\n", greeting.content);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Some(text) = respond(conversation, line).await {
            println!("{}\n", text);
        }
    }

    tracing::info!(messages = conversation.len(), "Chat session ended");
    Ok(())
}

async fn ask(conversation: &Conversation, utterance: &str) -> Result<(), Box<dyn std::error::Error>> {
    match conversation.submit(utterance).await? {
        SubmitOutcome::Accepted { reply } => println!("{}", reply.content),
        SubmitOutcome::RejectedEmpty => return Err("request must not be blank".into()),
        SubmitOutcome::RejectedBusy => return Err("conversation is busy".into()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Configuration. Read before logging is up; problems are reported below.
    let LoadedConfig {
        path: config_file,
        config,
        error: config_error,
    } = args.load_config();

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    match config_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(_) if !config_file.exists() => tracing::info!(
            path = %config_file.display(),
            "No configuration file, using defaults"
        ),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load configuration, using defaults"
        ),
    }

    // Corpus.
    let provider = ConfiguredProvider::from_config(&config.corpus)?;
    let corpus: Arc<[Product]> = load_or_empty(&provider).await;

    match args.command() {
        Command::Chat => {
            let conversation = Conversation::from_config(corpus, &config.chat);
            chat_loop(&conversation).await?;
        }
        Command::Ask { utterance } => {
            let conversation = Conversation::from_config(corpus, &config.chat);
            ask(&conversation, &utterance.join(" ")).await?;
        }
        Command::Stats => {
            let stats = CatalogStats::from_products(&corpus);
            println!("{}", render::render_stats(&stats, &config.chat.currency));
        }
        Command::TopDeals { limit } => {
            let deals = top_deals(&corpus, usize::from(limit));
            println!("{}", render::render_top_deals(&deals, &config.chat.currency));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deals_core::config::ChatConfig;

    fn conversation(enabled: bool) -> Conversation {
        let config = ChatConfig {
            enabled,
            thinking_delay_ms: 0,
            ..ChatConfig::default()
        };
        let corpus: Arc<[Product]> = vec![Product::new("Galaxy A14").with_price(2200.0)].into();
        Conversation::from_config(corpus, &config)
    }

    #[tokio::test]
    async fn test_respond_returns_reply() {
        let conv = conversation(true);
        let text = respond(&conv, "galaxy").await.unwrap();
        assert!(text.contains("Galaxy A14"));
    }

    #[tokio::test]
    async fn test_respond_skips_blank_line() {
        assert!(respond(&conversation(true), "   ").await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_chat_keeps_responding() {
        let conv = conversation(false);
        for line in ["galaxy", "cheap phones"] {
            assert_eq!(respond(&conv, line).await.as_deref(), Some("Error: chat is disabled"));
        }
        assert_eq!(conv.len(), 1);
    }
}
