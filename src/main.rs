use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;

use faq_assistant::chatbot::{Assistant, ChatMessage};
use faq_assistant::config::Config;
use faq_assistant::{KnowledgeBase, Matcher};

const DEFAULT_CONFIG_PATH: &str = "faq-assistant.json";

#[tokio::main]
async fn main() {
    let explicit_path = std::env::args().nth(1);
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Only an explicitly named config file has to exist.
    let config = if explicit_path.is_some() || Path::new(&config_path).exists() {
        match Config::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::never(&log_dir, "faq-assistant.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::WARN.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("Starting faq-assistant...");

    let kb = match &config.knowledge_base_path {
        Some(path) => match KnowledgeBase::load(path) {
            Ok(kb) => {
                info!("Loaded knowledge base from {}", path.display());
                kb
            }
            Err(e) => {
                error!("{e}");
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => KnowledgeBase::builtin(),
    };
    info!(
        "Knowledge base: {} categories, {} entries",
        kb.categories().len(),
        kb.entry_count()
    );

    let matcher = Matcher::new(Arc::new(kb));
    let mut assistant = Assistant::open(matcher, config.assistant.clone());
    if let Some(welcome) = assistant.messages().first() {
        print_message(welcome);
    }
    println!("(type a question, a number to pick a suggestion, or /quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {e}");
                break;
            }
        };
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let pick = line.parse::<usize>().ok();
        if let Some(number) = pick {
            if !assistant.has_suggestion(number) {
                println!("No suggestion numbered {number}.");
                continue;
            }
        }

        // Typing effect happens here, not in the matcher.
        tokio::time::sleep(config.typing_delay).await;

        let reply = match pick {
            Some(number) => assistant.choose(number),
            None => assistant.respond(line),
        };
        if let Some(reply) = reply {
            print_message(reply);
        }
    }

    let count = assistant.close();
    info!("Bye ({count} messages discarded)");
}

fn print_message(message: &ChatMessage) {
    println!("{}", message.format());
}
