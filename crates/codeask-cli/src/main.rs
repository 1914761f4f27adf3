#![deny(unsafe_code)]

//! codeask CLI — interactive codebase Q&A prompt.
//!
//! Reads questions from stdin one line at a time and prints grounded
//! answers. No flags or subcommands; the only exits are the `quit`/`exit`
//! keywords, EOF, Ctrl-C, or a fatal configuration error at startup.

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use codeask_config::{AzureOpenAiConfig, ENV_API_KEY, ENV_DEPLOYMENT, ENV_ENDPOINT};
use codeask_core::{AzureOpenAiProvider, HttpCodeIndex, QaEngine};

/// codeask — ask natural-language questions about an indexed codebase.
#[derive(Parser)]
#[command(name = "codeask", version, about, long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a .env file next to the binary's working dir.
    dotenvy::dotenv().ok();

    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fatal path: missing credentials end the process before any input is read.
    let config = match AzureOpenAiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Please make sure {ENV_API_KEY}, {ENV_ENDPOINT}, and {ENV_DEPLOYMENT} \
                 are set in your environment or .env file."
            );
            std::process::exit(1);
        }
    };

    let deployment = config.deployment.clone();
    let engine = QaEngine::new(
        Box::new(HttpCodeIndex::from_env()),
        Box::new(AzureOpenAiProvider::new(&config)),
        deployment,
    );

    // Index unavailability is recoverable per query; a failed check only warns.
    if let Err(e) = engine.init().await {
        warn!(error = %e, "index readiness check failed; searches may fail");
    }

    println!("\n--- Codebase Q&A (powered by Azure OpenAI) ---");
    println!("Type your question and press Enter. Type 'quit' or 'exit' to end.");

    run_session(&engine, BufReader::new(tokio::io::stdin())).await?;

    Ok(())
}

/// The interactive read-ask-print loop.
///
/// Empty lines re-prompt without running the pipeline; `quit`/`exit`
/// (case-insensitive), EOF, and Ctrl-C all terminate normally.
async fn run_session<R>(engine: &QaEngine, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("\nQuestion: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nExiting...");
                break;
            }
        };

        let Some(line) = line else {
            // EOF on stdin
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        let answer = engine.ask(query).await;
        println!("\nAnswer:\n{answer}");
    }

    Ok(())
}
