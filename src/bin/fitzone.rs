//! fitzone — interactive chat with Max, the FitZone trainer.
//!
//! Reads one question per line from stdin and prints the reply. With
//! `--question` it answers once and exits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use fitzone::config::{Config, Secrets};
use fitzone::{ChatSession, Role, TrainerService};

/// Chat with the FitZone Gym fitness assistant
#[derive(Parser)]
#[command(name = "fitzone")]
#[command(version = fitzone::PKG_VERSION)]
#[command(about = "FitZone Gym fitness assistant")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gemini API key (overrides the secrets file).
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Identity used for rate limiting.
    #[arg(long, default_value = fitzone::DEFAULT_IDENTITY)]
    identity: String,

    /// Ask a single question and exit.
    #[arg(short, long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let trainer = match build_trainer(&args) {
        Ok(trainer) => trainer,
        Err(e) => {
            error!(error = %e, "failed to start");
            eprintln!("⚠️ System Offline: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !trainer.is_configured() {
        eprintln!("⚠️ System Offline");
        return ExitCode::FAILURE;
    }

    info!(version = fitzone::PKG_VERSION, identity = %args.identity, "fitzone ready");

    let mut session = ChatSession::new(args.identity.clone());

    if let Some(question) = args.question.as_deref() {
        println!("{}", session.ask(&trainer, question).await);
        return ExitCode::SUCCESS;
    }

    match chat_loop(&trainer, &mut session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}

fn build_trainer(args: &Args) -> fitzone::Result<TrainerService> {
    let config = Config::load(args.config.as_deref())?;
    let api_key = match &args.api_key {
        Some(key) => Some(key.clone()),
        None => Secrets::load()?.api_key(),
    };
    config.trainer_builder(api_key)?.build()
}

async fn chat_loop(trainer: &TrainerService, session: &mut ChatSession) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("💪 FITZONE GYM - GET FIT. STAY STRONG.\n");
    for turn in session.history() {
        print_turn(turn.role, &turn.content);
    }

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        // One question at a time: the next line is not read until this
        // answer is back.
        eprintln!("💪 Max is preparing your answer...");
        let reply = session.ask(trainer, &line).await;
        print_turn(Role::Assistant, reply);
    }

    Ok(())
}

fn print_turn(role: Role, content: &str) {
    let speaker = match role {
        Role::User => "you",
        Role::Assistant => "max",
    };
    println!("{speaker}> {content}\n");
}
