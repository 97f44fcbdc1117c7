//! Binary entry point that wires environment bootstrap, logging and the
//! command line, then drives the portfolio page from the terminal.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::app::{Outcome, Portfolio, UiEvent};
use folio::config::{self, AppConfig};
use folio::shell;
use folio::theme::ThemeStore;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Portfolio page interaction engine")]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
    /// Never speak replies.
    #[arg(long)]
    no_speech: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the page interactively (default).
    Interactive,
    /// Ask the assistant one question and print the reply.
    Ask { question: Vec<String> },
    /// Print the typewriter headline frames.
    Typewriter {
        #[arg(long, default_value_t = 40)]
        frames: usize,
    },
    /// Show the saved theme, optionally toggling it.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
/// Bootstraps environment variables and logging, then runs the chosen command.
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let mut config = config::load_app_config(&args.config);
    if args.no_speech {
        config.speech_enabled = false;
    }
    run(args.command.unwrap_or(Command::Interactive), &config).await
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Interactive => shell::run_shell(Portfolio::from_config(config)?).await,
        Command::Ask { question } => {
            let mut page = Portfolio::from_config(config)?;
            if let Outcome::Reply(reply) = page.dispatch(UiEvent::Ask(question.join(" "))).await {
                println!("{}", reply);
            }
            page.assistant_mut().wait_for_speech().await;
            Ok(())
        }
        Command::Typewriter { frames } => {
            let mut page = Portfolio::from_config(config)?;
            if let Some(writer) = page.typewriter_mut() {
                writer
                    .run(frames, |text| {
                        print!("\r\x1b[2K{}", text);
                        std::io::stdout().flush().ok();
                    })
                    .await;
                println!();
            }
            Ok(())
        }
        Command::Theme { toggle } => {
            let store = ThemeStore::new(&config.theme_path);
            let mut theme = store.load();
            if toggle {
                theme = store.toggle(theme)?;
            }
            println!("{} [{}]", theme.as_str(), theme.icon());
            Ok(())
        }
    }
}
