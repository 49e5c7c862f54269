//! Chat Widget Entry Point
//!
//! Usage:
//!   chat-widget [OPTIONS]
//!
//! Options:
//!   --endpoint <URL>     Chat endpoint (default: http://localhost:8000/chat)
//!   --config <FILE>      Configuration file
//!   --log-file <FILE>    Write logs here instead of stderr
//!
//! Logging is off unless `RUST_LOG` or `--log-file` is given, since stderr
//! shares the terminal with the UI.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chat_core::{load_config, ConfigOverrides, HttpBackend, WidgetConfig};
use chat_widget_tui::terminal::{install_panic_hook, restore_terminal};
use chat_widget_tui::App;

/// Chat Widget - talk to a chat backend from the terminal
#[derive(Parser, Debug)]
#[command(name = "chat-widget")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL (overrides config file and CHAT_WIDGET_ENDPOINT)
    #[arg(short = 'e', long, value_name = "URL")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_ref())?;

    // Resolve configuration before touching the terminal so errors stay readable
    let config = load_config(&ConfigOverrides {
        config_path: args.config,
        endpoint: args.endpoint,
    })?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: chat-widget requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    install_panic_hook(restore_terminal);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &WidgetConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(HttpBackend::from_config(config), config.endpoint.clone());
    app.run(terminal).await
}

/// Install the tracing subscriber
///
/// With a log file the default level is `info`; without one logging stays
/// off unless `RUST_LOG` asks for it.
fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let default_directive = if log_file.is_some() { "info" } else { "off" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {path:?}"))?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    }

    Ok(())
}
