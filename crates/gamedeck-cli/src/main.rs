mod app;
mod app_state;
mod commands;
mod share;
mod tui;
mod ui;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gamedeck_sdk::config::{parse_timeout_ms, DEFAULT_API_URL};
use gamedeck_sdk::{ClientConfig, GameDeckClient};

use crate::app::App;
use crate::app_state::AppController;
use crate::tui::{EventHandler, Tui};

#[derive(Parser, Debug)]
#[command(name = "gamedeck")]
#[command(about = "Browse and launch casino games from the terminal")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// API origin (overrides GAMEDECK_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds (overrides GAMEDECK_TIMEOUT_MS)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the game catalog
    Games {
        /// Only show games whose name, display name or description contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Print the matching games as JSON
        #[arg(long, action)]
        json: bool,
    },
    /// Launch a game and print its URL
    Launch {
        /// Game code (ex: MOCK-001)
        game_code: String,

        /// Play as this user id instead of the primary identity
        #[arg(short, long)]
        user_id: Option<String>,

        /// Open the URL in the default browser
        #[arg(long, action)]
        open: bool,

        /// Copy the URL to the clipboard
        #[arg(long, action)]
        copy: bool,
    },
    /// Interactive catalog (default)
    Tui,
}

/// Flags win over the environment, which wins over the defaults.
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    resolve_config_with(
        cli,
        std::env::var("GAMEDECK_API_URL").ok(),
        std::env::var("GAMEDECK_TIMEOUT_MS").ok(),
    )
}

/// URL and timeout resolve independently: a flag only shadows its own
/// variable.
fn resolve_config_with(
    cli: &Cli,
    env_api_url: Option<String>,
    env_timeout_ms: Option<String>,
) -> anyhow::Result<ClientConfig> {
    let api_url = cli
        .api_url
        .clone()
        .or(env_api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let timeout = match cli.timeout_ms {
        Some(ms) => Duration::from_millis(ms),
        None => parse_timeout_ms(env_timeout_ms.as_deref())?,
    };
    Ok(ClientConfig::new(&api_url)?.with_timeout(timeout)?)
}

fn init_tracing(interactive: bool) {
    // The TUI owns the terminal; stay silent unless RUST_LOG asks otherwise.
    let default = if interactive { "off" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Tui);
    init_tracing(matches!(command, Commands::Tui));

    let config = resolve_config(&cli)?;
    let client = GameDeckClient::new(&config)?;

    match command {
        Commands::Games { search, json } => {
            println!("{}", commands::list_games(&client, search.as_deref(), *json).await?);
        }
        Commands::Launch {
            game_code,
            user_id,
            open,
            copy,
        } => {
            let url = commands::launch_game(&client, game_code, user_id.as_deref()).await?;
            println!("{url}");
            if *open {
                share::open_in_browser(&url).context("failed to open browser")?;
            }
            if *copy {
                share::copy_to_clipboard(&url).context("failed to copy link")?;
                eprintln!("{}", share::COPIED_MESSAGE);
            }
        }
        Commands::Tui => run_tui(client).await?,
    }

    Ok(())
}

async fn run_tui(client: GameDeckClient) -> anyhow::Result<()> {
    let mut terminal = tui::init()?;
    let result = event_loop(&mut terminal, client).await;
    // Restore even when the loop failed, then report the first error.
    tui::restore()?;
    result
}

async fn event_loop(terminal: &mut Tui, client: GameDeckClient) -> anyhow::Result<()> {
    let mut events = EventHandler::new(250);
    let mut app = App::new(client, events.get_sender());
    app.start();

    loop {
        terminal.draw(|f| app.render(f))?;

        let Some(action) = events.next_async().await else {
            break;
        };
        app.update(action);

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
