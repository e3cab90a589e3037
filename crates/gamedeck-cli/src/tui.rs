use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamedeck_sdk::{DashboardResponse, LaunchResponse, RequestToken, SdkError};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> io::Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Everything the UI loop reacts to: input, time, and network completions.
#[derive(Debug)]
pub enum Action {
    Tick,
    Resize,
    Key(event::KeyEvent),
    /// Dashboard fetched for the catalog screen.
    CatalogLoaded {
        token: u64,
        result: Result<DashboardResponse, SdkError>,
    },
    /// Dashboard fetched for the detail screen.
    GameLoaded {
        token: RequestToken,
        result: Result<DashboardResponse, SdkError>,
    },
    LaunchCompleted {
        token: RequestToken,
        result: Result<LaunchResponse, SdkError>,
    },
}

pub struct EventHandler {
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // 1. Tick Loop (Async)
        let tick_sender = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(tick_rate));
            loop {
                interval.tick().await;
                if tick_sender.send(Action::Tick).is_err() {
                    break;
                }
            }
        });

        // 2. Input Loop (Blocking Thread)
        let event_sender = sender.clone();
        std::thread::spawn(move || loop {
            // Blocks until event available
            let sent = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    event_sender.send(Action::Key(key))
                }
                Ok(Event::Resize(_, _)) => event_sender.send(Action::Resize),
                Ok(_) => Ok(()),
                // On error, we exit the input loop
                Err(_) => break,
            };
            if sent.is_err() {
                break;
            }
        });

        Self { sender, receiver }
    }

    pub async fn next_async(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }

    pub fn get_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.sender.clone()
    }
}
