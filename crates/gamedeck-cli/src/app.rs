use std::io;
use std::time::Instant;

use gamedeck_sdk::{
    CredentialStore, DetailEffect, DetailFlow, DetailPhase, GameApi, GameDeckClient,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::app_state::{ActivityLog, AppController, InputMode, Screen, Toast};
use crate::share::{self, CopyMethod};
use crate::tui::Action;
use crate::ui::catalog::CatalogView;
use crate::ui::detail::DetailView;
use crate::ui::{render_toast, ViewCommand};

/// Lines of activity shown under the active screen.
const ACTIVITY_LINES: u16 = 6;

pub struct App {
    client: GameDeckClient,
    tx: UnboundedSender<Action>,
    should_quit: bool,

    store: CredentialStore,
    screen: Screen,
    catalog: CatalogView,
    detail: Option<DetailView>,

    toast: Option<Toast>,
    activity: ActivityLog,
}

impl App {
    pub fn new(client: GameDeckClient, tx: UnboundedSender<Action>) -> Self {
        Self {
            client,
            tx,
            should_quit: false,
            store: CredentialStore::new(),
            screen: Screen::Catalog,
            catalog: CatalogView::new(),
            detail: None,
            toast: None,
            activity: ActivityLog::default(),
        }
    }

    /// Issue the catalog fetch for this visit.
    pub fn start(&mut self) {
        self.fetch_catalog();
    }

    fn fetch_catalog(&mut self) {
        let token = self.catalog.catalog.begin_fetch();
        self.activity.push("GET dashboard", false);

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.dashboard().await;
            let _ = tx.send(Action::CatalogLoaded { token, result });
        });
    }

    fn run_effect(&mut self, effect: DetailEffect) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        match effect {
            DetailEffect::FetchCatalog(token) => {
                self.activity
                    .push(format!("GET dashboard for {}", token.game_code), false);
                tokio::spawn(async move {
                    let result = client.dashboard().await;
                    let _ = tx.send(Action::GameLoaded { token, result });
                });
            }
            DetailEffect::Launch { token, request } => {
                self.activity.push(
                    format!("LAUNCH {} as {}", request.game_code, request.user_id),
                    false,
                );
                tokio::spawn(async move {
                    let result = client.login_and_launch(&request).await;
                    let _ = tx.send(Action::LaunchCompleted { token, result });
                });
            }
        }
    }

    fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    fn execute(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Quit => self.should_quit = true,
            ViewCommand::Open(code) => {
                let effect = match self.detail.as_mut() {
                    Some(view) => view.navigate(&code),
                    None => {
                        let (flow, effect) = DetailFlow::enter(&code);
                        self.detail = Some(DetailView::new(flow));
                        effect
                    }
                };
                self.screen = Screen::Detail;
                if let Some(effect) = effect {
                    self.run_effect(effect);
                }
            }
            ViewCommand::Back => self.screen = Screen::Catalog,
            ViewCommand::Retry => match self.screen {
                Screen::Catalog => self.fetch_catalog(),
                Screen::Detail => {
                    let effect = self
                        .detail
                        .as_mut()
                        .and_then(|view| view.flow.retry(&self.store));
                    if let Some(effect) = effect {
                        self.run_effect(effect);
                    }
                }
            },
            ViewCommand::SelectIdentity(user_id) => {
                let Some(view) = self.detail.as_mut() else {
                    return;
                };
                match view.flow.select_identity(&user_id, &mut self.store) {
                    Ok(Some(effect)) => self.run_effect(effect),
                    Ok(None) => {}
                    Err(e) => self.show_toast(Toast::error(e.to_string(), Instant::now())),
                }
            }
            ViewCommand::Play => {
                let Some(url) = self.launch_url() else {
                    return;
                };
                match share::open_in_browser(&url) {
                    Ok(()) => self.activity.push("Opened game in browser", false),
                    Err(e) => {
                        warn!(error = %e, "failed to open browser");
                        self.show_toast(Toast::error(
                            format!("Could not open browser: {e}"),
                            Instant::now(),
                        ));
                    }
                }
            }
            ViewCommand::Share => {
                let Some(url) = self.launch_url() else {
                    return;
                };
                let copied = share::copy_to_clipboard(&url);
                self.finish_share(copied, Instant::now());
            }
        }
    }

    fn finish_share(&mut self, copied: io::Result<CopyMethod>, now: Instant) {
        match copied {
            Ok(method) => {
                let via = match method {
                    CopyMethod::System(program) => program,
                    CopyMethod::Osc52 => "terminal",
                };
                self.activity.push(format!("Copied link via {via}"), false);
                self.show_toast(Toast::info(share::COPIED_MESSAGE, now));
            }
            Err(e) => {
                warn!(error = %e, "failed to copy link");
                self.show_toast(Toast::error(format!("Could not copy link: {e}"), now));
            }
        }
    }

    fn launch_url(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(|view| view.flow.url())
            .map(String::from)
    }

    fn help_line(&self) -> &'static str {
        match self.screen {
            Screen::Catalog if self.catalog.input_mode() == InputMode::Editing => {
                "type to search | Enter/Esc: done"
            }
            Screen::Catalog => "/: search | Up/Down: select | Enter: open | r: retry | q: quit",
            Screen::Detail
                if self.detail.as_ref().is_some_and(DetailView::picker_open) =>
            {
                "Up/Down: select | Enter: play as | Esc: close"
            }
            Screen::Detail => "u: switch player | p: play | s: share | r: retry | Esc: back | q: quit",
        }
    }
}

impl AppController for App {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => {
                let command = match self.screen {
                    Screen::Catalog => self.catalog.handle_key(key),
                    Screen::Detail => match self.detail.as_mut() {
                        Some(view) => view.handle_key(key, &self.store),
                        None => Some(ViewCommand::Back),
                    },
                };
                if let Some(command) = command {
                    self.execute(command);
                }
            }
            Action::CatalogLoaded { token, result } => {
                let failed = result.as_ref().err().map(ToString::to_string);
                if self.catalog.catalog.on_dashboard(token, result, &mut self.store) {
                    self.catalog.reset_selection();
                    match failed {
                        Some(e) => self.activity.push(format!("Dashboard failed: {e}"), true),
                        None => self.activity.push(
                            format!("{} games loaded", self.catalog.catalog.games().len()),
                            false,
                        ),
                    }
                }
            }
            Action::GameLoaded { token, result } => {
                let effect = self
                    .detail
                    .as_mut()
                    .and_then(|view| view.flow.on_catalog_loaded(&token, result, &self.store));
                if let Some(effect) = effect {
                    self.run_effect(effect);
                }
            }
            Action::LaunchCompleted { token, result } => {
                let Some(view) = self.detail.as_mut() else {
                    return;
                };
                if view.flow.on_launch_completed(&token, result) {
                    match view.flow.phase() {
                        DetailPhase::Launched => {
                            self.activity.push(format!("{} launched", token.game_code), false);
                        }
                        _ => {
                            let message = view.flow.error().unwrap_or_default().to_string();
                            self.activity.push(
                                format!("{} launch failed: {message}", token.game_code),
                                true,
                            );
                        }
                    }
                }
            }
            Action::Tick | Action::Resize => {}
        }

        // Clear notification
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(Instant::now()))
        {
            self.toast = None;
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(ACTIVITY_LINES + 2),
                Constraint::Length(1),
            ])
            .split(f.area());

        match (self.screen, self.detail.as_mut()) {
            (Screen::Detail, Some(view)) => view.render(f, chunks[0], &self.store),
            _ => self.catalog.render(f, chunks[0], &self.store),
        }

        let lines: Vec<Line> = self
            .activity
            .entries()
            .rev()
            .take(usize::from(ACTIVITY_LINES))
            .map(|entry| {
                let color = if entry.is_error { Color::Red } else { Color::Green };
                Line::from(vec![
                    Span::raw(format!("{} ", entry.timestamp)),
                    Span::styled(entry.content.clone(), Style::default().fg(color)),
                ])
            })
            .collect();
        let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Activity"));
        f.render_widget(log, chunks[1]);

        let help = Paragraph::new(self.help_line()).style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, chunks[2]);

        if let Some(toast) = &self.toast {
            render_toast(f, toast);
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gamedeck_sdk::{ClientConfig, DashboardResponse, Identity, LaunchResponse, SdkError};
    use tokio::sync::mpsc;

    use super::*;
    use crate::app_state::TOAST_DURATION;

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn dashboard() -> DashboardResponse {
        serde_json::from_value(serde_json::json!({
            "userId": "player-1",
            "agentId": "agent-7",
            "cert": "c3rt",
            "availableUsers": [
                { "userId": "player-1", "agentId": "agent-7", "cert": "c3rt" },
                { "userId": "sub-1", "agentId": "agent-7", "cert": "s1" }
            ],
            "games": [
                {
                    "gameCode": "G1", "gameName": "game_one", "displayName": "Game One",
                    "platform": "SLOT", "gameType": "VIDEO", "isActive": true,
                    "betConfig": { "minBetAmount": "1", "maxBetAmount": "10", "currency": "USD" }
                },
                {
                    "gameCode": "G2", "gameName": "game_two", "displayName": "Game Two",
                    "platform": "SLOT", "gameType": "VIDEO", "isActive": true,
                    "betConfig": { "minBetAmount": "1", "maxBetAmount": "10", "currency": "USD" }
                }
            ]
        }))
        .unwrap()
    }

    /// An app pointed at a closed port; effects are intercepted from the
    /// channel rather than awaited.
    fn app() -> (App, mpsc::UnboundedReceiver<Action>) {
        let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let client = GameDeckClient::new(&config).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(client, tx), rx)
    }

    /// Run the catalog to `Ready` with the fixture dashboard.
    fn loaded() -> (App, mpsc::UnboundedReceiver<Action>) {
        let (mut app, rx) = app();
        app.start();
        app.update(Action::CatalogLoaded {
            token: 1,
            result: Ok(dashboard()),
        });
        (app, rx)
    }

    fn detail(app: &App) -> &DetailFlow {
        &app.detail.as_ref().unwrap().flow
    }

    fn pending_token(app: &App, seq: u64) -> gamedeck_sdk::RequestToken {
        gamedeck_sdk::RequestToken {
            game_code: detail(app).game_code().to_string(),
            seq,
        }
    }

    #[tokio::test]
    async fn catalog_load_seeds_store() {
        let (app, _rx) = loaded();
        assert_eq!(app.catalog.catalog.games().len(), 2);
        assert_eq!(app.store.identities().len(), 2);
        assert_eq!(app.store.current().unwrap().user_id, "player-1");
    }

    #[tokio::test]
    async fn stale_catalog_response_is_dropped() {
        let (mut app, _rx) = app();
        app.start();
        app.fetch_catalog();
        app.update(Action::CatalogLoaded {
            token: 1,
            result: Ok(dashboard()),
        });
        assert!(app.catalog.catalog.games().is_empty());
        assert!(app.store.current().is_none());
    }

    #[tokio::test]
    async fn open_auto_launches_and_share_needs_url() {
        let (mut app, _rx) = loaded();
        app.update(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(detail(&app).phase(), DetailPhase::LoadingGame);

        app.update(Action::GameLoaded {
            token: pending_token(&app, 1),
            result: Ok(dashboard()),
        });
        assert_eq!(detail(&app).phase(), DetailPhase::Launching);

        // No URL yet, so play and share are inert.
        app.update(key(KeyCode::Char('s')));
        assert!(app.toast.is_none());

        app.update(Action::LaunchCompleted {
            token: pending_token(&app, 2),
            result: Ok(LaunchResponse::success("https://x/y")),
        });
        assert_eq!(detail(&app).url(), Some("https://x/y"));
    }

    #[tokio::test]
    async fn switching_identity_relaunches() {
        let (mut app, _rx) = loaded();
        app.update(key(KeyCode::Enter));
        app.update(Action::GameLoaded {
            token: pending_token(&app, 1),
            result: Ok(dashboard()),
        });
        app.update(Action::LaunchCompleted {
            token: pending_token(&app, 2),
            result: Ok(LaunchResponse::success("https://x/first")),
        });

        app.update(key(KeyCode::Char('u')));
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        assert_eq!(app.store.current(), Some(&Identity::new("sub-1", "agent-7", "s1")));
        assert_eq!(detail(&app).phase(), DetailPhase::Launching);
        assert_eq!(detail(&app).url(), None);

        // The first identity's late answer cannot land on the new launch.
        app.update(Action::LaunchCompleted {
            token: pending_token(&app, 2),
            result: Ok(LaunchResponse::success("https://x/stale")),
        });
        assert_eq!(detail(&app).url(), None);

        app.update(Action::LaunchCompleted {
            token: pending_token(&app, 3),
            result: Ok(LaunchResponse::success("https://x/second")),
        });
        assert_eq!(detail(&app).url(), Some("https://x/second"));
    }

    #[tokio::test]
    async fn back_then_open_other_game_resets_flow() {
        let (mut app, _rx) = loaded();
        app.update(key(KeyCode::Enter));
        let first = pending_token(&app, 1);

        app.update(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Catalog);
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));
        assert_eq!(detail(&app).game_code(), "G2");

        // The fetch issued for G1 is now stale.
        app.update(Action::GameLoaded {
            token: first,
            result: Ok(dashboard()),
        });
        assert_eq!(detail(&app).phase(), DetailPhase::LoadingGame);
        assert!(detail(&app).game().is_none());
    }

    #[tokio::test]
    async fn failed_game_fetch_can_be_retried() {
        let (mut app, _rx) = loaded();
        app.update(key(KeyCode::Enter));
        app.update(Action::GameLoaded {
            token: pending_token(&app, 1),
            result: Err(SdkError::Timeout(30_000)),
        });
        assert_eq!(detail(&app).phase(), DetailPhase::LoadFailed);

        app.update(key(KeyCode::Char('r')));
        assert_eq!(detail(&app).phase(), DetailPhase::LoadingGame);
    }

    #[tokio::test]
    async fn copied_link_shows_toast_until_it_expires() {
        let (mut app, _rx) = loaded();
        let now = Instant::now();
        app.finish_share(Ok(CopyMethod::Osc52), now);

        let toast = app.toast.clone().unwrap();
        assert_eq!(toast.message, share::COPIED_MESSAGE);
        assert!(!toast.is_error);
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + TOAST_DURATION));
        assert_eq!(
            app.activity.entries().last().unwrap().content,
            "Copied link via terminal"
        );
    }

    #[tokio::test]
    async fn expired_toast_is_cleared_on_next_update() {
        let (mut app, _rx) = loaded();
        let shown_at = Instant::now().checked_sub(TOAST_DURATION).unwrap();
        app.finish_share(Ok(CopyMethod::System("xclip")), shown_at);
        assert!(app.toast.is_some());

        app.update(Action::Tick);
        assert!(app.toast.is_none());
    }

    #[tokio::test]
    async fn failed_copy_shows_error_toast() {
        let (mut app, _rx) = loaded();
        app.finish_share(Err(io::Error::other("no terminal")), Instant::now());
        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error);
        assert!(toast.message.contains("no terminal"));
    }

    #[tokio::test]
    async fn q_quits_from_catalog() {
        let (mut app, _rx) = loaded();
        assert!(!app.should_quit());
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
