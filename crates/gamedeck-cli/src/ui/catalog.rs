use crossterm::event::{KeyCode, KeyEvent};
use gamedeck_sdk::{Catalog, CatalogPhase, CredentialStore, Game};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{step, ViewCommand};
use crate::app_state::InputMode;

pub struct CatalogView {
    pub catalog: Catalog,
    list_state: ListState,
    input_mode: InputMode,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn selected_game(&self) -> Option<&Game> {
        let visible = self.catalog.visible();
        let idx = self.list_state.selected()?;
        visible.get(idx).copied()
    }

    /// Put the cursor on the first game after the list changed.
    pub fn reset_selection(&mut self) {
        let any = !self.catalog.visible().is_empty();
        self.list_state.select(any.then_some(0));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ViewCommand> {
        match self.input_mode {
            InputMode::Editing => {
                match key.code {
                    KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
                    KeyCode::Char(c) => {
                        let mut term = self.catalog.search().to_string();
                        term.push(c);
                        self.catalog.set_search(term);
                        self.reset_selection();
                    }
                    KeyCode::Backspace => {
                        let mut term = self.catalog.search().to_string();
                        term.pop();
                        self.catalog.set_search(term);
                        self.reset_selection();
                    }
                    _ => {}
                }
                None
            }
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => Some(ViewCommand::Quit),
                KeyCode::Char('/') => {
                    self.input_mode = InputMode::Editing;
                    None
                }
                KeyCode::Char('r') if matches!(self.catalog.phase(), CatalogPhase::Failed(_)) => {
                    Some(ViewCommand::Retry)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let len = self.catalog.visible().len();
                    self.list_state.select(step(self.list_state.selected(), len, true));
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let len = self.catalog.visible().len();
                    self.list_state.select(step(self.list_state.selected(), len, false));
                    None
                }
                KeyCode::Enter => self
                    .selected_game()
                    .map(|game| ViewCommand::Open(game.game_code.clone())),
                _ => None,
            },
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, store: &CredentialStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        // Top: search box
        let search_style = if self.input_mode == InputMode::Editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let player = store
            .current()
            .map_or_else(|| "not signed in".to_string(), ToString::to_string);
        let search = Paragraph::new(self.catalog.search().to_string())
            .style(search_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Search (/) - {player}")),
            );
        f.render_widget(search, chunks[0]);

        match self.catalog.phase().clone() {
            CatalogPhase::Loading => {
                let p = Paragraph::new("Loading games...")
                    .block(Block::default().borders(Borders::ALL).title("Games"));
                f.render_widget(p, chunks[1]);
            }
            CatalogPhase::Failed(message) => {
                let p = Paragraph::new(vec![
                    Line::from(Span::styled(message, Style::default().fg(Color::Red))),
                    Line::from(""),
                    Line::from("Press r to retry"),
                ])
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Games"));
                f.render_widget(p, chunks[1]);
            }
            CatalogPhase::Ready => self.render_games(f, chunks[1]),
        }
    }

    fn render_games(&mut self, f: &mut Frame, area: Rect) {
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let visible = self.catalog.visible();
        if visible.is_empty() {
            let text = if self.catalog.games().is_empty() {
                "No games available".to_string()
            } else {
                format!("No games match \"{}\"", self.catalog.search().trim())
            };
            let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Games"));
            f.render_widget(p, area);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|game| {
                let mut spans = vec![Span::raw(game.display_name.clone())];
                if !game.is_active {
                    spans.push(Span::styled(" (inactive)", Style::default().fg(Color::DarkGray)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let title = format!("Games ({}/{})", visible.len(), self.catalog.games().len());
        let preview = self
            .list_state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|game| game_summary(game));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, main_chunks[0], &mut self.list_state);

        let p = Paragraph::new(preview.unwrap_or_default())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Details (Enter to open)"));
        f.render_widget(p, main_chunks[1]);
    }
}

/// Lines describing one game, shared with the detail screen.
pub fn game_summary(game: &Game) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Line::from(Span::styled(
            game.display_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Code: ", label),
            Span::raw(game.game_code.clone()),
        ]),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::raw(format!("{} / {}", game.platform, game.game_type)),
        ]),
        Line::from(vec![
            Span::styled("Bets: ", label),
            Span::raw(format!(
                "{} - {} {}",
                game.bet_config.min_bet_amount,
                game.bet_config.max_bet_amount,
                game.bet_config.currency
            )),
        ]),
    ];
    if let Some(rtp) = game.rtp {
        lines.push(Line::from(vec![
            Span::styled("RTP: ", label),
            Span::raw(format!("{rtp:.2}%")),
        ]));
    }
    if !game.is_active {
        lines.push(Line::from(Span::styled(
            "Currently unavailable",
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(description) = &game.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use gamedeck_sdk::{DashboardResponse, SdkError};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dashboard() -> DashboardResponse {
        serde_json::from_value(serde_json::json!({
            "userId": "player-1",
            "agentId": "agent-7",
            "cert": "c3rt",
            "games": [
                {
                    "gameCode": "G1", "gameName": "fruit", "displayName": "Fruit Frenzy",
                    "platform": "SLOT", "gameType": "VIDEO", "isActive": true,
                    "description": "Sticky wilds", "rtp": 96.5,
                    "betConfig": { "minBetAmount": "1", "maxBetAmount": "10", "currency": "USD" }
                },
                {
                    "gameCode": "G2", "gameName": "dragon", "displayName": "Dragon Hoard",
                    "platform": "SLOT", "gameType": "VIDEO", "isActive": false,
                    "betConfig": { "minBetAmount": "1", "maxBetAmount": "10", "currency": "USD" }
                }
            ]
        }))
        .unwrap()
    }

    fn loaded() -> (CatalogView, CredentialStore) {
        let mut view = CatalogView::new();
        let mut store = CredentialStore::new();
        let token = view.catalog.begin_fetch();
        view.catalog.on_dashboard(token, Ok(dashboard()), &mut store);
        view.reset_selection();
        (view, store)
    }

    fn draw(view: &mut CatalogView, store: &CredentialStore) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| view.render(f, f.area(), store)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn enter_opens_selected_game() {
        let (mut view, _) = loaded();
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            Some(ViewCommand::Open("G1".into()))
        );
        view.handle_key(key(KeyCode::Down));
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            Some(ViewCommand::Open("G2".into()))
        );
    }

    #[test]
    fn typing_filters_and_q_is_literal_while_editing() {
        let (mut view, _) = loaded();
        view.handle_key(key(KeyCode::Char('/')));
        assert_eq!(view.input_mode(), InputMode::Editing);
        for c in "dragq".chars() {
            assert_eq!(view.handle_key(key(KeyCode::Char(c))), None);
        }
        assert_eq!(view.catalog.search(), "dragq");
        assert!(view.catalog.visible().is_empty());

        view.handle_key(key(KeyCode::Backspace));
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.input_mode(), InputMode::Normal);
        assert_eq!(view.selected_game().unwrap().game_code, "G2");
        assert_eq!(view.handle_key(key(KeyCode::Char('q'))), Some(ViewCommand::Quit));
    }

    #[test]
    fn retry_only_offered_after_failure() {
        let mut view = CatalogView::new();
        let mut store = CredentialStore::new();
        let token = view.catalog.begin_fetch();
        assert_eq!(view.handle_key(key(KeyCode::Char('r'))), None);

        view.catalog
            .on_dashboard(token, Err(SdkError::Timeout(30_000)), &mut store);
        assert_eq!(view.handle_key(key(KeyCode::Char('r'))), Some(ViewCommand::Retry));

        let screen = draw(&mut view, &store);
        assert!(screen.contains("request timed out after 30000 ms"));
        assert!(screen.contains("Press r to retry"));
    }

    #[test]
    fn renders_games_and_preview() {
        let (mut view, store) = loaded();
        let screen = draw(&mut view, &store);
        assert!(screen.contains("Fruit Frenzy"));
        assert!(screen.contains("Dragon Hoard (inactive)"));
        assert!(screen.contains("RTP: 96.50%"));
        assert!(screen.contains("player-1@agent-7"));
    }

    #[test]
    fn renders_empty_states() {
        let mut view = CatalogView::new();
        let mut store = CredentialStore::new();
        let token = view.catalog.begin_fetch();
        let mut empty = dashboard();
        empty.games.clear();
        view.catalog.on_dashboard(token, Ok(empty), &mut store);
        assert!(draw(&mut view, &store).contains("No games available"));

        let (mut view, store) = loaded();
        view.catalog.set_search("zzz");
        assert!(draw(&mut view, &store).contains("No games match \"zzz\""));
    }
}
