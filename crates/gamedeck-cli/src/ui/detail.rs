use crossterm::event::{KeyCode, KeyEvent};
use gamedeck_sdk::{CredentialStore, DetailEffect, DetailFlow, DetailPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::catalog::game_summary;
use super::{centered_rect, step, ViewCommand};

pub struct DetailView {
    pub flow: DetailFlow,
    /// Identity selector; `Some` while open.
    picker: Option<ListState>,
}

impl DetailView {
    pub fn new(flow: DetailFlow) -> Self {
        Self { flow, picker: None }
    }

    /// Reuse this screen for another game.
    pub fn navigate(&mut self, game_code: &str) -> Option<DetailEffect> {
        self.picker = None;
        self.flow.navigate(game_code)
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &CredentialStore) -> Option<ViewCommand> {
        if let Some(state) = self.picker.as_mut() {
            let identities = store.identities();
            match key.code {
                KeyCode::Esc => self.picker = None,
                KeyCode::Down | KeyCode::Char('j') => {
                    state.select(step(state.selected(), identities.len(), true));
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    state.select(step(state.selected(), identities.len(), false));
                }
                KeyCode::Enter => {
                    let chosen = state
                        .selected()
                        .and_then(|i| identities.get(i))
                        .map(|id| id.user_id.clone());
                    self.picker = None;
                    return chosen.map(ViewCommand::SelectIdentity);
                }
                _ => {}
            }
            return None;
        }

        let has_url = self.flow.url().is_some();
        match key.code {
            KeyCode::Esc => Some(ViewCommand::Back),
            KeyCode::Char('q') => Some(ViewCommand::Quit),
            KeyCode::Char('u') if store.has_choice() && self.flow.game().is_some() => {
                let current = store
                    .current()
                    .and_then(|c| store.identities().iter().position(|id| id == c));
                let mut state = ListState::default();
                state.select(current.or(Some(0)));
                self.picker = Some(state);
                None
            }
            KeyCode::Char('p') if has_url => Some(ViewCommand::Play),
            KeyCode::Char('s') if has_url => Some(ViewCommand::Share),
            KeyCode::Char('r')
                if matches!(
                    self.flow.phase(),
                    DetailPhase::LoadFailed | DetailPhase::LaunchFailed
                ) =>
            {
                Some(ViewCommand::Retry)
            }
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, store: &CredentialStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        let title = format!("Game {} (Esc to go back)", self.flow.game_code());
        let info = match self.flow.game() {
            Some(game) => game_summary(game),
            None => vec![Line::from(self.flow.phase().to_string())],
        };
        let p = Paragraph::new(info)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, chunks[0]);

        let p = Paragraph::new(self.launch_lines(store))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Launch"));
        f.render_widget(p, chunks[1]);

        if let Some(state) = self.picker.as_mut() {
            let area = centered_rect(50, 40, f.area());
            let items: Vec<ListItem> = store
                .identities()
                .iter()
                .map(|id| ListItem::new(id.to_string()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Play as"))
                .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
                .highlight_symbol(">> ");
            f.render_widget(Clear, area);
            f.render_stateful_widget(list, area, state);
        }
    }

    fn launch_lines(&self, store: &CredentialStore) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::Cyan);
        let mut lines = Vec::new();

        if let Some(identity) = self.flow.identity() {
            let mut spans = vec![Span::styled("Player: ", label), Span::raw(identity.to_string())];
            if store.has_choice() {
                spans.push(Span::styled("  [u] switch", Style::default().fg(Color::DarkGray)));
            }
            lines.push(Line::from(spans));
        }

        let error = Style::default().fg(Color::Red);
        match self.flow.phase() {
            DetailPhase::LoadingGame => lines.push(Line::from("Loading game...")),
            DetailPhase::AwaitingLaunch => lines.push(Line::from("Ready")),
            DetailPhase::Launching => lines.push(Line::from("Launching...")),
            DetailPhase::Launched => {
                if let Some(url) = self.flow.url() {
                    lines.push(Line::from(vec![
                        Span::styled("URL: ", label),
                        Span::styled(url.to_string(), Style::default().fg(Color::Green)),
                    ]));
                }
                lines.push(Line::from("[p] Play  [s] Share"));
            }
            DetailPhase::LoadFailed | DetailPhase::LaunchFailed => {
                let message = self.flow.error().unwrap_or_default().to_string();
                lines.push(Line::from(Span::styled(message, error)));
                lines.push(Line::from("[r] Retry"));
            }
            DetailPhase::GameNotFound | DetailPhase::NoCredentials => {
                let message = self.flow.error().unwrap_or_default().to_string();
                lines.push(Line::from(Span::styled(message, error)));
            }
        }
        lines
    }
}
