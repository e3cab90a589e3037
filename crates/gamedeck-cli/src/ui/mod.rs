pub mod catalog;
pub mod detail;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app_state::Toast;

/// What a key press on a screen asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Quit,
    /// Open the detail screen for a game code.
    Open(String),
    Back,
    Retry,
    SelectIdentity(String),
    Play,
    Share,
}

/// Move a list cursor by one, wrapping at both ends.
pub fn step(selected: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    Some(match selected.map(|i| i.min(last)) {
        None => 0,
        Some(i) if down => {
            if i == last {
                0
            } else {
                i + 1
            }
        }
        Some(0) => last,
        Some(i) => i - 1,
    })
}

pub fn render_toast(f: &mut Frame, toast: &Toast) {
    let area = centered_rect(50, 15, f.area());
    let color = if toast.is_error { Color::Red } else { Color::Blue };
    let block = Paragraph::new(toast.message.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notification")
                .style(Style::default().bg(color).fg(Color::White)),
        );
    f.render_widget(Clear, area);
    f.render_widget(block, area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(Some(2), 3, true), Some(0));
        assert_eq!(step(Some(0), 3, false), Some(2));
        assert_eq!(step(Some(1), 3, false), Some(0));
        assert_eq!(step(None, 3, true), Some(0));
        assert_eq!(step(Some(0), 0, true), None);
    }

    #[test]
    fn step_clamps_out_of_range_cursor() {
        // The list can shrink under the cursor when the search narrows.
        assert_eq!(step(Some(7), 3, false), Some(1));
        assert_eq!(step(Some(7), 3, true), Some(0));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 20, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 8);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
    }
}
