//! ratatui rendering of the tab bar.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::events::TabBarSnapshot;

/// Titles wider than this are cut and suffixed with `...`.
const MAX_TITLE_WIDTH: usize = 15;

/// Colors used by the tab bar.
#[derive(Debug, Clone, Copy)]
pub struct TabBarTheme {
    pub tab_active: Color,
    pub tab_inactive: Color,
    pub border: Color,
}

impl Default for TabBarTheme {
    fn default() -> Self {
        Self {
            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,
            border: Color::Gray,
        }
    }
}

/// One line holding every tab label, the active one highlighted.
pub fn tab_bar_line(snapshot: &TabBarSnapshot, theme: &TabBarTheme) -> Line<'static> {
    let active = snapshot.active_index();
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];

    for (i, tab) in snapshot.tabs.iter().enumerate() {
        let style = if Some(i) == active {
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.tab_inactive)
        };

        spans.push(Span::styled(format!("[{}]", truncate_title(&tab.title)), style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

/// Draw the tab bar into `area`; nothing is drawn while the bar is hidden.
pub fn draw_tab_bar(frame: &mut Frame, snapshot: &TabBarSnapshot, theme: &TabBarTheme, area: Rect) {
    if !snapshot.visible || snapshot.tabs.is_empty() {
        return;
    }

    let tabs = Paragraph::new(tab_bar_line(snapshot, theme)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(tabs, area);
}

fn truncate_title(title: &str) -> String {
    let mut width = 0;
    let mut truncated = String::new();
    for c in title.chars() {
        width += c.width().unwrap_or(0);
        if width > MAX_TITLE_WIDTH {
            let mut kept: Vec<char> = truncated.chars().collect();
            kept.truncate(kept.len().saturating_sub(3));
            return format!("{}...", kept.into_iter().collect::<String>());
        }
        truncated.push(c);
    }
    truncated
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
