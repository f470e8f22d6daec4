use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;

use super::theme::Theme;
use crate::app::Mode;
use crate::engine::ColumnKey;

/// Small key-hint popup shown at the bottom of the board for the minor
/// modes and while dragging.
pub fn render_hint_popup(f: &mut Frame, area: Rect, mode: &Mode) {
    if area.height < 3 || area.width < 8 {
        return;
    }
    let (title, hints): (&str, &[(&str, &str)]) = match mode {
        Mode::Goto => (
            " goto ",
            &[("1-7", "column"), ("g", "first card"), ("e", "last card")],
        ),
        Mode::Space => (
            " space ",
            &[
                ("m", "move to column"),
                ("d", "pick up card"),
                ("r", "reload"),
                ("/", "search"),
                ("?", "help"),
            ],
        ),
        Mode::Drag => (
            " drag ",
            &[
                ("h/l", "target column"),
                ("1-7", "jump"),
                ("Enter", "drop"),
                ("Esc", "cancel"),
            ],
        ),
        _ => return,
    };

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Theme::dim_style()));
        }
        spans.push(Span::styled(
            *key,
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {desc}"), Theme::dim_style()));
    }

    let line = Line::from(spans);
    let width = (line.width() as u16 + 4).min(area.width);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height.saturating_sub(3),
        width,
        3,
    );

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(title, Style::default().fg(Theme::FG)))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(Paragraph::new(line), inner);
}

/// "Move to column" picker for the selected card.
pub fn render_picker(f: &mut Frame, area: Rect, items: &[ColumnKey], selected: usize) {
    let height = items.len() as u16 + 2;
    let popup = super::centered_rect(area, 30, 50, 24, height);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Move to ",
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    for (i, col) in items.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let marker = if i == selected { "▸ " } else { "  " };
        let style = if i == selected {
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::FG)
        };
        let line = Line::from(vec![
            Span::styled(marker, style),
            Span::styled("● ", Style::default().fg(Theme::column_color(*col))),
            Span::styled(col.as_str(), style),
        ]);
        f.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}
