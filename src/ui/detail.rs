use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::Theme;
use crate::board::Application;
use crate::engine::ColumnKey;

/// Read-only application detail overlay.
pub fn render_detail(f: &mut Frame, area: Rect, app: &Application, scroll: u16) {
    let panel_area = super::centered_rect(area, 60, 70, 50, 16);

    f.render_widget(Clear, panel_area);

    let col = ColumnKey::from_status(app.status.as_deref());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            format!(" {} ", app.company_name),
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel_area);
    f.render_widget(block, panel_area);

    if inner.height == 0 {
        return;
    }

    let label = Theme::dim_style();
    let value = Style::default().fg(Theme::FG);

    let mut lines = vec![
        Line::from(Span::styled(
            app.role_title.as_str(),
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status   ", label),
            Span::styled("● ", Style::default().fg(Theme::column_color(col))),
            Span::styled(col.as_str(), value),
        ]),
    ];

    if let Some(date) = app.applied_date {
        lines.push(Line::from(vec![
            Span::styled("Applied  ", label),
            Span::styled(date.format("%Y-%m-%d").to_string(), value),
        ]));
    }
    if let Some(ref source) = app.applied_source {
        lines.push(Line::from(vec![
            Span::styled("Source   ", label),
            Span::styled(source.as_str(), value),
        ]));
    }

    if !app.stages.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Stages",
            Style::default().fg(Theme::FG).add_modifier(Modifier::UNDERLINED),
        )));
        for stage in &app.stages {
            let mut spans = vec![Span::styled(format!("  {} ", stage.name), value)];
            if let Some(date) = stage.date {
                spans.push(Span::styled(date.format("%Y-%m-%d").to_string(), label));
            }
            if let Some(ref outcome) = stage.outcome {
                spans.push(Span::styled(format!(" — {outcome}"), label));
            }
            lines.push(Line::from(spans));
        }
    }

    if let Some(ref notes) = app.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Notes",
            Style::default().fg(Theme::FG).add_modifier(Modifier::UNDERLINED),
        )));
        for line in notes.lines() {
            lines.push(Line::from(Span::styled(line, value)));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0));
    f.render_widget(paragraph, inner);
}
