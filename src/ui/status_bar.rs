use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::{AppState, Mode, NotificationLevel};
use crate::engine::ColumnView;

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState, views: &[ColumnView]) {
    // Filter editing takes over the entire bar
    if let Mode::Filter { buf } = &state.mode {
        let spans = vec![
            Span::styled(
                " / ",
                Style::default()
                    .fg(Theme::FG)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Span::raw(format!(" {}", buf.input)),
            Span::raw("_"),
        ];
        let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_style());
        f.render_widget(paragraph, area);
        return;
    }

    // Three-zone layout for all other modes
    let left = build_left_zone(state);
    let right = build_right_zone(state, views);

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let right_width: usize = right.iter().map(|s| s.content.width()).sum();
    let total_width = area.width as usize;

    let center_avail = total_width.saturating_sub(left_width + right_width);
    let center = build_center_zone(state, center_avail);

    let mut spans = left;
    spans.extend(center);
    spans.extend(right);

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_style());
    f.render_widget(paragraph, area);
}

/// Build the left zone: mode badge + active filter.
fn build_left_zone(state: &AppState) -> Vec<Span<'_>> {
    let mode_str = match &state.mode {
        Mode::Normal => "NORMAL",
        Mode::Goto => "GOTO",
        Mode::Space => "SPACE",
        Mode::Drag => "DRAG",
        Mode::Picker { .. } => "MOVE",
        Mode::Detail { .. } => "DETAIL",
        Mode::Help => "HELP",
        Mode::Filter { .. } => "",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {mode_str} "),
            Style::default()
                .fg(Theme::FG)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
    ];

    if let Some(ref filter) = state.active_filter {
        spans.push(Span::styled(
            format!("/{filter} "),
            Style::default().fg(Theme::FG),
        ));
    }

    spans
}

/// Build the right zone: focused column name + card position.
fn build_right_zone<'a>(state: &AppState, views: &'a [ColumnView]) -> Vec<Span<'a>> {
    let mut spans = Vec::new();

    if let Some(col) = views.get(state.focused_column) {
        let count = col.apps.len();
        let pos = if count > 0 {
            format!(" {}/{}", state.selected_card + 1, count)
        } else {
            " 0".to_string()
        };
        spans.push(Span::styled(
            format!("{}[{}]", col.key, count),
            Style::default().fg(Theme::DIM),
        ));
        spans.push(Span::styled(pos, Style::default().fg(Theme::FG)));
    }

    spans.push(Span::raw(" "));
    spans
}

/// Build the center zone: notification text padded to fill available width.
fn build_center_zone(state: &AppState, avail_width: usize) -> Vec<Span<'_>> {
    if let Some(ref notif) = state.notification {
        let notif_width = notif.width();
        let color = match state.notification_level {
            NotificationLevel::Info => Theme::FG,
            NotificationLevel::Error => Theme::STATUS_ERROR,
        };

        if notif_width >= avail_width {
            let truncated: String = notif.chars().take(avail_width).collect();
            return vec![Span::styled(truncated, Style::default().fg(color))];
        }

        let pad_total = avail_width - notif_width;
        let pad_left = pad_total / 2;
        let pad_right = pad_total - pad_left;

        vec![
            Span::raw(" ".repeat(pad_left)),
            Span::styled(notif.as_str(), Style::default().fg(color)),
            Span::raw(" ".repeat(pad_right)),
        ]
    } else {
        vec![Span::raw(" ".repeat(avail_width))]
    }
}
