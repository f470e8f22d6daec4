use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState,
};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::AppState;
use crate::board::Application;
use crate::engine::{ColumnKey, ColumnView};

/// Drag context resolved once per frame: the dragged card's id and the
/// column it currently occupies.
struct DragContext {
    dragged_id: String,
    source: ColumnKey,
}

fn drag_context(state: &AppState, apps: &[Application]) -> Option<DragContext> {
    let id = state.drag.dragged_id()?;
    let app = apps.iter().find(|a| a.id == id)?;
    Some(DragContext {
        dragged_id: id.to_string(),
        source: ColumnKey::from_status(app.status.as_deref()),
    })
}

pub fn render_board(
    f: &mut Frame,
    area: Rect,
    views: &[ColumnView],
    state: &AppState,
    apps: &[Application],
) {
    let constraints: Vec<Constraint> = views
        .iter()
        .map(|_| Constraint::Ratio(1, views.len() as u32))
        .collect();
    let col_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let drag = drag_context(state, apps);

    for (idx, view) in views.iter().enumerate() {
        let is_focused = state.focused_column == idx;
        // Highlight the drop target, but never the card's own column.
        let is_drop_target = state.drag.hover_column() == Some(view.key)
            && drag.as_ref().is_some_and(|d| d.source != view.key);
        render_column(f, col_areas[idx], view, is_focused, is_drop_target, state, drag.as_ref());
    }
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    view: &ColumnView,
    is_focused: bool,
    is_drop_target: bool,
    state: &AppState,
    drag: Option<&DragContext>,
) {
    let color = Theme::column_color(view.key);

    let focused_mod = if is_focused { Modifier::BOLD } else { Modifier::empty() };

    let header_line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(color)),
        Span::styled(
            view.key.as_str(),
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({}) ", view.apps.len()), Theme::dim_style()),
    ]);

    let border_style = if is_drop_target {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Theme::COLUMN_BORDER)
            .add_modifier(focused_mod)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(BorderType::Rounded)
        .title(header_line)
        .padding(Padding::new(1, 1, 0, 0));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if view.apps.is_empty() {
        let text = if is_drop_target {
            Span::styled(
                format!("Drop here → {}", view.key),
                Style::default().fg(color),
            )
        } else {
            Span::styled("No applications", Theme::dim_style())
        };
        f.render_widget(
            Paragraph::new(Line::from(text)),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
        return;
    }

    let card_height: u16 = 5; // 3 inner lines + 2 border lines
    let max_visible = (inner.height / card_height) as usize;
    if max_visible == 0 {
        return;
    }

    let selected_in_col = if is_focused { state.selected_card } else { 0 };
    let scroll_offset = if view.apps.len() > max_visible && selected_in_col >= max_visible {
        selected_in_col - max_visible + 1
    } else {
        0
    };

    for (idx, app) in view.apps.iter().enumerate().skip(scroll_offset) {
        if idx - scroll_offset >= max_visible {
            break;
        }
        let y = inner.y + ((idx - scroll_offset) as u16 * card_height);
        let card_area = Rect::new(inner.x, y, inner.width, card_height);

        let is_selected = is_focused && state.selected_card == idx;
        let is_dragged = drag.is_some_and(|d| d.dragged_id == app.id);
        render_card(f, card_area, app, view.key, is_selected, is_dragged);
    }

    if view.apps.len() > max_visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        let mut scrollbar_state = ScrollbarState::new(view.apps.len()).position(scroll_offset);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Truncate to `max_width` display columns, grapheme-safe, appending an
/// ellipsis when anything was cut.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let avail = max_width.saturating_sub(1); // room for '…'
    let truncated: String = text
        .graphemes(true)
        .scan(0, |w, g| {
            let gw = g.width();
            (*w + gw <= avail).then(|| {
                *w += gw;
                g
            })
        })
        .collect();
    format!("{truncated}…")
}

/// One-line applied metadata: date, source, and stage count.
pub(crate) fn meta_line(app: &Application) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(date) = app.applied_date {
        parts.push(date.format("%b %d").to_string());
    }
    if let Some(ref source) = app.applied_source {
        parts.push(source.clone());
    }
    match app.stages.len() {
        0 => {}
        1 => parts.push("1 stage".to_string()),
        n => parts.push(format!("{n} stages")),
    }
    parts.join(" · ")
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    app: &Application,
    col: ColumnKey,
    is_selected: bool,
    is_dragged: bool,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let selected_mod = if is_selected { Modifier::BOLD } else { Modifier::empty() };
    let dragged_mod = if is_dragged { Modifier::DIM } else { Modifier::empty() };

    let border_style = Style::default()
        .fg(if is_dragged { Theme::DIM } else { Theme::CARD_BORDER })
        .add_modifier(selected_mod);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(if is_selected { BorderType::Thick } else { BorderType::Rounded });

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width < 2 {
        return;
    }

    let marker = if is_selected { "▸ " } else { "  " };

    // Line 1: marker + column-colored dot + company
    let dot_width = 2; // "● "
    let company = truncate_to_width(
        &app.company_name,
        (inner.width as usize).saturating_sub(marker.width() + dot_width),
    );
    let line1 = Line::from(vec![
        Span::styled(marker, Style::default().fg(Theme::FG).add_modifier(selected_mod)),
        Span::styled("● ", Style::default().fg(Theme::column_color(col)).add_modifier(dragged_mod)),
        Span::styled(
            company,
            Style::default()
                .fg(Theme::FG)
                .add_modifier(Modifier::BOLD | selected_mod | dragged_mod),
        ),
    ]);

    // Line 2: role
    let role = truncate_to_width(&app.role_title, (inner.width as usize).saturating_sub(2));
    let line2 = Line::from(Span::styled(
        format!("  {role}"),
        Style::default().fg(Theme::FG).add_modifier(selected_mod | dragged_mod),
    ));

    // Line 3: applied date · source · stages
    let meta = meta_line(app);
    let line3 = Line::from(Span::styled(
        format!("  {}", truncate_to_width(&meta, (inner.width as usize).saturating_sub(2))),
        Theme::dim_style().add_modifier(dragged_mod),
    ));

    for (i, line) in [line1, line2, line3].into_iter().enumerate() {
        if inner.height > i as u16 {
            f.render_widget(
                Paragraph::new(line),
                Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
            );
        }
    }
}
