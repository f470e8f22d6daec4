pub mod board_view;
pub mod detail;
pub mod help;
pub mod input_modal;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::board::Application;
use crate::engine::classify;

/// Create a centered rect within `area` using percentage-based sizing with minimums.
pub fn centered_rect(area: Rect, w_pct: u16, h_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = (area.width * w_pct / 100).max(min_w).min(area.width);
    let height = (area.height * h_pct / 100).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn render(f: &mut Frame, apps: &[Application], state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let views = classify(apps, state.active_filter.as_deref());

    // Main board area
    board_view::render_board(f, chunks[0], &views, state, apps);

    // Status bar
    status_bar::render_status_bar(f, chunks[1], state, &views);

    // Overlays
    match &state.mode {
        Mode::Goto | Mode::Space | Mode::Drag => {
            input_modal::render_hint_popup(f, chunks[0], &state.mode);
        }
        Mode::Picker { items, selected, .. } => {
            input_modal::render_picker(f, chunks[0], items, *selected);
        }
        Mode::Detail { scroll } => {
            if let Some(app) = state.selected_app(apps) {
                detail::render_detail(f, f.area(), app, *scroll);
            }
        }
        Mode::Help => {
            help::render_help(f, f.area());
        }
        _ => {}
    }
}
