use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::Theme;

pub fn render_help(f: &mut Frame, area: Rect) {
    let panel_area = super::centered_rect(area, 60, 80, 50, 22);

    f.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            " Jobkan Help ",
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel_area);
    f.render_widget(block, panel_area);

    if inner.height == 0 {
        return;
    }

    let key = Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD);
    let dim = Theme::dim_style();
    let heading = Style::default()
        .fg(Theme::FG)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let row = |k: &'static str, d: &'static str| {
        Line::from(vec![Span::styled(k, key), Span::styled(d, dim)])
    };

    let lines = vec![
        Line::from(Span::styled("Normal Mode", heading)),
        row("  h / l       ", "Switch columns"),
        row("  j / k       ", "Move between cards"),
        row("  d           ", "Pick up card (drag)"),
        row("  m           ", "Move to column (menu)"),
        row("  Enter       ", "Open application detail"),
        row("  /           ", "Search company or role"),
        row("  Esc         ", "Clear search"),
        row("  q           ", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Dragging", heading)),
        row("  h / l       ", "Move drop target"),
        row("  1-7         ", "Jump drop target to column"),
        row("  Enter / d   ", "Drop card"),
        row("  Esc         ", "Cancel drag"),
        Line::from(""),
        Line::from(Span::styled("Goto (g)", heading)),
        row("  1-7         ", "Jump to column"),
        row("  g / e       ", "First / last card"),
        Line::from(""),
        Line::from(Span::styled("Space", heading)),
        row("  m           ", "Move to column"),
        row("  r           ", "Reload applications"),
        row("  ?           ", "This help"),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}
