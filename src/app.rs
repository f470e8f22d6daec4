use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::board::store::Store;
use crate::board::Application;
use crate::engine::{classify, ColumnKey, DragSession, StatusChange};
use crate::input::action::Action;
use crate::input::keymap::map_key;

/// Reusable text editing buffer with cursor.
///
/// `cursor` is a **char index** (not byte index), always in `0..=char_count`.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    pub fn empty() -> Self {
        Self { input: String::new(), cursor: 0 }
    }

    /// Convert a char index to a byte index.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_offset(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_idx = self.byte_offset(self.cursor - 1);
            self.input.remove(byte_idx);
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

/// Current interaction mode.
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    Goto,
    Space,
    /// A card is picked up; the drag session in [`AppState`] carries the
    /// gesture state.
    Drag,
    Filter {
        buf: TextBuffer,
    },
    /// "Move to column" menu for the selected card.
    Picker {
        app_id: String,
        items: Vec<ColumnKey>,
        selected: usize,
    },
    Detail {
        scroll: u16,
    },
    Help,
}

/// Notification severity for statusbar coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Global application state.
pub struct AppState {
    pub mode: Mode,
    pub focused_column: usize,
    pub selected_card: usize,
    pub active_filter: Option<String>,
    pub drag: DragSession,
    pub notification: Option<String>,
    pub notification_level: NotificationLevel,
    pub notification_expires: Option<Instant>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            focused_column: 0,
            selected_card: 0,
            active_filter: None,
            drag: DragSession::new(),
            notification: None,
            notification_level: NotificationLevel::Info,
            notification_expires: None,
            should_quit: false,
        }
    }

    /// Get a reference to the currently selected application, honoring
    /// the active search filter.
    pub fn selected_app<'a>(&self, apps: &'a [Application]) -> Option<&'a Application> {
        let views = classify(apps, self.active_filter.as_deref());
        views
            .get(self.focused_column)
            .and_then(|col| col.apps.get(self.selected_card))
            .copied()
    }

    /// Show a transient notification.
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Info;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Show a transient error notification (rendered in red).
    pub fn notify_error(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Error;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Clear expired notifications.
    pub fn tick_notification(&mut self) {
        if let Some(expires) = self.notification_expires {
            if Instant::now() >= expires {
                self.notification = None;
                self.notification_level = NotificationLevel::Info;
                self.notification_expires = None;
            }
        }
    }

    /// Clamp the selected card index to the focused column's card count.
    pub fn clamp_selection(&mut self, apps: &[Application]) {
        let views = classify(apps, self.active_filter.as_deref());
        if let Some(col) = views.get(self.focused_column) {
            if col.apps.is_empty() {
                self.selected_card = 0;
            } else if self.selected_card >= col.apps.len() {
                self.selected_card = col.apps.len() - 1;
            }
        }
    }
}

/// Sync `active_filter` from the current filter buffer.
fn sync_filter(state: &mut AppState) {
    if let Mode::Filter { buf } = &state.mode {
        state.active_filter = if buf.input.is_empty() {
            None
        } else {
            Some(buf.input.clone())
        };
    }
}

/// Apply a completed drop optimistically, then persist it through the
/// store.
///
/// The local copy is mutated first so the board re-renders immediately.
/// If the store call fails, the speculative copy is discarded and the
/// whole list reloaded from the store — a full resync rather than a
/// targeted revert. No retry; the user can re-drag.
fn apply_status_change(
    apps: &mut Vec<Application>,
    state: &mut AppState,
    store: &Store,
    change: &StatusChange,
) -> color_eyre::Result<()> {
    if let Some(app) = apps.iter_mut().find(|a| a.id == change.id) {
        app.status = Some(change.to.as_str().to_string());
    }
    match store.update_status(&change.id, change.to.as_str()) {
        Ok(()) => {
            state.focused_column = change.to.index();
            state.clamp_selection(apps);
            state.notify(format!("Moved to {}", change.to));
        }
        Err(e) => {
            *apps = store.load()?;
            state.clamp_selection(apps);
            state.notify_error(format!("Move failed: {e}"));
        }
    }
    Ok(())
}

/// Main TUI application loop.
pub fn run(terminal: &mut DefaultTerminal, store: &Store) -> color_eyre::Result<()> {
    let mut apps = store.load()?;
    let mut state = AppState::new();
    state.clamp_selection(&apps);

    loop {
        state.tick_notification();

        terminal.draw(|f| crate::ui::render(f, &apps, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let action = map_key(key, &state.mode);
                process_action(&mut apps, &mut state, action, store)?;

                if state.should_quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

pub fn process_action(
    apps: &mut Vec<Application>,
    state: &mut AppState,
    action: Action,
    store: &Store,
) -> color_eyre::Result<()> {
    let was_minor_mode = matches!(state.mode, Mode::Goto | Mode::Space);

    match action {
        Action::None => {
            if was_minor_mode {
                state.mode = Mode::Normal;
            }
        }

        // Navigation
        Action::FocusPrevColumn
        | Action::FocusNextColumn
        | Action::SelectPrevCard
        | Action::SelectNextCard => {
            handle_navigation(apps, state, action, was_minor_mode);
        }

        // Goto / Jump
        Action::JumpToColumn(_) | Action::JumpToFirstCard | Action::JumpToLastCard => {
            handle_goto(apps, state, action);
        }

        // Drag gesture
        Action::PickUpCard
        | Action::DragHoverPrev
        | Action::DragHoverNext
        | Action::DragHoverColumn(_)
        | Action::DropCard
        | Action::CancelDrag => {
            handle_drag(apps, state, action, store)?;
        }

        // Move-to menu
        Action::OpenMovePicker => {
            handle_open_picker(apps, state);
        }

        // Detail panel
        Action::OpenDetail
        | Action::ClosePanel
        | Action::DetailScrollUp
        | Action::DetailScrollDown
        | Action::DetailNextCard
        | Action::DetailPrevCard => {
            handle_detail(apps, state, action);
        }

        // Search filter
        Action::StartFilter => {
            state.mode = Mode::Filter { buf: TextBuffer::empty() };
        }
        Action::ClearFilter => {
            if state.active_filter.is_some() {
                state.active_filter = None;
                state.clamp_selection(apps);
                state.notify("Filter cleared");
            }
        }

        // Text input delegation
        Action::InputChar(_)
        | Action::InputBackspace
        | Action::InputLeft
        | Action::InputRight
        | Action::InputHome
        | Action::InputEnd
        | Action::InputConfirm
        | Action::InputCancel => {
            handle_input(apps, state, action, store)?;
        }

        // App-level actions
        Action::ReloadApplications => {
            state.mode = Mode::Normal;
            *apps = store.load()?;
            state.clamp_selection(apps);
            state.notify("Applications reloaded");
        }
        Action::ShowHelp => state.mode = Mode::Help,
        Action::Quit => match &state.mode {
            Mode::Normal => state.should_quit = true,
            _ => state.mode = Mode::Normal,
        },

        // Mode entry
        Action::EnterGotoMode => state.mode = Mode::Goto,
        Action::EnterSpaceMode => state.mode = Mode::Space,
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Handler: Navigation (column focus, card selection, picker selection)
// ---------------------------------------------------------------------------

fn handle_navigation(apps: &[Application], state: &mut AppState, action: Action, was_minor_mode: bool) {
    match action {
        Action::FocusPrevColumn => {
            if was_minor_mode {
                state.mode = Mode::Normal;
            }
            if state.focused_column > 0 {
                state.focused_column -= 1;
                state.clamp_selection(apps);
            }
        }
        Action::FocusNextColumn => {
            if was_minor_mode {
                state.mode = Mode::Normal;
            }
            if state.focused_column + 1 < ColumnKey::COUNT {
                state.focused_column += 1;
                state.clamp_selection(apps);
            }
        }
        Action::SelectPrevCard => match &mut state.mode {
            Mode::Picker { selected, .. } => {
                if *selected > 0 {
                    *selected -= 1;
                }
            }
            _ => {
                if was_minor_mode {
                    state.mode = Mode::Normal;
                }
                if state.selected_card > 0 {
                    state.selected_card -= 1;
                }
            }
        },
        Action::SelectNextCard => match &mut state.mode {
            Mode::Picker { selected, items, .. } => {
                if *selected + 1 < items.len() {
                    *selected += 1;
                }
            }
            _ => {
                if was_minor_mode {
                    state.mode = Mode::Normal;
                }
                let views = classify(apps, state.active_filter.as_deref());
                if let Some(col) = views.get(state.focused_column) {
                    if state.selected_card + 1 < col.apps.len() {
                        state.selected_card += 1;
                    }
                }
            }
        },
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Goto / Jump actions
// ---------------------------------------------------------------------------

fn handle_goto(apps: &[Application], state: &mut AppState, action: Action) {
    state.mode = Mode::Normal;
    match action {
        Action::JumpToColumn(idx) => {
            if idx < ColumnKey::COUNT {
                state.focused_column = idx;
                state.selected_card = 0;
                state.clamp_selection(apps);
            }
        }
        Action::JumpToFirstCard => {
            state.selected_card = 0;
        }
        Action::JumpToLastCard => {
            let views = classify(apps, state.active_filter.as_deref());
            if let Some(col) = views.get(state.focused_column) {
                state.selected_card = col.apps.len().saturating_sub(1);
            }
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Drag gesture (pick up, hover, drop, cancel)
// ---------------------------------------------------------------------------

fn handle_drag(
    apps: &mut Vec<Application>,
    state: &mut AppState,
    action: Action,
    store: &Store,
) -> color_eyre::Result<()> {
    match action {
        Action::PickUpCard => {
            let picked = state
                .selected_app(apps)
                .map(|a| (a.id.clone(), ColumnKey::from_status(a.status.as_deref())));
            if let Some((id, current)) = picked {
                // Starting a drag closes any open menu or panel.
                state.mode = Mode::Drag;
                state.drag.begin(id);
                state.drag.enter_column(current);
            } else {
                state.mode = Mode::Normal;
            }
        }
        Action::DragHoverPrev | Action::DragHoverNext => {
            let base = state
                .drag
                .hover_column()
                .map(|c| c.index())
                .unwrap_or(state.focused_column);
            let target = if matches!(action, Action::DragHoverNext) {
                (base + 1).min(ColumnKey::COUNT - 1)
            } else {
                base.saturating_sub(1)
            };
            move_hover(state, target);
        }
        Action::DragHoverColumn(idx) => {
            move_hover(state, idx);
        }
        Action::DropCard => {
            state.mode = Mode::Normal;
            match state.drag.hover_column() {
                Some(target) => {
                    let change = state.drag.drop_on(target, apps);
                    if let Some(change) = change {
                        apply_status_change(apps, state, store, &change)?;
                    }
                }
                // dropped outside any column
                None => state.drag.cancel(),
            }
        }
        Action::CancelDrag => {
            state.mode = Mode::Normal;
            state.drag.cancel();
        }
        _ => unreachable!(),
    }
    Ok(())
}

/// Move the drop target to column `target`, emitting the leave/enter
/// pair the engine expects from a pointer crossing column boundaries.
fn move_hover(state: &mut AppState, target: usize) {
    if target >= ColumnKey::COUNT {
        return;
    }
    let old = state.drag.hover_column();
    let new = ColumnKey::ALL[target];
    if old == Some(new) {
        return;
    }
    if let Some(old) = old {
        state.drag.leave_column(old);
    }
    state.drag.enter_column(new);
}

// ---------------------------------------------------------------------------
// Handler: Move-to menu
// ---------------------------------------------------------------------------

fn handle_open_picker(apps: &[Application], state: &mut AppState) {
    state.mode = Mode::Normal;
    if let Some(app) = state.selected_app(apps) {
        let current = ColumnKey::from_status(app.status.as_deref());
        let items: Vec<ColumnKey> = ColumnKey::ALL
            .into_iter()
            .filter(|c| *c != current)
            .collect();
        state.mode = Mode::Picker {
            app_id: app.id.clone(),
            items,
            selected: 0,
        };
    }
}

// ---------------------------------------------------------------------------
// Handler: Detail panel
// ---------------------------------------------------------------------------

fn handle_detail(apps: &[Application], state: &mut AppState, action: Action) {
    match action {
        Action::OpenDetail => {
            if state.selected_app(apps).is_some() {
                state.mode = Mode::Detail { scroll: 0 };
            }
        }
        Action::ClosePanel => {
            state.mode = Mode::Normal;
        }
        Action::DetailScrollDown => {
            if let Mode::Detail { scroll } = &mut state.mode {
                *scroll = scroll.saturating_add(1);
            }
        }
        Action::DetailScrollUp => {
            if let Mode::Detail { scroll } = &mut state.mode {
                *scroll = scroll.saturating_sub(1);
            }
        }
        Action::DetailNextCard => {
            let views = classify(apps, state.active_filter.as_deref());
            if let Some(col) = views.get(state.focused_column) {
                if state.selected_card + 1 < col.apps.len() {
                    state.selected_card += 1;
                    state.mode = Mode::Detail { scroll: 0 };
                }
            }
        }
        Action::DetailPrevCard => {
            if state.selected_card > 0 {
                state.selected_card -= 1;
                state.mode = Mode::Detail { scroll: 0 };
            }
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Text input (filter editing) and picker confirmation
// ---------------------------------------------------------------------------

fn handle_input(
    apps: &mut Vec<Application>,
    state: &mut AppState,
    action: Action,
    store: &Store,
) -> color_eyre::Result<()> {
    match action {
        Action::InputChar(c) => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.insert(c);
                sync_filter(state);
            }
        }
        Action::InputBackspace => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.backspace();
                sync_filter(state);
            }
        }
        Action::InputLeft => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.move_left();
            }
        }
        Action::InputRight => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.move_right();
            }
        }
        Action::InputHome => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.home();
            }
        }
        Action::InputEnd => {
            if let Mode::Filter { buf } = &mut state.mode {
                buf.end();
            }
        }
        Action::InputConfirm => {
            let old_mode = std::mem::replace(&mut state.mode, Mode::Normal);
            match old_mode {
                Mode::Filter { buf } => {
                    state.active_filter = if buf.input.trim().is_empty() {
                        None
                    } else {
                        Some(buf.input)
                    };
                    state.clamp_selection(apps);
                }
                Mode::Picker { app_id, items, selected } => {
                    if let Some(&to) = items.get(selected) {
                        let change = StatusChange { id: app_id, to };
                        apply_status_change(apps, state, store, &change)?;
                    }
                }
                _ => {}
            }
        }
        Action::InputCancel => {
            if matches!(state.mode, Mode::Filter { .. }) {
                state.active_filter = None;
                state.clamp_selection(apps);
            }
            state.mode = Mode::Normal;
        }
        _ => unreachable!(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store in a temp dir seeded with one application per status given.
    fn test_store(statuses: &[&str]) -> (tempfile::TempDir, Store, Vec<Application>) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::init(tmp.path()).unwrap();
        for (i, status) in statuses.iter().enumerate() {
            let mut app = Application::new("", format!("Company {i}"), format!("Role {i}"));
            app.status = Some(status.to_string());
            store.add(app).unwrap();
        }
        let apps = store.load().unwrap();
        (tmp, store, apps)
    }

    fn drag_to(
        apps: &mut Vec<Application>,
        state: &mut AppState,
        store: &Store,
        target: ColumnKey,
    ) {
        process_action(apps, state, Action::PickUpCard, store).unwrap();
        process_action(apps, state, Action::DragHoverColumn(target.index()), store).unwrap();
        process_action(apps, state, Action::DropCard, store).unwrap();
    }

    // -----------------------------------------------------------------------
    // Drag gesture through the app layer
    // -----------------------------------------------------------------------

    #[test]
    fn drop_moves_card_and_persists() {
        let (_tmp, store, mut apps) = test_store(&["Applied"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Applied.index();

        drag_to(&mut apps, &mut state, &store, ColumnKey::Interview);

        assert_eq!(apps[0].status.as_deref(), Some("Interview"));
        // persisted, not just local
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded[0].status.as_deref(), Some("Interview"));
        assert_eq!(state.notification.as_deref(), Some("Moved to Interview"));
        assert_eq!(state.notification_level, NotificationLevel::Info);
        assert!(matches!(state.mode, Mode::Normal));
        assert!(!state.drag.is_dragging());
        // focus follows the card
        assert_eq!(state.focused_column, ColumnKey::Interview.index());
    }

    #[test]
    fn noop_drop_emits_no_update_and_no_toast() {
        let (_tmp, store, mut apps) = test_store(&["Applied"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Applied.index();

        drag_to(&mut apps, &mut state, &store, ColumnKey::Applied);

        assert_eq!(apps[0].status.as_deref(), Some("Applied"));
        assert_eq!(state.notification, None);
        assert!(!state.drag.is_dragging());
        assert!(matches!(state.mode, Mode::Normal));
    }

    #[test]
    fn failed_update_resyncs_from_store() {
        let (_tmp, store, mut apps) = test_store(&["Applied"]);
        // A record present locally but deleted concurrently in the store.
        let mut ghost = Application::new("99", "Ghost Co", "Phantom Dev");
        ghost.status = Some("Applied".to_string());
        apps.push(ghost);

        let mut state = AppState::new();
        state.focused_column = ColumnKey::Applied.index();
        state.selected_card = 1; // the ghost

        drag_to(&mut apps, &mut state, &store, ColumnKey::Offer);

        // full resync: the ghost is gone, the optimistic copy discarded
        assert_eq!(apps.len(), 1);
        assert!(apps.iter().all(|a| a.id != "99"));
        assert_eq!(state.notification_level, NotificationLevel::Error);
        assert!(state.notification.as_deref().unwrap().starts_with("Move failed"));
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn cancel_drag_resets_without_writing() {
        let (_tmp, store, mut apps) = test_store(&["Applied"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Applied.index();

        process_action(&mut apps, &mut state, Action::PickUpCard, &store).unwrap();
        assert!(state.drag.is_dragging());
        process_action(&mut apps, &mut state, Action::DragHoverNext, &store).unwrap();
        process_action(&mut apps, &mut state, Action::CancelDrag, &store).unwrap();

        assert!(!state.drag.is_dragging());
        assert!(matches!(state.mode, Mode::Normal));
        assert_eq!(store.load().unwrap()[0].status.as_deref(), Some("Applied"));
    }

    #[test]
    fn pick_up_with_no_card_does_nothing() {
        let (_tmp, store, mut apps) = test_store(&[]);
        let mut state = AppState::new();
        process_action(&mut apps, &mut state, Action::PickUpCard, &store).unwrap();
        assert!(!state.drag.is_dragging());
        assert!(matches!(state.mode, Mode::Normal));
    }

    #[test]
    fn hover_starts_at_cards_own_column() {
        let (_tmp, store, mut apps) = test_store(&["Interview"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Interview.index();

        process_action(&mut apps, &mut state, Action::PickUpCard, &store).unwrap();
        assert_eq!(state.drag.hover_column(), Some(ColumnKey::Interview));
        process_action(&mut apps, &mut state, Action::DragHoverNext, &store).unwrap();
        assert_eq!(state.drag.hover_column(), Some(ColumnKey::Offer));
        process_action(&mut apps, &mut state, Action::DragHoverPrev, &store).unwrap();
        assert_eq!(state.drag.hover_column(), Some(ColumnKey::Interview));
    }

    #[test]
    fn hover_clamps_at_board_edges() {
        let (_tmp, store, mut apps) = test_store(&["Closed"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Closed.index();

        process_action(&mut apps, &mut state, Action::PickUpCard, &store).unwrap();
        process_action(&mut apps, &mut state, Action::DragHoverNext, &store).unwrap();
        assert_eq!(state.drag.hover_column(), Some(ColumnKey::Closed));
    }

    // -----------------------------------------------------------------------
    // Move-to menu
    // -----------------------------------------------------------------------

    #[test]
    fn picker_excludes_current_column() {
        let (_tmp, store, mut apps) = test_store(&["Offer"]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::Offer.index();

        process_action(&mut apps, &mut state, Action::OpenMovePicker, &store).unwrap();
        match &state.mode {
            Mode::Picker { items, .. } => {
                assert_eq!(items.len(), ColumnKey::COUNT - 1);
                assert!(!items.contains(&ColumnKey::Offer));
            }
            other => panic!("expected Picker mode, got {other:?}"),
        }
    }

    #[test]
    fn picker_confirm_moves_card() {
        let (_tmp, store, mut apps) = test_store(&["Open"]);
        let mut state = AppState::new();

        process_action(&mut apps, &mut state, Action::OpenMovePicker, &store).unwrap();
        // first item is Applied (Open excluded)
        process_action(&mut apps, &mut state, Action::InputConfirm, &store).unwrap();

        assert_eq!(apps[0].status.as_deref(), Some("Applied"));
        assert_eq!(state.notification.as_deref(), Some("Moved to Applied"));
    }

    #[test]
    fn pick_up_closes_open_picker() {
        let (_tmp, store, mut apps) = test_store(&["Open"]);
        let mut state = AppState::new();
        process_action(&mut apps, &mut state, Action::OpenMovePicker, &store).unwrap();
        assert!(matches!(state.mode, Mode::Picker { .. }));
        process_action(&mut apps, &mut state, Action::PickUpCard, &store).unwrap();
        assert!(matches!(state.mode, Mode::Drag));
        assert!(state.drag.is_dragging());
    }

    // -----------------------------------------------------------------------
    // Navigation and filter
    // -----------------------------------------------------------------------

    #[test]
    fn focus_stops_at_last_column() {
        let (_tmp, store, mut apps) = test_store(&[]);
        let mut state = AppState::new();
        state.focused_column = ColumnKey::COUNT - 1;
        process_action(&mut apps, &mut state, Action::FocusNextColumn, &store).unwrap();
        assert_eq!(state.focused_column, ColumnKey::COUNT - 1);
    }

    #[test]
    fn filter_typing_syncs_live() {
        let (_tmp, store, mut apps) = test_store(&["Open"]);
        let mut state = AppState::new();
        process_action(&mut apps, &mut state, Action::StartFilter, &store).unwrap();
        process_action(&mut apps, &mut state, Action::InputChar('x'), &store).unwrap();
        assert_eq!(state.active_filter.as_deref(), Some("x"));
        process_action(&mut apps, &mut state, Action::InputBackspace, &store).unwrap();
        assert_eq!(state.active_filter, None);
    }

    #[test]
    fn filter_cancel_clears_filter() {
        let (_tmp, store, mut apps) = test_store(&["Open"]);
        let mut state = AppState::new();
        process_action(&mut apps, &mut state, Action::StartFilter, &store).unwrap();
        process_action(&mut apps, &mut state, Action::InputChar('z'), &store).unwrap();
        process_action(&mut apps, &mut state, Action::InputCancel, &store).unwrap();
        assert_eq!(state.active_filter, None);
        assert!(matches!(state.mode, Mode::Normal));
    }

    #[test]
    fn selection_clamps_after_reload() {
        let (_tmp, store, mut apps) = test_store(&["Open", "Open", "Open"]);
        let mut state = AppState::new();
        state.selected_card = 2;
        store.remove("2").unwrap();
        store.remove("3").unwrap();
        process_action(&mut apps, &mut state, Action::ReloadApplications, &store).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(state.selected_card, 0);
    }

    #[test]
    fn minor_mode_falls_back_to_normal_on_unmapped_key() {
        let (_tmp, store, mut apps) = test_store(&[]);
        let mut state = AppState::new();
        state.mode = Mode::Space;
        process_action(&mut apps, &mut state, Action::None, &store).unwrap();
        assert!(matches!(state.mode, Mode::Normal));
    }
}
