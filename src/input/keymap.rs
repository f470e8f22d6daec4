use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action::Action;
use crate::app::Mode;
use crate::engine::ColumnKey;

/// Map a key event to a semantic action based on current mode.
pub fn map_key(key: KeyEvent, mode: &Mode) -> Action {
    match mode {
        Mode::Normal => map_normal(key),
        Mode::Goto => map_goto(key),
        Mode::Space => map_space(key),
        Mode::Drag => map_drag(key),
        Mode::Filter { .. } => map_input(key),
        Mode::Picker { .. } => map_picker(key),
        Mode::Detail { .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::ClosePanel,
            KeyCode::Char('j') | KeyCode::Down => Action::DetailNextCard,
            KeyCode::Char('k') | KeyCode::Up => Action::DetailPrevCard,
            KeyCode::Char('J') => Action::DetailScrollDown,
            KeyCode::Char('K') => Action::DetailScrollUp,
            _ => Action::None,
        },
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ClosePanel,
            _ => Action::None,
        },
    }
}

fn map_normal(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::FocusPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusNextColumn,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Char('d') => Action::PickUpCard,
        KeyCode::Char('m') => Action::OpenMovePicker,
        KeyCode::Enter => Action::OpenDetail,
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Char('g') => Action::EnterGotoMode,
        KeyCode::Char(' ') => Action::EnterSpaceMode,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Esc => Action::ClearFilter,
        _ => Action::None,
    }
}

fn map_goto(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => Action::JumpToColumn(c as usize - '1' as usize),
        KeyCode::Char('g') => Action::JumpToFirstCard,
        KeyCode::Char('e') => Action::JumpToLastCard,
        _ => Action::None,
    }
}

fn map_space(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('m') => Action::OpenMovePicker,
        KeyCode::Char('d') => Action::PickUpCard,
        KeyCode::Char('r') => Action::ReloadApplications,
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Char('?') => Action::ShowHelp,
        _ => Action::None,
    }
}

/// Keys while a card is picked up. `h`/`l` move the drop target across
/// columns, a digit jumps straight to one, Enter (or `d` again) drops.
fn map_drag(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::DragHoverPrev,
        KeyCode::Char('l') | KeyCode::Right => Action::DragHoverNext,
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if idx < ColumnKey::COUNT {
                Action::DragHoverColumn(idx)
            } else {
                Action::None
            }
        }
        KeyCode::Enter | KeyCode::Char('d') => Action::DropCard,
        KeyCode::Esc | KeyCode::Char('q') => Action::CancelDrag,
        _ => Action::None,
    }
}

fn map_picker(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Esc | KeyCode::Char('q') => Action::InputCancel,
        _ => Action::None,
    }
}

fn map_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputHome,
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputEnd,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Left => Action::InputLeft,
        KeyCode::Right => Action::InputRight,
        KeyCode::Home => Action::InputHome,
        KeyCode::End => Action::InputEnd,
        _ => Action::None,
    }
}
