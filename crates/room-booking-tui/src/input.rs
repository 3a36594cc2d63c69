// keybinds -> form actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextField,
    PrevField,
    /// Step the focused selector (or the date) by `n` positions.
    Step(i32),
    Char(char),
    Backspace,
    Submit,
    Confirm,
    Cancel,
}

pub fn map_key(key: KeyEvent, confirming: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if confirming {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Cancel),
            _ => None,
        };
    }
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(Action::Quit),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Some(Action::NextField),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Some(Action::PrevField),
        (KeyCode::Right, _) => Some(Action::Step(1)),
        (KeyCode::Left, _) => Some(Action::Step(-1)),
        (KeyCode::PageDown, _) => Some(Action::Step(7)),
        (KeyCode::PageUp, _) => Some(Action::Step(-7)),
        (KeyCode::Backspace, _) | (KeyCode::Delete, _) => Some(Action::Backspace),
        (KeyCode::Enter, _) => Some(Action::Submit),
        (KeyCode::Char(ch), KeyModifiers::NONE) | (KeyCode::Char(ch), KeyModifiers::SHIFT) => {
            Some(Action::Char(ch))
        }
        _ => None,
    }
}
