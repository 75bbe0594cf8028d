//! Key bindings and mouse-to-gesture translation.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::selector::{GestureEvent, ScreenPos};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Confirm,
    Pause,
    NewGame,
    Back,
    Quit,
    None,
}

/// Map key event to an action. Supports arrows and vim-style j/k.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if !modifiers.is_empty() && modifiers != KeyModifiers::SHIFT {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('r') | KeyCode::Char('n') => Action::NewGame,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        _ => Action::None,
    }
}

/// Map a left-button mouse event to a gesture step: press begins a chain,
/// drag extends it, release commits it. Other buttons and plain motion are
/// not gestures.
pub fn mouse_to_gesture(mouse: MouseEvent) -> Option<GestureEvent> {
    let pos = ScreenPos {
        x: mouse.column,
        y: mouse.row,
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GestureEvent::Begin(pos)),
        MouseEventKind::Drag(MouseButton::Left) => Some(GestureEvent::Extend(pos)),
        MouseEventKind::Up(MouseButton::Left) => Some(GestureEvent::Commit(pos)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_to_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Back);
        assert_eq!(key_to_action(key(KeyCode::Char('p'))), Action::Pause);
        assert_eq!(key_to_action(key(KeyCode::Char('r'))), Action::NewGame);
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Confirm);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn left_button_lifecycle_maps_to_gesture_steps() {
        let begin = mouse_to_gesture(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert_eq!(begin, Some(GestureEvent::Begin(ScreenPos { x: 4, y: 2 })));
        let extend = mouse_to_gesture(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2));
        assert_eq!(extend, Some(GestureEvent::Extend(ScreenPos { x: 5, y: 2 })));
        let commit = mouse_to_gesture(mouse(MouseEventKind::Up(MouseButton::Left), 5, 2));
        assert_eq!(commit, Some(GestureEvent::Commit(ScreenPos { x: 5, y: 2 })));
    }

    #[test]
    fn non_gesture_mouse_events_are_ignored() {
        assert_eq!(mouse_to_gesture(mouse(MouseEventKind::Moved, 1, 1)), None);
        assert_eq!(
            mouse_to_gesture(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            None
        );
        assert_eq!(
            mouse_to_gesture(mouse(MouseEventKind::ScrollDown, 1, 1)),
            None
        );
    }
}
