use evidence_review_core::FlagField;
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;

/// Map a crossterm terminal event to a TUI action.
pub fn map_event(event: &Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C quits without confirmation
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::ForceQuit;
            }
            map_key(key)
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::DragStart(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragMove(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::DragEnd,
        MouseEventKind::ScrollUp => Action::ZoomIn,
        MouseEventKind::ScrollDown => Action::ZoomOut,
        _ => Action::None,
    }
}

fn map_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('a') | KeyCode::Left => Action::PrevRecord,
        KeyCode::Char('d') | KeyCode::Right => Action::NextRecord,
        KeyCode::Char('1') => Action::ToggleFlag(FlagField::Name),
        KeyCode::Char('2') => Action::ToggleFlag(FlagField::Period),
        KeyCode::Char('3') => Action::ToggleFlag(FlagField::Task),
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::ZoomIn,
        KeyCode::Char('-') => Action::ZoomOut,
        KeyCode::Char('0') => Action::ResetZoom,
        KeyCode::Tab => Action::ToggleSidebar,
        KeyCode::Char('k') | KeyCode::Up => Action::ListUp,
        KeyCode::Char('j') | KeyCode::Down => Action::ListDown,
        KeyCode::Enter => Action::ListSelect,
        KeyCode::Char('y') => Action::CopyImageUrl,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}
