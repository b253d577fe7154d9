//! Turns raw terminal events into widget commands.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEventKind,
};
use timetree::PointerEvent;

use crate::raster::cell_center;

/// What the host loop should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pointer(PointerEvent),
    Quit,
    ToggleBrushable,
    ToggleResizeOnCollapse,
    ToggleLinks,
    Resize { width: u16, height: u16 },
}

/// Tracks the pressed cell so a release on the same cell also clicks.
#[derive(Debug, Default)]
pub struct InputMapper {
    pressed_at: Option<(u16, u16)>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, raw_events: &[CrosstermEvent]) -> Vec<Command> {
        let mut commands = Vec::new();

        for raw in raw_events {
            match raw {
                CrosstermEvent::Key(key) => {
                    if let Some(command) = key_command(key) {
                        commands.push(command);
                    }
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let col = mouse_event.column;
                    let row = mouse_event.row;
                    let (x, y) = cell_center(col, row);

                    match mouse_event.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            self.pressed_at = Some((col, row));
                            commands.push(Command::Pointer(PointerEvent::Down { x, y }));
                        }

                        MouseEventKind::Up(MouseButton::Left) => {
                            commands.push(Command::Pointer(PointerEvent::Up { x, y }));
                            if self.pressed_at.take() == Some((col, row)) {
                                commands.push(Command::Pointer(PointerEvent::Click { x, y }));
                            }
                        }

                        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                            commands.push(Command::Pointer(PointerEvent::Move { x, y }));
                        }

                        _ => {}
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    commands.push(Command::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        commands
    }
}

fn key_command(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('b') => Some(Command::ToggleBrushable),
        KeyCode::Char('r') => Some(Command::ToggleResizeOnCollapse),
        KeyCode::Char('l') => Some(Command::ToggleLinks),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_and_release_on_same_cell_clicks() {
        let mut mapper = InputMapper::new();
        let commands = mapper.process(&[
            mouse(MouseEventKind::Down(MouseButton::Left), 2, 1),
            mouse(MouseEventKind::Up(MouseButton::Left), 2, 1),
        ]);
        assert_eq!(
            commands,
            vec![
                Command::Pointer(PointerEvent::Down { x: 20.0, y: 24.0 }),
                Command::Pointer(PointerEvent::Up { x: 20.0, y: 24.0 }),
                Command::Pointer(PointerEvent::Click { x: 20.0, y: 24.0 }),
            ]
        );
    }

    #[test]
    fn test_drag_does_not_click() {
        let mut mapper = InputMapper::new();
        let commands = mapper.process(&[
            mouse(MouseEventKind::Down(MouseButton::Left), 2, 1),
            mouse(MouseEventKind::Drag(MouseButton::Left), 5, 1),
            mouse(MouseEventKind::Up(MouseButton::Left), 5, 1),
        ]);
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[1],
            Command::Pointer(PointerEvent::Move { .. })
        ));
        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::Pointer(PointerEvent::Click { .. }))));
    }

    #[test]
    fn test_keys() {
        let mut mapper = InputMapper::new();
        let commands = mapper.process(&[
            key(KeyCode::Char('b')),
            key(KeyCode::Char('x')),
            key(KeyCode::Esc),
        ]);
        assert_eq!(commands, vec![Command::ToggleBrushable, Command::Quit]);
    }
}
