//! Modal dismissal listeners.
//!
//! Opening a modal acquires a [`DismissGuard`]; the guard lives inside the
//! overlay value, so closing, replacing or dropping the overlay releases
//! it. The reducer only honors Esc and backdrop clicks while a listener is
//! registered.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Registry of active dismissal listeners.
#[derive(Debug, Clone, Default)]
pub struct DismissListeners {
    active: Rc<Cell<usize>>,
}

impl DismissListeners {
    pub fn acquire(&self) -> DismissGuard {
        self.active.set(self.active.get() + 1);
        DismissGuard {
            active: Rc::clone(&self.active),
        }
    }

    /// Number of listeners currently registered.
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

/// Registration of one modal's listeners. Released on drop.
#[derive(Debug)]
pub struct DismissGuard {
    active: Rc<Cell<usize>>,
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

/// What asked the modal to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    Escape,
    /// Left click outside the modal rectangle.
    BackdropClick,
}

/// Classifies a terminal event as a dismissal of the modal at `modal_area`.
pub fn dismiss_trigger(event: &Event, modal_area: Rect) -> Option<DismissTrigger> {
    match event {
        Event::Key(key) if key.code == KeyCode::Esc && key.kind != KeyEventKind::Release => {
            Some(DismissTrigger::Escape)
        }
        Event::Mouse(mouse)
            if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && !modal_area.contains(Position::new(mouse.column, mouse.row)) =>
        {
            Some(DismissTrigger::BackdropClick)
        }
        _ => None,
    }
}
