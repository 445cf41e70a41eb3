//! Host events

use insular_core::{Point, Size};

/// Events delivered to listeners
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event (pointer)
    Input(InputEvent),
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport was resized (CSS pixels)
    Resized(Size),
    /// Document scrolled to a new vertical offset
    Scrolled {
        /// New scroll offset in CSS pixels
        scroll_y: f32,
    },
}

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
}

/// Pointer events, positions in viewport (client) coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Moved { position: Point },
    /// Pointer left the viewport
    Left,
}

/// Listener channel an event is delivered on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
    Scroll,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Window(WindowEvent::Resized(_)) => EventKind::Resize,
            Event::Window(WindowEvent::Scrolled { .. }) => EventKind::Scroll,
            Event::Input(InputEvent::Pointer(PointerEvent::Moved { .. })) => EventKind::PointerMove,
            Event::Input(InputEvent::Pointer(PointerEvent::Left)) => EventKind::PointerLeave,
        }
    }

    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Event::Input(InputEvent::Pointer(PointerEvent::Moved {
            position: Point::new(x, y),
        }))
    }

    pub fn scrolled(scroll_y: f32) -> Self {
        Event::Window(WindowEvent::Scrolled { scroll_y })
    }

    pub fn resized(width: f32, height: f32) -> Self {
        Event::Window(WindowEvent::Resized(Size::new(width, height)))
    }

    /// Pointer position carried by the event, if any
    pub fn pointer_position(&self) -> Option<Point> {
        match self {
            Event::Input(InputEvent::Pointer(PointerEvent::Moved { position })) => Some(*position),
            _ => None,
        }
    }
}
