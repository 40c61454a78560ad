use glam::Vec2;

/// Pointer and viewport events, in screen pixels (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Screen position of a pointer event.
    pub fn pointer(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            InputEvent::Resize { .. } => None,
        }
    }
}

/// A queue of input events.
/// Host handlers push between frames; the runner drains before sub-stepping.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
