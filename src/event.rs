/// Kind of a touch/pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// Finger (or primary button) went down
    Down,
    /// Pointer moved while down
    Move,
    /// Gesture was taken away by the host (e.g. a parent started scrolling)
    Cancel,
    /// Finger lifted
    Up,
}

/// A touch event in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub raw_x: f32,
    pub raw_y: f32,
}

impl TouchEvent {
    pub fn new(action: TouchAction, raw_x: f32, raw_y: f32) -> Self {
        Self {
            action,
            raw_x,
            raw_y,
        }
    }

    pub fn down(raw_x: f32, raw_y: f32) -> Self {
        Self::new(TouchAction::Down, raw_x, raw_y)
    }

    pub fn moved(raw_x: f32, raw_y: f32) -> Self {
        Self::new(TouchAction::Move, raw_x, raw_y)
    }

    pub fn cancel(raw_x: f32, raw_y: f32) -> Self {
        Self::new(TouchAction::Cancel, raw_x, raw_y)
    }

    pub fn up(raw_x: f32, raw_y: f32) -> Self {
        Self::new(TouchAction::Up, raw_x, raw_y)
    }

    pub fn coords(&self) -> (f32, f32) {
        (self.raw_x, self.raw_y)
    }

    /// Coordinates relative to the given screen origin.
    pub fn local_coords(&self, origin: (f32, f32)) -> (f32, f32) {
        (self.raw_x - origin.0, self.raw_y - origin.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}
