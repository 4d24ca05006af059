//! Drawing surface abstraction.
//!
//! The widget only needs a handful of immediate-mode operations: a clip stack,
//! filled rectangles for the children and a filled circle for the overlay.
//! Hosts implement [`Canvas`] on top of whatever renderer they own.

use crate::geometry::{Color, Rect};

/// Immediate-mode drawing surface in the container's local coordinates.
pub trait Canvas {
    /// Push the current clip onto the save stack.
    fn save(&mut self);
    /// Pop the clip saved by the matching [`Canvas::save`].
    fn restore(&mut self);
    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_circle(&mut self, center: (f32, f32), radius: f32, color: Color);
}

/// A single recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClipRect(Rect),
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// Filled circle (used for the reveal overlay)
    Circle {
        /// Center point in local coordinates
        center: (f32, f32),
        /// Radius in logical pixels
        radius: f32,
        /// Fill color
        color: Color,
    },
}

/// Canvas that records commands instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
