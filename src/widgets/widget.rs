use std::rc::Rc;

use crate::canvas::Canvas;
use crate::event::{EventResponse, TouchEvent};
use crate::geometry::Rect;
use crate::scheduler::Scheduler;

/// A descendant element that can receive touch feedback and clicks.
///
/// Hosts hand these out as `Rc<dyn Touchable>`; widgets only ever keep weak
/// references to them.
pub trait Touchable {
    /// Current on-screen bounds (absolute coordinates)
    fn screen_bounds(&self) -> Rect;
    fn is_clickable(&self) -> bool;
    fn is_enabled(&self) -> bool;
    /// Fire the element's click action.
    fn perform_click(&self);
}

/// The host container primitive a widget composes.
///
/// It owns the children, knows where it sits on screen and provides the
/// default dispatch and drawing behavior that the widget decorates.
pub trait Container {
    /// Clickable descendants in registration order.
    fn touchables(&self) -> Vec<Rc<dyn Touchable>>;

    /// Top-left corner of the container in screen coordinates.
    fn screen_origin(&self) -> (f32, f32);

    /// Default event dispatch to the children.
    fn dispatch_default(&mut self, event: &TouchEvent) -> EventResponse {
        let _ = event;
        EventResponse::Ignored
    }

    /// Draw the children into `canvas` (container-local coordinates).
    fn draw_children(&self, canvas: &mut dyn Canvas);
}

/// Capability interface a host binding layer drives.
pub trait Widget {
    /// Find the touchable element under a screen point.
    fn hit_test(&self, x: f32, y: f32) -> Option<Rc<dyn Touchable>>;

    fn on_event(&mut self, event: &TouchEvent, scheduler: &mut dyn Scheduler) -> EventResponse;

    /// Called after every layout pass with the widget's new screen bounds.
    fn on_layout(&mut self, bounds: Rect);

    fn on_draw(&mut self, canvas: &mut dyn Canvas, scheduler: &mut dyn Scheduler);
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn hit_test(&self, x: f32, y: f32) -> Option<Rc<dyn Touchable>> {
        (**self).hit_test(x, y)
    }
    fn on_event(&mut self, event: &TouchEvent, scheduler: &mut dyn Scheduler) -> EventResponse {
        (**self).on_event(event, scheduler)
    }
    fn on_layout(&mut self, bounds: Rect) {
        (**self).on_layout(bounds)
    }
    fn on_draw(&mut self, canvas: &mut dyn Canvas, scheduler: &mut dyn Scheduler) {
        (**self).on_draw(canvas, scheduler)
    }
}
