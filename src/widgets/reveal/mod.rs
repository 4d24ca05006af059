//! Reveal layout: a container that plays a circular press-feedback animation
//! beneath whichever clickable child is touched.
//!
//! The widget wraps a host [`Container`] and intercepts touch dispatch:
//!
//! - **Down** resolves the touch target, captures its geometry into a fresh
//!   [`Gesture`] and starts the animation.
//! - Every **draw** grows the circle, clipped to the target, and schedules the
//!   next frame until the circle spans the target.
//! - **Up** is consumed. The click is delivered later by a [`DeferredClick`]
//!   so the animation can play first.
//!
//! # Example
//! ```ignore
//! let layout = reveal_layout(panel)
//!     .color(Color::from_argb(0x33000000))
//!     .on_click(|| println!("container clicked"));
//! ```

mod gesture;
mod resolver;

pub use gesture::{DeferredClick, Gesture, GesturePhase, RevealFlags};
pub use resolver::{is_touch_point_in, resolve_touch_target};

use std::rc::Rc;

use crate::canvas::Canvas;
use crate::config::RevealConfig;
use crate::event::{EventResponse, TouchAction, TouchEvent};
use crate::geometry::{Color, Rect};
use crate::scheduler::Scheduler;

use super::widget::{Container, Touchable, Widget};

/// Callback for clicks on the container itself
pub type ClickCallback = Rc<dyn Fn()>;

pub struct RevealLayout<C: Container> {
    container: C,
    config: RevealConfig,

    // Gesture state, replaced on every accepted press
    gesture: Option<Rc<Gesture>>,
    radius: f32,
    flags: RevealFlags,

    // Screen origin of the container as of the last layout or draw
    origin: (f32, f32),

    on_click: Option<ClickCallback>,
}

/// Wrap `container` in a reveal layout with the default configuration.
pub fn reveal_layout<C: Container>(container: C) -> RevealLayout<C> {
    RevealLayout::new(container)
}

impl<C: Container> RevealLayout<C> {
    pub fn new(container: C) -> Self {
        let origin = container.screen_origin();
        Self {
            container,
            config: RevealConfig::default(),
            gesture: None,
            radius: 0.0,
            flags: RevealFlags::empty(),
            origin,
            on_click: None,
        }
    }

    pub fn config(mut self, config: RevealConfig) -> Self {
        self.config = config;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.color = color;
        self
    }

    /// Callback for clicks on the container itself. It runs after the click
    /// delay, see [`RevealLayout::perform_click`].
    pub fn on_click<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_deref()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn phase(&self) -> GesturePhase {
        self.flags.into()
    }

    pub fn is_animating(&self) -> bool {
        self.flags.contains(RevealFlags::ANIMATING)
    }

    pub fn is_pressed(&self) -> bool {
        self.flags.contains(RevealFlags::PRESSED)
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Click the container itself.
    ///
    /// The container's own callback is posted after the click delay so any
    /// running reveal finishes first. Always reports the click as handled.
    pub fn perform_click(&self, scheduler: &mut dyn Scheduler) -> bool {
        if let Some(callback) = self.on_click.clone() {
            scheduler.post_delayed(self.config.click_delay, Box::new(move || callback()));
        }
        true
    }

    fn press(&mut self, event: &TouchEvent, scheduler: &mut dyn Scheduler) {
        let Some(target) = self.hit_test(event.raw_x, event.raw_y) else {
            return;
        };
        if !target.is_clickable() || !target.is_enabled() {
            return;
        }

        let gesture = Gesture::capture(&target, event, self.origin, &self.config);
        log::debug!(
            "reveal started at {:?}, target {:?}, max radius {}",
            gesture.center(),
            target.screen_bounds(),
            gesture.max_radius()
        );

        self.gesture = Some(Rc::new(gesture));
        self.radius = 0.0;
        self.flags = RevealFlags::ANIMATING | RevealFlags::PRESSED;
        scheduler.invalidate_delayed(self.config.frame_interval, None);
    }

    fn release(&mut self, event: &TouchEvent, scheduler: &mut dyn Scheduler) {
        let was_pressed = self.flags.contains(RevealFlags::PRESSED);
        self.flags.remove(RevealFlags::PRESSED);
        scheduler.invalidate_delayed(self.config.frame_interval, None);

        let gesture = match (&self.gesture, was_pressed) {
            (Some(gesture), true) => gesture.clone(),
            _ => return,
        };
        let click = DeferredClick::new(gesture, *event);
        scheduler.post_delayed(
            self.config.click_delay,
            Box::new(move || {
                click.run();
            }),
        );
    }

    fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        self.flags.remove(RevealFlags::PRESSED);
        scheduler.invalidate_delayed(self.config.frame_interval, None);
    }

    fn draw_reveal(&mut self, canvas: &mut dyn Canvas, scheduler: &mut dyn Scheduler) {
        if !self.flags.contains(RevealFlags::ANIMATING) {
            return;
        }
        let Some(gesture) = self.gesture.clone() else {
            return;
        };
        if gesture.target_size().0 <= 0.0 {
            // Nothing to draw; settle once the finger is up
            if !self.flags.contains(RevealFlags::PRESSED) {
                self.flags.remove(RevealFlags::ANIMATING);
            }
            return;
        }
        let Some(target) = gesture.target() else {
            // Target went away mid-gesture: stop and wipe the last frame
            self.flags.remove(RevealFlags::ANIMATING);
            scheduler.invalidate_delayed(self.config.frame_interval, None);
            return;
        };

        if self.radius <= gesture.max_radius() {
            self.radius = gesture.next_radius(self.radius, &self.config);
        }

        let clip = Gesture::clip_rect(target.as_ref(), self.origin);
        canvas.save();
        canvas.clip_rect(clip);
        canvas.draw_circle(gesture.center(), self.radius, self.config.color);
        canvas.restore();
        log::trace!("reveal frame: radius {}", self.radius);

        if self.radius <= gesture.max_radius() {
            scheduler.invalidate_delayed(self.config.frame_interval, Some(clip));
        } else if !self.flags.contains(RevealFlags::PRESSED) {
            self.flags.remove(RevealFlags::ANIMATING);
            scheduler.invalidate_delayed(self.config.frame_interval, Some(clip));
        }
    }
}

impl<C: Container> Widget for RevealLayout<C> {
    fn hit_test(&self, x: f32, y: f32) -> Option<Rc<dyn Touchable>> {
        resolve_touch_target(&self.container.touchables(), x, y)
    }

    fn on_event(&mut self, event: &TouchEvent, scheduler: &mut dyn Scheduler) -> EventResponse {
        match event.action {
            TouchAction::Down => self.press(event, scheduler),
            TouchAction::Cancel => self.cancel(scheduler),
            TouchAction::Up => {
                self.release(event, scheduler);
                return EventResponse::Handled;
            }
            TouchAction::Move => {}
        }
        self.container.dispatch_default(event)
    }

    fn on_layout(&mut self, bounds: Rect) {
        self.origin = bounds.origin();
    }

    fn on_draw(&mut self, canvas: &mut dyn Canvas, scheduler: &mut dyn Scheduler) {
        self.container.draw_children(canvas);
        self.origin = self.container.screen_origin();
        self.draw_reveal(canvas, scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::scheduler::TimerQueue;
    use std::cell::Cell;
    use std::time::Duration;

    struct Child {
        bounds: Rect,
        enabled: Cell<bool>,
        clicks: Cell<u32>,
    }

    impl Touchable for Child {
        fn screen_bounds(&self) -> Rect {
            self.bounds
        }
        fn is_clickable(&self) -> bool {
            true
        }
        fn is_enabled(&self) -> bool {
            self.enabled.get()
        }
        fn perform_click(&self) {
            self.clicks.set(self.clicks.get() + 1);
        }
    }

    struct Host {
        origin: (f32, f32),
        children: Vec<Rc<Child>>,
        dispatched: Rc<Cell<u32>>,
    }

    impl Container for Host {
        fn touchables(&self) -> Vec<Rc<dyn Touchable>> {
            self.children
                .iter()
                .map(|child| child.clone() as Rc<dyn Touchable>)
                .collect()
        }
        fn screen_origin(&self) -> (f32, f32) {
            self.origin
        }
        fn dispatch_default(&mut self, _event: &TouchEvent) -> EventResponse {
            self.dispatched.set(self.dispatched.get() + 1);
            EventResponse::Ignored
        }
        fn draw_children(&self, _canvas: &mut dyn Canvas) {}
    }

    fn setup() -> (RevealLayout<Host>, Rc<Child>, Rc<Cell<u32>>) {
        let child = Rc::new(Child {
            bounds: Rect::new(110.0, 60.0, 100.0, 40.0),
            enabled: Cell::new(true),
            clicks: Cell::new(0),
        });
        let dispatched = Rc::new(Cell::new(0));
        let host = Host {
            origin: (100.0, 50.0),
            children: vec![child.clone()],
            dispatched: dispatched.clone(),
        };
        (reveal_layout(host), child, dispatched)
    }

    #[test]
    fn test_press_starts_gesture() {
        let (mut layout, _child, dispatched) = setup();
        let mut queue = TimerQueue::new();

        let response = layout.on_event(&TouchEvent::down(140.0, 70.0), &mut queue);
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(dispatched.get(), 1);
        assert_eq!(layout.phase(), GesturePhase::Pressed);
        assert!(layout.is_animating());
        assert_eq!(layout.radius(), 0.0);

        let gesture = layout.gesture().expect("gesture captured");
        assert_eq!(gesture.center(), (40.0, 20.0));
        assert_eq!(gesture.max_radius(), 70.0);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.next_due(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_press_outside_children_stays_idle() {
        let (mut layout, _child, dispatched) = setup();
        let mut queue = TimerQueue::new();

        layout.on_event(&TouchEvent::down(105.0, 55.0), &mut queue);
        assert_eq!(layout.phase(), GesturePhase::Idle);
        assert!(layout.gesture().is_none());
        assert_eq!(queue.pending(), 0);
        assert_eq!(dispatched.get(), 1);
    }

    #[test]
    fn test_press_on_disabled_child_stays_idle() {
        let (mut layout, child, _) = setup();
        child.enabled.set(false);
        let mut queue = TimerQueue::new();

        layout.on_event(&TouchEvent::down(140.0, 70.0), &mut queue);
        assert_eq!(layout.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_release_is_consumed() {
        let (mut layout, child, dispatched) = setup();
        let mut queue = TimerQueue::new();

        layout.on_event(&TouchEvent::down(140.0, 70.0), &mut queue);
        let response = layout.on_event(&TouchEvent::up(140.0, 70.0), &mut queue);
        assert_eq!(response, EventResponse::Handled);
        assert_eq!(dispatched.get(), 1);
        assert_eq!(queue.pending_tasks(), 1);

        queue.advance(Duration::from_millis(399));
        assert_eq!(child.clicks.get(), 0);
        queue.advance(Duration::from_millis(1));
        assert_eq!(child.clicks.get(), 1);
    }

    #[test]
    fn test_draw_clips_to_target() {
        let (mut layout, _child, _) = setup();
        let mut queue = TimerQueue::new();
        let mut canvas = RecordingCanvas::new();

        layout.on_event(&TouchEvent::down(140.0, 70.0), &mut queue);
        layout.on_draw(&mut canvas, &mut queue);

        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::ClipRect(Rect::new(10.0, 10.0, 100.0, 40.0)),
                DrawCommand::Circle {
                    center: (40.0, 20.0),
                    radius: 5.0,
                    color: RevealConfig::default().color,
                },
                DrawCommand::Restore,
            ]
        );
    }

    #[test]
    fn test_draw_without_gesture_is_noop() {
        let (mut layout, _child, _) = setup();
        let mut queue = TimerQueue::new();
        let mut canvas = RecordingCanvas::new();

        layout.on_draw(&mut canvas, &mut queue);
        assert!(canvas.commands().is_empty());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_perform_click_is_deferred() {
        let clicked = Rc::new(Cell::new(false));
        let flag = clicked.clone();
        let (layout, _child, _) = setup();
        let layout = layout.on_click(move || flag.set(true));
        let mut queue = TimerQueue::new();

        assert!(layout.perform_click(&mut queue));
        assert!(!clicked.get());
        queue.advance(Duration::from_millis(400));
        assert!(clicked.get());
    }

    #[test]
    fn test_layout_updates_origin() {
        let (mut layout, _child, _) = setup();
        layout.on_layout(Rect::new(5.0, 6.0, 300.0, 200.0));
        assert_eq!(layout.origin(), (5.0, 6.0));
    }
}
