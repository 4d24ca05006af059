//! Headless host: a minimal container primitive and a driver that runs a
//! widget on a virtual clock and renders it in software.
//!
//! Used by the demo, the integration tests and the visual tests. Real hosts
//! implement [`Container`], [`Touchable`] and [`Scheduler`] against their own
//! toolkit instead.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::canvas::Canvas;
use crate::event::{EventResponse, TouchEvent};
use crate::geometry::{Color, Rect};
use crate::raster::RasterCanvas;
use crate::scheduler::TimerQueue;
use crate::widgets::{ClickCallback, Container, Touchable, Widget};

/// A rectangular child that can be pressed.
pub struct Pressable {
    label: String,
    bounds: Cell<Rect>,
    background: Cell<Color>,
    clickable: Cell<bool>,
    enabled: Cell<bool>,
    clicks: Cell<u32>,
    on_click: RefCell<Option<ClickCallback>>,
}

impl Pressable {
    /// A clickable, enabled child at `bounds` (screen coordinates).
    pub fn new(label: impl Into<String>, bounds: Rect) -> Self {
        Self {
            label: label.into(),
            bounds: Cell::new(bounds),
            background: Cell::new(Color::rgb(0.85, 0.85, 0.9)),
            clickable: Cell::new(true),
            enabled: Cell::new(true),
            clicks: Cell::new(0),
            on_click: RefCell::new(None),
        }
    }

    pub fn background(self, color: Color) -> Self {
        self.background.set(color);
        self
    }

    pub fn clickable(self, clickable: bool) -> Self {
        self.clickable.set(clickable);
        self
    }

    pub fn on_click<F: Fn() + 'static>(self, callback: F) -> Self {
        *self.on_click.borrow_mut() = Some(Rc::new(callback));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn set_clickable(&self, clickable: bool) {
        self.clickable.set(clickable);
    }

    /// Number of clicks delivered so far.
    pub fn clicks(&self) -> u32 {
        self.clicks.get()
    }

    pub fn background_color(&self) -> Color {
        self.background.get()
    }
}

impl Touchable for Pressable {
    fn screen_bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn is_clickable(&self) -> bool {
        self.clickable.get()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn perform_click(&self) {
        self.clicks.set(self.clicks.get() + 1);
        log::debug!("{} clicked", self.label);
        let callback = self.on_click.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl fmt::Debug for Pressable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pressable")
            .field("label", &self.label)
            .field("bounds", &self.bounds.get())
            .field("clickable", &self.clickable.get())
            .field("enabled", &self.enabled.get())
            .field("clicks", &self.clicks.get())
            .finish()
    }
}

/// Container primitive holding pressable children.
#[derive(Debug)]
pub struct Panel {
    bounds: Rect,
    background: Color,
    children: Vec<Rc<Pressable>>,
    default_dispatches: u32,
}

impl Panel {
    /// An empty panel covering `bounds` (screen coordinates).
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            background: Color::WHITE,
            children: Vec::new(),
            default_dispatches: 0,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn child(mut self, child: Pressable) -> Self {
        self.add(child);
        self
    }

    /// Add a child and get a handle to it.
    pub fn add(&mut self, child: Pressable) -> Rc<Pressable> {
        let child = Rc::new(child);
        self.children.push(child.clone());
        child
    }

    /// Remove every child with the given label.
    pub fn remove(&mut self, label: &str) {
        self.children.retain(|child| child.label() != label);
    }

    /// Move the panel, carrying its children along.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let (dx, dy) = (x - self.bounds.x, y - self.bounds.y);
        self.bounds = self.bounds.offset(dx, dy);
        for child in &self.children {
            child.set_bounds(child.screen_bounds().offset(dx, dy));
        }
    }

    /// How many events fell through to default dispatch.
    pub fn default_dispatches(&self) -> u32 {
        self.default_dispatches
    }
}

impl Container for Panel {
    fn touchables(&self) -> Vec<Rc<dyn Touchable>> {
        self.children
            .iter()
            .map(|child| child.clone() as Rc<dyn Touchable>)
            .collect()
    }

    fn screen_origin(&self) -> (f32, f32) {
        self.bounds.origin()
    }

    fn dispatch_default(&mut self, _event: &TouchEvent) -> EventResponse {
        self.default_dispatches += 1;
        EventResponse::Ignored
    }

    fn draw_children(&self, canvas: &mut dyn Canvas) {
        let (ox, oy) = self.bounds.origin();
        canvas.fill_rect(
            Rect::new(0.0, 0.0, self.bounds.width, self.bounds.height),
            self.background,
        );
        for child in &self.children {
            canvas.fill_rect(
                child.screen_bounds().offset(-ox, -oy),
                child.background_color(),
            );
        }
    }
}

/// Drives a widget with a [`TimerQueue`] and renders it into a
/// [`RasterCanvas`].
pub struct HeadlessHost<W: Widget> {
    widget: W,
    queue: TimerQueue,
    canvas: RasterCanvas,
    frames: usize,
}

impl<W: Widget> HeadlessHost<W> {
    /// Host `widget` on a `width` x `height` surface. `None` if the surface
    /// cannot be allocated.
    pub fn new(widget: W, width: u32, height: u32) -> Option<Self> {
        Some(Self {
            widget,
            queue: TimerQueue::new(),
            canvas: RasterCanvas::new(width, height)?,
            frames: 0,
        })
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    pub fn canvas(&self) -> &RasterCanvas {
        &self.canvas
    }

    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames
    }

    pub fn layout(&mut self, bounds: Rect) {
        self.widget.on_layout(bounds);
    }

    pub fn dispatch(&mut self, event: TouchEvent) -> EventResponse {
        self.widget.on_event(&event, &mut self.queue)
    }

    pub fn press(&mut self, x: f32, y: f32) -> EventResponse {
        self.dispatch(TouchEvent::down(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> EventResponse {
        self.dispatch(TouchEvent::moved(x, y))
    }

    pub fn release(&mut self, x: f32, y: f32) -> EventResponse {
        self.dispatch(TouchEvent::up(x, y))
    }

    pub fn cancel(&mut self, x: f32, y: f32) -> EventResponse {
        self.dispatch(TouchEvent::cancel(x, y))
    }

    /// Repaint the whole surface now.
    pub fn redraw(&mut self) {
        self.canvas.clear(Color::TRANSPARENT);
        self.widget.on_draw(&mut self.canvas, &mut self.queue);
        self.frames += 1;
    }

    /// Advance the clock by `dt`, redrawing whenever an invalidation fires.
    pub fn advance(&mut self, dt: Duration) {
        let deadline = self.queue.now() + dt;
        while self.queue.step(deadline) {
            if self.queue.damage().take().is_some() {
                self.redraw();
            }
        }
        let remaining = deadline.saturating_sub(self.queue.now());
        self.queue.advance(remaining);
    }

    /// Advance until nothing is scheduled, giving up after `limit`.
    /// Returns whether the queue drained.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.queue.now() + limit;
        while let Some(due) = self.queue.next_due() {
            if due > deadline {
                return false;
            }
            let dt = due.saturating_sub(self.queue.now());
            self.advance(dt);
        }
        true
    }
}

impl<W: Widget> fmt::Debug for HeadlessHost<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("queue", &self.queue)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
