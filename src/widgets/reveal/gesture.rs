use std::rc::{Rc, Weak};

use bitflags::bitflags;

use super::resolver::is_touch_point_in;
use crate::config::RevealConfig;
use crate::event::TouchEvent;
use crate::geometry::Rect;
use crate::widgets::widget::Touchable;

/// Smallest growth step in logical pixels. Keeps degenerate targets (zero
/// height) from redrawing forever without growing.
const MIN_GAP: f32 = 1.0;

bitflags! {
    /// Live state of the reveal animation
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct RevealFlags: u8 {
        /// The overlay is being drawn and advanced
        const ANIMATING = 0b01;
        /// The finger is still down
        const PRESSED   = 0b10;
    }
}

/// Where the widget is in a press-release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Finger down; the overlay grows and then holds
    Pressed,
    /// Finger lifted; the overlay finishes growing and is cleared
    Releasing,
}

impl From<RevealFlags> for GesturePhase {
    fn from(flags: RevealFlags) -> Self {
        if flags.contains(RevealFlags::PRESSED) {
            GesturePhase::Pressed
        } else if flags.contains(RevealFlags::ANIMATING) {
            GesturePhase::Releasing
        } else {
            GesturePhase::Idle
        }
    }
}

/// Geometry captured when a press lands on a target.
///
/// A record is never mutated: every new press builds a fresh one, and callbacks
/// scheduled against a gesture hold their own `Rc` to it.
#[derive(Debug, Clone)]
pub struct Gesture {
    target: Weak<dyn Touchable>,
    /// Press point in container-local coordinates
    center: (f32, f32),
    target_width: f32,
    target_height: f32,
    /// Radius at which the circle spans the target horizontally
    max_radius: f32,
    /// Base growth step per frame
    gap: f32,
}

impl Gesture {
    /// Capture a gesture for `target` pressed by `press`, with the container's
    /// top-left corner at `origin` (screen coordinates).
    pub fn capture(
        target: &Rc<dyn Touchable>,
        press: &TouchEvent,
        origin: (f32, f32),
        config: &RevealConfig,
    ) -> Self {
        let bounds = target.screen_bounds();
        let center = press.local_coords(origin);

        let target_left = bounds.x - origin.0;
        let local_x = center.0 - target_left;
        let max_radius = local_x.max(bounds.width - local_x);

        let min_side = bounds.width.min(bounds.height);
        let gap = (min_side / config.gap_divisor).max(MIN_GAP);

        Self {
            target: Rc::downgrade(target),
            center,
            target_width: bounds.width,
            target_height: bounds.height,
            max_radius,
            gap,
        }
    }

    /// The target, if it is still alive.
    pub fn target(&self) -> Option<Rc<dyn Touchable>> {
        self.target.upgrade()
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn target_size(&self) -> (f32, f32) {
        (self.target_width, self.target_height)
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Radius after one more frame.
    ///
    /// Growth speeds up once the circle is past half the smaller side, giving
    /// a fast finish.
    pub fn next_radius(&self, radius: f32, config: &RevealConfig) -> f32 {
        let half_min = self.target_width.min(self.target_height) / 2.0;
        if radius > half_min {
            radius + self.gap * config.fast_growth_factor
        } else {
            radius + self.gap
        }
    }

    /// Target bounds relative to the container at `origin`.
    pub fn clip_rect(target: &dyn Touchable, origin: (f32, f32)) -> Rect {
        target.screen_bounds().offset(-origin.0, -origin.1)
    }
}

/// A click waiting for the reveal animation to play out.
///
/// Carries the gesture that was released, so a newer press cannot redirect it.
#[derive(Debug, Clone)]
pub struct DeferredClick {
    gesture: Rc<Gesture>,
    release: TouchEvent,
}

impl DeferredClick {
    pub fn new(gesture: Rc<Gesture>, release: TouchEvent) -> Self {
        Self { gesture, release }
    }

    /// Click the target if it is alive, enabled and still under the release
    /// point. Returns whether a click fired.
    pub fn run(self) -> bool {
        let Some(target) = self.gesture.target() else {
            log::debug!("deferred click dropped: target detached");
            return false;
        };
        if !target.is_enabled() {
            log::debug!("deferred click dropped: target disabled");
            return false;
        }

        let (x, y) = self.release.coords();
        if is_touch_point_in(target.as_ref(), x, y) {
            log::debug!("dispatching click at ({x}, {y})");
            target.perform_click();
            true
        } else {
            log::debug!("click suppressed: release at ({x}, {y}) left the target");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Stub {
        bounds: Cell<Rect>,
        enabled: Cell<bool>,
        clicks: Cell<u32>,
    }

    impl Stub {
        fn new(bounds: Rect) -> Rc<Self> {
            Rc::new(Self {
                bounds: Cell::new(bounds),
                enabled: Cell::new(true),
                clicks: Cell::new(0),
            })
        }
    }

    impl Touchable for Stub {
        fn screen_bounds(&self) -> Rect {
            self.bounds.get()
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

    fn capture(stub: &Rc<Stub>, press: (f32, f32), origin: (f32, f32)) -> Gesture {
        let target: Rc<dyn Touchable> = stub.clone();
        let press = TouchEvent::down(press.0, press.1);
        Gesture::capture(&target, &press, origin, &RevealConfig::default())
    }

    #[test]
    fn test_max_radius_covers_target_horizontally() {
        // Container at (100, 200), target at local x = 20, press 30px into the target
        let stub = Stub::new(Rect::new(120.0, 220.0, 100.0, 40.0));
        let gesture = capture(&stub, (150.0, 230.0), (100.0, 200.0));

        assert_eq!(gesture.center(), (50.0, 30.0));
        assert_eq!(gesture.max_radius(), 70.0);
        assert_eq!(gesture.target_size(), (100.0, 40.0));
        assert_eq!(gesture.gap(), 5.0);
    }

    #[test]
    fn test_max_radius_from_right_side() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        let gesture = capture(&stub, (90.0, 10.0), (0.0, 0.0));
        assert_eq!(gesture.max_radius(), 90.0);
    }

    #[test]
    fn test_growth_speeds_up_past_half_min_side() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        let gesture = capture(&stub, (10.0, 10.0), (0.0, 0.0));
        let config = RevealConfig::default();

        assert_eq!(gesture.next_radius(0.0, &config), 5.0);
        assert_eq!(gesture.next_radius(20.0, &config), 25.0);
        assert_eq!(gesture.next_radius(25.0, &config), 45.0);
    }

    #[test]
    fn test_degenerate_target_still_grows() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 0.0));
        let gesture = capture(&stub, (10.0, 0.0), (0.0, 0.0));
        assert_eq!(gesture.gap(), MIN_GAP);
        assert!(gesture.next_radius(0.0, &RevealConfig::default()) > 0.0);
    }

    #[test]
    fn test_phase_from_flags() {
        assert_eq!(GesturePhase::from(RevealFlags::empty()), GesturePhase::Idle);
        assert_eq!(
            GesturePhase::from(RevealFlags::ANIMATING | RevealFlags::PRESSED),
            GesturePhase::Pressed
        );
        assert_eq!(
            GesturePhase::from(RevealFlags::ANIMATING),
            GesturePhase::Releasing
        );
    }

    #[test]
    fn test_deferred_click_inside_fires() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        let gesture = Rc::new(capture(&stub, (10.0, 10.0), (0.0, 0.0)));

        assert!(DeferredClick::new(gesture, TouchEvent::up(50.0, 20.0)).run());
        assert_eq!(stub.clicks.get(), 1);
    }

    #[test]
    fn test_deferred_click_rechecks_bounds_at_dispatch() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        let gesture = Rc::new(capture(&stub, (10.0, 10.0), (0.0, 0.0)));
        let click = DeferredClick::new(gesture, TouchEvent::up(50.0, 20.0));

        // Target scrolled away before the click came due
        stub.bounds.set(Rect::new(0.0, 100.0, 100.0, 40.0));
        assert!(!click.run());
        assert_eq!(stub.clicks.get(), 0);
    }

    #[test]
    fn test_deferred_click_disabled_or_dropped_target() {
        let stub = Stub::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        let gesture = Rc::new(capture(&stub, (10.0, 10.0), (0.0, 0.0)));

        stub.enabled.set(false);
        assert!(!DeferredClick::new(gesture.clone(), TouchEvent::up(5.0, 5.0)).run());
        assert_eq!(stub.clicks.get(), 0);

        drop(stub);
        assert!(gesture.target().is_none());
        assert!(!DeferredClick::new(gesture, TouchEvent::up(5.0, 5.0)).run());
    }
}
