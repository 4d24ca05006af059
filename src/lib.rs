//! Circular press feedback ("reveal") for hosts without a native ripple.
//!
//! [`RevealLayout`](widgets::RevealLayout) wraps a host container, picks the
//! clickable child under a press, grows a translucent circle over it frame by
//! frame and delivers the click once the animation had time to play.
//!
//! Host services are traits: [`widgets::Container`], [`widgets::Touchable`],
//! [`canvas::Canvas`] and [`scheduler::Scheduler`]. The [`headless`] module and
//! [`platform::CalloopScheduler`] provide ready-made implementations.

pub mod canvas;
pub mod config;
pub mod event;
pub mod geometry;
pub mod headless;
pub mod platform;
pub mod raster;
pub mod scheduler;
pub mod widgets;

pub mod prelude {
    pub use crate::canvas::{Canvas, DrawCommand, RecordingCanvas};
    pub use crate::config::RevealConfig;
    pub use crate::event::{EventResponse, TouchAction, TouchEvent};
    pub use crate::geometry::{Color, Rect};
    pub use crate::headless::{HeadlessHost, Panel, Pressable};
    pub use crate::platform::CalloopScheduler;
    pub use crate::raster::RasterCanvas;
    pub use crate::scheduler::{Damage, DamageTracker, Scheduler, Task, TimerQueue};
    pub use crate::widgets::{
        reveal_layout, Container, Gesture, GesturePhase, RevealLayout, Touchable, Widget,
    };
}
