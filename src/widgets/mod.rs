pub mod reveal;
pub mod widget;

pub use reveal::{
    reveal_layout, ClickCallback, DeferredClick, Gesture, GesturePhase, RevealFlags, RevealLayout,
};
pub use widget::{Container, Touchable, Widget};
