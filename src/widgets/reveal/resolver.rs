use std::rc::Rc;

use crate::widgets::widget::Touchable;

/// Whether `(x, y)` (screen coordinates) lands on `target`.
///
/// Only clickable elements can be hit; bounds are inclusive on every edge.
pub fn is_touch_point_in(target: &dyn Touchable, x: f32, y: f32) -> bool {
    target.is_clickable() && target.screen_bounds().contains(x, y)
}

/// First touchable, in registration order, that contains the point.
///
/// A plain linear scan: containers using the reveal effect hold a handful of
/// children.
pub fn resolve_touch_target(
    touchables: &[Rc<dyn Touchable>],
    x: f32,
    y: f32,
) -> Option<Rc<dyn Touchable>> {
    touchables
        .iter()
        .find(|&touchable| is_touch_point_in(touchable.as_ref(), x, y))
        .cloned()
}
