use std::time::Duration;

use crate::geometry::Color;

/// Overlay color used when none is configured (ARGB `#1b000000`).
pub const DEFAULT_REVEAL_COLOR: Color = Color::from_argb(0x1b00_0000);

/// Delay between animation frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(40);

/// Delay between a release and the click it produces.
pub const DEFAULT_CLICK_DELAY: Duration = Duration::from_millis(400);

/// Configuration for the reveal animation.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fill color of the overlay circle (usually translucent dark)
    pub color: Color,
    /// Delay before each scheduled redraw
    pub frame_interval: Duration,
    /// Delay before a release turns into a click
    pub click_delay: Duration,
    /// Gap multiplier once the radius passes half the smaller target side
    pub fast_growth_factor: f32,
    /// The base gap is the smaller target side divided by this
    pub gap_divisor: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_REVEAL_COLOR,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            click_delay: DEFAULT_CLICK_DELAY,
            fast_growth_factor: 4.0,
            gap_divisor: 8.0,
        }
    }
}

impl RevealConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn click_delay(mut self, delay: Duration) -> Self {
        self.click_delay = delay;
        self
    }

    pub fn fast_growth_factor(mut self, factor: f32) -> Self {
        self.fast_growth_factor = factor;
        self
    }

    /// Set the divisor for the base growth gap. Values below 1 are clamped to 1.
    pub fn gap_divisor(mut self, divisor: f32) -> Self {
        self.gap_divisor = divisor.max(1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RevealConfig::default();
        assert_eq!(config.color.to_rgba8(), [0, 0, 0, 0x1b]);
        assert_eq!(config.frame_interval, Duration::from_millis(40));
        assert_eq!(config.click_delay, Duration::from_millis(400));
        assert_eq!(config.fast_growth_factor, 4.0);
        assert_eq!(config.gap_divisor, 8.0);
    }

    #[test]
    fn test_builder_methods() {
        let config = RevealConfig::with_color(Color::WHITE)
            .frame_interval(Duration::from_millis(16))
            .click_delay(Duration::from_millis(250))
            .gap_divisor(0.0);
        assert_eq!(config.color, Color::WHITE);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.click_delay, Duration::from_millis(250));
        assert_eq!(config.gap_divisor, 1.0);
    }
}
