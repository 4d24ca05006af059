use std::time::Duration;

use image::RgbaImage;
use reveal::prelude::*;

use crate::{Result, VisualTestError};

const WIDTH: u32 = 240;
const HEIGHT: u32 = 160;

/// Scripted interactions rendered by the visual tests.
pub const SCENARIOS: &[&str] = &[
    "idle_panel",
    "press_first_frame",
    "press_mid_growth",
    "press_held",
    "press_near_edge",
    "tap_released",
    "drag_off",
];

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn demo_host() -> Result<HeadlessHost<RevealLayout<Panel>>> {
    let panel = Panel::new(Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32))
        .background(Color::from_hex(0xF4F4F4))
        .child(
            Pressable::new("primary", Rect::new(20.0, 20.0, 200.0, 48.0))
                .background(Color::from_hex(0x9FB8C8)),
        )
        .child(
            Pressable::new("secondary", Rect::new(20.0, 92.0, 200.0, 48.0))
                .background(Color::from_hex(0xE2C290)),
        );
    let mut host = HeadlessHost::new(reveal_layout(panel), WIDTH, HEIGHT)
        .ok_or_else(|| VisualTestError::Render("cannot allocate the surface".to_string()))?;
    host.redraw();
    Ok(host)
}

/// Render the named scenario and return the final frame.
pub fn render_scenario(name: &str) -> Result<RgbaImage> {
    let mut host = demo_host()?;
    match name {
        "idle_panel" => {}
        "press_first_frame" => {
            host.press(120.0, 44.0);
            host.advance(ms(40));
        }
        "press_mid_growth" => {
            host.press(120.0, 44.0);
            host.advance(ms(80));
        }
        "press_held" => {
            host.press(120.0, 44.0);
            host.advance(ms(800));
        }
        "press_near_edge" => {
            host.press(30.0, 110.0);
            host.advance(ms(200));
        }
        "tap_released" => {
            host.press(120.0, 116.0);
            host.release(120.0, 116.0);
            if !host.run_until_idle(ms(5000)) {
                return Err(VisualTestError::Render(format!(
                    "scenario '{}' never went idle",
                    name
                )));
            }
        }
        "drag_off" => {
            host.press(120.0, 44.0);
            host.advance(ms(80));
            host.move_to(120.0, 150.0);
            host.release(120.0, 150.0);
            host.advance(ms(120));
        }
        _ => {
            return Err(VisualTestError::Render(format!(
                "unknown scenario '{}'",
                name
            )))
        }
    }
    Ok(host.canvas().to_image())
}
