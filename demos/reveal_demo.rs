//! Scripted tap on a three-button panel, driven by a calloop event loop.
//!
//! Every redraw is written as a PNG into the output directory:
//!
//! ```text
//! RUST_LOG=debug cargo run --example reveal_demo -- target/reveal_frames
//! ```

use std::path::PathBuf;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use reveal::prelude::*;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;

struct DemoState {
    /// Touch events delivered by the script timers, not yet dispatched
    pending: Vec<TouchEvent>,
    finished: bool,
}

fn build_panel() -> Panel {
    let colors = [0x4F6D7A, 0xC0D6DF, 0xDD6E42];
    let mut panel = Panel::new(Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32))
        .background(Color::from_hex(0xEAEAEA));
    for (i, color) in colors.into_iter().enumerate() {
        let label = format!("button-{i}");
        let y = 20.0 + i as f32 * 60.0;
        let message = label.clone();
        panel.add(
            Pressable::new(label, Rect::new(20.0, y, 280.0, 44.0))
                .background(Color::from_hex(color))
                .on_click(move || log::info!("{message} clicked")),
        );
    }
    panel
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/reveal_frames"));
    std::fs::create_dir_all(&out_dir)?;

    let mut event_loop: EventLoop<'static, DemoState> = EventLoop::try_new()?;
    let handle = event_loop.handle();
    let mut scheduler = CalloopScheduler::new(handle.clone());
    let damage = scheduler.damage().clone();

    let mut layout = reveal_layout(build_panel()).on_click(|| log::info!("panel clicked"));
    layout.on_layout(Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32));

    let mut state = DemoState {
        pending: Vec::new(),
        finished: false,
    };

    // Tap the middle button, hold it, then release inside
    let script = [
        (Duration::from_millis(100), TouchEvent::down(60.0, 92.0)),
        (Duration::from_millis(700), TouchEvent::up(200.0, 102.0)),
    ];
    for (delay, event) in script {
        handle
            .insert_source(
                Timer::from_duration(delay),
                move |_, _, state: &mut DemoState| {
                    state.pending.push(event);
                    TimeoutAction::Drop
                },
            )
            .map_err(|e| e.error)?;
    }

    handle
        .insert_source(
            Timer::from_duration(Duration::from_millis(1500)),
            |_, _, state: &mut DemoState| {
                state.finished = true;
                TimeoutAction::Drop
            },
        )
        .map_err(|e| e.error)?;

    let mut canvas =
        RasterCanvas::new(WIDTH, HEIGHT).ok_or("cannot allocate the frame buffer")?;
    let mut frame = 0;
    damage.add(None);
    while !state.finished {
        event_loop.dispatch(Some(Duration::from_millis(10)), &mut state)?;

        for event in state.pending.drain(..) {
            log::info!("dispatching {:?} at {:?}", event.action, event.coords());
            layout.on_event(&event, &mut scheduler);
        }

        if damage.take().is_some() {
            canvas.clear(Color::TRANSPARENT);
            layout.on_draw(&mut canvas, &mut scheduler);
            let path = out_dir.join(format!("frame_{frame:03}.png"));
            canvas.save_png(&path)?;
            log::debug!("wrote {}", path.display());
            frame += 1;
        }
    }

    log::info!("{frame} frames written to {}", out_dir.display());
    Ok(())
}
