//! Software rasterizer backing the headless host.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};
use resvg::tiny_skia::{
    self, FillRule, Mask, Paint, Path as SkiaPath, PathBuilder, Pixmap, Transform,
};

use crate::canvas::Canvas;
use crate::geometry::{Color, Rect};

/// A [`Canvas`] that paints into a tiny-skia pixmap.
///
/// Coordinates are logical pixels with a 1:1 mapping to pixmap pixels. Fills
/// are anti-aliased and blended source-over.
pub struct RasterCanvas {
    pixmap: Pixmap,
    clip: Rect,
    clip_stack: Vec<Rect>,
}

impl RasterCanvas {
    /// A transparent `width` x `height` canvas. `None` for an empty or
    /// oversized surface.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let pixmap = Pixmap::new(width, height)?;
        Some(Self {
            clip: Rect::new(0.0, 0.0, width as f32, height as f32),
            clip_stack: Vec::new(),
            pixmap,
        })
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Option<Self> {
        let mut canvas = Self::new(width, height)?;
        canvas.clear(background);
        Some(canvas)
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
        self.clip = self.full_rect();
        self.clip_stack.clear();
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel; transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixmap
            .pixel(x, y)
            .map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .unwrap_or_default()
    }

    /// Copy of the surface as a straight-alpha image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| Rgba(self.pixel(x, y)))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save(path)
    }

    fn full_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Coverage mask for the current clip, `None` when nothing is clipped.
    fn clip_mask(&self) -> Option<Mask> {
        if self.clip == self.full_rect() {
            return None;
        }
        let mut mask = Mask::new(self.width(), self.height())?;
        if let Some(rect) = skia_rect(self.clip) {
            mask.fill_path(
                &PathBuilder::from_rect(rect),
                FillRule::Winding,
                true,
                Transform::identity(),
            );
        }
        Some(mask)
    }

    fn fill_path(&mut self, path: &SkiaPath, color: Color) {
        if self.clip.is_empty() {
            return;
        }
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;

        let mask = self.clip_mask();
        self.pixmap.fill_path(
            path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            mask.as_ref(),
        );
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

impl Canvas for RasterCanvas {
    fn save(&mut self) {
        self.clip_stack.push(self.clip);
    }

    fn restore(&mut self) {
        if let Some(clip) = self.clip_stack.pop() {
            self.clip = clip;
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip = self.clip.intersection(&rect);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = skia_rect(rect) else {
            return;
        };
        self.fill_path(&PathBuilder::from_rect(rect), color);
    }

    fn draw_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center.0, center.1, radius) {
            self.fill_path(&path, color);
        }
    }
}
