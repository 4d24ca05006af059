use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;

/// Channel difference above which a pixel counts as changed
const PIXEL_TOLERANCE: u8 = 10;

/// Result of comparing two frames
pub struct CompareResult {
    /// Structural similarity from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds the tolerance
    pub changed_pixels: usize,
}

/// Compare two frames with SSIM plus a raw changed-pixel count.
pub fn compare_frames(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Frame dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let cap_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();
    let similarity =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &cap_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?
            .score;

    let changed_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > PIXEL_TOLERANCE)
        .count();

    Ok(CompareResult {
        similarity,
        changed_pixels,
    })
}

/// Highlight changed pixels in red over a dimmed copy of the captured frame.
pub fn diff_frame(reference: &RgbaImage, captured: &RgbaImage) -> RgbaImage {
    let (width, height) = captured.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let cap = captured.get_pixel(x, y);
        let diff = if x < reference.width() && y < reference.height() {
            pixel_difference(reference.get_pixel(x, y), cap)
        } else {
            u8::MAX
        };

        if diff > PIXEL_TOLERANCE {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    })
}

/// Largest channel difference between two pixels
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_frames() {
        let frame = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let result = compare_frames(&frame, &frame).expect("compare");
        assert_eq!(result.changed_pixels, 0);
        assert!(result.similarity > 0.999);
    }

    #[test]
    fn test_mismatched_dimensions() {
        let a = RgbaImage::new(4, 4);
        let b = RgbaImage::new(5, 4);
        assert!(matches!(
            compare_frames(&a, &b),
            Err(VisualTestError::Compare(_))
        ));
    }

    #[test]
    fn test_diff_marks_changes() {
        let a = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        let mut b = a.clone();
        b.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let diff = diff_frame(&a, &b);
        assert_eq!(diff.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(diff.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
