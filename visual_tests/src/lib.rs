mod compare;
mod scenario;

pub use compare::{compare_frames, diff_frame, CompareResult};
pub use scenario::{render_scenario, SCENARIOS};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render scenario: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scenario to render
    pub scenario: String,
    /// Similarity threshold (0.0 to 1.0, default 0.999)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scenario: String::new(),
            similarity_threshold: 0.999,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Pixels that differ beyond tolerance
    pub changed_pixels: usize,
    pub captured_path: PathBuf,
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

pub fn reference_path(scenario: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scenario))
}

/// Directory for test artifacts (captures and diffs)
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

pub fn captured_path(scenario: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scenario))
}

pub fn diff_path(scenario: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scenario))
}

/// Render a scenario and compare it against its reference image
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(&config.scenario);
    let cap_path = captured_path(&config.scenario);

    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    let captured = render_scenario(&config.scenario)?;
    captured.save(&cap_path)?;
    let reference = image::open(&ref_path)?.to_rgba8();

    let compare_result = compare_frames(&reference, &captured)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(&config.scenario);
        diff_frame(&reference, &captured).save(&diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        changed_pixels: compare_result.changed_pixels,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Render a scenario straight into its reference image
pub fn update_reference(scenario: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scenario);
    render_scenario(scenario)?.save(&ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
