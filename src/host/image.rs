// Image metrics - aspect ratio of the background image

use std::collections::HashMap;

/// Aspect ratio (width / height) used until the image reports its own
pub const DEFAULT_IMAGE_ASPECT_RATIO: f64 = 9.0 / 16.0;

pub trait ImageMetrics {
    /// Width over height of the image at `source`, if known
    fn aspect_ratio(&self, source: &str) -> Option<f64>;
}

/// Aspect ratio for `source`, falling back to the default when the image is
/// unknown or reports an unusable ratio
pub fn resolve_aspect_ratio(metrics: &dyn ImageMetrics, source: &str) -> f64 {
    match metrics.aspect_ratio(source) {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
        _ => {
            log::debug!("No aspect ratio for '{}', using default", source);
            DEFAULT_IMAGE_ASPECT_RATIO
        }
    }
}

/// Image sizes registered up front by the host
#[derive(Debug, Clone, Default)]
pub struct StaticImageMetrics {
    ratios: HashMap<String, f64>,
}

impl StaticImageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pixel size of an image once it has loaded
    pub fn insert(&mut self, source: &str, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.ratios
            .insert(source.to_string(), width as f64 / height as f64);
    }
}

impl ImageMetrics for StaticImageMetrics {
    fn aspect_ratio(&self, source: &str) -> Option<f64> {
        self.ratios.get(source).copied()
    }
}
