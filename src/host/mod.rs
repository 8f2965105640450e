// Host collaborators - viewport and image providers, plus a simulated renderer

pub mod image;
pub mod simulated;
pub mod viewport;

pub use image::{resolve_aspect_ratio, ImageMetrics, StaticImageMetrics, DEFAULT_IMAGE_ASPECT_RATIO};
pub use simulated::{FinishEvent, SimulatedHost};
pub use viewport::{FixedViewport, SharedViewport, Subscription, ViewportCallback, ViewportProvider};
