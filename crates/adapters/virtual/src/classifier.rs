//! Deterministic stand-in for an image recognition service.

use std::future::Future;

use catpoint_app::ports::ImageClassifier;
use catpoint_domain::error::CatpointError;
use catpoint_domain::frame::CameraFrame;

/// Classifier that derives its confidence from the frame's mean byte value.
///
/// A frame of all `0xFF` scores 100, a frame of all `0x00` scores 0. The same
/// bytes always give the same verdict.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeImageClassifier;

impl FakeImageClassifier {
    /// Confidence in `0.0..=100.0` that `frame` shows a cat.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn confidence(frame: &CameraFrame) -> f32 {
        let bytes = frame.as_bytes();
        let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
        let mean = sum as f64 / bytes.len() as f64;
        (mean / 255.0 * 100.0) as f32
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn contains_cat(
        &self,
        frame: &CameraFrame,
        threshold: f32,
    ) -> impl Future<Output = Result<bool, CatpointError>> + Send {
        let confidence = Self::confidence(frame);
        let cat = confidence > threshold;
        tracing::debug!(confidence, threshold, cat, "classified frame");
        async move { Ok(cat) }
    }
}
