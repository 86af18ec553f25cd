//! Image classifier port: decides whether a camera frame shows a cat.

use std::future::Future;

use catpoint_domain::error::CatpointError;
use catpoint_domain::frame::CameraFrame;

/// Maps a frame plus a confidence threshold (0..=100) to "contains a cat".
pub trait ImageClassifier {
    fn contains_cat(
        &self,
        frame: &CameraFrame,
        threshold: f32,
    ) -> impl Future<Output = Result<bool, CatpointError>> + Send;
}
