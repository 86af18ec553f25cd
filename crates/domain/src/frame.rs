//! Camera frame: an opaque image handed to the classifier.

/// Raw bytes of a single camera image.
///
/// The domain never inspects pixels; only the classifier adapter does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    bytes: Vec<u8>,
}

impl CameraFrame {
    /// Wrap raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFrame`](crate::error::ValidationError::EmptyFrame)
    /// when `bytes` is empty.
    pub fn new(bytes: Vec<u8>) -> Result<Self, crate::error::ValidationError> {
        if bytes.is_empty() {
            return Err(crate::error::ValidationError::EmptyFrame);
        }
        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; kept for symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
