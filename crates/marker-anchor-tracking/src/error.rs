#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorError {
    #[error("tracking reference is not detected in the current frame")]
    PlaneNotDetected,
    #[error("session is already anchored")]
    AlreadyAnchored,
}
