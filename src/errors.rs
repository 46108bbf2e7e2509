use std::fmt;

/// Platform-level failures raised while talking to the host media API.
///
/// These never reach callers of the selector directly; they are logged and
/// collapsed into [`SelectionError::NoVideoInputDevices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    PermissionDenied(String),
    EnumerationError(String),
    NoVideoInputs,
    StreamError(String),
    InitializationError(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CameraError::PermissionDenied(msg) => write!(f, "Permission denied error: {}", msg),
            CameraError::EnumerationError(msg) => write!(f, "Device enumeration error: {}", msg),
            CameraError::NoVideoInputs => write!(f, "No video input devices visible"),
            CameraError::StreamError(msg) => write!(f, "Stream error: {}", msg),
            CameraError::InitializationError(msg) => write!(f, "Initialization error: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

/// Errors surfaced by device selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The enumerator failed: access refused, listing unsupported, or no
    /// video hardware. The cause is intentionally not exposed.
    #[error("No video input devices found")]
    NoVideoInputDevices,
    /// The cancellation token fired before a device was chosen.
    #[error("Device selection cancelled")]
    Cancelled,
}
