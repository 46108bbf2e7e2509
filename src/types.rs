//! Data model shared by the enumerator, selector and platform backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media device reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    #[serde(rename = "videoinput")]
    VideoInput,
    #[serde(rename = "audioinput")]
    AudioInput,
    #[serde(rename = "audiooutput")]
    AudioOutput,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::VideoInput => "videoinput",
            DeviceKind::AudioInput => "audioinput",
            DeviceKind::AudioOutput => "audiooutput",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media device as reported by the host. Read-only from our side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub kind: DeviceKind,
    /// May be empty until camera access has been granted at least once.
    pub label: String,
}

impl Device {
    pub fn new(device_id: impl Into<String>, kind: DeviceKind, label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
            label: label.into(),
        }
    }

    /// Shorthand for a camera
    pub fn video_input(device_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(device_id, DeviceKind::VideoInput, label)
    }

    pub fn is_video_input(&self) -> bool {
        self.kind == DeviceKind::VideoInput
    }
}

/// Logical camera orientation. "Unset" is expressed as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing camera
    User,
    /// Rear-facing camera
    Environment,
}

impl FacingMode {
    /// Lenient parse: anything other than the two known tokens is "unset".
    pub fn parse(token: &str) -> Option<FacingMode> {
        match token {
            "user" => Some(FacingMode::User),
            "environment" => Some(FacingMode::Environment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single enumeration pass.
///
/// `filtered_devices` is always drawn from `video_devices` of the same pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationResult {
    pub video_devices: Vec<Device>,
    pub filtered_devices: Vec<Device>,
}

/// Constraints passed along with a media access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

impl MediaConstraints {
    /// Video only, the only shape the enumerator requests
    pub const fn video_only() -> Self {
        Self {
            video: true,
            audio: false,
        }
    }
}
