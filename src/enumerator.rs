//! Device enumeration
//!
//! One enumeration pass = transient media access (to get labels populated),
//! a device listing, and the split into video devices and the subset matching
//! the requested facing mode and camera name.

use crate::errors::CameraError;
use crate::pattern::get_facing_mode_pattern;
use crate::platform::{MediaPlatform, MediaStream};
use crate::types::{Device, EnumerationResult, FacingMode, MediaConstraints};

/// Runs enumeration passes against a host platform
pub struct DeviceEnumerator<P> {
    platform: P,
}

impl<P: MediaPlatform> DeviceEnumerator<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Perform one enumeration pass.
    ///
    /// Fails if media access is refused, if the listing fails, or if no video
    /// input is visible. The transient stream is always released before the
    /// listing is requested.
    pub async fn enumerate(
        &self,
        facing_mode: Option<FacingMode>,
        camera_name_token: &str,
    ) -> Result<EnumerationResult, CameraError> {
        let mut stream = self
            .platform
            .acquire_media_access(&MediaConstraints::video_only())
            .await?;
        stream.stop_all_tracks().await;
        drop(stream);

        let devices = self.platform.list_media_devices().await?;
        let result = partition_devices(devices, facing_mode, camera_name_token)?;

        log::debug!(
            "Enumerated {} video devices, {} matching facing mode {:?} and token {:?}",
            result.video_devices.len(),
            result.filtered_devices.len(),
            facing_mode,
            camera_name_token
        );
        Ok(result)
    }
}

/// Split a raw listing into video devices and the filtered subset.
pub fn partition_devices(
    devices: Vec<Device>,
    facing_mode: Option<FacingMode>,
    camera_name_token: &str,
) -> Result<EnumerationResult, CameraError> {
    let video_devices: Vec<Device> = devices.into_iter().filter(Device::is_video_input).collect();
    if video_devices.is_empty() {
        return Err(CameraError::NoVideoInputs);
    }

    let pattern = get_facing_mode_pattern(facing_mode);
    log::trace!(
        "Filtering {} video devices with /{}/ and token {:?}",
        video_devices.len(),
        pattern.as_str(),
        camera_name_token
    );
    let filtered_devices = video_devices
        .iter()
        .filter(|device| pattern.is_match(&device.label) && device.label.contains(camera_name_token))
        .cloned()
        .collect();

    Ok(EnumerationResult {
        video_devices,
        filtered_devices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceKind;

    fn listing() -> Vec<Device> {
        vec![
            Device::new("mic", DeviceKind::AudioInput, "Default microphone"),
            Device::video_input("front", "camera2 1, facing front"),
            Device::video_input("back", "camera2 0, facing back"),
            Device::new("spk", DeviceKind::AudioOutput, "Speaker"),
        ]
    }

    #[test]
    fn test_partition_drops_audio_devices() {
        let result = partition_devices(listing(), None, "").unwrap();
        assert_eq!(result.video_devices.len(), 2);
        assert!(result.video_devices.iter().all(Device::is_video_input));
    }

    #[test]
    fn test_partition_applies_pattern_and_token() {
        let result =
            partition_devices(listing(), Some(FacingMode::Environment), "camera2 0").unwrap();
        assert_eq!(result.filtered_devices.len(), 1);
        assert_eq!(result.filtered_devices[0].device_id, "back");

        // Token is case-sensitive
        let result =
            partition_devices(listing(), Some(FacingMode::Environment), "Camera2 0").unwrap();
        assert!(result.filtered_devices.is_empty());
    }

    #[test]
    fn test_partition_default_token_misses_front_camera() {
        // The front camera on these hosts is "camera2 1", so the default token
        // only ever matches the rear one.
        let result = partition_devices(listing(), Some(FacingMode::User), "camera2 0").unwrap();
        assert!(result.filtered_devices.is_empty());
    }

    #[test]
    fn test_partition_without_video_fails() {
        let devices = vec![Device::new("mic", DeviceKind::AudioInput, "Mic")];
        assert_eq!(
            partition_devices(devices, None, "camera2 0"),
            Err(CameraError::NoVideoInputs)
        );
    }

    #[test]
    fn test_filtered_is_subset_of_video() {
        let result = partition_devices(listing(), None, "camera2").unwrap();
        for device in &result.filtered_devices {
            assert!(result.video_devices.contains(device));
        }
    }
}
