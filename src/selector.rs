//! Device selection with bounded retry
//!
//! Right after a permission grant some hosts report video devices without
//! labels, or report only a subset of them. The selector keeps enumerating on
//! a fixed interval until the result looks settled (a labelled match, or a
//! single camera) or the retry budget runs out, then hands the last result
//! to a [`ChoicePolicy`].

use crate::config::SelectionConfig;
use crate::enumerator::DeviceEnumerator;
use crate::errors::SelectionError;
use crate::platform::MediaPlatform;
use crate::types::{Device, EnumerationResult, FacingMode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Attempts allowed after the first one. The budget check runs before the
/// counter is bumped, so the worst case is `MAX_RETRIES + 1` enumerations.
pub const MAX_RETRIES: u32 = 5;
/// Fixed wait between attempts
pub const RETRY_DELAY_MS: u64 = 1000;
/// Label fragment of the primary rear camera on Android hosts
pub const DEFAULT_CAMERA_NAME_TOKEN: &str = "camera2 0";

/// Picks one device id out of an enumeration result.
pub trait ChoicePolicy {
    fn choose(
        &self,
        filtered_devices: &[Device],
        video_devices: &[Device],
        facing_mode: Option<FacingMode>,
    ) -> Option<String>;
}

impl<F> ChoicePolicy for F
where
    F: Fn(&[Device], &[Device], Option<FacingMode>) -> Option<String>,
{
    fn choose(
        &self,
        filtered_devices: &[Device],
        video_devices: &[Device],
        facing_mode: Option<FacingMode>,
    ) -> Option<String> {
        self(filtered_devices, video_devices, facing_mode)
    }
}

/// Default tie-break policy
///
/// 1. Any filtered device: the one with the smallest label wins (ties keep
///    enumeration order).
/// 2. A single camera, or a front camera requested: the first video device.
/// 3. Otherwise the last video device, which multi-camera hosts tend to
///    enumerate as the rear camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDeviceIdChooser;

impl ChoicePolicy for DefaultDeviceIdChooser {
    fn choose(
        &self,
        filtered_devices: &[Device],
        video_devices: &[Device],
        facing_mode: Option<FacingMode>,
    ) -> Option<String> {
        // Labels compare by UTF-16 code unit, the order web hosts sort in.
        // min_by returns the first of equal minima, same as a stable sort.
        if let Some(device) = filtered_devices
            .iter()
            .min_by(|a, b| a.label.encode_utf16().cmp(b.label.encode_utf16()))
        {
            return Some(device.device_id.clone());
        }

        if video_devices.len() == 1 || facing_mode == Some(FacingMode::User) {
            return video_devices.first().map(|d| d.device_id.clone());
        }

        video_devices.last().map(|d| d.device_id.clone())
    }
}

/// Where a selection run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectionState {
    Polling { attempt: u32 },
    Done(Option<String>),
    Failed(SelectionError),
}

/// Retry-driven device selection over a host platform
pub struct DeviceSelector<P> {
    enumerator: DeviceEnumerator<P>,
    max_retries: u32,
    retry_delay: Duration,
    camera_name_token: String,
}

impl<P: MediaPlatform> DeviceSelector<P> {
    pub fn new(platform: P) -> Self {
        Self {
            enumerator: DeviceEnumerator::new(platform),
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            camera_name_token: DEFAULT_CAMERA_NAME_TOKEN.to_string(),
        }
    }

    pub fn from_config(platform: P, config: &SelectionConfig) -> Self {
        Self::new(platform)
            .with_max_retries(config.max_retries)
            .with_retry_delay(Duration::from_millis(config.retry_delay_ms))
            .with_camera_name_token(config.camera_name_token.clone())
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_camera_name_token(mut self, token: impl Into<String>) -> Self {
        self.camera_name_token = token.into();
        self
    }

    pub fn camera_name_token(&self) -> &str {
        &self.camera_name_token
    }

    /// Select a device id for `facing_mode`.
    ///
    /// `Ok(None)` means enumeration worked but no device could be chosen.
    /// Any enumeration failure ends the run with
    /// [`SelectionError::NoVideoInputDevices`] without retrying.
    pub async fn get_device_id<C>(
        &self,
        facing_mode: Option<FacingMode>,
        policy: &C,
    ) -> Result<Option<String>, SelectionError>
    where
        C: ChoicePolicy + ?Sized,
    {
        // Never cancelled, so the run only ends in Done or Failed
        self.get_device_id_with_cancel(facing_mode, policy, &CancellationToken::new())
            .await
    }

    /// Like [`get_device_id`](Self::get_device_id), but stops with
    /// [`SelectionError::Cancelled`] once `cancel` fires. A pending retry
    /// timer is dropped immediately.
    pub async fn get_device_id_with_cancel<C>(
        &self,
        facing_mode: Option<FacingMode>,
        policy: &C,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, SelectionError>
    where
        C: ChoicePolicy + ?Sized,
    {
        let mut state = SelectionState::Polling { attempt: 0 };

        loop {
            state = match state {
                SelectionState::Polling { attempt } => {
                    if cancel.is_cancelled() {
                        log::info!("Device selection cancelled before attempt {}", attempt);
                        return Err(SelectionError::Cancelled);
                    }
                    self.poll_once(attempt, facing_mode, policy, cancel).await
                }
                SelectionState::Done(device_id) => {
                    match &device_id {
                        Some(id) => log::info!("Selected camera device {}", id),
                        None => log::info!("No camera device could be chosen"),
                    }
                    return Ok(device_id);
                }
                SelectionState::Failed(error) => return Err(error),
            };
        }
    }

    async fn poll_once<C>(
        &self,
        attempt: u32,
        facing_mode: Option<FacingMode>,
        policy: &C,
        cancel: &CancellationToken,
    ) -> SelectionState
    where
        C: ChoicePolicy + ?Sized,
    {
        log::debug!("Device enumeration attempt {}", attempt);

        let result = match self
            .enumerator
            .enumerate(facing_mode, &self.camera_name_token)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Device enumeration failed: {}", e);
                return SelectionState::Failed(SelectionError::NoVideoInputDevices);
            }
        };

        if self.is_settled(attempt, &result) {
            return SelectionState::Done(policy.choose(
                &result.filtered_devices,
                &result.video_devices,
                facing_mode,
            ));
        }

        log::info!(
            "No matching camera among {} video devices, retrying in {:?}",
            result.video_devices.len(),
            self.retry_delay
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                log::info!("Device selection cancelled while waiting to retry");
                SelectionState::Failed(SelectionError::Cancelled)
            }
            _ = tokio::time::sleep(self.retry_delay) => SelectionState::Polling { attempt: attempt + 1 },
        }
    }

    fn is_settled(&self, attempt: u32, result: &EnumerationResult) -> bool {
        attempt >= self.max_retries
            || !result.filtered_devices.is_empty()
            || result.video_devices.len() == 1
    }
}

/// Select a device id with the default policy and camera name token.
pub async fn get_device_id<P: MediaPlatform>(
    platform: P,
    facing_mode: Option<FacingMode>,
) -> Result<Option<String>, SelectionError> {
    DeviceSelector::new(platform)
        .get_device_id(facing_mode, &DefaultDeviceIdChooser)
        .await
}

/// Select a device id with an optional custom policy and camera name token.
pub async fn get_device_id_with<P: MediaPlatform>(
    platform: P,
    facing_mode: Option<FacingMode>,
    policy: Option<&dyn ChoicePolicy>,
    camera_name_token: Option<&str>,
) -> Result<Option<String>, SelectionError> {
    let selector = DeviceSelector::new(platform)
        .with_camera_name_token(camera_name_token.unwrap_or(DEFAULT_CAMERA_NAME_TOKEN));
    selector
        .get_device_id(facing_mode, policy.unwrap_or(&DefaultDeviceIdChooser))
        .await
}
