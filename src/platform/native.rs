use super::{MediaPlatform, MediaStream};
use crate::errors::CameraError;
use crate::permissions::check_permission_detailed;
use crate::types::{Device, DeviceKind, MediaConstraints};
use nokhwa::{
    pixel_format::RgbFormat,
    query,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
    CallbackCamera,
};

/// Host platform backed by nokhwa's native capture backends
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

// nokhwa and the /dev/video* probe block, so every call runs on the
// blocking pool and the executor stays free for timers and cancellation.

fn query_cameras() -> Result<Vec<nokhwa::utils::CameraInfo>, CameraError> {
    query(ApiBackend::Auto)
        .map_err(|e| CameraError::EnumerationError(format!("Failed to query cameras: {}", e)))
}

/// Opened camera handed between the blocking pool and the stream
struct TransientCamera(CallbackCamera);

// Only ever touched by one thread at a time, moved whole between them
unsafe impl Send for TransientCamera {}

fn open_first_camera() -> Result<TransientCamera, CameraError> {
    let permission = check_permission_detailed();
    if !permission.status.allows_access() {
        return Err(CameraError::PermissionDenied(permission.message));
    }

    let cameras = query_cameras()?;
    let index = cameras
        .first()
        .map(|info| info.index().clone())
        .unwrap_or(CameraIndex::Index(0));

    let requested_format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::None);
    let mut camera = CallbackCamera::new(index, requested_format, |_| {})
        .map_err(|e| CameraError::StreamError(format!("Failed to open camera: {}", e)))?;

    camera
        .open_stream()
        .map_err(|e| CameraError::StreamError(format!("Failed to start stream: {}", e)))?;
    Ok(TransientCamera(camera))
}

fn stop_camera(mut camera: TransientCamera) {
    if let Err(e) = camera.0.stop_stream() {
        log::warn!("Failed to stop transient camera stream: {}", e);
    }
}

/// Stream opened on a single camera to unlock device labels
pub struct NativeStream {
    camera: Option<TransientCamera>,
}

impl MediaStream for NativeStream {
    fn live_track_count(&self) -> usize {
        usize::from(self.camera.is_some())
    }

    async fn stop_all_tracks(&mut self) {
        if let Some(camera) = self.camera.take() {
            if let Err(e) = tokio::task::spawn_blocking(move || stop_camera(camera)).await {
                log::warn!("Task join error while stopping camera stream: {}", e);
            }
        }
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        if let Some(camera) = self.camera.take() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn_blocking(move || stop_camera(camera));
                }
                Err(_) => stop_camera(camera),
            }
        }
    }
}

impl MediaPlatform for NativePlatform {
    type Stream = NativeStream;

    async fn acquire_media_access(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<NativeStream, CameraError> {
        if !constraints.video {
            return Err(CameraError::StreamError(
                "Only video access is supported".to_string(),
            ));
        }

        let camera = tokio::task::spawn_blocking(open_first_camera)
            .await
            .map_err(|e| CameraError::StreamError(format!("Task join error: {}", e)))??;

        log::debug!("Transient camera stream opened");
        Ok(NativeStream {
            camera: Some(camera),
        })
    }

    async fn list_media_devices(&self) -> Result<Vec<Device>, CameraError> {
        let cameras = tokio::task::spawn_blocking(query_cameras)
            .await
            .map_err(|e| CameraError::EnumerationError(format!("Task join error: {}", e)))??;

        // nokhwa only reports capture devices
        Ok(cameras
            .into_iter()
            .map(|info| {
                Device::new(
                    info.index().to_string(),
                    DeviceKind::VideoInput,
                    info.human_name(),
                )
            })
            .collect())
    }
}
