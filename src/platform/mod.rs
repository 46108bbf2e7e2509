//! Host media platform abstraction
//!
//! The enumerator never touches a camera API directly. Everything it needs
//! from the host goes through [`MediaPlatform`], which lets tests substitute
//! a scripted platform and lets applications plug in their own backend.

#![allow(async_fn_in_trait)]

use crate::errors::CameraError;
use crate::types::{Device, MediaConstraints};

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "native")]
pub use native::NativePlatform;

/// A live media stream obtained from the host
pub trait MediaStream {
    /// Number of tracks still running
    fn live_track_count(&self) -> usize;

    /// Stop every track of the stream. Must be idempotent.
    async fn stop_all_tracks(&mut self);
}

/// Host media API consumed by the enumerator
pub trait MediaPlatform {
    type Stream: MediaStream;

    /// Request media access. Granting access is what makes most hosts
    /// populate device labels.
    async fn acquire_media_access(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Self::Stream, CameraError>;

    /// List every input and output device the host exposes.
    async fn list_media_devices(&self) -> Result<Vec<Device>, CameraError>;
}

impl<P: MediaPlatform> MediaPlatform for &P {
    type Stream = P::Stream;

    async fn acquire_media_access(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Self::Stream, CameraError> {
        (**self).acquire_media_access(constraints).await
    }

    async fn list_media_devices(&self) -> Result<Vec<Device>, CameraError> {
        (**self).list_media_devices().await
    }
}
