use crate::errors::CameraError;
use crate::platform::{MediaPlatform, MediaStream};
use crate::types::{Device, MediaConstraints};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Deterministic [`MediaPlatform`] for tests
///
/// Replays a script of device listings (the last entry repeats once the
/// script runs out) and counts every host call. Clones share the same script
/// and counters, so a test can hand one clone to the selector and inspect
/// the other.
#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    state: Arc<ScriptState>,
}

#[derive(Debug)]
struct ScriptState {
    listings: Vec<Result<Vec<Device>, CameraError>>,
    access_error: Mutex<Option<CameraError>>,
    tracks_per_stream: AtomicUsize,
    live_tracks: AtomicUsize,
    live_tracks_at_listing: AtomicUsize,
    stopped_tracks: AtomicUsize,
    acquire_calls: AtomicUsize,
    list_calls: AtomicUsize,
    released_streams: AtomicUsize,
}

impl ScriptedPlatform {
    /// Platform that reports the same devices on every listing
    pub fn new(devices: Vec<Device>) -> Self {
        Self::with_listings(vec![devices])
    }

    /// Platform that reports `listings[n]` on the n-th listing call
    pub fn with_listings(listings: Vec<Vec<Device>>) -> Self {
        Self::from_script(listings.into_iter().map(Ok).collect(), None)
    }

    /// Platform whose access request is always refused
    pub fn denying_access() -> Self {
        Self::from_script(
            Vec::new(),
            Some(CameraError::PermissionDenied(
                "Permission dismissed".to_string(),
            )),
        )
    }

    /// Platform whose device listing always fails
    pub fn failing_listing() -> Self {
        Self::from_script(
            vec![Err(CameraError::EnumerationError(
                "enumerateDevices is not supported".to_string(),
            ))],
            None,
        )
    }

    fn from_script(
        listings: Vec<Result<Vec<Device>, CameraError>>,
        access_error: Option<CameraError>,
    ) -> Self {
        Self {
            state: Arc::new(ScriptState {
                listings,
                access_error: Mutex::new(access_error),
                tracks_per_stream: AtomicUsize::new(1),
                live_tracks: AtomicUsize::new(0),
                live_tracks_at_listing: AtomicUsize::new(0),
                stopped_tracks: AtomicUsize::new(0),
                acquire_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
                released_streams: AtomicUsize::new(0),
            }),
        }
    }

    /// Hand out streams with `tracks` tracks each (one by default)
    pub fn with_tracks_per_stream(self, tracks: usize) -> Self {
        self.state.tracks_per_stream.store(tracks, Ordering::SeqCst);
        self
    }

    /// Refuse (or stop refusing) media access from now on
    pub fn set_access_error(&self, error: Option<CameraError>) {
        if let Ok(mut access_error) = self.state.access_error.lock() {
            *access_error = error;
        }
    }

    pub fn acquire_calls(&self) -> usize {
        self.state.acquire_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    pub fn released_streams(&self) -> usize {
        self.state.released_streams.load(Ordering::SeqCst)
    }

    pub fn stopped_tracks(&self) -> usize {
        self.state.stopped_tracks.load(Ordering::SeqCst)
    }

    /// Tracks not yet stopped, across every stream handed out
    pub fn live_tracks(&self) -> usize {
        self.state.live_tracks.load(Ordering::SeqCst)
    }

    /// Most tracks that were still live when a listing was requested
    pub fn live_tracks_at_listing(&self) -> usize {
        self.state.live_tracks_at_listing.load(Ordering::SeqCst)
    }
}

/// Stream handed out by [`ScriptedPlatform`]
#[derive(Debug)]
pub struct ScriptedStream {
    live_tracks: usize,
    state: Arc<ScriptState>,
}

impl MediaStream for ScriptedStream {
    fn live_track_count(&self) -> usize {
        self.live_tracks
    }

    async fn stop_all_tracks(&mut self) {
        if self.live_tracks > 0 {
            let stopped = std::mem::take(&mut self.live_tracks);
            self.state.stopped_tracks.fetch_add(stopped, Ordering::SeqCst);
            self.state.live_tracks.fetch_sub(stopped, Ordering::SeqCst);
            self.state.released_streams.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl MediaPlatform for ScriptedPlatform {
    type Stream = ScriptedStream;

    async fn acquire_media_access(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<ScriptedStream, CameraError> {
        self.state.acquire_calls.fetch_add(1, Ordering::SeqCst);

        let refused = self
            .state
            .access_error
            .lock()
            .map_err(|_| CameraError::StreamError("script lock poisoned".to_string()))?
            .clone();
        if let Some(error) = refused {
            return Err(error);
        }

        let live_tracks = if constraints.video {
            self.state.tracks_per_stream.load(Ordering::SeqCst)
        } else {
            0
        };
        self.state.live_tracks.fetch_add(live_tracks, Ordering::SeqCst);

        Ok(ScriptedStream {
            live_tracks,
            state: Arc::clone(&self.state),
        })
    }

    async fn list_media_devices(&self) -> Result<Vec<Device>, CameraError> {
        let call = self.state.list_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .live_tracks_at_listing
            .fetch_max(self.live_tracks(), Ordering::SeqCst);

        match self.state.listings.get(call).or(self.state.listings.last()) {
            Some(listing) => listing.clone(),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_replays_and_repeats_last() {
        let platform = ScriptedPlatform::with_listings(vec![
            Vec::new(),
            vec![Device::video_input("0", "Front")],
        ]);

        assert!(platform.list_media_devices().await.unwrap().is_empty());
        assert_eq!(platform.list_media_devices().await.unwrap().len(), 1);
        assert_eq!(platform.list_media_devices().await.unwrap().len(), 1);
        assert_eq!(platform.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_stream_release_is_counted_once() {
        let platform = ScriptedPlatform::new(Vec::new());
        let mut stream = platform
            .acquire_media_access(&MediaConstraints::video_only())
            .await
            .unwrap();
        assert_eq!(stream.live_track_count(), 1);

        stream.stop_all_tracks().await;
        stream.stop_all_tracks().await;
        assert_eq!(stream.live_track_count(), 0);
        assert_eq!(platform.released_streams(), 1);
        assert_eq!(platform.stopped_tracks(), 1);
    }

    #[tokio::test]
    async fn test_multi_track_stream_stops_every_track() {
        let platform = ScriptedPlatform::new(Vec::new()).with_tracks_per_stream(3);
        let mut stream = platform
            .acquire_media_access(&MediaConstraints::video_only())
            .await
            .unwrap();
        assert_eq!(stream.live_track_count(), 3);
        assert_eq!(platform.live_tracks(), 3);

        stream.stop_all_tracks().await;
        assert_eq!(platform.live_tracks(), 0);
        assert_eq!(platform.stopped_tracks(), 3);
        assert_eq!(platform.released_streams(), 1);
    }

    #[tokio::test]
    async fn test_access_error_can_be_toggled() {
        let platform = ScriptedPlatform::denying_access();
        assert!(platform
            .acquire_media_access(&MediaConstraints::video_only())
            .await
            .is_err());

        platform.set_access_error(None);
        assert!(platform
            .acquire_media_access(&MediaConstraints::video_only())
            .await
            .is_ok());
        assert_eq!(platform.acquire_calls(), 2);
    }
}
