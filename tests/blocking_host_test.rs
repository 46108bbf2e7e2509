//! Selection against a host whose calls block, the way camera backends do.
//!
//! These run on real time: the host sleeps on tokio's blocking pool, and the
//! executor has to keep serving timers and other selections meanwhile.

use crabselect::testing::{devices, ScriptedPlatform};
use crabselect::{
    get_device_id, CameraError, DefaultDeviceIdChooser, Device, DeviceSelector, MediaConstraints,
    MediaPlatform, MediaStream, SelectionError,
};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

const HOST_LATENCY: Duration = Duration::from_millis(300);

/// Host that parks a blocking-pool thread for every call
struct SlowHost {
    devices: Vec<Device>,
}

struct SlowStream {
    live: bool,
}

impl MediaStream for SlowStream {
    fn live_track_count(&self) -> usize {
        usize::from(self.live)
    }

    async fn stop_all_tracks(&mut self) {
        if std::mem::take(&mut self.live) {
            let _ = tokio::task::spawn_blocking(|| std::thread::sleep(HOST_LATENCY)).await;
        }
    }
}

impl MediaPlatform for SlowHost {
    type Stream = SlowStream;

    async fn acquire_media_access(
        &self,
        _constraints: &MediaConstraints,
    ) -> Result<SlowStream, CameraError> {
        tokio::task::spawn_blocking(|| std::thread::sleep(HOST_LATENCY))
            .await
            .map_err(|e| CameraError::StreamError(format!("Task join error: {}", e)))?;
        Ok(SlowStream { live: true })
    }

    async fn list_media_devices(&self) -> Result<Vec<Device>, CameraError> {
        let devices = self.devices.clone();
        tokio::task::spawn_blocking(move || {
            std::thread::sleep(HOST_LATENCY);
            devices
        })
        .await
        .map_err(|e| CameraError::EnumerationError(format!("Task join error: {}", e)))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_slow_host_does_not_hold_up_other_selections() {
    let slow = SlowHost {
        devices: devices::laptop(),
    };
    let fast = ScriptedPlatform::new(devices::laptop());
    let start = Instant::now();

    let (slow_done, fast_done) = tokio::join!(
        async {
            let chosen = get_device_id(&slow, None).await;
            (chosen, start.elapsed())
        },
        async {
            let chosen = get_device_id(fast.clone(), None).await;
            (chosen, start.elapsed())
        },
    );

    assert_eq!(slow_done.0, Ok(Some("0".to_string())));
    assert_eq!(fast_done.0, Ok(Some("0".to_string())));
    assert!(slow_done.1 >= HOST_LATENCY * 3);
    assert!(
        fast_done.1 < HOST_LATENCY,
        "fast selection waited {:?} behind the slow host",
        fast_done.1
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_cancel_during_slow_attempt_stops_before_retry() {
    let slow = SlowHost {
        devices: devices::desktop_two_webcams(),
    };
    let selector = DeviceSelector::new(&slow).with_retry_delay(Duration::from_millis(50));
    let token = CancellationToken::new();

    let cancel = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    };
    let start = Instant::now();
    let (result, ()) = tokio::join!(
        selector.get_device_id_with_cancel(None, &DefaultDeviceIdChooser, &token),
        cancel
    );

    // The first attempt finishes its host calls, then the cancelled token
    // stops the run before a second one starts.
    assert_eq!(result, Err(SelectionError::Cancelled));
    assert!(start.elapsed() < HOST_LATENCY * 4);
}
