//! Device listings modelled on real hosts
//!
//! Labels follow what browsers and OS capture stacks actually report, so the
//! facing-mode patterns and the default camera token are exercised the way
//! they are in the field.

use crate::types::{Device, DeviceKind};

/// Typical Android phone: two rear sensors, one front, plus audio endpoints.
///
/// The primary rear camera is labelled "camera2 0, facing back".
pub fn android_phone() -> Vec<Device> {
    vec![
        Device::new("default-mic", DeviceKind::AudioInput, "Default"),
        Device::video_input("a1f3", "camera2 1, facing front"),
        Device::video_input("9c07", "camera2 2, facing back"),
        Device::video_input("5e21", "camera2 0, facing back"),
        Device::new("speaker", DeviceKind::AudioOutput, "Speakerphone"),
    ]
}

/// The same phone before permission is granted: ids present, labels empty.
pub fn android_phone_unlabelled() -> Vec<Device> {
    android_phone()
        .into_iter()
        .map(|mut device| {
            device.label.clear();
            device
        })
        .collect()
}

/// Laptop with a single integrated webcam
pub fn laptop() -> Vec<Device> {
    vec![
        Device::video_input("0", "Integrated Camera (04f2:b6d9)"),
        Device::new("1", DeviceKind::AudioInput, "Built-in Microphone"),
    ]
}

/// Desktop with two USB webcams whose labels say nothing about orientation
pub fn desktop_two_webcams() -> Vec<Device> {
    vec![
        Device::video_input("0", "OBSBOT Tiny 4K Camera"),
        Device::video_input("1", "Logitech BRIO"),
        Device::new("2", DeviceKind::AudioInput, "OBSBOT Tiny 4K Microphone"),
    ]
}

/// Audio-only host
pub fn no_cameras() -> Vec<Device> {
    vec![
        Device::new("0", DeviceKind::AudioInput, "USB Audio Interface"),
        Device::new("1", DeviceKind::AudioOutput, "HDMI Output"),
    ]
}
