//! crabselect: facing-mode aware camera device selection
//!
//! Picks a camera device id from whatever video inputs the host media API
//! exposes, preferring cameras whose label matches the requested facing mode
//! and a camera name token, and retrying for a while when the host has not
//! finished populating device labels.
//!
//! # Features
//! - Front/rear inference from device labels
//! - Bounded, cancellable retry while labels settle after a permission grant
//! - Pluggable choice policy with a sensible default
//! - Host platform behind a trait, with a nokhwa backend (`native` feature)
//!
//! # Usage
//! ```rust,ignore
//! use crabselect::{get_device_id, FacingMode, NativePlatform};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), crabselect::SelectionError> {
//!     crabselect::init_logging();
//!     let device_id = get_device_id(NativePlatform::new(), Some(FacingMode::Environment)).await?;
//!     println!("{:?}", device_id);
//!     Ok(())
//! }
//! ```
pub mod config;
pub mod enumerator;
pub mod errors;
pub mod pattern;
pub mod permissions;
pub mod platform;
pub mod selector;
pub mod types;

// Testing utilities - scripted host platform for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::{LoggingConfig, SelectionConfig, SelectorConfig};
pub use enumerator::DeviceEnumerator;
pub use errors::{CameraError, SelectionError};
pub use pattern::{get_facing_mode_pattern, FacingModePattern};
#[cfg(feature = "native")]
pub use platform::NativePlatform;
pub use platform::{MediaPlatform, MediaStream};
pub use selector::{
    get_device_id, get_device_id_with, ChoicePolicy, DefaultDeviceIdChooser, DeviceSelector,
    DEFAULT_CAMERA_NAME_TOKEN, MAX_RETRIES, RETRY_DELAY_MS,
};
pub use types::{Device, DeviceKind, EnumerationResult, FacingMode, MediaConstraints};

/// Initialize logging with the default filter
pub fn init_logging() {
    init_logging_with(&LoggingConfig::default());
}

/// Initialize logging, using the configured filter when RUST_LOG is unset
pub fn init_logging_with(config: &LoggingConfig) {
    let env = env_logger::Env::default().default_filter_or(config.filter.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        native_backend: cfg!(feature = "native"),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub native_backend: bool,
}
