/// Permission status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PermissionStatus {
    /// Permission granted
    Granted,
    /// Permission denied
    Denied,
    /// Permission not determined (no prompt yet, or no way to tell)
    NotDetermined,
}

impl PermissionStatus {
    /// Whether media access may still succeed with this status
    pub fn allows_access(&self) -> bool {
        matches!(self, PermissionStatus::Granted | PermissionStatus::NotDetermined)
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
            PermissionStatus::NotDetermined => write!(f, "not_determined"),
        }
    }
}

/// Detailed permission information
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PermissionInfo {
    pub status: PermissionStatus,
    pub message: String,
    pub can_request: bool,
}

/// Check camera permission status for the current platform
pub fn check_permission() -> PermissionStatus {
    check_permission_detailed().status
}

/// Check camera permission status with detailed information
pub fn check_permission_detailed() -> PermissionInfo {
    #[cfg(target_os = "linux")]
    {
        check_permission_linux()
    }

    #[cfg(not(target_os = "linux"))]
    {
        // Other hosts decide at stream-open time, which is exactly what the
        // enumerator's transient access request triggers.
        PermissionInfo {
            status: PermissionStatus::NotDetermined,
            message: "Permission is resolved when the camera is first opened".to_string(),
            can_request: true,
        }
    }
}

#[cfg(target_os = "linux")]
fn check_permission_linux() -> PermissionInfo {
    use std::fs::OpenOptions;
    use std::io::ErrorKind;
    use std::path::Path;

    let video_nodes: Vec<String> = (0..10)
        .map(|i| format!("/dev/video{}", i))
        .filter(|path| Path::new(path).exists())
        .collect();

    let Some(first_node) = video_nodes.first() else {
        return PermissionInfo {
            status: PermissionStatus::NotDetermined,
            message: "No video devices found at /dev/video*".to_string(),
            can_request: false,
        };
    };

    match OpenOptions::new().read(true).open(first_node) {
        Ok(_) => PermissionInfo {
            status: PermissionStatus::Granted,
            message: format!(
                "Camera access granted ({} of {} video nodes readable)",
                first_node,
                video_nodes.len()
            ),
            can_request: false,
        },
        Err(e) if e.kind() == ErrorKind::PermissionDenied => PermissionInfo {
            status: PermissionStatus::Denied,
            message: format!(
                "Cannot open {} - add the user to the video group: sudo usermod -a -G video $USER",
                first_node
            ),
            can_request: false,
        },
        // Busy or transient errors say nothing about permission
        Err(e) => PermissionInfo {
            status: PermissionStatus::NotDetermined,
            message: format!("Cannot probe {}: {}", first_node, e),
            can_request: true,
        },
    }
}
