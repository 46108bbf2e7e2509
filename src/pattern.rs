//! Facing-mode label patterns
//!
//! Camera labels rarely carry structured orientation data, so the facing mode
//! is inferred from well-known words in the label text.

use crate::types::FacingMode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENVIRONMENT_PATTERN: Regex =
        Regex::new(r"(?i)rear|back|environment").expect("environment pattern is valid");
    static ref USER_PATTERN: Regex =
        Regex::new(r"(?i)front|user|face").expect("user pattern is valid");
}

/// Case-insensitive matcher for labels describing one camera orientation
#[derive(Debug, Clone)]
pub struct FacingModePattern {
    regex: Regex,
}

impl FacingModePattern {
    pub fn for_mode(facing_mode: Option<FacingMode>) -> Self {
        let regex = match facing_mode {
            Some(FacingMode::Environment) => ENVIRONMENT_PATTERN.clone(),
            _ => USER_PATTERN.clone(),
        };
        Self { regex }
    }

    /// Same mapping over raw strings; unknown tokens select the front pattern.
    pub fn from_token(token: &str) -> Self {
        Self::for_mode(FacingMode::parse(token))
    }

    pub fn is_match(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Pattern for the given facing mode. `Environment` matches rear cameras,
/// everything else (including unset) matches front cameras.
pub fn get_facing_mode_pattern(facing_mode: Option<FacingMode>) -> FacingModePattern {
    FacingModePattern::for_mode(facing_mode)
}
