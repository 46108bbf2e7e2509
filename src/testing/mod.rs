//! Testing utilities for crabselect
//!
//! A scripted host platform plus device listings taken from real hardware,
//! for exercising selection without cameras or permission prompts.

pub mod devices;
pub mod scripted_platform;

pub use scripted_platform::{ScriptedPlatform, ScriptedStream};
