//! Platform abstraction layer
//!
//! Handles browser specifics:
//! - Scheduling (animation frames, repeating intervals, zero-delay defers)
//! - Startup precondition checks (window, canvas, display elements)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;

/// Cancellation token for a scheduled animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Cancellation token for a repeating interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalHandle(pub i32);

/// A missing piece of the page the game cannot start without
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    NoWindow,
    NoDocument,
    /// Element lookup by selector failed
    MissingElement(&'static str),
    /// Element exists but is not the expected type
    WrongElementType(&'static str),
    NoContext2d,
    /// A browser API call was rejected
    Js(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::NoWindow => write!(f, "no window"),
            StartupError::NoDocument => write!(f, "no document"),
            StartupError::MissingElement(sel) => write!(f, "missing element {}", sel),
            StartupError::WrongElementType(sel) => write!(f, "element {} has the wrong type", sel),
            StartupError::NoContext2d => write!(f, "canvas has no 2d context"),
            StartupError::Js(msg) => write!(f, "browser error: {}", msg),
        }
    }
}

impl std::error::Error for StartupError {}
