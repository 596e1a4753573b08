//! Rendering
//!
//! The simulation draws through the `Surface` trait: filled discs and
//! rectangles plus save/restore of transient paint state. On the web this
//! is a 2D canvas context; tests and headless runs record the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

/// Drawing primitives the game needs
pub trait Surface {
    /// Push the current paint state (alpha, fill style)
    fn save(&mut self);
    /// Pop back to the last saved paint state
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f32);
    /// CSS color string
    fn set_fill_style(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
}
