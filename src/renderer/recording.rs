//! In-memory surface that records draw calls

use glam::Vec2;

use super::Surface;

/// A recorded primitive, with the paint state it was drawn under
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        alpha: f32,
    },
}

#[derive(Debug, Clone)]
struct PaintState {
    alpha: f32,
    fill: String,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fill: "black".to_string(),
        }
    }
}

/// Surface used by tests and the native headless runner
///
/// With recording disabled it only tracks paint state, which keeps long
/// headless sessions from accumulating thousands of commands per tick.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    current: PaintState,
    stack: Vec<PaintState>,
    commands: Vec<DrawCommand>,
    record: bool,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            current: PaintState::default(),
            stack: Vec::new(),
            commands: Vec::new(),
            record: true,
        }
    }

    /// Surface that tracks state but keeps no command log
    pub fn discarding() -> Self {
        Self {
            record: false,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Current global alpha
    pub fn global_alpha(&self) -> f32 {
        self.current.alpha
    }

    /// Current fill style
    pub fn fill_style(&self) -> &str {
        &self.current.fill
    }

    /// Number of unmatched `save` calls
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    fn restore(&mut self) {
        // Canvas ignores restore without a matching save
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // Canvas ignores out-of-range alpha
        if (0.0..=1.0).contains(&alpha) {
            self.current.alpha = alpha;
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        self.current.fill = color.to_string();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.record {
            self.commands.push(DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color: self.current.fill.clone(),
                alpha: self.current.alpha,
            });
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        if self.record {
            self.commands.push(DrawCommand::Circle {
                center,
                radius,
                color: self.current.fill.clone(),
                alpha: self.current.alpha,
            });
        }
    }
}
