//! The disc entity shared by the player, projectiles, enemies and particles

use glam::Vec2;

use crate::consts::FADE_STEP;
use crate::renderer::Surface;

/// Stable identity used for deferred removal
pub type EntityId = u32;

/// A renderable, movable disc
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// CSS color string
    pub color: String,
    /// Displacement per tick
    pub vel: Vec2,
    pub alpha: f32,
}

impl Circle {
    /// Stationary, fully opaque disc
    pub fn new(id: EntityId, pos: Vec2, radius: f32, color: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            radius,
            color: color.into(),
            vel: Vec2::ZERO,
            alpha: 1.0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Paint the disc; leaves the surface's paint state untouched
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.save();
        surface.set_global_alpha(self.alpha);
        surface.set_fill_style(&self.color);
        surface.fill_circle(self.pos, self.radius);
        surface.restore();
    }

    /// Draw, then step position by one velocity unit
    pub fn advance(&mut self, surface: &mut impl Surface) {
        self.draw(surface);
        self.pos += self.vel;
    }

    /// Advance, damp velocity by `decay_rate`, and fade one step
    ///
    /// Alpha is not clamped and may dip just below zero; callers remove
    /// the entity once it is no longer positive.
    pub fn fade_out(&mut self, surface: &mut impl Surface, decay_rate: f32) {
        self.advance(surface);
        self.vel *= 1.0 - decay_rate;
        if self.alpha > 0.0 {
            self.alpha -= FADE_STEP;
        }
    }

    /// True once the disc lies entirely outside a `width` x `height` area
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > width
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > height
    }
}
