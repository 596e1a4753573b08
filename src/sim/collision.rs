//! Circle overlap test

use super::circle::Circle;
use crate::consts::COLLISION_TOLERANCE;

/// True when the gap between the two edges is below `COLLISION_TOLERANCE`
///
/// Tangent circles (gap 0) count as colliding, as do circles up to one
/// unit apart.
#[inline]
pub fn detect_collision(a: &Circle, b: &Circle) -> bool {
    let distance = a.pos.distance(b.pos);
    distance - (a.radius + b.radius) < COLLISION_TOLERANCE
}
