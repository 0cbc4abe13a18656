//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// Lengths below this are treated as zero by [`Vec2Ext::normalize_or_self`].
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// 2D helpers that `glam::Vec2` does not provide with the semantics we need.
pub trait Vec2Ext {
    /// Unit vector in the same direction, or `self` unchanged when the length
    /// is below [`NORMALIZE_EPSILON`].
    fn normalize_or_self(self) -> Self;

    /// Unit vector pointing at `radians` from the +X axis.
    fn unit_from_angle(radians: f32) -> Self;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn normalize_or_self(self) -> Self {
        let length = self.length();
        if length < NORMALIZE_EPSILON {
            self
        } else {
            self / length
        }
    }

    #[inline]
    fn unit_from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(cos, sin)
    }
}
