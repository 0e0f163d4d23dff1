//! Soft playfield containment
//!
//! Agents outside the inner rectangle get a constant velocity impulse back
//! toward it on each offending axis. Positions are never clamped.

use glam::Vec2;

/// Axis-aligned rectangle the flock is steered to stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl InnerRect {
    /// Rectangle `[margin, extent - margin]` on each axis
    pub fn inset(extent: Vec2, margin: f32) -> Self {
        Self {
            min: Vec2::splat(margin),
            max: extent - Vec2::splat(margin),
        }
    }

    /// Width and height
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Velocity impulse for an agent at `position`.
///
/// Each axis is handled independently, so a corner yields an impulse on both.
/// The magnitude does not grow with how far outside the agent is.
pub fn margin_impulse(position: Vec2, inner: &InnerRect, turn_factor: f32) -> Vec2 {
    let mut impulse = Vec2::ZERO;

    if position.x < inner.min.x {
        impulse.x += turn_factor;
    }
    if position.x > inner.max.x {
        impulse.x -= turn_factor;
    }
    if position.y < inner.min.y {
        impulse.y += turn_factor;
    }
    if position.y > inner.max.y {
        impulse.y -= turn_factor;
    }

    impulse
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> InnerRect {
        InnerRect::inset(Vec2::new(1200.0, 800.0), 200.0)
    }

    #[test]
    fn test_inset() {
        let rect = field();
        assert_eq!(rect.min, Vec2::new(200.0, 200.0));
        assert_eq!(rect.max, Vec2::new(1000.0, 600.0));
        assert_eq!(rect.size(), Vec2::new(800.0, 400.0));
    }

    #[test]
    fn test_inside_gets_no_impulse() {
        let rect = field();
        assert_eq!(margin_impulse(Vec2::new(600.0, 400.0), &rect, 1.0), Vec2::ZERO);
        // Bounds themselves are inside
        assert_eq!(margin_impulse(Vec2::new(200.0, 600.0), &rect, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_each_edge() {
        let rect = field();
        assert_eq!(
            margin_impulse(Vec2::new(199.0, 400.0), &rect, 0.5),
            Vec2::new(0.5, 0.0)
        );
        assert_eq!(
            margin_impulse(Vec2::new(1001.0, 400.0), &rect, 0.5),
            Vec2::new(-0.5, 0.0)
        );
        assert_eq!(
            margin_impulse(Vec2::new(600.0, 150.0), &rect, 0.5),
            Vec2::new(0.0, 0.5)
        );
        assert_eq!(
            margin_impulse(Vec2::new(600.0, 700.0), &rect, 0.5),
            Vec2::new(0.0, -0.5)
        );
    }

    #[test]
    fn test_corner_triggers_both_axes() {
        let rect = field();
        assert_eq!(
            margin_impulse(Vec2::new(1100.0, 50.0), &rect, 1.0),
            Vec2::new(-1.0, 1.0)
        );
    }

    #[test]
    fn test_impulse_independent_of_depth() {
        let rect = field();
        let shallow = margin_impulse(Vec2::new(199.0, 400.0), &rect, 1.0);
        let deep = margin_impulse(Vec2::new(-5000.0, 400.0), &rect, 1.0);
        assert_eq!(shallow, deep);
    }
}
