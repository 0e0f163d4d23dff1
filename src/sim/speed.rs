//! Velocity magnitude clamping

use glam::Vec2;

/// Clamp `velocity` to a magnitude in `[min, max]`, keeping its direction.
///
/// A zero vector has no direction, so it is brought up to `min` along
/// `fallback_heading` (or `+x` if that is zero too). The same applies to a
/// NaN velocity. Huge or infinite components are clamped to `max` along
/// their own direction; the length is never computed in a way that overflows.
pub fn limit_speed(velocity: Vec2, min: f32, max: f32, fallback_heading: Vec2) -> Vec2 {
    match heading_and_speed(velocity) {
        Some((heading, speed)) if speed > max => heading * max,
        Some((heading, speed)) if speed < min => heading * min,
        Some(_) => velocity,
        None => fallback_heading.try_normalize().unwrap_or(Vec2::X) * min,
    }
}

/// Unit direction and length of `v`, or `None` when it has no direction
fn heading_and_speed(v: Vec2) -> Option<(Vec2, f32)> {
    if v.is_nan() {
        return None;
    }

    if !v.is_finite() {
        let toward = |c: f32| if c.is_infinite() { c.signum() } else { 0.0 };
        let heading = Vec2::new(toward(v.x), toward(v.y)).normalize();
        return Some((heading, f32::INFINITY));
    }

    // Scale into [-1, 1] first so x*x + y*y cannot overflow
    let scale = v.abs().max_element();
    if scale == 0.0 {
        return None;
    }
    let unit = v / scale;
    let len = unit.length();
    Some((unit / len, scale * len))
}
