// extensions/math.rs
//
// Small scalar and vector helpers used around scene code.
// No dependencies on Node/Scene, just math.

use glam::Vec3;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, as a fraction.
/// Returns 0.0 when `a == b`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Map `value` from the range `[in_min, in_max]` onto `[out_min, out_max]`.
/// Not clamped.
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    lerp(out_min, out_max, inverse_lerp(in_min, in_max, value))
}

/// Step `from` toward `to` by at most `delta`, without overshooting.
#[inline]
pub fn move_toward(from: f32, to: f32, delta: f32) -> f32 {
    if (to - from).abs() <= delta {
        to
    } else {
        from + (to - from).signum() * delta
    }
}

/// Round `value` to the nearest multiple of `step`. A zero step leaves it unchanged.
#[inline]
pub fn snapped(value: f32, step: f32) -> f32 {
    if step == 0.0 {
        value
    } else {
        (value / step).round() * step
    }
}

/// Distance between two points on the ground plane (Y ignored).
#[inline]
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).with_y(0.0).length()
}
