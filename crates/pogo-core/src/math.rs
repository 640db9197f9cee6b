//! Scalar helpers

/// Linearly map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// No clamping is performed; values outside the source range extrapolate.
pub fn map_range(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    (value - from_min) * (to_max - to_min) / (from_max - from_min) + to_min
}

/// Clamp `value` into `[from_min, from_max]`, then map it onto `[to_min, to_max]`.
///
/// The result never leaves the destination range.
pub fn remap_clamped(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    let clamped = value.clamp(from_min, from_max);
    map_range(clamped, from_min, from_max, to_min, to_max)
}
