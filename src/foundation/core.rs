/// Host-supplied timestamp in milliseconds.
///
/// The engine never reads a wall clock; every time-driven component is
/// advanced by the host loop passing the current stamp into `tick`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct TimeMs(pub f64);

impl TimeMs {
    /// Origin stamp, used before the host has published anything.
    pub const ZERO: TimeMs = TimeMs(0.0);

    /// Milliseconds elapsed since `earlier`. Negative if `earlier` is later.
    pub fn since(self, earlier: TimeMs) -> f64 {
        self.0 - earlier.0
    }

    /// Stamp shifted forward by `ms`.
    pub fn plus(self, ms: f64) -> TimeMs {
        TimeMs(self.0 + ms)
    }
}

/// Axis-aligned bounds of an anchor element, in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Bounds from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// An anchor is measurable when its bounds are finite and non-empty.
    /// Unattached or zero-size anchors keep their region idle forever.
    pub fn is_measurable(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Clamp to `[0, 1]`, mapping NaN to `0.0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b`.
///
/// Returns `b` exactly once `t` reaches 1, so completed tweens land on
/// their target without floating-point rounding short of it.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
