/// Easing curve mapping normalized time `[0, 1]` to normalized progress `[0, 1]`.
///
/// Every curve is monotonically non-decreasing with `apply(0) = 0` and
/// `apply(1) = 1`, which is what keeps counter and reveal values monotone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant rate.
    #[default]
    Linear,
    /// Quadratic, accelerating from rest.
    InQuad,
    /// Quadratic, decelerating to rest.
    OutQuad,
    /// Quadratic, accelerating then decelerating.
    InOutQuad,
    /// Cubic, accelerating from rest.
    InCubic,
    /// Cubic, decelerating to rest.
    OutCubic,
    /// Cubic, accelerating then decelerating.
    InOutCubic,
}

impl Ease {
    /// Evaluate the curve. Input is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => t * (2.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
