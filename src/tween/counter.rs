use crate::animation::ease::Ease;
use crate::foundation::error::EngineResult;
use crate::tween::scheduler::{TweenHandle, TweenScheduler, TweenSpec};

/// Data-only description of a count-up display.
///
/// The default easing matches the decelerating curve promotional stat
/// blocks typically use.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterSpec {
    /// Value the display counts up to, starting from zero.
    pub target: u64,
    /// Length of the count-up. Must be positive and finite.
    pub duration_ms: f64,
    /// Curve applied to the count; defaults to [`Ease::OutQuad`].
    #[serde(default = "CounterSpec::default_ease")]
    pub ease: Ease,
}

impl CounterSpec {
    /// Count-up to `target` with the default easing.
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            ease: Self::default_ease(),
        }
    }

    fn default_ease() -> Ease {
        Ease::OutQuad
    }
}

/// One-shot integer count-up on top of the tween scheduler.
///
/// `on_value` receives the floored integer display value; the final call
/// reports exactly `spec.target`. The "fires at most once per region"
/// guarantee is enforced by the trigger registry, which starts the counter
/// only on the first activation of its owning region.
pub fn animate_counter(
    scheduler: &mut TweenScheduler,
    spec: CounterSpec,
    mut on_value: impl FnMut(u64) + 'static,
) -> EngineResult<TweenHandle> {
    let tween = TweenSpec::new(0.0, spec.target as f64, spec.duration_ms).with_ease(spec.ease);
    scheduler.start(tween, move |v| {
        // `v` stays within [0, target] because every easing curve is
        // bounded to [0, 1].
        on_value(v.floor().max(0.0) as u64);
    })
}
