use std::cell::Cell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::core::{TimeMs, clamp01, lerp};
use crate::foundation::error::{EngineError, EngineResult};

/// Data-only description of a time-based interpolation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Value at `t = 0`.
    pub from: f64,
    /// Value at `t = 1`.
    pub to: f64,
    /// Length of the interpolation. Must be positive and finite.
    pub duration_ms: f64,
    /// Curve applied to `t` before interpolating.
    #[serde(default)]
    pub ease: Ease,
    /// Delay before `t` starts counting. This is what per-item stagger
    /// delays compile down to.
    #[serde(default)]
    pub delay_ms: f64,
}

impl TweenSpec {
    /// Linear tween with no delay.
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            ease: Ease::Linear,
            delay_ms: 0.0,
        }
    }

    /// Replace the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the start delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn validate(&self) -> EngineResult<()> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(EngineError::config("tween duration must be > 0"));
        }
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(EngineError::config("tween delay must be >= 0"));
        }
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(EngineError::config("tween endpoints must be finite"));
        }
        Ok(())
    }
}

struct ActiveTween {
    spec: TweenSpec,
    /// Stamp of the first tick that saw this tween; `t` counts from here.
    started: Option<TimeMs>,
    cancelled: Rc<Cell<bool>>,
    finished: bool,
    on_update: Box<dyn FnMut(f64)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

/// Cancellation handle for a single tween.
///
/// Cancellation is checked immediately before every callback invocation,
/// so a cancelled tween never fires again, even within the current tick.
#[derive(Clone, Debug)]
pub struct TweenHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TweenHandle {
    /// Cancel the tween. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Shared per-frame execution loop for all time-based interpolations.
///
/// Each tween owns independent state; concurrent tweens never interfere.
/// The relative callback order between different tweens is unspecified,
/// but each individual tween observes monotonically non-decreasing `t`.
#[derive(Default)]
pub struct TweenScheduler {
    tweens: Vec<ActiveTween>,
}

impl TweenScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween with an update callback only.
    pub fn start(
        &mut self,
        spec: TweenSpec,
        on_update: impl FnMut(f64) + 'static,
    ) -> EngineResult<TweenHandle> {
        self.push(spec, Box::new(on_update), None)
    }

    /// Start a tween with both callbacks. `on_complete` fires exactly once,
    /// when `t` reaches 1, unless cancelled first.
    pub fn start_with(
        &mut self,
        spec: TweenSpec,
        on_update: impl FnMut(f64) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> EngineResult<TweenHandle> {
        self.push(spec, Box::new(on_update), Some(Box::new(on_complete)))
    }

    fn push(
        &mut self,
        spec: TweenSpec,
        on_update: Box<dyn FnMut(f64)>,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> EngineResult<TweenHandle> {
        spec.validate()?;
        let cancelled = Rc::new(Cell::new(false));
        self.tweens.push(ActiveTween {
            spec,
            started: None,
            cancelled: Rc::clone(&cancelled),
            finished: false,
            on_update,
            on_complete,
        });
        Ok(TweenHandle { cancelled })
    }

    /// Advance every live tween to `now`.
    pub fn tick(&mut self, now: TimeMs) {
        for tw in &mut self.tweens {
            if tw.finished {
                continue;
            }
            if tw.cancelled.get() {
                tw.finished = true;
                continue;
            }

            let started = *tw.started.get_or_insert(now);
            let local = now.since(started) - tw.spec.delay_ms;
            if local < 0.0 {
                continue;
            }

            let t = clamp01(local / tw.spec.duration_ms);
            let value = lerp(tw.spec.from, tw.spec.to, tw.spec.ease.apply(t));

            (tw.on_update)(value);
            if t >= 1.0 {
                tw.finished = true;
                if !tw.cancelled.get()
                    && let Some(done) = tw.on_complete.take()
                {
                    done();
                }
            }
        }
        self.tweens.retain(|tw| !tw.finished);
    }

    /// Number of tweens still scheduled.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
