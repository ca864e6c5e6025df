use crate::foundation::core::TimeMs;
use crate::foundation::error::{EngineError, EngineResult};

/// Autoplay interval used when the caller does not supply one.
pub const DEFAULT_INTERVAL_MS: f64 = 4000.0;

/// Snapshot of a carousel's observable state.
///
/// Invariant: `0 <= index < total` at all times; navigation wraps rather
/// than overflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CarouselState {
    /// Currently displayed slide.
    pub index: usize,
    /// Slide count; always positive.
    pub total: usize,
    /// Whether autoplay is suspended.
    pub paused: bool,
}

/// Timer-driven state machine cycling a bounded index.
///
/// Autoplay is expressed through `pause`/`resume` only; whatever input
/// (hover, focus, visibility) should suspend the carousel is the caller's
/// business. The host loop drives automatic advances via `tick(now)`.
pub struct CarouselController {
    state: CarouselState,
    interval_ms: f64,
    /// Next automatic advance. `None` while paused, destroyed, or not yet
    /// armed; armed on the first tick after creation or resume.
    deadline: Option<TimeMs>,
    destroyed: bool,
    on_change: Option<Box<dyn FnMut(usize)>>,
}

impl CarouselController {
    /// Create a running carousel over `total` slides.
    pub fn new(total: usize, interval_ms: f64) -> EngineResult<Self> {
        if total == 0 {
            return Err(EngineError::config("carousel total must be > 0"));
        }
        if !interval_ms.is_finite() || interval_ms <= 0.0 {
            return Err(EngineError::config("carousel interval must be > 0"));
        }
        Ok(Self {
            state: CarouselState {
                index: 0,
                total,
                paused: false,
            },
            interval_ms,
            deadline: None,
            destroyed: false,
            on_change: None,
        })
    }

    /// Observe every index change, manual and automatic.
    pub fn with_on_change(mut self, on_change: impl FnMut(usize) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Advance one slide, wrapping at the end.
    pub fn next(&mut self) {
        if self.destroyed {
            return;
        }
        self.set_index((self.state.index + 1) % self.state.total);
    }

    /// Go back one slide, wrapping at the start.
    pub fn prev(&mut self) {
        if self.destroyed {
            return;
        }
        self.set_index((self.state.index + self.state.total - 1) % self.state.total);
    }

    /// Jump to a slide. Out-of-range indices are rejected, never clamped.
    pub fn go_to(&mut self, index: usize) -> EngineResult<()> {
        if index >= self.state.total {
            return Err(EngineError::config(format!(
                "carousel index {index} out of range (total {})",
                self.state.total
            )));
        }
        if !self.destroyed {
            self.set_index(index);
        }
        Ok(())
    }

    /// Stop autoplay immediately: the pending advance is dropped, so no
    /// in-flight advance fires after this call.
    pub fn pause(&mut self) {
        self.state.paused = true;
        self.deadline = None;
    }

    /// Restart autoplay with a full interval, measured from the next tick.
    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        self.state.paused = false;
        self.deadline = None;
    }

    /// Perform automatic advances due at `now`. Catches up if the host
    /// loop stalled across several intervals.
    pub fn tick(&mut self, now: TimeMs) {
        if self.destroyed || self.state.paused {
            return;
        }
        if self.deadline.is_none() {
            self.deadline = Some(now.plus(self.interval_ms));
        }
        while let Some(deadline) = self.deadline {
            if self.destroyed || self.state.paused || now < deadline {
                break;
            }
            self.set_index((self.state.index + 1) % self.state.total);
            self.deadline = Some(deadline.plus(self.interval_ms));
        }
    }

    /// Tear down the controller. Idempotent; no callback fires afterwards.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.deadline = None;
        self.on_change = None;
    }

    /// Whether `destroy` has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn set_index(&mut self, index: usize) {
        self.state.index = index;
        if let Some(on_change) = &mut self.on_change {
            on_change(index);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timer/carousel.rs"]
mod tests;
