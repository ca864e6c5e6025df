use crate::foundation::core::TimeMs;
use crate::foundation::error::{EngineError, EngineResult};

/// Exit-transition length used when a [`TypewriterSpec`] leaves it unset.
pub const DEFAULT_LEAVE_MS: f64 = 650.0;

/// Phase of a typing run. Transitions are strictly forward:
/// `Typing -> Holding -> Leaving -> Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypewriterPhase {
    /// Characters are still being revealed.
    Typing,
    /// Fully revealed, waiting out the hold delay.
    Holding,
    /// Exit transition in progress.
    Leaving,
    /// Exit transition finished.
    Done,
}

/// Observable state of the active run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterState {
    /// Characters revealed so far; never exceeds `total`.
    pub revealed: usize,
    /// Character count of the full text.
    pub total: usize,
    /// Current phase of the run.
    pub phase: TypewriterPhase,
}

/// Data-only description of one typing run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterSpec {
    /// Full text to reveal.
    pub text: String,
    /// One character is revealed per interval: character `k` appears at
    /// `k * char_interval_ms` after the run starts.
    pub char_interval_ms: f64,
    /// How long the fully revealed text holds before the exit transition.
    pub hold_delay_ms: f64,
    /// Length of the exit transition between `Leaving` and `Done`.
    #[serde(default = "TypewriterSpec::default_leave_ms")]
    pub leave_ms: f64,
}

impl TypewriterSpec {
    /// Spec with the default exit-transition length.
    pub fn new(text: impl Into<String>, char_interval_ms: f64, hold_delay_ms: f64) -> Self {
        Self {
            text: text.into(),
            char_interval_ms,
            hold_delay_ms,
            leave_ms: DEFAULT_LEAVE_MS,
        }
    }

    fn default_leave_ms() -> f64 {
        DEFAULT_LEAVE_MS
    }

    fn validate(&self) -> EngineResult<()> {
        if !self.char_interval_ms.is_finite() || self.char_interval_ms <= 0.0 {
            return Err(EngineError::config("typewriter char interval must be > 0"));
        }
        if !self.hold_delay_ms.is_finite() || self.hold_delay_ms < 0.0 {
            return Err(EngineError::config("typewriter hold delay must be >= 0"));
        }
        if !self.leave_ms.is_finite() || self.leave_ms < 0.0 {
            return Err(EngineError::config("typewriter leave duration must be >= 0"));
        }
        Ok(())
    }
}

struct Run {
    chars: Vec<char>,
    revealed: usize,
    phase: TypewriterPhase,
    spec: TypewriterSpec,
    /// Stamp of the first tick that saw this run; the whole schedule is
    /// derived from it.
    started: Option<TimeMs>,
    on_reveal: Option<Box<dyn FnMut(usize)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

/// Timer-driven state machine revealing a string one character at a time.
///
/// Only one run is active per instance; starting again while active
/// cancels the prior run first, and `cancel` guarantees no character is
/// revealed and no completion fires afterwards.
#[derive(Default)]
pub struct TypewriterController {
    run: Option<Run>,
}

impl TypewriterController {
    /// Controller with no active run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run. `on_reveal` receives the revealed character count;
    /// `on_complete` fires exactly once, when the hold delay elapses and
    /// the exit transition begins.
    pub fn start(
        &mut self,
        spec: TypewriterSpec,
        on_reveal: impl FnMut(usize) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> EngineResult<()> {
        spec.validate()?;
        if self.run.is_some() {
            tracing::debug!("typewriter restarted; prior run cancelled");
        }
        self.run = Some(Run {
            chars: spec.text.chars().collect(),
            revealed: 0,
            phase: TypewriterPhase::Typing,
            spec,
            started: None,
            on_reveal: Some(Box::new(on_reveal)),
            on_complete: Some(Box::new(on_complete)),
        });
        Ok(())
    }

    /// Advance the active run to `now`. Catches up across stalled frames,
    /// revealing every character that became due.
    pub fn tick(&mut self, now: TimeMs) {
        let Some(run) = &mut self.run else {
            return;
        };
        let started = *run.started.get_or_insert(now);
        let elapsed = now.since(started);
        let total = run.chars.len();

        if run.phase == TypewriterPhase::Typing {
            let due = ((elapsed / run.spec.char_interval_ms).floor().max(0.0) as usize).min(total);
            while run.revealed < due {
                run.revealed += 1;
                if let Some(on_reveal) = &mut run.on_reveal {
                    on_reveal(run.revealed);
                }
            }
            if run.revealed == total {
                run.phase = TypewriterPhase::Holding;
                tracing::debug!(total, "typewriter holding");
            }
        }

        let reveal_end = total as f64 * run.spec.char_interval_ms;
        if run.phase == TypewriterPhase::Holding && elapsed >= reveal_end + run.spec.hold_delay_ms {
            run.phase = TypewriterPhase::Leaving;
            if let Some(on_complete) = run.on_complete.take() {
                on_complete();
            }
        }
        if run.phase == TypewriterPhase::Leaving
            && elapsed >= reveal_end + run.spec.hold_delay_ms + run.spec.leave_ms
        {
            run.phase = TypewriterPhase::Done;
            tracing::debug!("typewriter done");
        }
    }

    /// State of the active run, if any.
    pub fn state(&self) -> Option<TypewriterState> {
        self.run.as_ref().map(|run| TypewriterState {
            revealed: run.revealed,
            total: run.chars.len(),
            phase: run.phase,
        })
    }

    /// Revealed prefix of the active run's text.
    pub fn revealed_text(&self) -> Option<String> {
        self.run
            .as_ref()
            .map(|run| run.chars[..run.revealed].iter().collect())
    }

    /// Drop the active run and all its pending work. Idempotent; no
    /// reveal or completion fires afterwards.
    pub fn cancel(&mut self) {
        if self.run.take().is_some() {
            tracing::debug!("typewriter cancelled");
        }
    }

    /// Whether a run exists that has not reached `Done`.
    pub fn is_active(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.phase != TypewriterPhase::Done)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timer/typewriter.rs"]
mod tests;
