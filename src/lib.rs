//! Scrollkit is a deterministic scroll-progress animation engine.
//!
//! It maps continuous viewport scroll position and host-driven frame/timer
//! ticks into coordinated visual state transitions: staged reveals, pinned
//! regions with internal horizontal traversal, numeric count-ups, timed
//! typing sequences, and autoplaying carousels.
//!
//! # Pipeline overview
//!
//! 1. **Observe**: the host forwards scroll/resize events into a single
//!    [`ViewportObserver`] ingestion point (fan-out happens inside it).
//! 2. **Trigger**: the [`TriggerRegistry`] evaluates every registered
//!    region against the latest [`ScrollSample`], in registration order,
//!    deriving clamped progress and a lifecycle state.
//! 3. **Animate**: pin regions convert progress into a bounded content
//!    offset; counter regions start one-shot tweens on the shared
//!    [`TweenScheduler`], which the host advances once per frame.
//!
//! [`CarouselController`] and [`TypewriterController`] are standalone
//! timer state machines, independent of scroll.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: the engine never reads a wall clock;
//!   every time-driven component is advanced with explicit [`TimeMs`]
//!   stamps, so a given input sequence always produces the same output.
//! - **Scoped teardown everywhere**: every registration returns a
//!   disposer; disposers are idempotent and guarantee no callback fires
//!   after teardown. Consumers mount and unmount repeatedly, so this is
//!   the central cross-cutting contract.
//! - **Degraded, never broken**: malformed input is absorbed (warned and
//!   clamped); the worst case is a static, non-animated presentation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod engine;
mod foundation;
mod timer;
mod trigger;
mod tween;
mod viewport;

pub use animation::ease::Ease;
pub use engine::{ScrollEngine, load_decls};
pub use foundation::core::{Rect, TimeMs, clamp01, lerp};
pub use foundation::error::{EngineError, EngineResult};
pub use timer::carousel::{CarouselController, CarouselState, DEFAULT_INTERVAL_MS};
pub use timer::typewriter::{
    DEFAULT_LEAVE_MS, TypewriterController, TypewriterPhase, TypewriterSpec, TypewriterState,
};
pub use trigger::pin::{PinExtents, PinPlacement};
pub use trigger::registry::{
    RegionDecl, RegionHandle, RegionMode, RegionState, TriggerConfig, TriggerRegistry,
};
pub use tween::counter::{CounterSpec, animate_counter};
pub use tween::scheduler::{TweenHandle, TweenScheduler, TweenSpec};
pub use viewport::observer::{ScrollSample, Subscription, ViewportObserver};
