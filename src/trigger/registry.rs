use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::foundation::core::{Rect, clamp01};
use crate::foundation::error::{EngineError, EngineResult};
use crate::trigger::pin::{PinDrive, PinExtents, PinPlacement};
use crate::tween::counter::{CounterSpec, animate_counter};
use crate::tween::scheduler::{TweenHandle, TweenScheduler};
use crate::viewport::observer::ScrollSample;

/// How a trigger region interprets its scroll progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionMode {
    /// Progress drives a staged reveal directly.
    #[default]
    Reveal,
    /// Progress locks the region to the viewport and drives an internal
    /// content offset. Requires [`RegionDecl::pin`].
    Pin,
    /// First activation starts a one-shot count-up. Requires
    /// [`RegionDecl::counter`].
    Counter,
}

/// Lifecycle state reported alongside progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    /// Progress at 0, below the region's range.
    Idle,
    /// Progress strictly inside the range.
    Entering,
    /// Progress at 1 on a repeating region.
    Active,
    /// Inside the range with the content held to the viewport.
    Pinned,
    /// Progress reached 1 on a once-region; latched for good.
    Done,
}

/// Data-only part of a region registration.
///
/// Declarations are plain serde data so whole page sections can be
/// described in JSON and instantiated with callbacks in code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionDecl {
    /// Caller-supplied identity, unique among live regions.
    pub id: String,
    /// Bounds of the owning visual element. Unmeasurable bounds keep the
    /// region idle forever (degraded, non-fatal).
    pub anchor: Rect,
    /// Scroll offset at which progress leaves 0.
    pub start_offset: f64,
    /// Scroll offset at which progress reaches 1. Must exceed `start_offset`.
    pub end_offset: f64,
    /// How scroll progress is interpreted.
    #[serde(default)]
    pub mode: RegionMode,
    /// Once-regions latch at `Done` and are skipped on later ticks.
    #[serde(default)]
    pub once: bool,
    /// Per-item scroll-offset shift applied by [`TriggerRegistry::register_batch`]:
    /// item `i` starts `i * stagger` later, so a batch activates in sequence.
    #[serde(default)]
    pub stagger: f64,
    /// Traversal extents, required for `mode: pin`.
    #[serde(default)]
    pub pin: Option<PinExtents>,
    /// Count-up description, required for `mode: counter`.
    #[serde(default)]
    pub counter: Option<CounterSpec>,
}

impl RegionDecl {
    /// Minimal reveal declaration.
    pub fn reveal(id: impl Into<String>, anchor: Rect, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            anchor,
            start_offset: start,
            end_offset: end,
            mode: RegionMode::Reveal,
            once: false,
            stagger: 0.0,
            pin: None,
            counter: None,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if !self.start_offset.is_finite() || !self.end_offset.is_finite() {
            return Err(EngineError::config(format!(
                "region '{}': offsets must be finite",
                self.id
            )));
        }
        if self.end_offset <= self.start_offset {
            return Err(EngineError::config(format!(
                "region '{}': end_offset must exceed start_offset",
                self.id
            )));
        }
        if self.mode == RegionMode::Pin && self.pin.is_none() {
            return Err(EngineError::config(format!(
                "region '{}': pin mode requires pin extents",
                self.id
            )));
        }
        if self.mode == RegionMode::Counter && self.counter.is_none() {
            return Err(EngineError::config(format!(
                "region '{}': counter mode requires a counter spec",
                self.id
            )));
        }
        if let Some(counter) = &self.counter
            && (!counter.duration_ms.is_finite() || counter.duration_ms <= 0.0)
        {
            return Err(EngineError::config(format!(
                "region '{}': counter duration must be > 0",
                self.id
            )));
        }
        Ok(())
    }

    fn shifted(mut self, by: f64) -> Self {
        self.start_offset += by;
        self.end_offset += by;
        self
    }
}

type UpdateFn = Box<dyn FnMut(f64, RegionState)>;
type OffsetFn = Box<dyn FnMut(f64)>;
type ValueFn = Box<dyn FnMut(u64)>;

/// Full region registration: declaration plus callbacks.
pub struct TriggerConfig {
    /// Data-only half of the registration.
    pub decl: RegionDecl,
    on_update: Option<UpdateFn>,
    on_pin_offset: Option<OffsetFn>,
    on_counter_value: Option<ValueFn>,
}

impl TriggerConfig {
    /// Pair a declaration with its progress callback.
    pub fn new(decl: RegionDecl, on_update: impl FnMut(f64, RegionState) + 'static) -> Self {
        Self {
            decl,
            on_update: Some(Box::new(on_update)),
            on_pin_offset: None,
            on_counter_value: None,
        }
    }

    /// Receive the pinned content offset whenever it changes.
    pub fn with_pin_offset(mut self, on_offset: impl FnMut(f64) + 'static) -> Self {
        self.on_pin_offset = Some(Box::new(on_offset));
        self
    }

    /// Receive floored count-up values once the region first activates.
    /// Required for `mode: counter`.
    pub fn with_counter_value(mut self, on_value: impl FnMut(u64) + 'static) -> Self {
        self.on_counter_value = Some(Box::new(on_value));
        self
    }
}

struct Region {
    decl: RegionDecl,
    state: RegionState,
    last_progress: f64,
    measurable: bool,
    removed: bool,
    warned_nonfinite: bool,
    counter_fired: bool,
    counter_handle: Option<TweenHandle>,
    pin: Option<PinDrive>,
    on_update: Option<UpdateFn>,
    on_pin_offset: Option<OffsetFn>,
    on_counter_value: Option<ValueFn>,
}

impl Region {
    fn derive_state(&self, progress: f64) -> RegionState {
        if progress <= 0.0 {
            RegionState::Idle
        } else if progress < 1.0 {
            match (&self.decl.mode, &self.pin) {
                (RegionMode::Pin, Some(drive)) if drive.extents().needs_traversal() => {
                    RegionState::Pinned
                }
                _ => RegionState::Entering,
            }
        } else if self.decl.once {
            RegionState::Done
        } else {
            RegionState::Active
        }
    }
}

/// Disposer and re-measurement handle for one registered region.
///
/// `unregister` is the teardown half of the scoped acquisition contract:
/// it is idempotent, cancels any tween or pin state the region owns, and
/// guarantees no callback for this region fires afterwards.
#[derive(Debug)]
pub struct RegionHandle {
    region: Weak<RefCell<Region>>,
    live_ids: Weak<RefCell<HashSet<String>>>,
}

impl RegionHandle {
    /// Remove the region. Safe to call more than once.
    pub fn unregister(&self) {
        let Some(region) = self.region.upgrade() else {
            return;
        };
        let mut region = region.borrow_mut();
        if region.removed {
            return;
        }
        region.removed = true;
        region.on_update = None;
        region.on_pin_offset = None;
        region.on_counter_value = None;
        region.pin = None;
        if let Some(handle) = region.counter_handle.take() {
            handle.cancel();
        }
        if let Some(ids) = self.live_ids.upgrade() {
            ids.borrow_mut().remove(&region.decl.id);
        }
        tracing::debug!(id = %region.decl.id, "region unregistered");
    }

    /// Whether the region is still registered.
    pub fn is_registered(&self) -> bool {
        self.region
            .upgrade()
            .is_some_and(|r| !r.borrow().removed)
    }

    /// Current state, if still registered.
    pub fn state(&self) -> Option<RegionState> {
        let region = self.region.upgrade()?;
        let region = region.borrow();
        (!region.removed).then_some(region.state)
    }

    /// Latest clamped progress, if still registered and evaluated at least once.
    pub fn progress(&self) -> Option<f64> {
        let region = self.region.upgrade()?;
        let region = region.borrow();
        (!region.removed && region.last_progress.is_finite()).then_some(region.last_progress)
    }

    /// Where a pin region currently sits relative to its active range,
    /// if this is a live pin region that has been evaluated.
    pub fn pin_placement(&self) -> Option<PinPlacement> {
        let region = self.region.upgrade()?;
        let region = region.borrow();
        (!region.removed && region.pin.is_some() && region.last_progress.is_finite())
            .then(|| PinPlacement::from_progress(region.last_progress))
    }

    /// Replace the pin extents after the caller re-measured its content,
    /// re-clamping the content offset to the new bounds immediately.
    pub fn set_pin_extents(&self, extents: PinExtents) {
        if let Some(region) = self.region.upgrade()
            && let Some(drive) = &mut region.borrow_mut().pin
        {
            drive.set_extents(extents);
        }
    }
}

/// Ordered set of live trigger regions, evaluated once per observer tick.
pub struct TriggerRegistry {
    regions: Vec<Rc<RefCell<Region>>>,
    live_ids: Rc<RefCell<HashSet<String>>>,
    scheduler: Rc<RefCell<TweenScheduler>>,
    last_viewport_height: f64,
}

impl TriggerRegistry {
    /// The scheduler is shared with the engine's frame loop so counters
    /// started by regions advance on the same per-frame tick as every
    /// other tween.
    pub fn new(scheduler: Rc<RefCell<TweenScheduler>>) -> Self {
        Self {
            regions: Vec::new(),
            live_ids: Rc::new(RefCell::new(HashSet::new())),
            scheduler,
            last_viewport_height: 0.0,
        }
    }

    fn validate_config(config: &TriggerConfig) -> EngineResult<()> {
        config.decl.validate()?;
        if config.decl.mode == RegionMode::Counter && config.on_counter_value.is_none() {
            return Err(EngineError::config(format!(
                "region '{}': counter mode requires a counter value callback",
                config.decl.id
            )));
        }
        Ok(())
    }

    /// Register one region. Fails synchronously on configuration errors;
    /// an unmeasurable anchor is degraded input, not an error.
    #[tracing::instrument(skip(self, config), fields(id = %config.decl.id))]
    pub fn register(&mut self, config: TriggerConfig) -> EngineResult<RegionHandle> {
        Self::validate_config(&config)?;
        if self.live_ids.borrow().contains(&config.decl.id) {
            return Err(EngineError::config(format!(
                "duplicate region id '{}'",
                config.decl.id
            )));
        }

        let measurable = config.decl.anchor.is_measurable();
        if !measurable {
            tracing::warn!(id = %config.decl.id, "anchor is unmeasurable; region stays idle");
        }

        let pin = config.decl.pin.map(PinDrive::new);
        let region = Rc::new(RefCell::new(Region {
            state: RegionState::Idle,
            last_progress: f64::NAN,
            measurable,
            removed: false,
            warned_nonfinite: false,
            counter_fired: false,
            counter_handle: None,
            pin,
            on_update: config.on_update,
            on_pin_offset: config.on_pin_offset,
            on_counter_value: config.on_counter_value,
            decl: config.decl,
        }));

        self.live_ids
            .borrow_mut()
            .insert(region.borrow().decl.id.clone());
        let handle = RegionHandle {
            region: Rc::downgrade(&region),
            live_ids: Rc::downgrade(&self.live_ids),
        };
        self.regions.push(region);
        Ok(handle)
    }

    /// Register a batch, applying each item's `stagger` shift by index so
    /// the batch activates in sequence. All-or-nothing: the batch is
    /// validated up front and nothing is registered on error.
    pub fn register_batch(
        &mut self,
        configs: Vec<TriggerConfig>,
    ) -> EngineResult<Vec<RegionHandle>> {
        {
            let live = self.live_ids.borrow();
            let mut batch_ids: HashSet<&str> = HashSet::new();
            for config in &configs {
                Self::validate_config(config)?;
                if live.contains(&config.decl.id) || !batch_ids.insert(&config.decl.id) {
                    return Err(EngineError::config(format!(
                        "duplicate region id '{}'",
                        config.decl.id
                    )));
                }
            }
        }

        configs
            .into_iter()
            .enumerate()
            .map(|(i, mut config)| {
                let shift = config.decl.stagger * i as f64;
                config.decl = config.decl.shifted(shift);
                self.register(config)
            })
            .collect()
    }

    /// Evaluate every live region against the sample, in registration
    /// order, invoking each region's `on_update` at most once.
    pub fn tick(&mut self, sample: &ScrollSample) {
        if sample.is_headless() {
            // No visual surface: nothing can ever become active.
            return;
        }
        self.regions.retain(|r| !r.borrow().removed);

        let resized = sample.viewport_height != self.last_viewport_height;
        self.last_viewport_height = sample.viewport_height;

        // Snapshot the order; callbacks must not observe a shifting list.
        let pass: Vec<Rc<RefCell<Region>>> = self.regions.clone();
        for rc in pass {
            self.evaluate(&rc, sample, resized);
        }
    }

    fn evaluate(&self, rc: &Rc<RefCell<Region>>, sample: &ScrollSample, resized: bool) {
        struct Emit {
            progress: f64,
            state: RegionState,
            on_update: Option<UpdateFn>,
            pin_offset: Option<f64>,
            on_pin_offset: Option<OffsetFn>,
            counter: Option<(CounterSpec, ValueFn)>,
        }

        let mut emit = {
            let mut region = rc.borrow_mut();
            if region.removed || !region.measurable {
                return;
            }
            if region.decl.once && region.state == RegionState::Done {
                // Idempotence guarantee for once-regions.
                return;
            }

            let span = region.decl.end_offset - region.decl.start_offset;
            let raw = (sample.scroll_offset - region.decl.start_offset) / span;
            if !raw.is_finite() && !region.warned_nonfinite {
                region.warned_nonfinite = true;
                tracing::warn!(id = %region.decl.id, "non-finite progress clamped");
            }
            let progress = clamp01(raw);
            let state = region.derive_state(progress);

            let changed = progress != region.last_progress || state != region.state
                // Resize may shift pinned content even at constant progress.
                || (resized && region.pin.is_some());
            if state != region.state {
                tracing::debug!(id = %region.decl.id, from = ?region.state, to = ?state, "region state");
            }
            region.last_progress = progress;
            region.state = state;

            let pin_offset = region.pin.as_mut().map(|drive| drive.advance(progress));

            let counter = if region.decl.mode == RegionMode::Counter
                && !region.counter_fired
                && progress > 0.0
            {
                region.counter_fired = true;
                region
                    .decl
                    .counter
                    .zip(region.on_counter_value.take())
            } else {
                None
            };

            if !changed && counter.is_none() {
                return;
            }
            Emit {
                progress,
                state,
                on_update: if changed { region.on_update.take() } else { None },
                pin_offset: changed.then_some(pin_offset).flatten(),
                on_pin_offset: if changed { region.on_pin_offset.take() } else { None },
                counter,
            }
        };

        // Callbacks run with no region borrow held, so a callback may
        // call `unregister` on its own handle.
        if let Some((spec, on_value)) = emit.counter.take() {
            match animate_counter(&mut self.scheduler.borrow_mut(), spec, on_value) {
                Ok(handle) => rc.borrow_mut().counter_handle = Some(handle),
                Err(err) => {
                    tracing::warn!(id = %rc.borrow().decl.id, %err, "counter failed to start");
                }
            }
        }
        if let Some(mut on_update) = emit.on_update.take() {
            on_update(emit.progress, emit.state);
            let mut region = rc.borrow_mut();
            if !region.removed {
                region.on_update = Some(on_update);
            }
        }
        if let Some(mut on_offset) = emit.on_pin_offset.take() {
            if let Some(offset) = emit.pin_offset {
                on_offset(offset);
            }
            let mut region = rc.borrow_mut();
            if !region.removed {
                region.on_pin_offset = Some(on_offset);
            }
        }
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.regions.iter().filter(|r| !r.borrow().removed).count()
    }

    /// True when no live regions remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/registry.rs"]
mod tests;
