use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::TimeMs;
use crate::foundation::error::{EngineError, EngineResult};
use crate::trigger::registry::{RegionDecl, RegionHandle, TriggerConfig, TriggerRegistry};
use crate::tween::scheduler::TweenScheduler;
use crate::viewport::observer::{ScrollSample, Subscription, ViewportObserver};

/// Wires the scroll-driven pipeline together: one viewport observer, one
/// trigger registry, and one tween scheduler shared between region-owned
/// counters and free-standing tweens.
///
/// The host forwards browser-level events and its frame loop:
///
/// - `publish_scroll` / `publish_resize` on the corresponding events,
/// - `frame(now)` once per animation frame.
///
/// Carousel and typewriter controllers are independent of scroll and live
/// outside the engine; the host ticks them directly.
pub struct ScrollEngine {
    observer: ViewportObserver,
    registry: TriggerRegistry,
    scheduler: Rc<RefCell<TweenScheduler>>,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEngine {
    /// Engine with no regions and an empty scheduler.
    pub fn new() -> Self {
        let scheduler = Rc::new(RefCell::new(TweenScheduler::new()));
        Self {
            observer: ViewportObserver::new(),
            registry: TriggerRegistry::new(Rc::clone(&scheduler)),
            scheduler,
        }
    }

    /// The engine's single scroll/resize ingestion point.
    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    /// Fan-out subscription to raw samples, for consumers that want the
    /// input rather than derived region progress.
    pub fn subscribe(&mut self, on_sample: impl FnMut(&ScrollSample) + 'static) -> Subscription {
        self.observer.subscribe(on_sample)
    }

    /// Shared per-frame scheduler, for tweens not owned by any region.
    pub fn scheduler(&self) -> Rc<RefCell<TweenScheduler>> {
        Rc::clone(&self.scheduler)
    }

    /// Register one trigger region.
    pub fn register(&mut self, config: TriggerConfig) -> EngineResult<RegionHandle> {
        self.registry.register(config)
    }

    /// Register a staggered batch of trigger regions.
    pub fn register_batch(
        &mut self,
        configs: Vec<TriggerConfig>,
    ) -> EngineResult<Vec<RegionHandle>> {
        self.registry.register_batch(configs)
    }

    /// Number of live regions.
    pub fn region_count(&self) -> usize {
        self.registry.len()
    }

    /// Forward a scroll event and evaluate every region against it.
    pub fn publish_scroll(&mut self, scroll_offset: f64, now: TimeMs) {
        self.observer.publish_scroll(scroll_offset, now);
        let sample = self.observer.sample();
        self.registry.tick(&sample);
    }

    /// Forward a resize event; pin regions re-clamp their content offset.
    pub fn publish_resize(&mut self, viewport_height: f64, now: TimeMs) {
        self.observer.publish_resize(viewport_height, now);
        let sample = self.observer.sample();
        self.registry.tick(&sample);
    }

    /// Advance the shared per-frame execution loop (tweens, counters).
    pub fn frame(&mut self, now: TimeMs) {
        self.scheduler.borrow_mut().tick(now);
    }
}

/// Parse a JSON array of region declarations.
///
/// Declarations carry the data-only half of a registration; the caller
/// attaches callbacks when instantiating them into [`TriggerConfig`]s.
pub fn load_decls(json: &str) -> EngineResult<Vec<RegionDecl>> {
    serde_json::from_str(json).map_err(|err| EngineError::decl(err.to_string()))
}
