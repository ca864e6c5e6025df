use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::TimeMs;

/// Latest scroll/viewport measurement.
///
/// Ephemeral: replaced wholesale on every publish, read-only to consumers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSample {
    /// Vertical scroll offset in page units.
    pub scroll_offset: f64,
    /// Current viewport height; `0.0` in a headless environment.
    pub viewport_height: f64,
    /// Host stamp at which the sample was taken.
    pub timestamp: TimeMs,
}

impl ScrollSample {
    /// Degenerate sample for environments without a visual surface.
    /// Consumers must treat a headless sample as "never active".
    pub fn headless(timestamp: TimeMs) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: 0.0,
            timestamp,
        }
    }

    /// True when there is no viewport to animate against.
    pub fn is_headless(self) -> bool {
        !(self.viewport_height > 0.0)
    }
}

type SampleFn = Box<dyn FnMut(&ScrollSample)>;

struct Subscriber {
    alive: Rc<Cell<bool>>,
    on_sample: SampleFn,
}

/// Disposer returned by [`ViewportObserver::subscribe`].
///
/// `unsubscribe` is idempotent; after the first call the subscriber's
/// callback never fires again, even for a publish already in flight.
pub struct Subscription {
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// Detach the subscriber. Safe to call more than once.
    pub fn unsubscribe(&self) {
        self.alive.set(false);
    }

    /// Whether the subscriber is still attached.
    pub fn is_active(&self) -> bool {
        self.alive.get()
    }
}

/// Single ingestion point for scroll and resize events.
///
/// The host installs exactly one low-level listener and forwards every
/// event here; fan-out to any number of subscribers happens inside the
/// observer, so subscriber count never multiplies native listeners.
pub struct ViewportObserver {
    latest: ScrollSample,
    subscribers: Vec<Subscriber>,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportObserver {
    /// Create an observer holding a degenerate (headless) sample until the
    /// first publish arrives.
    pub fn new() -> Self {
        Self {
            latest: ScrollSample::headless(TimeMs::ZERO),
            subscribers: Vec::new(),
        }
    }

    /// The most recent sample.
    pub fn sample(&self) -> ScrollSample {
        self.latest
    }

    /// Register a fan-out callback invoked on every publish.
    pub fn subscribe(&mut self, on_sample: impl FnMut(&ScrollSample) + 'static) -> Subscription {
        let alive = Rc::new(Cell::new(true));
        self.subscribers.push(Subscriber {
            alive: Rc::clone(&alive),
            on_sample: Box::new(on_sample),
        });
        Subscription { alive }
    }

    /// Replace the latest sample and fan it out to live subscribers.
    pub fn publish(&mut self, sample: ScrollSample) {
        self.latest = sample;
        self.subscribers.retain(|s| s.alive.get());
        for sub in &mut self.subscribers {
            // Re-checked per callback: a subscriber may unsubscribe a
            // later one during this same publish.
            if sub.alive.get() {
                (sub.on_sample)(&sample);
            }
        }
    }

    /// Publish a scroll event, keeping the last known viewport height.
    pub fn publish_scroll(&mut self, scroll_offset: f64, now: TimeMs) {
        let sample = ScrollSample {
            scroll_offset,
            viewport_height: self.latest.viewport_height,
            timestamp: now,
        };
        self.publish(sample);
    }

    /// Publish a resize event, keeping the last known scroll offset.
    pub fn publish_resize(&mut self, viewport_height: f64, now: TimeMs) {
        let sample = ScrollSample {
            scroll_offset: self.latest.scroll_offset,
            viewport_height,
            timestamp: now,
        };
        self.publish(sample);
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|s| s.alive.get()).count()
    }
}
