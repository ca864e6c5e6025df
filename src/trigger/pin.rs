/// Content and viewport extents of a pinned region, in page units.
///
/// Supplied by the caller at registration; re-measurable at any time via
/// [`RegionHandle::set_pin_extents`](crate::RegionHandle::set_pin_extents),
/// typically from the caller's resize path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinExtents {
    /// Full extent of the inner content track along the traversal axis.
    pub track_extent: f64,
    /// Visible extent of the viewport along the same axis.
    pub viewport_extent: f64,
}

impl PinExtents {
    /// Extents from track and viewport measurements.
    pub fn new(track_extent: f64, viewport_extent: f64) -> Self {
        Self {
            track_extent,
            viewport_extent,
        }
    }

    /// Maximum traversal distance. Zero when the content already fits,
    /// in which case the region degrades to a plain reveal.
    pub fn span(self) -> f64 {
        (self.track_extent - self.viewport_extent).max(0.0)
    }

    /// Whether scrolling through the region moves the inner content at all.
    pub fn needs_traversal(self) -> bool {
        self.span() > 0.0
    }
}

/// Where a pinned region sits relative to its active range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PinPlacement {
    /// Progress at 0: released to its natural pre-pin position.
    Before,
    /// Progress strictly inside (0, 1): held fixed to the viewport.
    Locked,
    /// Progress at 1: released to its natural post-pin position.
    After,
}

impl PinPlacement {
    /// Derive placement from clamped progress.
    pub fn from_progress(progress: f64) -> Self {
        if progress <= 0.0 {
            Self::Before
        } else if progress < 1.0 {
            Self::Locked
        } else {
            Self::After
        }
    }
}

/// Per-region traversal state for `mode: pin`.
///
/// Converts scroll progress through the pinned range into an internal
/// content offset, always bounded to `[0, span]` no matter what scroll
/// sequence or extent updates arrive.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PinDrive {
    extents: PinExtents,
    offset: f64,
}

impl PinDrive {
    pub(crate) fn new(extents: PinExtents) -> Self {
        Self {
            extents,
            offset: 0.0,
        }
    }

    pub(crate) fn extents(&self) -> PinExtents {
        self.extents
    }

    /// Replace the extents (caller re-measured) and re-clamp the offset to
    /// the new bounds immediately, without waiting for the next scroll.
    pub(crate) fn set_extents(&mut self, extents: PinExtents) {
        self.extents = extents;
        self.offset = self.offset.clamp(0.0, extents.span());
    }

    /// Recompute the offset for the given clamped progress.
    pub(crate) fn advance(&mut self, progress: f64) -> f64 {
        self.offset = (progress * self.extents.span()).clamp(0.0, self.extents.span());
        self.offset
    }

    pub(crate) fn offset(&self) -> f64 {
        self.offset
    }
}
