//! Tab strip fade indicators and programmatic smooth scrolling.

use std::{cell::Cell, rc::Rc};

use nav_host::{Scheduler, TaskId};

use crate::render::RenderTarget;

const FADE_EDGE_PX: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Scroll geometry of the tab strip.
pub struct ScrollMetrics {
    /// Current horizontal offset.
    pub scroll_left: i32,
    /// Total content width.
    pub scroll_width: i32,
    /// Visible width.
    pub client_width: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Which edge fades are shown.
pub struct FadeState {
    /// More content to the left.
    pub left: bool,
    /// More content to the right.
    pub right: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Position of a tab inside the strip.
pub struct TabGeometry {
    /// Offset from the strip's content start.
    pub offset_left: i32,
    /// Rendered width.
    pub width: i32,
}

/// Computes edge fades from the strip geometry.
pub fn compute_fades(metrics: ScrollMetrics) -> FadeState {
    let ScrollMetrics {
        scroll_left,
        scroll_width,
        client_width,
    } = metrics;
    FadeState {
        left: scroll_left > FADE_EDGE_PX,
        right: scroll_width > client_width
            && scroll_left < scroll_width - client_width - FADE_EDGE_PX,
    }
}

/// Offset that puts the tab's center at the strip's center, clamped to the scrollable range.
pub fn centered_scroll_left(tab: TabGeometry, metrics: ScrollMetrics) -> i32 {
    let max_left = (metrics.scroll_width - metrics.client_width).max(0);
    (tab.offset_left + tab.width / 2 - metrics.client_width / 2).clamp(0, max_left)
}

struct FadeInner {
    target: Rc<dyn RenderTarget>,
    scheduler: Rc<dyn Scheduler>,
    settle_ms: u32,
    programmatic: Cell<bool>,
    frame_pending: Cell<bool>,
    settle_timer: Cell<Option<TaskId>>,
}

#[derive(Clone)]
/// Keeps fade indicators in sync with the strip's scroll position.
///
/// Scroll events coalesce into one recompute per paint frame and are ignored while a
/// programmatic smooth scroll is animating; the settle timer recomputes once it ends.
pub struct ScrollFadeController {
    inner: Rc<FadeInner>,
}

impl ScrollFadeController {
    /// Creates a controller for `target`.
    pub fn new(target: Rc<dyn RenderTarget>, scheduler: Rc<dyn Scheduler>, settle_ms: u32) -> Self {
        Self {
            inner: Rc::new(FadeInner {
                target,
                scheduler,
                settle_ms,
                programmatic: Cell::new(false),
                frame_pending: Cell::new(false),
                settle_timer: Cell::new(None),
            }),
        }
    }

    /// Whether a programmatic smooth scroll is in flight.
    pub fn is_programmatic(&self) -> bool {
        self.inner.programmatic.get()
    }

    /// Recomputes fades from the current strip geometry.
    pub fn recompute(&self) {
        if let Some(metrics) = self.inner.target.tab_strip_metrics() {
            self.inner.target.set_fades(compute_fades(metrics));
        }
    }

    /// Handles a user scroll event.
    pub fn on_scroll(&self) {
        if self.inner.programmatic.get() || self.inner.frame_pending.get() {
            return;
        }
        self.inner.frame_pending.set(true);
        let controller = self.clone();
        self.inner.scheduler.request_frame(Box::new(move || {
            controller.inner.frame_pending.set(false);
            if !controller.inner.programmatic.get() {
                controller.recompute();
            }
        }));
    }

    /// Starts a smooth scroll to `left` and schedules the settle recompute.
    pub fn smooth_scroll_to(&self, left: i32) {
        if let Some(previous) = self.inner.settle_timer.take() {
            self.inner.scheduler.cancel(previous);
        }
        self.inner.programmatic.set(true);
        self.inner.target.smooth_scroll_tab_strip(left);

        let controller = self.clone();
        let timer = self.inner.scheduler.schedule(
            self.inner.settle_ms,
            Box::new(move || {
                controller.inner.settle_timer.set(None);
                controller.inner.programmatic.set(false);
                controller.recompute();
            }),
        );
        self.inner.settle_timer.set(Some(timer));
    }
}
