use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Once;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// Quadratic ease-in-out.
    Power1InOut,
}

impl Ease {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self { duration_ms, ease }
    }

    /// Eased progress in 0..=1 after `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.ease.apply(elapsed_ms / self.duration_ms)
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPolygon(pub [(f64, f64); 4]);

impl ClipPolygon {
    pub fn lerp(&self, to: &ClipPolygon, t: f64) -> ClipPolygon {
        let mut points = self.0;
        for (point, target) in points.iter_mut().zip(to.0.iter()) {
            point.0 = lerp(point.0, target.0, t);
            point.1 = lerp(point.1, target.1, t);
        }
        ClipPolygon(points)
    }

    pub fn to_css(&self) -> String {
        let points: Vec<String> = self
            .0
            .iter()
            .map(|(x, y)| format!("{}% {}%", round_pct(*x), round_pct(*y)))
            .collect();
        format!("polygon({})", points.join(", "))
    }
}

fn round_pct(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A scroll range expressed as two anchor points on the element (fractions of
/// its height) that pass the vertical center of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBand {
    pub start: f64,
    pub end: f64,
}

impl ScrollBand {
    /// Starts when the element's center reaches the viewport center, ends when its bottom does.
    pub const CENTER_TO_BOTTOM: ScrollBand = ScrollBand { start: 0.5, end: 1.0 };

    /// Linear scrub progress in 0..=1 for an element whose bounding box starts at
    /// `top` (relative to the viewport) and is `height` tall.
    pub fn progress(&self, top: f64, height: f64, viewport_height: f64) -> f64 {
        let center_line = viewport_height / 2.0;
        let start_y = top + self.start * height;
        let span = (self.end - self.start) * height;
        if span <= 0.0 {
            return if start_y <= center_line { 1.0 } else { 0.0 };
        }
        ((center_line - start_y) / span).clamp(0.0, 1.0)
    }
}

struct TweenState {
    tween: Tween,
    origin: Option<f64>,
    on_start: Option<Box<dyn FnOnce()>>,
    on_update: Box<dyn FnMut(f64)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

/// A tween running on the browser frame clock. Dropping the handle cancels the
/// tween without firing `on_complete`.
pub struct TweenHandle {
    _frame: Rc<RefCell<Option<AnimationFrame>>>,
}

impl TweenHandle {
    pub fn run(
        tween: Tween,
        on_start: impl FnOnce() + 'static,
        on_update: impl FnMut(f64) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        let state = Rc::new(RefCell::new(TweenState {
            tween,
            origin: None,
            on_start: Some(Box::new(on_start)),
            on_update: Box::new(on_update),
            on_complete: Some(Box::new(on_complete)),
        }));
        let frame = Rc::new(RefCell::new(None));
        schedule_tick(state, &frame);
        Self { _frame: frame }
    }
}

fn schedule_tick(state: Rc<RefCell<TweenState>>, frame: &Rc<RefCell<Option<AnimationFrame>>>) {
    // Weak so that dropping the handle frees the pending frame and cancels it.
    let slot = Rc::downgrade(frame);
    let handle = request_animation_frame(move |timestamp| {
        let Some(slot) = slot.upgrade() else {
            return;
        };
        slot.borrow_mut().take();

        let on_start = state.borrow_mut().on_start.take();
        if let Some(on_start) = on_start {
            on_start();
        }

        let done = {
            let mut tick = state.borrow_mut();
            let origin = *tick.origin.get_or_insert(timestamp);
            let elapsed = timestamp - origin;
            let progress = tick.tween.progress(elapsed);
            (tick.on_update)(progress);
            tick.tween.is_done(elapsed)
        };

        if done {
            let on_complete = state.borrow_mut().on_complete.take();
            if let Some(on_complete) = on_complete {
                on_complete();
            }
        } else {
            schedule_tick(state, &slot);
        }
    });
    *frame.borrow_mut() = Some(handle);
}

thread_local! {
    static SCROLL_SUBSCRIBERS: RefCell<BTreeMap<u64, Rc<dyn Fn()>>> = RefCell::new(BTreeMap::new());
    static NEXT_SUBSCRIBER: Cell<u64> = Cell::new(0);
}

static INIT: Once = Once::new();

/// Installs the shared window scroll listener. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        let Some(window) = web_sys::window() else {
            warn!("No window available, scroll-linked animations disabled");
            return;
        };
        let on_scroll = Closure::wrap(Box::new(dispatch_scroll) as Box<dyn Fn()>);
        if let Err(e) = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref()) {
            warn!("Failed to install scroll listener: {:?}", e);
            return;
        }
        // Lives for the whole page.
        on_scroll.forget();
        debug!("Animation subsystem initialized");
    });
}

/// Unsubscribes when dropped.
pub struct ScrollSubscription {
    id: u64,
}

pub fn subscribe_scroll(callback: impl Fn() + 'static) -> ScrollSubscription {
    let id = NEXT_SUBSCRIBER.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    SCROLL_SUBSCRIBERS.with(|subs| {
        subs.borrow_mut().insert(id, Rc::new(callback));
    });
    ScrollSubscription { id }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        SCROLL_SUBSCRIBERS.with(|subs| {
            subs.borrow_mut().remove(&self.id);
        });
    }
}

pub fn dispatch_scroll() {
    // Snapshot first so subscribers may (un)subscribe while being called.
    let callbacks: Vec<Rc<dyn Fn()>> =
        SCROLL_SUBSCRIBERS.with(|subs| subs.borrow().values().cloned().collect());
    for callback in callbacks {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power1_in_out_is_symmetric() {
        let ease = Ease::Power1InOut;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(0.5), 0.5);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-12);
        assert!(ease.apply(0.25) < 0.25);
    }

    #[test]
    fn ease_clamps_out_of_range_input() {
        assert_eq!(Ease::Power1InOut.apply(-1.0), 0.0);
        assert_eq!(Ease::Power1InOut.apply(3.0), 1.0);
    }

    #[test]
    fn tween_progress_and_completion() {
        let tween = Tween::new(1000.0, Ease::Power1InOut);
        assert_eq!(tween.progress(500.0), 0.5);
        assert_eq!(tween.progress(250.0), 0.125);
        assert!(!tween.is_done(999.0));
        assert!(tween.is_done(1000.0));
        assert_eq!(Tween::new(0.0, Ease::Power1InOut).progress(0.0), 1.0);
    }

    #[test]
    fn clip_polygon_interpolates_and_serializes() {
        let full = ClipPolygon([(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let target = ClipPolygon([(14.0, 0.0), (72.0, 0.0), (88.0, 90.0), (0.0, 95.0)]);
        assert_eq!(full.lerp(&target, 0.0), full);
        assert_eq!(full.lerp(&target, 1.0), target);
        assert_eq!(full.lerp(&target, 0.5).0[0], (7.0, 0.0));
        assert_eq!(target.to_css(), "polygon(14% 0%, 72% 0%, 88% 90%, 0% 95%)");
    }

    #[test]
    fn scroll_band_center_to_bottom() {
        let band = ScrollBand::CENTER_TO_BOTTOM;
        // 800px viewport, 800px element at the top of the page.
        assert_eq!(band.progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(band.progress(-200.0, 800.0, 800.0), 0.5);
        assert_eq!(band.progress(-400.0, 800.0, 800.0), 1.0);
        assert_eq!(band.progress(-2000.0, 800.0, 800.0), 1.0);
        assert_eq!(band.progress(300.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn scroll_subscriptions_dispatch_until_dropped() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let subscription = subscribe_scroll(move || counter.set(counter.get() + 1));

        dispatch_scroll();
        dispatch_scroll();
        assert_eq!(hits.get(), 2);

        drop(subscription);
        dispatch_scroll();
        assert_eq!(hits.get(), 2);
    }
}
