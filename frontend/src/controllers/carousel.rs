//! Binds a [`CarouselEngine`] to the services strip markup.
//!
//! Every `[data-carousel-viewport]` on the page gets its own engine. The
//! track, buttons and cards are looked up inside the closest
//! `[data-carousel]` wrapper, falling back to the viewport's parent.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, FocusEvent, KeyboardEvent, MouseEvent, PointerEvent};

use crate::config::CarouselConfig;
use crate::dom;
use crate::state::carousel::{nearest_to_center, CarouselEngine, Direction, PressTracker};

const VIEWPORT: &str = "[data-carousel-viewport]";
const TRACK: &str = "[data-carousel-track]";
const PREV: &str = "[data-carousel-prev]";
const NEXT: &str = "[data-carousel-next]";
const WRAPPER: &str = "[data-carousel]";
const CARD: &str = ".serviceCard";
const CENTER_CLASS: &str = "is-center";
/// Pointer travel above which the release is treated as a drag, not a click.
const CLICK_SLOP: f64 = 6.0;
/// Inline styles for the viewport. Horizontal pans belong to the strip, so
/// touch drags arrive as pointer events instead of a `pointercancel`.
const VIEWPORT_STYLES: [(&str, &str); 2] = [("touch-action", "pan-y"), ("user-select", "none")];
const TRACK_STYLES: [(&str, &str); 2] = [("will-change", "transform"), ("transform", "translate3d(0, 0, 0)")];

struct Carousel {
    engine: CarouselEngine,
    config: CarouselConfig,
    viewport: Element,
    track: Element,
    originals: Vec<Element>,
    first_clone: Option<Element>,
    last_center_ts: f64,
    press: PressTracker,
}

impl Carousel {
    fn gap(&self) -> f64 {
        ["column-gap", "gap"]
            .iter()
            .filter_map(|p| dom::computed_property(&self.track, p))
            .find_map(|v| dom::try_parse_px(&v))
            .unwrap_or(self.config.fallback_gap)
    }

    /// Width of one pass of the original cards and the distance between
    /// neighbouring cards. Both come from rendered positions where possible
    /// so padding and gaps are accounted for exactly.
    fn measure(&mut self) {
        let gap = self.gap();
        let lefts: Vec<f64> = self
            .originals
            .iter()
            .map(|c| c.get_bounding_client_rect().left())
            .collect();
        let first_width = self
            .originals
            .first()
            .map(|c| c.get_bounding_client_rect().width())
            .unwrap_or(0.0);

        let step = match lefts.as_slice() {
            [a, b, ..] if b - a > 0.0 => b - a,
            _ if first_width > 0.0 => first_width + gap,
            _ => self.config.fallback_step,
        };

        let by_position = match (&self.first_clone, lefts.first()) {
            (Some(clone), Some(first)) => clone.get_bounding_client_rect().left() - first,
            _ => 0.0,
        };
        let set_width = if by_position > 0.0 {
            by_position
        } else {
            self.originals
                .iter()
                .map(|c| c.get_bounding_client_rect().width() + gap)
                .sum()
        };

        debug!("Carousel measured: set {}px, step {}px", set_width, step);
        self.engine.remeasure(set_width, step);
    }

    fn apply_transform(&self, x: f64) -> Result<(), JsValue> {
        dom::set_style(&self.track, "transform", &format!("translate3d({}px, 0, 0)", x))
    }

    fn highlight_center(&self) -> Result<(), JsValue> {
        let cards = dom::query_all_in(&self.track, CARD);
        if cards.is_empty() {
            return Ok(());
        }
        let vr = self.viewport.get_bounding_client_rect();
        let center = vr.left() + vr.width() / 2.0;
        let boxes: Vec<(f64, f64)> = cards
            .iter()
            .map(|c| {
                let r = c.get_bounding_client_rect();
                (r.left(), r.width())
            })
            .collect();
        let best = nearest_to_center(&boxes, center);
        for (i, card) in cards.iter().enumerate() {
            card.class_list().toggle_with_force(CENTER_CLASS, Some(i) == best)?;
        }
        Ok(())
    }

    fn frame(&mut self, ts: f64) -> Result<(), JsValue> {
        let x = self.engine.frame(ts);
        self.apply_transform(x)?;
        if ts - self.last_center_ts >= self.config.center_refresh_ms {
            self.last_center_ts = ts;
            self.highlight_center()?;
        }
        Ok(())
    }

    fn relayout(&mut self) -> Result<(), JsValue> {
        self.measure();
        self.apply_transform(self.engine.rendered())?;
        self.highlight_center()
    }
}

type Shared = Rc<RefCell<Carousel>>;

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = dom::window() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn start_loop(carousel: Shared) {
    type FrameClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if let Err(e) = carousel.borrow_mut().frame(ts) {
            warn!("Carousel frame failed: {:?}", e);
        }
        if let Some(callback) = f.borrow().as_ref() {
            request_frame(callback);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(callback) = g.borrow().as_ref() {
        request_frame(callback);
    };
}

/// Appends one clone of every original card so the strip can wrap.
fn clone_set(track: &Element, originals: &[Element]) -> Result<Option<Element>, JsValue> {
    let mut first = None;
    for card in originals {
        let clone = card
            .clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| JsValue::from_str("carousel card is not an element"))?;
        clone.set_attribute("aria-hidden", "true")?;
        clone.set_attribute("data-carousel-clone", "")?;
        for focusable in dom::query_all_in(&clone, "a, button") {
            focusable.set_attribute("tabindex", "-1")?;
        }
        track.append_child(&clone)?;
        if first.is_none() {
            first = Some(clone);
        }
    }
    Ok(first)
}

fn bind(carousel: &Shared, prev: Option<Element>, next: Option<Element>) -> Result<(), JsValue> {
    let viewport = carousel.borrow().viewport.clone();

    for (button, direction) in [(prev, Direction::Prev), (next, Direction::Next)] {
        if let Some(button) = button {
            let carousel = carousel.clone();
            dom::listen(&button, "click", move |_: MouseEvent| {
                carousel.borrow_mut().engine.snap(direction);
            })?;
        }
    }

    for event in ["mouseenter", "focusin"] {
        let carousel = carousel.clone();
        dom::listen(&viewport, event, move |_: Event| carousel.borrow_mut().engine.pause())?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "mouseleave", move |_: MouseEvent| {
            carousel.borrow_mut().engine.resume();
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "focusout", move |e: FocusEvent| {
            let mut c = carousel.borrow_mut();
            // Focus moving between cards keeps the strip paused.
            let still_inside = e
                .related_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| dom::contains(&c.viewport, &el))
                .unwrap_or(false);
            if !still_inside {
                c.engine.resume();
            }
        })?;
    }

    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "keydown", move |e: KeyboardEvent| {
            let direction = match e.key().as_str() {
                "ArrowRight" => Direction::Next,
                "ArrowLeft" => Direction::Prev,
                _ => return,
            };
            e.prevent_default();
            carousel.borrow_mut().engine.snap(direction);
        })?;
    }

    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "pointerdown", move |e: PointerEvent| {
            if e.pointer_type() == "mouse" && e.button() != 0 {
                return;
            }
            if dom::closest_from_event(&e, "button").is_some() {
                return;
            }
            let mut c = carousel.borrow_mut();
            let x = e.client_x() as f64;
            c.engine.pointer_down(x);
            c.press.press(x);
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "pointermove", move |e: PointerEvent| {
            let mut c = carousel.borrow_mut();
            if !c.engine.is_dragging() {
                return;
            }
            let x = e.client_x() as f64;
            c.engine.pointer_move(x);
            // Capture only real drags so a plain click still reaches card links.
            if c.press.moved(x, CLICK_SLOP) {
                let _ = c.viewport.set_pointer_capture(e.pointer_id());
            }
            let rendered = c.engine.rendered();
            if let Err(err) = c.apply_transform(rendered) {
                warn!("Carousel drag update failed: {:?}", err);
            }
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "pointerup", move |e: PointerEvent| {
            let mut c = carousel.borrow_mut();
            if !c.engine.is_dragging() {
                return;
            }
            let width = c.viewport.client_width() as f64;
            c.engine.pointer_up(e.client_x() as f64, width);
            if c.press.release() {
                let _ = c.viewport.release_pointer_capture(e.pointer_id());
            }
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "pointercancel", move |_: PointerEvent| {
            let mut c = carousel.borrow_mut();
            c.engine.pointer_cancel();
            c.press.release();
        })?;
    }
    {
        // A drag that ends over a card link must not follow it.
        let carousel = carousel.clone();
        let options = web_sys::AddEventListenerOptions::new();
        options.set_capture(true);
        let callback = Closure::wrap(Box::new(move |e: MouseEvent| {
            let mut c = carousel.borrow_mut();
            if c.press.take_click_suppression() {
                e.prevent_default();
                e.stop_propagation();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        viewport.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        callback.forget();
    }

    // Native link and image dragging would steal the pointer mid-drag.
    dom::listen(&viewport, "dragstart", |e: Event| e.prevent_default())?;

    {
        // The strip moves by transform only.
        let viewport_el = viewport.clone();
        dom::listen_passive(&viewport, "scroll", move |_: Event| {
            if viewport_el.scroll_left() != 0 {
                viewport_el.set_scroll_left(0);
            }
        })?;
    }

    if let Some(window) = dom::window() {
        let carousel = carousel.clone();
        dom::listen_passive(&window, "resize", move |_: Event| {
            let carousel = carousel.clone();
            let delay = carousel.borrow().config.resize_delay_ms;
            Timeout::new(delay, move || {
                if let Err(e) = carousel.borrow_mut().relayout() {
                    warn!("Carousel relayout failed: {:?}", e);
                }
            })
            .forget();
        })?;
    }

    Ok(())
}

fn mount_one(viewport: Element, reduced_motion: bool) -> Result<bool, JsValue> {
    let scope = viewport
        .closest(WRAPPER)?
        .or_else(|| viewport.parent_element())
        .unwrap_or_else(|| viewport.clone());
    let Some(track) = dom::query_in(&scope, TRACK) else {
        debug!("Carousel skipped: viewport without track");
        return Ok(false);
    };

    let config = CarouselConfig::from_element(&viewport, reduced_motion);
    let children = track.children();
    let originals: Vec<Element> = (0..children.length()).filter_map(|i| children.item(i)).collect();
    if originals.len() < config.min_cards {
        debug!("Carousel skipped: {} cards", originals.len());
        return Ok(false);
    }

    let first_clone = clone_set(&track, &originals)?;
    for (property, value) in TRACK_STYLES {
        dom::set_style(&track, property, value)?;
    }
    for (property, value) in VIEWPORT_STYLES {
        dom::set_style(&viewport, property, value)?;
    }

    let carousel: Shared = Rc::new(RefCell::new(Carousel {
        engine: CarouselEngine::new(config),
        config,
        viewport,
        track,
        originals,
        first_clone,
        last_center_ts: 0.0,
        press: PressTracker::default(),
    }));

    bind(&carousel, dom::query_in(&scope, PREV), dom::query_in(&scope, NEXT))?;

    // Measure once the clones have been laid out.
    dom::next_frame(move || {
        {
            let mut c = carousel.borrow_mut();
            c.measure();
            c.engine.start();
            let x = c.engine.rendered();
            if let Err(e) = c.apply_transform(x).and_then(|_| c.highlight_center()) {
                warn!("Carousel start failed: {:?}", e);
            }
        }
        start_loop(carousel);
    });

    Ok(true)
}

pub fn mount() -> Result<(), JsValue> {
    let viewports = dom::query_all(VIEWPORT);
    if viewports.is_empty() {
        debug!("Carousel skipped: no {}", VIEWPORT);
        return Ok(());
    }
    let reduced_motion = dom::prefers_reduced_motion();
    let mut mounted = 0;
    for viewport in viewports {
        if mount_one(viewport, reduced_motion)? {
            mounted += 1;
        }
    }
    info!("Mounted {} carousel(s), reduced motion: {}", mounted, reduced_motion);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_leaves_horizontal_pans_to_the_strip() {
        assert!(VIEWPORT_STYLES.contains(&("touch-action", "pan-y")));
    }

    #[test]
    fn track_is_promoted_for_transforms() {
        assert!(TRACK_STYLES.iter().any(|(p, _)| *p == "will-change"));
    }
}
