//! Thin helpers over `web_sys` shared by the page controllers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Node,
    ScrollBehavior, ScrollToOptions, Window,
};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().and_then(|d| d.query_selector_all(selector).ok()) {
        Some(list) => collect_nodes(&list),
        None => Vec::new(),
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector).ok() {
        Some(list) => collect_nodes(&list),
        None => Vec::new(),
    }
}

fn collect_nodes(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn as_html(el: &Element) -> Option<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
}

/// Reads a numeric `data-*` attribute.
pub fn data_f64(el: &Element, attr: &str) -> Option<f64> {
    el.get_attribute(attr)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn set_hidden(el: &Element, hidden: bool) {
    if let Some(html) = as_html(el) {
        html.set_hidden(hidden);
    }
}

pub fn set_flag(el: &Element, attr: &str, value: bool) -> Result<(), JsValue> {
    el.set_attribute(attr, if value { "true" } else { "false" })
}

pub fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match as_html(el) {
        Some(html) => html.style().set_property(property, value),
        None => Ok(()),
    }
}

pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn is_coarse_pointer() -> bool {
    media_matches("(pointer: coarse)")
}

pub fn scroll_behavior(smooth: bool) -> ScrollBehavior {
    if smooth && !prefers_reduced_motion() {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    }
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn inner_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Top edge of `el` in document coordinates.
pub fn document_top(el: &Element) -> f64 {
    el.get_bounding_client_rect().top() + scroll_y()
}

pub fn scroll_window_to(top: f64, smooth: bool) {
    if let Some(window) = window() {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(scroll_behavior(smooth));
        window.scroll_to_with_scroll_to_options(&opts);
    }
}

/// The element an event was dispatched on, if it is an element.
pub fn event_element(e: &Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
pub fn closest_from_event(e: &Event, selector: &str) -> Option<Element> {
    event_element(e).and_then(|el| el.closest(selector).ok().flatten())
}

/// Attaches a listener that lives as long as the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Like [`listen`] but registered as passive, for touch and resize handlers.
pub fn listen_passive<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &opts,
    )?;
    callback.forget();
    Ok(())
}

/// Runs `f` once on the next animation frame.
pub fn next_frame<F>(f: F)
where
    F: FnOnce() + 'static,
{
    if let Some(window) = window() {
        let callback = Closure::once_into_js(f);
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

/// Parses a computed length such as `"12.5px"`.
pub fn try_parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Like [`try_parse_px`], treating keywords such as `normal` as 0.
pub fn parse_px(value: &str) -> f64 {
    try_parse_px(value).unwrap_or(0.0)
}

pub fn computed_property(el: &Element, property: &str) -> Option<String> {
    window()?
        .get_computed_style(el)
        .ok()
        .flatten()?
        .get_property_value(property)
        .ok()
}

/// Whether `child` is `parent` or one of its descendants.
pub fn contains(parent: &Element, child: &Element) -> bool {
    let node: &Node = child;
    parent.contains(Some(node))
}

pub fn offset_height(el: &Element) -> f64 {
    as_html(el).map(|h| h.offset_height() as f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_computed_lengths() {
        assert_eq!(parse_px("12.5px"), 12.5);
        assert_eq!(parse_px(" 0px "), 0.0);
        assert_eq!(parse_px("16"), 16.0);
        assert_eq!(parse_px("normal"), 0.0);
        assert_eq!(try_parse_px("normal"), None);
        assert_eq!(parse_px(""), 0.0);
    }
}
