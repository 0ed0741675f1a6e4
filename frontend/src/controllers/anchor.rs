use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::{Element, Event, MouseEvent};

use crate::config::AnchorConfig;
use crate::controllers::nav::NavHandle;
use crate::dom;
use crate::state::anchor::{hash_id, scroll_target};
use crate::state::nav::NavEvent;

const HEADER: &str = ".topbar";
const HASH_LINK: &str = "a[href^=\"#\"]";
/// Overview links and detail panels belong to the services accordion.
const DETAIL_OPENER: &str = "[data-open-detail]";
const DETAIL_PANEL: &str = "[data-detail]";

/// Height of the sticky header as currently rendered.
pub fn header_height() -> f64 {
    dom::query(HEADER).as_ref().map(dom::offset_height).unwrap_or(0.0)
}

/// Scrolls so `el` sits below the sticky header, `extra` px lower still.
pub fn scroll_to_element(el: &Element, smooth: bool, extra: f64) {
    let config = AnchorConfig::default();
    let top = scroll_target(dom::document_top(el), header_height(), config.header_gap, extra);
    dom::scroll_window_to(top, smooth);
}

/// Scrolls to the element named by `hash`. Returns false when there is none.
pub fn scroll_to_hash(hash: &str, smooth: bool) -> bool {
    let Some(el) = hash_id(hash).and_then(dom::by_id) else {
        return false;
    };
    scroll_to_element(&el, smooth, 0.0);
    true
}

fn current_hash() -> Option<String> {
    dom::window()?.location().hash().ok().filter(|h| h.len() > 1)
}

pub fn mount(nav: Option<NavHandle>) -> Result<(), JsValue> {
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        return Ok(());
    };
    let config = AnchorConfig::default();

    dom::listen(&document, "click", move |e: MouseEvent| {
        let Some(link) = dom::closest_from_event(&e, HASH_LINK) else {
            return;
        };
        if link.closest(DETAIL_OPENER).ok().flatten().is_some() {
            return;
        }
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        let Some(id) = hash_id(&href) else {
            return;
        };
        let opens_panel = dom::by_id(id)
            .map(|target| target.matches(DETAIL_PANEL).unwrap_or(false))
            .unwrap_or(false);
        if opens_panel {
            return;
        }
        if let Some(nav) = &nav {
            nav.send(NavEvent::HashLinkClick);
        }
        if scroll_to_hash(&href, true) {
            e.prevent_default();
            if let Some(history) = dom::window().and_then(|w| w.history().ok()) {
                let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
            }
        } else {
            debug!("No anchor target for {}", href);
        }
    })?;

    // Layout and fonts settle shortly after load.
    dom::listen(&window, "load", move |_: Event| {
        if let Some(hash) = current_hash() {
            Timeout::new(config.initial_delay_ms, move || {
                scroll_to_hash(&hash, false);
            })
            .forget();
        }
    })?;

    dom::listen(&window, "popstate", move |_: Event| {
        if let Some(hash) = current_hash() {
            scroll_to_hash(&hash, false);
        }
    })?;

    info!("Anchor router mounted");
    Ok(())
}
