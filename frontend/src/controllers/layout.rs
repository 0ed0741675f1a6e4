//! Keeps `--vh`, `--header-h`, `--safe-top` and `--hero-shift` in sync with
//! the rendered layout.

use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::Event;

use crate::dom;
use crate::state::layout::{compute, LayoutMetrics};

const HEADER: &str = ".topbar";
const HERO_CONTENT: &str = "[data-hero] [data-hero-content]";

fn measure() -> Option<LayoutMetrics> {
    let root = dom::document()?.document_element()?;
    let header = dom::query(HEADER);
    let hero = dom::query(HERO_CONTENT);

    let applied_shift = dom::as_html(&root)
        .and_then(|h| h.style().get_property_value("--hero-shift").ok())
        .map(|v| dom::parse_px(&v))
        .unwrap_or(0.0);

    Some(LayoutMetrics {
        viewport_height: dom::inner_height(),
        header_height: header.as_ref().map(dom::offset_height).unwrap_or(0.0),
        header_padding_top: header
            .as_ref()
            .and_then(|h| dom::computed_property(h, "padding-top"))
            .map(|v| dom::parse_px(&v))
            .unwrap_or(0.0),
        hero_content_top: hero.as_ref().map(|h| h.get_bounding_client_rect().top()),
        hero_content_height: hero
            .as_ref()
            .map(|h| h.get_bounding_client_rect().height())
            .unwrap_or(0.0),
        applied_shift,
    })
}

pub fn apply() -> Result<(), JsValue> {
    let Some(root) = dom::document().and_then(|d| d.document_element()) else {
        return Ok(());
    };
    let Some(metrics) = measure() else {
        return Ok(());
    };
    let vars = compute(&metrics);
    dom::set_style(&root, "--vh", &vars.vh)?;
    dom::set_style(&root, "--header-h", &vars.header_h)?;
    dom::set_style(&root, "--safe-top", &vars.safe_top)?;
    if let Some(shift) = vars.hero_shift {
        dom::set_style(&root, "--hero-shift", &shift)?;
    }
    Ok(())
}

fn apply_logged() {
    if let Err(e) = apply() {
        warn!("Layout correction failed: {:?}", e);
    }
}

pub fn mount() -> Result<(), JsValue> {
    let Some(window) = dom::window() else {
        debug!("Layout corrector skipped: no window");
        return Ok(());
    };

    apply()?;
    for event in ["resize", "orientationchange", "load"] {
        dom::listen_passive(&window, event, move |_: Event| apply_logged())?;
    }

    // Web fonts change the header height once they swap in.
    if let Some(document) = dom::document() {
        if let Ok(ready) = document.fonts().ready() {
            spawn_local(async move {
                if JsFuture::from(ready).await.is_ok() {
                    debug!("Fonts ready, re-measuring layout");
                    apply_logged();
                }
            });
        }
    }

    info!("Layout corrector mounted");
    Ok(())
}
