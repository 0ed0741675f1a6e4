use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, FocusOptions, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::AnchorConfig;
use crate::controllers::anchor;
use crate::dom;
use crate::state::accordion::{most_visible, Accordion, Visibility};
use crate::state::anchor::hash_id;

const WRAP: &str = "[data-details-wrap]";
const PANEL: &str = "[data-detail]";
const OPENER: &str = "[data-open-detail]";
const CLOSER: &str = "[data-close-detail]";
const CHIPBAR: &str = "[data-chipbar]";
const CHIP: &str = ".chip";
const HEADING: &str = "h2, h3";
const ACTIVE_CLASS: &str = "is-active";

struct Details {
    accordion: Accordion,
    wrap: Element,
    panels: Vec<Element>,
    chipbar: Option<Element>,
    chips: Vec<Element>,
}

impl Details {
    fn render(&self) -> Result<(), JsValue> {
        for (el, view) in self.panels.iter().zip(self.accordion.panels()) {
            dom::set_flag(el, "data-collapsed", view.collapsed)?;
        }
        dom::set_flag(&self.wrap, "data-has-open", self.accordion.has_open())
    }

    fn set_active_chip(&self, id: Option<&str>) -> Result<(), JsValue> {
        let wanted = id.map(|id| format!("#{}", id));
        for chip in &self.chips {
            let active = wanted.is_some() && chip.get_attribute("href") == wanted;
            chip.class_list().toggle_with_force(ACTIVE_CLASS, active)?;
            if active {
                chip.set_attribute("aria-current", "true")?;
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(dom::scroll_behavior(true));
                opts.set_inline(ScrollLogicalPosition::Center);
                opts.set_block(ScrollLogicalPosition::Nearest);
                chip.scroll_into_view_with_scroll_into_view_options(&opts);
            } else {
                chip.remove_attribute("aria-current")?;
            }
        }
        Ok(())
    }

    fn panel(&self, id: &str) -> Option<&Element> {
        self.panels.iter().find(|p| p.id() == id)
    }

    fn open(&mut self, id: &str) -> Result<Option<Element>, JsValue> {
        if !self.accordion.open(id) {
            debug!("No detail panel #{}", id);
            return Ok(None);
        }
        self.render()?;
        self.set_active_chip(Some(id))?;
        Ok(self.panel(id).cloned())
    }

    fn close(&mut self, id: &str) -> Result<(), JsValue> {
        if self.accordion.close(id) {
            self.render()?;
            self.set_active_chip(None)?;
        }
        Ok(())
    }

    fn chipbar_height(&self) -> f64 {
        self.chipbar.as_ref().map(dom::offset_height).unwrap_or(0.0)
    }
}

type Shared = Rc<RefCell<Details>>;

/// Opens a panel, then scrolls it into view and focuses its heading once the
/// wrapper has taken up its space.
fn open_and_reveal(details: &Shared, id: &str) {
    let opened = details.borrow_mut().open(id);
    let panel = match opened {
        Ok(Some(panel)) => panel,
        Ok(None) => return,
        Err(e) => {
            warn!("Opening detail #{} failed: {:?}", id, e);
            return;
        }
    };
    let extra = details.borrow().chipbar_height() + AnchorConfig::default().detail_gap;
    dom::next_frame(move || {
        anchor::scroll_to_element(&panel, true, extra);
        if let Some(heading) = dom::query_in(&panel, HEADING) {
            let _ = heading.set_attribute("tabindex", "-1");
            if let Some(html) = dom::as_html(&heading) {
                let opts = FocusOptions::new();
                opts.set_prevent_scroll(true);
                let _ = html.focus_with_options(&opts);
            }
        }
    });
}

fn replace_hash(id: &str) {
    if let Some(history) = dom::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{}", id)));
    }
}

fn observe_panels(details: &Shared) -> Result<(), JsValue> {
    let callback = {
        let details = details.clone();
        Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let d = details.borrow();
            if !d.accordion.has_open() {
                return;
            }
            let seen: Vec<(String, f64, bool)> = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| (e.target().id(), e.intersection_ratio(), e.is_intersecting()))
                .collect();
            let visibility: Vec<Visibility> = seen
                .iter()
                .map(|(id, ratio, intersecting)| Visibility {
                    id: id.as_str(),
                    ratio: *ratio,
                    intersecting: *intersecting,
                })
                .collect();
            if let Some(id) = most_visible(&visibility) {
                if let Err(e) = d.set_active_chip(Some(id)) {
                    warn!("Chip highlight failed: {:?}", e);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    let thresholds: Array = [0.35, 0.5, 0.65].iter().map(|t| JsValue::from_f64(*t)).collect();
    init.set_threshold(&thresholds);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for panel in &details.borrow().panels {
        observer.observe(panel);
    }
    callback.forget();
    Ok(())
}

pub fn mount() -> Result<(), JsValue> {
    let Some(wrap) = dom::query(WRAP) else {
        debug!("Detail accordion skipped: no {}", WRAP);
        return Ok(());
    };
    let Some(document) = dom::document() else {
        return Ok(());
    };

    let panels = dom::query_all_in(&wrap, PANEL);
    let chipbar = dom::query(CHIPBAR);
    let chips = chipbar
        .as_ref()
        .map(|bar| dom::query_all_in(bar, CHIP))
        .unwrap_or_default();
    let accordion = Accordion::new(panels.iter().map(|p| p.id()));
    let details: Shared = Rc::new(RefCell::new(Details {
        accordion,
        wrap,
        panels,
        chipbar,
        chips,
    }));

    details.borrow().render()?;

    {
        let details = details.clone();
        dom::listen(&document, "click", move |e: MouseEvent| {
            let opener = dom::closest_from_event(&e, OPENER).or_else(|| {
                dom::closest_from_event(&e, CHIP)
                    .filter(|chip| chip.closest(CHIPBAR).ok().flatten().is_some())
            });
            if let Some(link) = opener {
                let href = link.get_attribute("href").unwrap_or_default();
                // Chips to other sections stay with the anchor router.
                let Some(id) = details.borrow().accordion.panel_for_href(&href).map(str::to_string) else {
                    return;
                };
                e.prevent_default();
                replace_hash(&id);
                open_and_reveal(&details, &id);
                return;
            }

            if dom::closest_from_event(&e, CLOSER).is_some() {
                let Some(panel) = dom::closest_from_event(&e, PANEL) else {
                    return;
                };
                if let Err(err) = details.borrow_mut().close(&panel.id()) {
                    warn!("Closing detail failed: {:?}", err);
                }
            }
        })?;
    }

    observe_panels(&details)?;

    // Deep link straight to a service.
    let initial = dom::window()
        .and_then(|w| w.location().hash().ok())
        .and_then(|h| hash_id(&h).map(str::to_string))
        .filter(|id| details.borrow().accordion.contains(id));
    if let Some(id) = initial {
        let details = details.clone();
        dom::next_frame(move || open_and_reveal(&details, &id));
    }

    info!("Detail accordion mounted with {} panels", details.borrow().panels.len());
    Ok(())
}
