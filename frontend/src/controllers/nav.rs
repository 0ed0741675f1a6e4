use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};

use crate::config::NavConfig;
use crate::dom;
use crate::scroll_lock::ScrollLock;
use crate::state::nav::{FocusTarget, NavEvent, NavState};

const TRIGGER: &str = ".nav__burger";
const PANEL_ID: &str = "navMobile";
const BAR: &str = ".nav";
const FOCUSABLE: &str = "a[href], button:not([disabled]), input, [tabindex]:not([tabindex='-1'])";

struct NavController {
    state: NavState,
    config: NavConfig,
    trigger: Element,
    panel: Element,
    bar: Option<Element>,
    lock: ScrollLock,
}

impl NavController {
    fn dispatch(&mut self, event: NavEvent) -> Result<(), JsValue> {
        let transition = self.state.on(event, self.config.desktop_breakpoint);
        if !transition.changed {
            return Ok(());
        }
        debug!("Mobile nav {:?} -> {:?} on {:?}", self.state, transition.state, event);
        self.state = transition.state;
        self.render()?;
        self.move_focus(transition.focus);
        Ok(())
    }

    fn render(&self) -> Result<(), JsValue> {
        let open = self.state.is_open();
        dom::set_flag(&self.trigger, "aria-expanded", open)?;
        dom::set_hidden(&self.panel, !open);
        self.panel.toggle_attribute_with_force("data-open", open)?;
        if let Some(root) = dom::document().and_then(|d| d.document_element()) {
            root.class_list().toggle_with_force("nav-open", open)?;
        }
        self.lock.set(open);
        Ok(())
    }

    fn move_focus(&self, target: FocusTarget) {
        let focus_inside_panel = dom::document()
            .and_then(|d| d.active_element())
            .map(|active| dom::contains(&self.panel, &active))
            .unwrap_or(false);

        let el = match target {
            FocusTarget::Panel => dom::query_in(&self.panel, FOCUSABLE),
            FocusTarget::Trigger => Some(self.trigger.clone()),
            // Never leave focus stranded inside a hidden panel.
            FocusTarget::Unchanged if !self.state.is_open() && focus_inside_panel => {
                Some(self.trigger.clone())
            }
            FocusTarget::Unchanged => None,
        };
        if let Some(html) = el.as_ref().and_then(dom::as_html) {
            let _ = html.focus();
        }
    }

    fn contains(&self, el: &Element) -> bool {
        dom::contains(&self.panel, el)
            || dom::contains(&self.trigger, el)
            || self.bar.as_ref().map(|b| dom::contains(b, el)).unwrap_or(false)
    }
}

/// Shared access to the mobile nav for other controllers.
#[derive(Clone)]
pub struct NavHandle(Rc<RefCell<NavController>>);

impl NavHandle {
    pub fn is_open(&self) -> bool {
        self.0.borrow().state.is_open()
    }

    pub fn send(&self, event: NavEvent) {
        if let Err(e) = self.0.borrow_mut().dispatch(event) {
            warn!("Mobile nav update failed: {:?}", e);
        }
    }
}

pub fn mount(lock: ScrollLock) -> Result<Option<NavHandle>, JsValue> {
    let (Some(trigger), Some(panel)) = (dom::query(TRIGGER), dom::by_id(PANEL_ID)) else {
        debug!("Mobile nav skipped: no burger or #{}", PANEL_ID);
        return Ok(None);
    };
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        return Ok(None);
    };

    let config = NavConfig::from_element(&panel);
    let handle = NavHandle(Rc::new(RefCell::new(NavController {
        state: NavState::Closed,
        config,
        trigger: trigger.clone(),
        panel: panel.clone(),
        bar: dom::query(BAR),
        lock,
    })));

    // Enforce the closed state regardless of what the markup says.
    handle.0.borrow().render()?;

    {
        let handle = handle.clone();
        dom::listen(&trigger, "click", move |_: MouseEvent| handle.send(NavEvent::Toggle))?;
    }
    {
        let handle = handle.clone();
        dom::listen(&panel, "click", move |e: MouseEvent| {
            if dom::closest_from_event(&e, "a").is_some() {
                handle.send(NavEvent::LinkClick);
            }
        })?;
    }
    {
        let handle = handle.clone();
        dom::listen(&document, "click", move |e: MouseEvent| {
            if !handle.is_open() {
                return;
            }
            let inside = dom::event_element(&e)
                .map(|el| handle.0.borrow().contains(&el))
                .unwrap_or(false);
            if !inside {
                handle.send(NavEvent::OutsideClick);
            }
        })?;
    }
    {
        let handle = handle.clone();
        dom::listen(&document, "keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                handle.send(NavEvent::Escape);
            }
        })?;
    }
    {
        let handle = handle.clone();
        dom::listen_passive(&window, "resize", move |_: Event| {
            handle.send(NavEvent::Resize {
                width: dom::inner_width(),
            });
        })?;
    }

    info!("Mobile nav mounted");
    Ok(Some(handle))
}
