use chrono::{Datelike, Local};
use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlFormElement};

use crate::config::CONTACT_THANKS;
use crate::dom;

/// The contact form has no backend: submitting only acknowledges locally.
pub fn mount_form() -> Result<(), JsValue> {
    let (Some(form), Some(note)) = (dom::by_id("contactForm"), dom::by_id("formNote")) else {
        debug!("Contact form skipped: no #contactForm/#formNote");
        return Ok(());
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        debug!("Contact form skipped: #contactForm is not a form");
        return Ok(());
    };

    let form_el = form.clone();
    dom::listen(&form, "submit", move |e: Event| {
        e.prevent_default();
        note.set_text_content(Some(CONTACT_THANKS));
        form_el.reset();
        info!("Contact form acknowledged locally");
    })?;

    info!("Contact form mounted");
    Ok(())
}

pub fn fill_year() {
    if let Some(el) = dom::by_id("year") {
        el.set_text_content(Some(&Local::now().year().to_string()));
    }
}
