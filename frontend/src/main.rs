use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;

mod config;
mod dom;
mod scroll_lock;
mod state {
    pub mod accordion;
    pub mod anchor;
    pub mod carousel;
    pub mod gallery;
    pub mod gesture;
    pub mod layout;
    pub mod nav;
    pub mod slideshow;
}
mod controllers {
    pub mod accordion;
    pub mod anchor;
    pub mod carousel;
    pub mod contact;
    pub mod layout;
    pub mod nav;
}
mod components {
    pub mod gallery;
    pub mod hero_slides;
    pub mod lightbox;
}

use components::{
    gallery::{Gallery, GalleryProps},
    hero_slides::{HeroSlides, HeroSlidesProps},
};
use config::{GalleryConfig, SlideshowConfig};
use scroll_lock::ScrollLock;

const HERO_SLIDES: &str = ".hero__slides";
const GALLERY: &str = "[data-gallery]";

fn mount_hero_slides() -> Result<(), JsValue> {
    let Some(host) = dom::query(HERO_SLIDES) else {
        debug!("Hero slideshow skipped: no {}", HERO_SLIDES);
        return Ok(());
    };
    let config = SlideshowConfig::from_element(&host);
    info!("Hero slideshow with {} images", config.images.len());
    yew::Renderer::<HeroSlides>::with_root_and_props(
        host,
        HeroSlidesProps {
            images: config.images,
            interval_ms: config.interval_ms,
        },
    )
    .render();
    Ok(())
}

fn mount_gallery(lock: ScrollLock) -> Result<(), JsValue> {
    let Some(host) = dom::query(GALLERY) else {
        debug!("Project gallery skipped: no {}", GALLERY);
        return Ok(());
    };
    let projects = state::gallery::catalogue();
    info!("Project gallery with {} projects", projects.len());
    yew::Renderer::<Gallery>::with_root_and_props(
        host.clone(),
        GalleryProps {
            projects: Rc::new(projects),
            config: GalleryConfig::from_element(&host),
            lock,
        },
    )
    .render();
    Ok(())
}

fn report(name: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("{} failed to mount: {:?}", name, e);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site scripts");

    let lock = ScrollLock::shared();

    report("Layout corrector", controllers::layout::mount());

    let nav = match controllers::nav::mount(ScrollLock::handle(&lock)) {
        Ok(nav) => nav,
        Err(e) => {
            warn!("Mobile nav failed to mount: {:?}", e);
            None
        }
    };
    report("Anchor router", controllers::anchor::mount(nav));
    report("Hero slideshow", mount_hero_slides());
    report("Services carousel", controllers::carousel::mount());
    report("Detail accordion", controllers::accordion::mount());
    report("Project gallery", mount_gallery(ScrollLock::handle(&lock)));
    report("Contact form", controllers::contact::mount_form());
    controllers::contact::fill_year();
}
