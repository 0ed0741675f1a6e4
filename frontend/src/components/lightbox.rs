use web_sys::TouchEvent;
use yew::prelude::*;

use crate::dom;
use crate::scroll_lock::ScrollLock;
use crate::state::gallery::Project;
use crate::state::gesture::{classify_swipe, SwipeDirection};

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub project: Option<Project>,
    pub open: bool,
    pub swipe_threshold: f64,
    pub lock: ScrollLock,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_close: Callback<()>,
}

fn first_touch(e: &TouchEvent, changed: bool) -> Option<(f64, f64)> {
    let list = if changed { e.changed_touches() } else { e.touches() };
    list.get(0).map(|t| (t.client_x() as f64, t.client_y() as f64))
}

#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    let touch_start = use_mut_ref(|| None::<(f64, f64)>);

    {
        let lock = props.lock.clone();
        use_effect_with_deps(
            move |open: &bool| {
                lock.set(*open);
                move || lock.unlock()
            },
            props.open,
        );
    }

    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let on_touch_start = {
        let touch_start = touch_start.clone();
        Callback::from(move |e: TouchEvent| {
            if !dom::is_coarse_pointer() {
                return;
            }
            *touch_start.borrow_mut() = first_touch(&e, false);
        })
    };

    let on_touch_end = {
        let touch_start = touch_start.clone();
        let on_prev = props.on_prev.clone();
        let on_next = props.on_next.clone();
        let threshold = props.swipe_threshold;
        Callback::from(move |e: TouchEvent| {
            let Some((sx, sy)) = touch_start.borrow_mut().take() else {
                return;
            };
            let (ex, ey) = first_touch(&e, true).unwrap_or((sx, sy));
            match classify_swipe(ex - sx, ey - sy, threshold) {
                Some(SwipeDirection::Left) => on_next.emit(()),
                Some(SwipeDirection::Right) => on_prev.emit(()),
                None => {}
            }
        })
    };

    let (src, title, desc) = match &props.project {
        Some(p) => (p.image.clone(), p.title.clone(), p.description.clone()),
        None => Default::default(),
    };

    html! {
        <div
            id="lightbox"
            class="lightbox"
            role="dialog"
            aria-modal="true"
            aria-labelledby="lbTitle"
            hidden={!props.open}
            aria-hidden={(!props.open).to_string()}
        >
            <div class="lightbox__backdrop" data-lb-close="" onclick={emit(&props.on_close)}></div>
            <div class="lightbox__panel">
                <button class="lightbox__close" type="button" data-lb-close="" aria-label="Schließen" onclick={emit(&props.on_close)}>
                    {"×"}
                </button>
                <button class="lightbox__nav lightbox__nav--prev" type="button" data-lb-prev="" aria-label="Vorheriges Projekt" onclick={emit(&props.on_prev)}>
                    {"‹"}
                </button>
                <figure class="lightbox__media" ontouchstart={on_touch_start} ontouchend={on_touch_end}>
                    <img id="lbImg" src={src} alt={title.clone()} />
                </figure>
                <button class="lightbox__nav lightbox__nav--next" type="button" data-lb-next="" aria-label="Nächstes Projekt" onclick={emit(&props.on_next)}>
                    {"›"}
                </button>
                <div class="lightbox__text">
                    <h3 id="lbTitle">{title}</h3>
                    <p id="lbDesc">{desc}</p>
                </div>
            </div>
        </div>
    }
}
