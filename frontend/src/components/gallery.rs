//! Filterable, searchable project grid with a lightbox.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::components::lightbox::Lightbox;
use crate::config::GalleryConfig;
use crate::scroll_lock::ScrollLock;
use crate::state::gallery::{self, category_label, GalleryState, Lightbox as LightboxState, Project, ALL};

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub projects: Rc<Vec<Project>>,
    pub config: GalleryConfig,
    pub lock: ScrollLock,
}

enum GalleryAction {
    Category(String),
    Query(String),
    LoadMore,
}

#[derive(PartialEq)]
struct Filtering(GalleryState);

impl Reducible for Filtering {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            GalleryAction::Category(c) => self.0.with_category(&c),
            GalleryAction::Query(q) => self.0.with_query(&q),
            GalleryAction::LoadMore => self.0.load_more(),
        };
        Rc::new(Filtering(next))
    }
}

enum BoxAction {
    Open { index: usize, len: usize },
    Step { forward: bool, len: usize },
    Clamp { len: usize },
    Close,
}

#[derive(PartialEq)]
struct BoxState(LightboxState);

impl Reducible for BoxState {
    type Action = BoxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            BoxAction::Open { index, len } => LightboxState::open_at(index, len),
            BoxAction::Step { forward, len } => self.0.step(forward, len),
            BoxAction::Clamp { len } => self.0.clamp(len),
            BoxAction::Close => self.0.close(),
        };
        Rc::new(BoxState(next))
    }
}

#[derive(Properties, PartialEq)]
struct CardProps {
    project: Project,
    index: usize,
    on_open: Callback<usize>,
}

#[function_component(ProjectCard)]
fn project_card(props: &CardProps) -> Html {
    let p = &props.project;
    let onclick = {
        let on_open = props.on_open.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_open.emit(index))
    };

    html! {
        <button class="projectCard" type="button" data-idx={props.index.to_string()} aria-label={p.title.clone()} {onclick}>
            <div class="projectMedia">
                <img src={p.image.clone()} alt={p.title.clone()} loading="lazy" decoding="async" />
            </div>
            <div class="projectBody">
                <h3>{p.heading()}</h3>
                <p>{p.subtitle.clone().unwrap_or_default()}</p>
                <span class="tag">{&p.category}</span>
            </div>
        </button>
    }
}

#[function_component(Gallery)]
pub fn gallery_view(props: &GalleryProps) -> Html {
    let page_size = props.config.page_size;
    let filtering = use_reducer(|| Filtering(GalleryState::new(page_size)));
    let lightbox = use_reducer_eq(|| BoxState(LightboxState::default()));

    let categories = use_memo(|projects| gallery::categories(projects), props.projects.clone());
    let view = filtering.0.view(&props.projects);
    let len = view.matches.len();

    // A new result list invalidates the lightbox position.
    {
        let dispatcher = lightbox.dispatcher();
        use_effect_with_deps(
            move |len: &usize| {
                dispatcher.dispatch(BoxAction::Clamp { len: *len });
                || ()
            },
            len,
        );
    }

    // Keyboard navigation while the lightbox is open.
    {
        let dispatcher = lightbox.dispatcher();
        use_effect_with_deps(
            move |(open, len): &(bool, usize)| {
                let (open, len) = (*open, *len);
                let window = web_sys::window();
                let listener = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if !open {
                        return;
                    }
                    match e.key().as_str() {
                        "Escape" => dispatcher.dispatch(BoxAction::Close),
                        "ArrowLeft" => dispatcher.dispatch(BoxAction::Step { forward: false, len }),
                        "ArrowRight" => dispatcher.dispatch(BoxAction::Step { forward: true, len }),
                        _ => {}
                    }
                }) as Box<dyn FnMut(KeyboardEvent)>);

                if let Some(window) = &window {
                    let _ = window
                        .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
                }

                move || {
                    if let Some(window) = &window {
                        let _ = window.remove_event_listener_with_callback(
                            "keydown",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (lightbox.0.open, len),
        );
    }

    let chips = std::iter::once(ALL.to_string())
        .chain(categories.iter().cloned())
        .map(|cat| {
            let active = filtering.0.filter.category == cat;
            let onclick = {
                let filtering = filtering.dispatcher();
                let cat = cat.clone();
                Callback::from(move |_: MouseEvent| filtering.dispatch(GalleryAction::Category(cat.clone())))
            };
            html! {
                <button
                    class={classes!("chip", active.then_some("is-active"))}
                    type="button"
                    role="tab"
                    data-filter={cat.clone()}
                    aria-selected={active.to_string()}
                    {onclick}
                >
                    {category_label(&cat)}
                </button>
            }
        })
        .collect::<Html>();

    let on_search = {
        let filtering = filtering.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filtering.dispatch(GalleryAction::Query(input.value()));
        })
    };

    let on_load_more = {
        let filtering = filtering.dispatcher();
        Callback::from(move |_: MouseEvent| filtering.dispatch(GalleryAction::LoadMore))
    };

    let on_open = {
        let dispatcher = lightbox.dispatcher();
        Callback::from(move |index: usize| dispatcher.dispatch(BoxAction::Open { index, len }))
    };
    let step = |forward: bool| {
        let dispatcher = lightbox.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BoxAction::Step { forward, len }))
    };
    let on_close = {
        let dispatcher = lightbox.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BoxAction::Close))
    };

    let current = view
        .matches
        .get(lightbox.0.index)
        .and_then(|i| props.projects.get(*i))
        .cloned();

    html! {
        <div class="gallery">
            <div class="gallery__controls">
                <div class="chips" id="filterChips" role="tablist">
                    { chips }
                </div>
                <input
                    id="searchInput"
                    class="search"
                    type="search"
                    placeholder="Projekte durchsuchen…"
                    aria-label="Projekte durchsuchen"
                    oninput={on_search}
                />
            </div>
            <div class="projectGrid" id="projectGrid">
                { for view.shown().iter().enumerate().map(|(pos, i)| html! {
                    <ProjectCard
                        key={*i}
                        project={props.projects[*i].clone()}
                        index={pos}
                        on_open={on_open.clone()}
                    />
                }) }
            </div>
            <p class="emptyNote" id="emptyNote" hidden={!view.is_empty()}>
                {"Keine passenden Projekte gefunden."}
            </p>
            <button class="btn loadMore" id="loadMoreBtn" type="button" hidden={!view.has_more()} onclick={on_load_more}>
                {"Mehr anzeigen"}
            </button>
            <Lightbox
                project={current}
                open={lightbox.0.open}
                swipe_threshold={props.config.swipe_threshold}
                lock={props.lock.clone()}
                on_prev={step(false)}
                on_next={step(true)}
                on_close={on_close}
            />
        </div>
    }
}
