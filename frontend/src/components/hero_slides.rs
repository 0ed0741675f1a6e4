use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::HtmlImageElement;
use yew::prelude::*;

use crate::state::slideshow::Slideshow;

#[derive(Properties, PartialEq)]
pub struct HeroSlidesProps {
    pub images: Vec<String>,
    pub interval_ms: u32,
}

enum SlideAction {
    Advance,
}

#[derive(PartialEq)]
struct SlideState(Slideshow);

impl Reducible for SlideState {
    type Action = SlideAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SlideAction::Advance => Rc::new(SlideState(self.0.advance())),
        }
    }
}

#[function_component(HeroSlides)]
pub fn hero_slides(props: &HeroSlidesProps) -> Html {
    let count = props.images.len();
    let slides = use_reducer(|| SlideState(Slideshow::new(count)));

    // Warm the cache so later crossfades never show a blank frame.
    use_effect_with_deps(
        |images: &Vec<String>| {
            for src in images {
                if let Ok(img) = HtmlImageElement::new() {
                    img.set_src(src);
                }
            }
            || ()
        },
        props.images.clone(),
    );

    {
        let dispatcher = slides.dispatcher();
        use_effect_with_deps(
            move |(count, interval_ms)| {
                let timer = Slideshow::new(*count).is_animated().then(|| {
                    Interval::new(*interval_ms, move || dispatcher.dispatch(SlideAction::Advance))
                });
                move || drop(timer)
            },
            (count, props.interval_ms),
        );
    }

    html! {
        <>
            { for props.images.iter().enumerate().map(|(i, src)| {
                let active = slides.0.is_active(i);
                html! {
                    <div
                        class={classes!("slide", active.then_some("is-active"))}
                        style={format!("background-image: url(\"{}\")", src)}
                        aria-hidden="true"
                    />
                }
            }) }
        </>
    }
}
