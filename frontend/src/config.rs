use log::Level;
use web_sys::Element;

use crate::dom;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tuning for the services carousel. Per-page overrides come from
/// `data-carousel-*` attributes on the viewport element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Autoplay speed in px/s.
    pub speed: f64,
    /// Fraction of the remaining distance covered per frame while easing.
    pub easing: f64,
    /// Distance below which an ease snaps exactly onto its target.
    pub epsilon: f64,
    /// Upper bound for a single frame delta, in seconds.
    pub max_frame_delta: f64,
    /// Share of the viewport width a drag must cover to count as a swipe.
    pub drag_threshold: f64,
    /// Initial offset as a share of one item-set width.
    pub start_fraction: f64,
    pub fallback_step: f64,
    pub fallback_gap: f64,
    /// Minimum number of cards before the loop is built.
    pub min_cards: usize,
    /// Delay between a resize event and re-measuring, in ms.
    pub resize_delay_ms: u32,
    /// How often the centre card highlight is refreshed, in ms.
    pub center_refresh_ms: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: 22.0,
            easing: 0.18,
            epsilon: 0.6,
            max_frame_delta: 0.05,
            drag_threshold: 0.15,
            start_fraction: 0.35,
            fallback_step: 380.0,
            fallback_gap: 16.0,
            min_cards: 2,
            resize_delay_ms: 50,
            center_refresh_ms: 120.0,
        }
    }
}

impl CarouselConfig {
    pub fn from_element(el: &Element, reduced_motion: bool) -> Self {
        let defaults = Self::default();
        let speed = dom::data_f64(el, "data-carousel-speed").unwrap_or(defaults.speed);
        Self {
            speed: if reduced_motion { 0.0 } else { speed.max(0.0) },
            easing: dom::data_f64(el, "data-carousel-easing")
                .filter(|e| *e > 0.0 && *e <= 1.0)
                .unwrap_or(defaults.easing),
            drag_threshold: dom::data_f64(el, "data-carousel-drag-threshold")
                .filter(|t| *t >= 0.0)
                .unwrap_or(defaults.drag_threshold),
            ..defaults
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    /// Viewport width at which the desktop nav takes over and the mobile panel closes.
    pub desktop_breakpoint: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { desktop_breakpoint: 900.0 }
    }
}

impl NavConfig {
    pub fn from_element(el: &Element) -> Self {
        let defaults = Self::default();
        Self {
            desktop_breakpoint: dom::data_f64(el, "data-nav-breakpoint")
                .unwrap_or(defaults.desktop_breakpoint),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorConfig {
    /// Breathing room added below the sticky header.
    pub header_gap: f64,
    /// Delay before honouring a hash present on initial load, in ms.
    pub initial_delay_ms: u32,
    /// Extra space kept between the chip bar and an opened detail panel.
    pub detail_gap: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            header_gap: 10.0,
            initial_delay_ms: 50,
            detail_gap: 16.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryConfig {
    pub page_size: usize,
    pub swipe_threshold: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            swipe_threshold: 50.0,
        }
    }
}

impl GalleryConfig {
    pub fn from_element(el: &Element) -> Self {
        let defaults = Self::default();
        Self {
            page_size: dom::data_f64(el, "data-gallery-page-size")
                .filter(|n| *n >= 1.0)
                .map(|n| n as usize)
                .unwrap_or(defaults.page_size),
            ..defaults
        }
    }
}

pub const DEFAULT_SLIDES: [&str; 6] = [
    "img/malerinwand.png",
    "img/malerinausenwand.png",
    "img/malerindecke.png",
    "img/hausfasade.png",
    "img/bodenarbeit.png",
    "img/zweimaler.png",
];

#[derive(Clone, Debug, PartialEq)]
pub struct SlideshowConfig {
    pub interval_ms: u32,
    pub images: Vec<String>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            images: DEFAULT_SLIDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SlideshowConfig {
    pub fn from_element(el: &Element) -> Self {
        let defaults = Self::default();
        let images = el
            .get_attribute("data-slides")
            .and_then(|raw| parse_slides(&raw))
            .unwrap_or(defaults.images);
        Self {
            interval_ms: dom::data_f64(el, "data-slideshow-interval")
                .filter(|ms| *ms >= 500.0)
                .map(|ms| ms as u32)
                .unwrap_or(defaults.interval_ms),
            images,
        }
    }
}

/// Parses a `data-slides` JSON array. Invalid JSON falls back to the defaults.
fn parse_slides(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(images) => Some(images),
        Err(e) => {
            log::warn!("Ignoring malformed data-slides: {}", e);
            None
        }
    }
}

pub const CONTACT_THANKS: &str = "Danke! Ihre Anfrage ist eingegangen – ich melde mich zeitnah.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_parse_from_json_array() {
        let parsed = parse_slides(r#"["a.png", "b.png"]"#);
        assert_eq!(parsed, Some(vec!["a.png".to_string(), "b.png".to_string()]));
    }

    #[test]
    fn malformed_slides_are_ignored() {
        assert_eq!(parse_slides("a.png, b.png"), None);
    }

    #[test]
    fn defaults_match_site_tuning() {
        let c = CarouselConfig::default();
        assert_eq!(c.speed, 22.0);
        assert_eq!(c.easing, 0.18);
        assert_eq!(GalleryConfig::default().page_size, 12);
        assert_eq!(SlideshowConfig::default().images.len(), 6);
    }
}
