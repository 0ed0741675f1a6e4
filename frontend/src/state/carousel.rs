//! Offset engine behind the services carousel.
//!
//! The track holds the original cards followed by one clone of them, so any
//! offset can be folded into `(-set_width, 0]` without a visible jump. The
//! engine keeps the logical offset, which may leave that range while a drag
//! or an ease is in flight; [`CarouselEngine::rendered`] is always folded.

use crate::config::CarouselConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Content moves left and the following card comes in from the right.
    Next,
    Prev,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Autoplaying,
    Dragging { start_x: f64, start_offset: f64 },
    Easing { target: f64 },
}

#[derive(Clone, Debug)]
pub struct CarouselEngine {
    config: CarouselConfig,
    offset: f64,
    set_width: f64,
    card_step: f64,
    interacted: bool,
    hovered: bool,
    mode: Mode,
    last_ts: Option<f64>,
}

/// Folds `x` into `(-set_width, 0]`. A zero width leaves `x` untouched.
pub fn normalize(x: f64, set_width: f64) -> f64 {
    if set_width <= 0.0 {
        return x;
    }
    let mut n = x % set_width;
    if n > 0.0 {
        n -= set_width;
    }
    n
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            offset: 0.0,
            set_width: 0.0,
            card_step: config.fallback_step,
            interacted: false,
            hovered: false,
            mode: Mode::Autoplaying,
            last_ts: None,
        }
    }

    #[cfg(test)]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn rendered(&self) -> f64 {
        normalize(self.offset, self.set_width)
    }

    #[cfg(test)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    pub fn is_paused(&self) -> bool {
        self.hovered || self.interacted
    }

    /// Applies a fresh measurement of one item-set and one card step.
    ///
    /// A settled, card-aligned offset stays on the same card index; anything
    /// else is just folded back into range. A pending ease keeps its card
    /// index under the new step.
    pub fn remeasure(&mut self, set_width: f64, card_step: f64) {
        let old_step = self.card_step;
        let new_step = if card_step > 0.0 { card_step } else { self.config.fallback_step };
        self.set_width = set_width.max(0.0);
        self.card_step = new_step;

        match self.mode {
            Mode::Easing { target } => {
                let index = (target / old_step).round();
                self.mode = Mode::Easing { target: index * new_step };
                self.offset *= new_step / old_step;
            }
            Mode::Dragging { .. } => {}
            Mode::Autoplaying => {
                if self.interacted && old_step > 0.0 {
                    let index = (self.offset / old_step).round();
                    self.offset = index * new_step;
                } else {
                    self.offset = normalize(self.offset, self.set_width);
                }
            }
        }
    }

    /// Places the strip a little inside the first set so both edges are filled.
    pub fn start(&mut self) {
        self.offset = normalize(-self.set_width * self.config.start_fraction, self.set_width);
    }

    /// Advances one animation frame at timestamp `ts` (ms) and returns the
    /// folded offset to render.
    pub fn frame(&mut self, ts: f64) -> f64 {
        let last = self.last_ts.unwrap_or(ts);
        self.last_ts = Some(ts);
        let dt = ((ts - last) / 1000.0).clamp(0.0, self.config.max_frame_delta);
        self.tick(dt);
        self.rendered()
    }

    /// Advances the state by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        match self.mode {
            Mode::Autoplaying => {
                if !self.is_paused() && self.config.speed > 0.0 {
                    self.offset = normalize(self.offset + self.config.speed * dt, self.set_width);
                }
            }
            Mode::Easing { target } => {
                let diff = target - self.offset;
                if diff.abs() < self.config.epsilon {
                    self.offset = target;
                    self.mode = Mode::Autoplaying;
                } else {
                    self.offset += diff * self.config.easing;
                }
            }
            Mode::Dragging { .. } => {}
        }
    }

    fn aligned(&self, x: f64) -> f64 {
        (x / self.card_step).round() * self.card_step
    }

    /// Card-aligned position strictly beyond `x` in `direction`.
    fn aligned_beyond(&self, x: f64, direction: Direction) -> f64 {
        let step = self.card_step;
        let eps = self.config.epsilon;
        match direction {
            Direction::Next => ((x - eps) / step).floor() * step,
            Direction::Prev => ((x + eps) / step).ceil() * step,
        }
    }

    /// Folds the logical offset back into range while nothing depends on it.
    fn rebase(&mut self) {
        self.offset = normalize(self.offset, self.set_width);
    }

    /// Steps one card in `direction` and permanently stops autoplay.
    pub fn snap(&mut self, direction: Direction) {
        self.interacted = true;
        let target = match self.mode {
            Mode::Easing { target } => match direction {
                Direction::Next => target - self.card_step,
                Direction::Prev => target + self.card_step,
            },
            _ => {
                self.rebase();
                self.aligned_beyond(self.offset, direction)
            }
        };
        self.mode = Mode::Easing { target };
    }

    /// Eases to whichever card-aligned position is closest.
    pub fn settle(&mut self) {
        let target = match self.mode {
            Mode::Easing { target } => target,
            _ => {
                self.rebase();
                self.aligned(self.offset)
            }
        };
        self.mode = Mode::Easing { target };
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.interacted = true;
        self.rebase();
        self.mode = Mode::Dragging {
            start_x: x,
            start_offset: self.offset,
        };
    }

    pub fn pointer_move(&mut self, x: f64) {
        if let Mode::Dragging { start_x, start_offset } = self.mode {
            self.offset = start_offset + (x - start_x);
        }
    }

    pub fn pointer_up(&mut self, x: f64, viewport_width: f64) {
        let Mode::Dragging { start_x, .. } = self.mode else {
            return;
        };
        self.pointer_move(x);
        let dx = x - start_x;
        let threshold = viewport_width.max(0.0) * self.config.drag_threshold;
        self.mode = Mode::Autoplaying;
        if dx.abs() > threshold {
            let direction = if dx < 0.0 { Direction::Next } else { Direction::Prev };
            self.mode = Mode::Easing {
                target: self.aligned_beyond(self.offset, direction),
            };
        } else {
            self.settle();
        }
    }

    /// Pointer capture lost mid-drag: keep the position, align to a card.
    pub fn pointer_cancel(&mut self) {
        if matches!(self.mode, Mode::Dragging { .. }) {
            self.mode = Mode::Autoplaying;
            self.settle();
        }
    }

    pub fn pause(&mut self) {
        self.hovered = true;
    }

    pub fn resume(&mut self) {
        self.hovered = false;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Dragging { .. })
    }
}

/// Pointer travel during one press on the strip. A press only becomes a
/// drag once it has moved more than the slop; until then clicks on card
/// links go through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PressTracker {
    origin: Option<f64>,
    dragged: bool,
}

impl PressTracker {
    pub fn press(&mut self, x: f64) {
        self.origin = Some(x);
        self.dragged = false;
    }

    /// True on the one move that first exceeds `slop`. That is the moment
    /// to capture the pointer.
    pub fn moved(&mut self, x: f64, slop: f64) -> bool {
        match self.origin {
            Some(origin) if !self.dragged && (x - origin).abs() > slop => {
                self.dragged = true;
                true
            }
            _ => false,
        }
    }

    /// Ends the press. Returns whether the pointer had been captured.
    pub fn release(&mut self) -> bool {
        self.origin.take().is_some() && self.dragged
    }

    /// Whether the click that follows the press must be swallowed. Resets.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.dragged)
    }
}

/// Index of the card whose centre is closest to `center`.
/// Cards are given as `(left, width)` pairs.
pub fn nearest_to_center(cards: &[(f64, f64)], center: f64) -> Option<usize> {
    cards
        .iter()
        .enumerate()
        .map(|(i, (left, width))| (i, (left + width / 2.0 - center).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 296.0;
    /// Five cards per set, so folding a card-aligned offset stays aligned.
    const SET: f64 = 5.0 * STEP;

    fn engine() -> CarouselEngine {
        let mut e = CarouselEngine::new(CarouselConfig::default());
        e.remeasure(SET, STEP);
        e.start();
        e
    }

    fn run_until_settled(e: &mut CarouselEngine) {
        for _ in 0..10_000 {
            if !matches!(e.mode(), Mode::Easing { .. }) {
                return;
            }
            e.tick(1.0 / 60.0);
        }
        panic!("ease never settled");
    }

    fn assert_card_aligned(x: f64) {
        let k = (x / STEP).round();
        assert!((x - k * STEP).abs() < 1e-9, "{} is not a multiple of {}", x, STEP);
    }

    #[test]
    fn normalize_stays_in_half_open_range() {
        for x in [-5000.5, -SET, -SET + 0.1, -1.0, 0.0, 0.1, SET - 1.0, SET, 123456.7] {
            let n = normalize(x, SET);
            assert!(n > -SET && n <= 0.0, "normalize({}) = {}", x, n);
        }
        assert_eq!(normalize(42.0, 0.0), 42.0);
    }

    #[test]
    fn start_offset_is_inside_first_set() {
        let e = engine();
        assert!((e.offset() - (-0.35 * SET)).abs() < 1e-9);
    }

    #[test]
    fn autoplay_never_leaves_range() {
        let mut e = engine();
        let mut ts = 0.0;
        for _ in 0..200_000 {
            ts += 16.7;
            let x = e.frame(ts);
            assert!(x > -SET && x <= 0.0);
        }
    }

    #[test]
    fn frame_delta_is_capped() {
        let mut e = engine();
        e.frame(0.0);
        let before = e.offset();
        e.frame(10_000.0);
        let moved = e.offset() - before;
        assert!((moved - 22.0 * 0.05).abs() < 1e-9);
    }

    #[test]
    fn reduced_motion_speed_zero_freezes_autoplay() {
        let mut e = CarouselEngine::new(CarouselConfig {
            speed: 0.0,
            ..CarouselConfig::default()
        });
        e.remeasure(SET, STEP);
        e.start();
        let before = e.offset();
        e.tick(0.05);
        assert_eq!(e.offset(), before);
    }

    #[test]
    fn snap_settles_on_card_multiple_from_any_offset() {
        for start in [-350.0, -1.3, -999.0, -0.0, -600.6, -296.2] {
            for dir in [Direction::Next, Direction::Prev] {
                let mut e = engine();
                e.remeasure(SET, STEP);
                e.offset = start;
                e.snap(dir);
                run_until_settled(&mut e);
                assert_card_aligned(e.offset());
                assert_card_aligned(e.rendered());
                let rendered = e.rendered();
                assert!(rendered > -SET && rendered <= 0.0);
                let moved = e.offset() - normalize(start, SET);
                match dir {
                    Direction::Next => assert!(moved < 0.0),
                    Direction::Prev => assert!(moved > 0.0),
                }
            }
        }
    }

    #[test]
    fn snap_from_aligned_moves_exactly_one_step() {
        let mut e = engine();
        e.offset = -2.0 * STEP;
        e.snap(Direction::Next);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -3.0 * STEP);
        e.snap(Direction::Prev);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -2.0 * STEP);
    }

    #[test]
    fn repeated_snap_mid_ease_accumulates() {
        let mut e = engine();
        e.offset = -STEP;
        e.snap(Direction::Next);
        e.tick(1.0 / 60.0);
        e.snap(Direction::Next);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -3.0 * STEP);
    }

    #[test]
    fn interaction_latch_is_permanent() {
        let mut e = engine();
        e.snap(Direction::Next);
        run_until_settled(&mut e);
        e.resume();
        let before = e.offset();
        e.tick(0.05);
        assert_eq!(e.offset(), before);
        assert!(e.has_interacted());
    }

    #[test]
    fn hover_pauses_until_left() {
        let mut e = engine();
        e.pause();
        let before = e.offset();
        e.tick(0.05);
        assert_eq!(e.offset(), before);
        e.resume();
        e.tick(0.05);
        assert!(e.offset() > before);
    }

    #[test]
    fn drag_tracks_pointer_one_to_one() {
        let mut e = engine();
        e.pointer_down(100.0);
        let start = e.offset();
        e.pointer_move(60.0);
        assert_eq!(e.offset(), start - 40.0);
        e.pointer_move(130.0);
        assert_eq!(e.offset(), start + 30.0);
    }

    #[test]
    fn short_drag_eases_back_to_nearest_card() {
        let mut e = engine();
        e.offset = -2.0 * STEP;
        e.pointer_down(500.0);
        e.pointer_move(480.0);
        e.pointer_up(480.0, 800.0);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -2.0 * STEP);
    }

    #[test]
    fn long_left_drag_advances_to_next_card() {
        let mut e = engine();
        e.offset = -STEP;
        e.pointer_down(500.0);
        e.pointer_up(300.0, 800.0);
        run_until_settled(&mut e);
        assert_card_aligned(e.offset());
        assert!(e.offset() < -STEP - 200.0 + 1e-9);
    }

    #[test]
    fn long_right_drag_goes_back() {
        let mut e = engine();
        e.offset = -2.0 * STEP;
        e.pointer_down(300.0);
        e.pointer_up(450.0, 800.0);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -STEP);
    }

    #[test]
    fn pointer_up_without_drag_is_ignored() {
        let mut e = engine();
        let before = e.offset();
        e.pointer_up(10.0, 800.0);
        assert_eq!(e.offset(), before);
        assert_eq!(e.mode(), Mode::Autoplaying);
    }

    #[test]
    fn resize_keeps_settled_card_index() {
        let mut e = engine();
        e.offset = -2.0 * STEP;
        e.snap(Direction::Next);
        run_until_settled(&mut e);
        e.remeasure(800.0, 200.0);
        assert_eq!(e.offset(), -600.0);
    }

    #[test]
    fn resize_realigns_pending_target() {
        let mut e = engine();
        e.offset = -STEP;
        e.snap(Direction::Next);
        e.remeasure(800.0, 200.0);
        run_until_settled(&mut e);
        assert_eq!(e.offset(), -400.0);
    }

    #[test]
    fn resize_before_interaction_normalizes() {
        let mut e = engine();
        e.offset = -900.0;
        e.remeasure(500.0, 150.0);
        assert!(e.offset() > -500.0 && e.offset() <= 0.0);
    }

    #[test]
    fn press_becomes_drag_only_past_slop() {
        let mut p = PressTracker::default();
        p.press(100.0);
        assert!(!p.moved(104.0, 6.0));
        assert!(p.moved(93.0, 6.0));
        // Capture is requested once per press.
        assert!(!p.moved(60.0, 6.0));
        assert!(p.release());
        assert!(p.take_click_suppression());
        assert!(!p.take_click_suppression());
    }

    #[test]
    fn plain_click_is_never_captured_or_swallowed() {
        let mut p = PressTracker::default();
        p.press(200.0);
        assert!(!p.moved(203.0, 6.0));
        assert!(!p.release());
        assert!(!p.take_click_suppression());
    }

    #[test]
    fn new_press_clears_previous_drag() {
        let mut p = PressTracker::default();
        p.press(0.0);
        p.moved(50.0, 6.0);
        p.release();
        p.press(10.0);
        assert!(!p.take_click_suppression());
    }

    #[test]
    fn nearest_card_to_center() {
        let cards = [(0.0, 100.0), (116.0, 100.0), (232.0, 100.0)];
        assert_eq!(nearest_to_center(&cards, 170.0), Some(1));
        assert_eq!(nearest_to_center(&cards, 1000.0), Some(2));
        assert_eq!(nearest_to_center(&[], 10.0), None);
    }
}
