#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slideshow {
    current: usize,
    len: usize,
}

impl Slideshow {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Only worth a timer with something to cross-fade to.
    pub fn is_animated(&self) -> bool {
        self.len > 1
    }

    pub fn advance(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            current: (self.current + 1) % self.len,
            ..self
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && index == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_last_slide() {
        let mut s = Slideshow::new(3);
        let mut seen = vec![s.current()];
        for _ in 0..4 {
            s = s.advance();
            seen.push(s.current());
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn exactly_one_active() {
        let s = Slideshow::new(6).advance().advance();
        assert_eq!((0..6).filter(|i| s.is_active(*i)).count(), 1);
        assert!(s.is_active(2));
    }

    #[test]
    fn empty_and_single_do_not_animate() {
        assert!(!Slideshow::new(0).is_animated());
        assert!(!Slideshow::new(1).is_animated());
        assert_eq!(Slideshow::new(0).advance().current(), 0);
        assert!(!Slideshow::new(0).is_active(0));
    }
}
