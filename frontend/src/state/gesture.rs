#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next item.
    Left,
    Right,
}

/// Classifies a finished touch as a horizontal swipe. Mostly vertical or
/// short movements are scrolls or taps and yield `None`.
pub fn classify_swipe(dx: f64, dy: f64, threshold: f64) -> Option<SwipeDirection> {
    if dx.abs() > threshold && dx.abs() > dy.abs() {
        Some(if dx < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_swipes() {
        assert_eq!(classify_swipe(-80.0, 10.0, 50.0), Some(SwipeDirection::Left));
        assert_eq!(classify_swipe(60.0, -20.0, 50.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn short_or_vertical_moves_are_not_swipes() {
        assert_eq!(classify_swipe(-50.0, 0.0, 50.0), None);
        assert_eq!(classify_swipe(70.0, 90.0, 50.0), None);
        assert_eq!(classify_swipe(0.0, 0.0, 40.0), None);
    }
}
