//! Open/closed state of the mobile navigation panel.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavEvent {
    Toggle,
    Escape,
    OutsideClick,
    LinkClick,
    HashLinkClick,
    Resize { width: f64 },
}

/// Where keyboard focus should go after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Panel,
    Trigger,
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: NavState,
    pub changed: bool,
    pub focus: FocusTarget,
}

impl NavState {
    pub fn is_open(self) -> bool {
        self == NavState::Open
    }

    /// Computes the next state. Every event except `Toggle` can only close the
    /// panel; `Resize` closes it once the desktop layout takes over.
    pub fn on(self, event: NavEvent, desktop_breakpoint: f64) -> Transition {
        let next = match (self, event) {
            (NavState::Closed, NavEvent::Toggle) => NavState::Open,
            (NavState::Open, NavEvent::Toggle)
            | (NavState::Open, NavEvent::Escape)
            | (NavState::Open, NavEvent::OutsideClick)
            | (NavState::Open, NavEvent::LinkClick)
            | (NavState::Open, NavEvent::HashLinkClick) => NavState::Closed,
            (NavState::Open, NavEvent::Resize { width }) if width >= desktop_breakpoint => {
                NavState::Closed
            }
            (state, _) => state,
        };

        let changed = next != self;
        let focus = match (changed, next, event) {
            (false, _, _) => FocusTarget::Unchanged,
            (true, NavState::Open, _) => FocusTarget::Panel,
            (true, NavState::Closed, NavEvent::Escape | NavEvent::Toggle) => FocusTarget::Trigger,
            (true, NavState::Closed, _) => FocusTarget::Unchanged,
        };

        Transition {
            state: next,
            changed,
            focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BP: f64 = 900.0;

    #[test]
    fn click_opens_then_escape_closes() {
        let open = NavState::Closed.on(NavEvent::Toggle, BP);
        assert_eq!(open.state, NavState::Open);
        assert!(open.changed);
        assert_eq!(open.focus, FocusTarget::Panel);

        let closed = open.state.on(NavEvent::Escape, BP);
        assert_eq!(closed.state, NavState::Closed);
        assert_eq!(closed.focus, FocusTarget::Trigger);
    }

    #[test]
    fn closing_events_are_noops_when_closed() {
        for event in [
            NavEvent::Escape,
            NavEvent::OutsideClick,
            NavEvent::LinkClick,
            NavEvent::HashLinkClick,
            NavEvent::Resize { width: 1400.0 },
        ] {
            let t = NavState::Closed.on(event, BP);
            assert_eq!(t.state, NavState::Closed);
            assert!(!t.changed);
            assert_eq!(t.focus, FocusTarget::Unchanged);
        }
    }

    #[test]
    fn link_and_outside_clicks_close_without_stealing_focus() {
        for event in [NavEvent::LinkClick, NavEvent::OutsideClick, NavEvent::HashLinkClick] {
            let t = NavState::Open.on(event, BP);
            assert_eq!(t.state, NavState::Closed);
            assert_eq!(t.focus, FocusTarget::Unchanged);
        }
    }

    #[test]
    fn resize_closes_only_at_desktop_width() {
        assert_eq!(NavState::Open.on(NavEvent::Resize { width: 899.0 }, BP).state, NavState::Open);
        assert_eq!(NavState::Open.on(NavEvent::Resize { width: 900.0 }, BP).state, NavState::Closed);
    }
}
