//! Single-open detail panels on the services page.

use crate::state::anchor::hash_id;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accordion {
    panels: Vec<String>,
    open: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelView<'a> {
    pub id: &'a str,
    pub collapsed: bool,
}

impl Accordion {
    /// All panels start collapsed and the wrapper empty.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            panels: ids.into_iter().map(Into::into).collect(),
            open: None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Panel id named by a link such as `#fassade`. Links to anything else
    /// are not the accordion's to handle.
    pub fn panel_for_href(&self, href: &str) -> Option<&str> {
        let id = hash_id(href)?;
        self.index_of(id).map(|i| self.panels[i].as_str())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p == id)
    }

    /// Opens `id` and collapses every other panel. Returns false for an
    /// unknown id, which leaves the state untouched.
    pub fn open(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.open = Some(i);
                true
            }
            None => false,
        }
    }

    /// Collapses `id`. Closing a panel that is not open changes nothing.
    pub fn close(&mut self, id: &str) -> bool {
        match (self.index_of(id), self.open) {
            (Some(i), Some(open)) if i == open => {
                self.open = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn open_id(&self) -> Option<&str> {
        self.open.map(|i| self.panels[i].as_str())
    }

    /// Value of the wrapper's `data-has-open` flag.
    pub fn has_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn panels(&self) -> impl Iterator<Item = PanelView<'_>> {
        self.panels.iter().enumerate().map(move |(i, id)| PanelView {
            id,
            collapsed: self.open != Some(i),
        })
    }
}

/// Observed visibility of one panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Visibility<'a> {
    pub id: &'a str,
    pub ratio: f64,
    pub intersecting: bool,
}

/// Id of the most visible intersecting panel. Ties keep the first seen.
pub fn most_visible<'a>(entries: &[Visibility<'a>]) -> Option<&'a str> {
    entries
        .iter()
        .filter(|v| v.intersecting && !v.id.is_empty())
        .fold(None::<&Visibility<'a>>, |best, v| match best {
            Some(b) if b.ratio >= v.ratio => Some(b),
            _ => Some(v),
        })
        .map(|v| v.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn services() -> Accordion {
        Accordion::new(["malerarbeiten", "fassade", "tapezieren", "boden"])
    }

    fn collapsed_flags(a: &Accordion) -> Vec<(String, bool)> {
        a.panels().map(|p| (p.id.to_string(), p.collapsed)).collect()
    }

    #[test]
    fn starts_fully_collapsed() {
        let a = services();
        assert!(!a.has_open());
        assert!(a.panels().all(|p| p.collapsed));
    }

    #[test]
    fn open_then_close_round_trip() {
        let mut a = services();
        let initial = collapsed_flags(&a);

        assert!(a.open("malerarbeiten"));
        assert!(a.has_open());
        assert_eq!(
            collapsed_flags(&a),
            vec![
                ("malerarbeiten".to_string(), false),
                ("fassade".to_string(), true),
                ("tapezieren".to_string(), true),
                ("boden".to_string(), true),
            ]
        );

        assert!(a.close("malerarbeiten"));
        assert!(!a.has_open());
        assert_eq!(collapsed_flags(&a), initial);
    }

    #[test]
    fn at_most_one_panel_open() {
        let mut a = services();
        a.open("fassade");
        a.open("boden");
        assert_eq!(a.panels().filter(|p| !p.collapsed).count(), 1);
        assert_eq!(a.open_id(), Some("boden"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut a = services();
        a.open("fassade");
        assert!(!a.open("kontakt"));
        assert!(!a.close("kontakt"));
        assert_eq!(a.open_id(), Some("fassade"));
    }

    #[test]
    fn closing_a_collapsed_panel_keeps_the_open_one() {
        let mut a = services();
        a.open("fassade");
        assert!(!a.close("boden"));
        assert!(a.has_open());
    }

    #[test]
    fn only_panel_links_are_claimed() {
        let a = services();
        assert_eq!(a.panel_for_href("#fassade"), Some("fassade"));
        assert_eq!(a.panel_for_href("#kontakt"), None);
        assert_eq!(a.panel_for_href("#"), None);
        assert_eq!(a.panel_for_href("fassade"), None);
    }

    #[test]
    fn picks_most_visible_section() {
        let entries = [
            Visibility { id: "a", ratio: 0.4, intersecting: true },
            Visibility { id: "b", ratio: 0.9, intersecting: false },
            Visibility { id: "c", ratio: 0.65, intersecting: true },
        ];
        assert_eq!(most_visible(&entries), Some("c"));
        assert_eq!(most_visible(&entries[1..2]), None);
    }
}
