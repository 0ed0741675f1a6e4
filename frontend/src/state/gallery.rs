//! Project catalogue with category filter, text search and paging.

use serde::Deserialize;

const CATALOGUE: &str = include_str!("../../data/projects.json");

pub const ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub category: String,
    pub title: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Project {
    /// Card heading: the title up to its first dash-separated part.
    pub fn heading(&self) -> &str {
        self.title.split(" – ").next().unwrap_or(&self.title)
    }

    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.description,
            self.subtitle.as_deref().unwrap_or(""),
            self.category
        )
        .to_lowercase()
    }
}

/// Decodes the catalogue compiled into the binary.
pub fn catalogue() -> Vec<Project> {
    parse_catalogue(CATALOGUE)
}

pub fn parse_catalogue(raw: &str) -> Vec<Project> {
    match serde_json::from_str::<Vec<Project>>(raw) {
        Ok(projects) => projects,
        Err(e) => {
            log::error!("Project catalogue is malformed: {}", e);
            Vec::new()
        }
    }
}

/// Sorted distinct categories present in `projects`.
pub fn categories(projects: &[Project]) -> Vec<String> {
    let mut cats: Vec<String> = projects.iter().map(|p| p.category.clone()).collect();
    cats.sort();
    cats.dedup();
    cats
}

pub fn category_label(category: &str) -> String {
    if category == ALL {
        return "Alle".to_string();
    }
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub category: String,
    query: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            query: String::new(),
        }
    }
}

impl Filter {
    pub fn new(category: &str, query: &str) -> Self {
        Self {
            category: category.to_string(),
            query: normalize_query(query),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, p: &Project) -> bool {
        let category_ok = self.category == ALL || p.category == self.category;
        let text_ok = self.query.is_empty() || p.haystack().contains(&self.query);
        category_ok && text_ok
    }
}

#[cfg(test)]
pub fn filter<'a>(projects: &'a [Project], f: &Filter) -> Vec<&'a Project> {
    projects.iter().filter(|p| f.matches(p)).collect()
}

/// Current filter plus how many matches are revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryState {
    pub filter: Filter,
    pub visible: usize,
    page_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryView {
    /// Catalogue indices of every match, in catalogue order.
    pub matches: Vec<usize>,
    pub visible: usize,
}

impl GalleryView {
    pub fn shown(&self) -> &[usize] {
        &self.matches[..self.visible.min(self.matches.len())]
    }

    pub fn has_more(&self) -> bool {
        self.matches.len() > self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl GalleryState {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            filter: Filter::default(),
            visible: page_size,
            page_size,
        }
    }

    pub fn with_category(&self, category: &str) -> Self {
        Self {
            filter: Filter::new(category, self.filter.query()),
            visible: self.page_size,
            ..self.clone()
        }
    }

    pub fn with_query(&self, raw: &str) -> Self {
        Self {
            filter: Filter::new(&self.filter.category, raw),
            visible: self.page_size,
            ..self.clone()
        }
    }

    pub fn load_more(&self) -> Self {
        Self {
            visible: self.visible + self.page_size,
            ..self.clone()
        }
    }

    pub fn view(&self, projects: &[Project]) -> GalleryView {
        GalleryView {
            matches: projects
                .iter()
                .enumerate()
                .filter(|(_, p)| self.filter.matches(p))
                .map(|(i, _)| i)
                .collect(),
            visible: self.visible,
        }
    }
}

/// Lightbox position inside the current filtered list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lightbox {
    pub index: usize,
    pub open: bool,
}

impl Lightbox {
    pub fn open_at(index: usize, len: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        Self {
            index: index.min(len - 1),
            open: true,
        }
    }

    /// Moves by one with wrap-around; `forward` is the "next" button.
    pub fn step(self, forward: bool, len: usize) -> Self {
        if !self.open || len == 0 {
            return self;
        }
        let index = self.index.min(len - 1);
        let index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self { index, open: true }
    }

    pub fn close(self) -> Self {
        Self { open: false, ..self }
    }

    /// Keeps the index valid after the list it points into has changed.
    pub fn clamp(self, len: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        Self {
            index: self.index.min(len - 1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles(list: &[&Project]) -> Vec<String> {
        list.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn catalogue_decodes() {
        let projects = catalogue();
        assert_eq!(projects.len(), 8);
        assert!(projects.iter().all(|p| p.subtitle.is_some()));
    }

    #[test]
    fn malformed_catalogue_is_empty() {
        assert!(parse_catalogue("{ not json").is_empty());
    }

    #[test]
    fn missing_subtitle_is_allowed() {
        let projects = parse_catalogue(
            r#"[{"category":"innen","title":"A","image":"a.png","description":"d"}]"#,
        );
        assert_eq!(projects[0].subtitle, None);
        assert!(Filter::new(ALL, "d").matches(&projects[0]));
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        assert_eq!(
            categories(&catalogue()),
            vec!["boden", "detail", "fassade", "innen"]
        );
    }

    #[test]
    fn labels() {
        assert_eq!(category_label(ALL), "Alle");
        assert_eq!(category_label("fassade"), "Fassade");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn fassade_filter_shows_both_in_order_without_load_more() {
        let projects = catalogue();
        let state = GalleryState::new(12).with_category("fassade");
        let view = state.view(&projects);
        let shown: Vec<&str> = view.shown().iter().map(|i| projects[*i].title.as_str()).collect();
        assert_eq!(
            shown,
            vec![
                "Fassadengestaltung – Frischer Look",
                "Renovierung – Reparatur & Auffrischung",
            ]
        );
        assert!(!view.has_more());
        assert!(!view.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let projects = catalogue();
        let upper = filter(&projects, &Filter::new(ALL, "STUCK"));
        let lower = filter(&projects, &Filter::new(ALL, "stuck"));
        assert_eq!(titles(&upper), titles(&lower));
        assert_eq!(titles(&upper), vec!["Stuckprofile – Detailfinish".to_string()]);
    }

    #[test]
    fn search_covers_subtitle_and_category() {
        let projects = catalogue();
        assert_eq!(filter(&projects, &Filter::new(ALL, "ruhiges gesamtbild")).len(), 2);
        assert_eq!(filter(&projects, &Filter::new(ALL, "  BODEN ")).len(), 1);
    }

    #[test]
    fn filter_is_idempotent() {
        let projects = catalogue();
        let f = Filter::new("detail", "sauber");
        let once: Vec<Project> = filter(&projects, &f).into_iter().cloned().collect();
        let twice: Vec<Project> = filter(&once, &f).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn category_and_query_combine() {
        let projects = catalogue();
        let hits = filter(&projects, &Filter::new("innen", "spachtel"));
        assert_eq!(titles(&hits), vec!["Spachtelarbeiten – Basis für Perfektion".to_string()]);
        assert!(filter(&projects, &Filter::new("boden", "fassade")).is_empty());
    }

    #[test]
    fn pagination_grows_by_page_and_resets_on_filter() {
        let projects = catalogue();
        let state = GalleryState::new(3);
        let view = state.view(&projects);
        assert_eq!(view.shown().len(), 3);
        assert!(view.has_more());

        let more = state.load_more().load_more();
        let view = more.view(&projects);
        assert_eq!(view.shown().len(), 8);
        assert!(!view.has_more());

        assert_eq!(more.with_query("a").visible, 3);
        assert_eq!(more.with_category("innen").visible, 3);
    }

    #[test]
    fn query_survives_category_change() {
        let state = GalleryState::new(12).with_query("Sauber").with_category("detail");
        assert_eq!(state.filter.query(), "sauber");
        assert_eq!(state.filter.category, "detail");
    }

    #[test]
    fn empty_result() {
        let projects = catalogue();
        let view = GalleryState::new(12).with_query("xyz").view(&projects);
        assert!(view.is_empty());
        assert!(view.shown().is_empty());
        assert!(!view.has_more());
    }

    #[test]
    fn headings_cut_at_dash() {
        let projects = catalogue();
        assert_eq!(projects[0].heading(), "Innenarbeiten");
    }

    #[test]
    fn lightbox_wraps_both_ways() {
        let lb = Lightbox::open_at(0, 3);
        assert_eq!(lb.step(false, 3).index, 2);
        assert_eq!(lb.step(true, 3).step(true, 3).step(true, 3).index, 0);
    }

    #[test]
    fn lightbox_open_is_clamped() {
        assert_eq!(Lightbox::open_at(9, 2), Lightbox { index: 1, open: true });
        assert!(!Lightbox::open_at(0, 0).open);
        assert_eq!(Lightbox { index: 4, open: true }.clamp(2).index, 1);
        assert!(!Lightbox { index: 1, open: true }.clamp(0).open);
    }

    #[test]
    fn closed_lightbox_does_not_step() {
        let lb = Lightbox::open_at(1, 3).close();
        assert_eq!(lb.step(true, 3), lb);
    }
}
