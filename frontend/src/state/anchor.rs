/// Id referenced by a same-page link such as `#kontakt`.
pub fn hash_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Scroll position that lands `element_top` (document coordinates) just
/// below a sticky header of `header_height`. Never negative.
pub fn scroll_target(element_top: f64, header_height: f64, header_gap: f64, extra: f64) -> f64 {
    let offset = (header_height + header_gap).max(0.0);
    (element_top - offset - extra).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ids() {
        assert_eq!(hash_id("#kontakt"), Some("kontakt"));
        assert_eq!(hash_id("#"), None);
        assert_eq!(hash_id(""), None);
        assert_eq!(hash_id("kontakt"), None);
        assert_eq!(hash_id("# "), None);
    }

    #[test]
    fn target_sits_below_header() {
        assert_eq!(scroll_target(1200.0, 78.0, 10.0, 0.0), 1112.0);
        assert_eq!(scroll_target(1200.0, 78.0, 10.0, 68.0), 1044.0);
    }

    #[test]
    fn target_is_never_negative() {
        assert_eq!(scroll_target(20.0, 78.0, 10.0, 0.0), 0.0);
        assert_eq!(scroll_target(0.0, 0.0, 10.0, 8.0), 0.0);
    }
}
