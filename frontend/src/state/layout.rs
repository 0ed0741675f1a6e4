//! Corrective CSS variables for mobile viewports.

/// Raw measurements taken on load and resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutMetrics {
    pub viewport_height: f64,
    pub header_height: f64,
    /// Computed top padding of the header, which carries the notch inset.
    pub header_padding_top: f64,
    /// Hero content top in viewport coordinates, including the current shift.
    pub hero_content_top: Option<f64>,
    pub hero_content_height: f64,
    /// Shift currently applied through `--hero-shift`.
    pub applied_shift: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutVars {
    pub vh: String,
    pub header_h: String,
    pub safe_top: String,
    pub hero_shift: Option<String>,
}

pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Vertical shift that centres the hero content in the area below the header.
pub fn hero_shift(m: &LayoutMetrics) -> Option<f64> {
    let top = m.hero_content_top?;
    let natural_top = top - m.applied_shift;
    let available = (m.viewport_height - m.header_height).max(0.0);
    let wanted_center = m.header_height + available / 2.0;
    let shift = (wanted_center - (natural_top + m.hero_content_height / 2.0)).round();
    Some(if shift.abs() < 1.0 { 0.0 } else { shift })
}

pub fn compute(m: &LayoutMetrics) -> LayoutVars {
    LayoutVars {
        vh: px(m.viewport_height * 0.01),
        header_h: px(m.header_height.max(0.0).round()),
        safe_top: px(m.header_padding_top.max(0.0)),
        hero_shift: hero_shift(m).map(px),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            viewport_height: 800.0,
            header_height: 80.0,
            header_padding_top: 20.0,
            hero_content_top: Some(300.0),
            hero_content_height: 200.0,
            applied_shift: 0.0,
        }
    }

    #[test]
    fn computes_all_variables() {
        assert_eq!(
            compute(&metrics()),
            LayoutVars {
                vh: "8px".to_string(),
                header_h: "80px".to_string(),
                safe_top: "20px".to_string(),
                hero_shift: Some("40px".to_string()),
            }
        );
    }

    #[test]
    fn shift_converges_instead_of_accumulating() {
        let mut m = metrics();
        let first = hero_shift(&m).unwrap();
        m.applied_shift = first;
        m.hero_content_top = m.hero_content_top.map(|t| t + first);
        assert_eq!(hero_shift(&m), Some(first));
    }

    #[test]
    fn sub_pixel_shift_is_zero() {
        let mut m = metrics();
        m.hero_content_top = Some(339.6);
        assert_eq!(hero_shift(&m), Some(0.0));
    }

    #[test]
    fn no_hero_no_shift() {
        let mut m = metrics();
        m.hero_content_top = None;
        assert_eq!(compute(&m).hero_shift, None);
    }
}
