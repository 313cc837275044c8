use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colour for the success side of the single-site pie.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => Color32::from_rgb(46, 160, 67),
        Outcome::Failure => Color32::from_rgb(218, 54, 51),
    }
}

// ---------------------------------------------------------------------------
// Site colour mapping
// ---------------------------------------------------------------------------

/// Maps launch sites to distinct colours, shared by the pie slices and the
/// scatter legend so a site always renders the same hue.
#[derive(Debug, Clone)]
pub struct SiteColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for SiteColors {
    fn default() -> Self {
        SiteColors {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl SiteColors {
    /// Build the colour map for the dataset's sites.
    pub fn new(sites: &[String]) -> Self {
        let palette = generate_palette(sites.len());
        let mapping: BTreeMap<String, Color32> = sites
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        SiteColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a launch site.
    pub fn color_for(&self, site: &str) -> Color32 {
        self.mapping
            .get(site)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_one_distinct_color_per_site() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_site_falls_back_to_the_default() {
        let sites = vec!["CCAFS LC-40".to_string(), "KSC LC-39A".to_string()];
        let colors = SiteColors::new(&sites);
        assert_ne!(colors.color_for("CCAFS LC-40"), colors.color_for("KSC LC-39A"));
        assert_eq!(colors.color_for("Boca Chica"), Color32::GRAY);
    }
}
