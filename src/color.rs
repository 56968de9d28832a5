use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

use crate::data::model::{Dimension, DistinctValues};

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32(Hsl::new((i as f32 / n as f32) * 360.0, 0.75, 0.55)))
        .collect()
}

/// Red → amber → green shade for a score relative to the best one.
pub fn score_color(score: f64, max_score: f64) -> Color32 {
    let t = if max_score > 0.0 {
        (score / max_score).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    let low = Hsl::new(0.0, 0.65, 0.45);
    let high = Hsl::new(120.0, 0.65, 0.40);
    hsl_to_color32(low.mix(high, t))
}

// ---------------------------------------------------------------------------
// Color mapping: dimension value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a chosen dimension to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Dimension whose values this map colours.
    pub dimension: Dimension,
    mapping: BTreeMap<Option<String>, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(dimension: Dimension, values: &DistinctValues) -> Self {
        let mapping = values
            .iter()
            .cloned()
            .zip(generate_palette(values.len()))
            .collect();

        ColorMap {
            dimension,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value; blank or unknown values are grey.
    pub fn color_for(&self, value: Option<&str>) -> Color32 {
        value
            .and_then(|v| self.mapping.get(&Some(v.to_string())))
            .copied()
            .unwrap_or(self.default_color)
    }
}
