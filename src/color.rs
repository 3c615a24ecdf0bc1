use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RateTier;

// ---------------------------------------------------------------------------
// Rate tier colors
// ---------------------------------------------------------------------------

/// Badge and accent colour for an admit-rate tier. Fixed three-entry
/// lookup, purely presentational.
pub fn tier_color(tier: RateTier) -> Color32 {
    match tier {
        RateTier::High => Color32::from_rgb(0x48, 0xbb, 0x78),
        RateTier::Medium => Color32::from_rgb(0xec, 0xc9, 0x4b),
        RateTier::Low => Color32::from_rgb(0xfc, 0x81, 0x81),
    }
}

/// Colour for a raw admit rate.
pub fn rate_color(rate: f64) -> Color32 {
    tier_color(RateTier::from_rate(rate))
}

/// Accent colour used for neutral chart series.
pub const ACCENT: Color32 = Color32::from_rgb(0x42, 0x99, 0xe1);

// ---------------------------------------------------------------------------
// Categorical palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.60);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn tier_colors_are_distinct() {
        let high = tier_color(RateTier::High);
        let medium = tier_color(RateTier::Medium);
        let low = tier_color(RateTier::Low);
        assert_ne!(high, medium);
        assert_ne!(medium, low);
    }
}
