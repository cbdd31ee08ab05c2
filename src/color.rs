use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Bar chart palettes
// ---------------------------------------------------------------------------

/// Colour ramps used for bar charts and histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Purple through teal to yellow.
    Viridis,
    /// Blue through pale grey to red.
    CoolWarm,
    /// A single hue, used for histograms.
    Solid(u16),
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` colours evenly spaced along the scheme's ramp.
pub fn generate_palette(scheme: Scheme, n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
            let hsl = match scheme {
                Scheme::Viridis => Hsl::new(280.0 - 220.0 * t, 0.65, 0.30 + 0.35 * t),
                Scheme::CoolWarm => {
                    // Saturation dips in the middle so the ramp passes through grey.
                    let hue = if t < 0.5 { 225.0 } else { 10.0 };
                    let saturation = 0.15 + 0.60 * (2.0 * t - 1.0).abs();
                    Hsl::new(hue, saturation, 0.55)
                }
                Scheme::Solid(hue) => Hsl::new(hue as f32, 0.70, 0.55),
            };
            hsl_to_color32(hsl)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(Scheme::Viridis, 0).is_empty());
        assert_eq!(generate_palette(Scheme::CoolWarm, 1).len(), 1);
        assert_eq!(generate_palette(Scheme::Viridis, 30).len(), 30);
    }

    #[test]
    fn viridis_runs_dark_to_light() {
        let colors = generate_palette(Scheme::Viridis, 5);
        let luma = |c: &Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(luma(&colors[0]) < luma(&colors[4]));
    }

    #[test]
    fn solid_scheme_repeats_one_colour() {
        let colors = generate_palette(Scheme::Solid(210), 3);
        assert!(colors.iter().all(|c| *c == colors[0]));
    }
}
