//! Color helpers for the terminal stylesheet.

use ratatui::style::Color;

/// Warm projector amber used for the spotlight and particles.
pub const AMBER_HUE: f32 = 42.0;
/// Pale blue-white for shooting stars.
pub const STARLIGHT_HUE: f32 = 215.0;

/// HSL to RGB, with hue in degrees and saturation/lightness in `0.0..=1.0`.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let h = hue.rem_euclid(360.0) / 60.0;

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let second = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Color::Rgb(channel(r), channel(g), channel(b))
}

/// Amber at the given intensity, from near-black to bright gold.
pub fn amber(intensity: f32) -> Color {
    let i = intensity.clamp(0.0, 1.0);
    hsl(AMBER_HUE, 0.85, 0.08 + i * 0.55)
}

/// Starlight at the given intensity.
pub fn starlight(intensity: f32) -> Color {
    let i = intensity.clamp(0.0, 1.0);
    hsl(STARLIGHT_HUE, 0.6, 0.2 + i * 0.75)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(hsl(360.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_greys() {
        assert_eq!(hsl(200.0, 0.0, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(hsl(200.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_intensity_is_monotonic() {
        let lum = |c: Color| match c {
            Color::Rgb(r, g, b) => r as u32 + g as u32 + b as u32,
            _ => 0,
        };
        assert!(lum(amber(0.9)) > lum(amber(0.1)));
        assert!(lum(starlight(1.0)) > lum(starlight(0.0)));
    }
}
