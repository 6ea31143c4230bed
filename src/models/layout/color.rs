//! RGB colour type and the arithmetic used to derive card shades.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Subtract a fixed amount from every channel, flooring at zero
    pub fn darken_by(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_sub(amount),
            self.g.saturating_sub(amount),
            self.b.saturating_sub(amount),
        )
    }

    pub fn lighten(self, factor: f32) -> Self {
        mix_colors(self, Self::WHITE, factor)
    }

    /// Dark or light text, whichever reads better on this background
    pub fn readable_text(self) -> Self {
        const DARK: Rgb = Rgb::new(20, 28, 45);
        if relative_luminance(self) > 0.5 {
            DARK
        } else {
            Self::WHITE
        }
    }

    /// Channels as 0.0..=1.0 floats
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

// ── Colour arithmetic ──────────────────────────────────────────────

fn mix_colors(base: Rgb, target: Rgb, factor: f32) -> Rgb {
    let weight = factor.clamp(0.0, 1.0);
    let mix = |start: u8, end: u8| -> u8 {
        let start_f = start as f32;
        let end_f = end as f32;
        ((start_f + (end_f - start_f) * weight).round()).clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(base.r, target.r), mix(base.g, target.g), mix(base.b, target.b))
}

fn relative_luminance(color: Rgb) -> f32 {
    fn srgb_component(value: u8) -> f32 {
        let channel = value as f32 / 255.0;
        if channel <= 0.03928 {
            channel / 12.92
        } else {
            ((channel + 0.055) / 1.055).powf(2.4)
        }
    }

    let r = srgb_component(color.r);
    let g = srgb_component(color.g);
    let b = srgb_component(color.b);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}
