//! Color parsing and contrast-aware tint derivation.
//!
//! Everything downstream (the theme resolver, the stylesheet compiler)
//! speaks in normalized RGB triples. Inputs arrive as CSS-style strings in
//! any common notation; derived tones are produced by blending a base color
//! toward whichever neutral (white or black) it contrasts *more* with, so a
//! derived foreground stays legible over its paired background no matter
//! which base color a theme author picked.
//!
//! Parse failures are recovered locally: the resolver substitutes opaque
//! black rather than propagating a fault. `parse` returns `Option` so
//! callers that care can tell the two apart; `parse_or_default` applies the
//! fallback.

use std::fmt;

/// Blend weight producing the `base2` surface step.
pub const BASE2_WEIGHT: f32 = 0.07;
/// Blend weight producing the `base3` surface step.
pub const BASE3_WEIGHT: f32 = 0.14;
/// Blend weight producing every `*Content` foreground tone.
pub const CONTENT_WEIGHT: f32 = 0.8;

/// Pure white, the light blend endpoint.
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
/// Pure black, the dark blend endpoint and the parse fallback.
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

/// A normalized RGB color: integer channels in `[0, 255]`, alpha in
/// `[0, 1]`. The canonical string form is `"r,g,b"` (alpha dropped), which
/// is what the generated stylesheet carries so consumers can wrap values
/// with `rgba(var(--x), alpha)` themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    /// Opaque color from integer channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    /// Parse a color string in any supported notation.
    ///
    /// Accepted forms: `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`, and a
    /// common subset of CSS named colors. Returns `None` when the input
    /// matches none of them.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = trimmed.to_ascii_lowercase();
        if let Some(inner) = strip_function(&lower, "rgba").or_else(|| strip_function(&lower, "rgb"))
        {
            return parse_rgb_args(inner);
        }
        if let Some(inner) = strip_function(&lower, "hsla").or_else(|| strip_function(&lower, "hsl"))
        {
            return parse_hsl_args(inner);
        }
        named_color(&lower)
    }

    /// Parse with the fallback contract the resolver relies on: input that
    /// cannot be parsed yields opaque black. Callers treating an all-zero
    /// result as possibly-unparsed is a known ambiguity of this contract.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or(BLACK)
    }

    /// Canonical `"r,g,b"` form.
    pub fn css_triple(&self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    /// WCAG 2.1 relative luminance of the sRGB color.
    pub fn relative_luminance(&self) -> f64 {
        let r = srgb_channel_to_linear(self.r);
        let g = srgb_channel_to_linear(self.g);
        let b = srgb_channel_to_linear(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Whether this color sits closer to the black end of the spectrum:
    /// true when its contrast against white exceeds its contrast against
    /// black. This picks which neutral `tint` blends toward.
    pub fn is_dark(&self) -> bool {
        contrast_ratio(*self, BLACK) < contrast_ratio(*self, WHITE)
    }

    /// Blend toward the contrasting neutral: white for a dark base (to
    /// lighten it), black for a light base (to darken it). `percent` is the
    /// blend weight in `[0, 1]`.
    pub fn tint(&self, percent: f32) -> Self {
        let endpoint = if self.is_dark() { WHITE } else { BLACK };
        blend(*self, endpoint, percent)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_triple())
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Rgba, b: Rgba) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Linear interpolation between two colors in RGB space at position `t`
/// (clamped to `[0, 1]`), rounding each channel to the nearest integer.
pub fn blend(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);

    let blend_channel = |left: u8, right: u8| -> u8 {
        let mixed = left as f32 + (right as f32 - left as f32) * t;
        mixed.round().clamp(0.0, 255.0) as u8
    };

    Rgba {
        r: blend_channel(a.r, b.r),
        g: blend_channel(a.g, b.g),
        b: blend_channel(a.b, b.b),
        alpha: a.alpha + (b.alpha - a.alpha) * t,
    }
}

fn srgb_channel_to_linear(c: u8) -> f64 {
    let cs = c as f64 / 255.0;
    if cs <= 0.03928 {
        cs / 12.92
    } else {
        ((cs + 0.055) / 1.055).powf(2.4)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Rgba::rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgba::rgb(r, g, b))
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Rgba::rgba(r, g, b, a as f32 / 255.0))
        }
        _ => None,
    }
}

/// Strip `name(` … `)` and return the argument list, or `None`.
fn strip_function<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
}

fn parse_rgb_args(inner: &str) -> Option<Rgba> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |raw: &str| -> Option<u8> {
        let value: f32 = raw.parse().ok()?;
        Some(value.round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let alpha = match parts.get(3) {
        Some(raw) => raw.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Rgba::rgba(r, g, b, alpha))
}

fn parse_hsl_args(inner: &str) -> Option<Rgba> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let h: f32 = parts[0].trim_end_matches("deg").trim().parse().ok()?;
    let s: f32 = parts[1].strip_suffix('%')?.trim().parse().ok()?;
    let l: f32 = parts[2].strip_suffix('%')?.trim().parse().ok()?;
    let alpha = match parts.get(3) {
        Some(raw) => {
            let raw = raw.trim();
            if let Some(pct) = raw.strip_suffix('%') {
                pct.trim().parse::<f32>().ok()? / 100.0
            } else {
                raw.parse::<f32>().ok()?
            }
        }
        None => 1.0,
    };
    let mut color = hsl_to_rgb(h, s, l);
    color.alpha = alpha.clamp(0.0, 1.0);
    Some(color)
}

/// HSL to RGB. `h` in degrees (wrapped), `s`/`l` as percentages.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgba {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgba::rgb(v, v, v);
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgba::rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Common-subset CSS named colors.
fn named_color(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "transparent" => return Some(Rgba::rgba(0, 0, 0, 0.0)),
        _ => return None,
    };
    Some(Rgba::rgb(r, g, b))
}
