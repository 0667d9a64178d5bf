//! Hex colour parsing and WCAG contrast arithmetic.
//!
//! Everything here is advisory: malformed input never fails, it degrades to
//! luminance `0.0` or to [`MAX_CONTRAST`] so a warning is simply not raised.

/// Contrast ratio returned when either colour cannot be parsed.
pub const MAX_CONTRAST: f64 = 21.0;

/// WCAG AA minimum for normal-sized text.
pub const LOW_CONTRAST_THRESHOLD: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn relative_luminance(&self) -> f64 {
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();

    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn relative_luminance(hex: &str) -> f64 {
    hex_to_rgb(hex)
        .map(|rgb| rgb.relative_luminance())
        .unwrap_or(0.0)
}

pub fn contrast_ratio(first: &str, second: &str) -> f64 {
    match (hex_to_rgb(first), hex_to_rgb(second)) {
        (Some(a), Some(b)) => {
            let (a, b) = (a.relative_luminance(), b.relative_luminance());
            let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
            (lighter + 0.05) / (darker + 0.05)
        }
        _ => MAX_CONTRAST,
    }
}

pub fn is_low_contrast(foreground: &str, background: &str) -> bool {
    contrast_ratio(foreground, background) < LOW_CONTRAST_THRESHOLD
}
