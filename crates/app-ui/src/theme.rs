//! Pure color utilities for themes
//!
//! Operates on hex strings, `rgb(...)`/`hsl(...)` strings and CSS
//! custom-property references. No state, no side effects.

// =============================================================================
// Parsing and Conversion
// =============================================================================

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    // Multibyte input must parse as None, never split a char boundary
    if hex.len() < 6 || !hex.is_char_boundary(6) || !hex[0..6].chars().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to a lowercase hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse any supported color string to RGB components
///
/// Supports `#rrggbb`, `rgb(r, g, b)` and `hsl(h, s%, l%)`.
pub fn parse_color(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    if color.starts_with('#') {
        return parse_hex_color(color);
    }
    if let Some(inner) = color.strip_prefix("rgb(").and_then(|c| c.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return None;
        }
        let r = parts[0].parse().ok()?;
        let g = parts[1].parse().ok()?;
        let b = parts[2].parse().ok()?;
        return Some((r, g, b));
    }
    if let Some(inner) = color.strip_prefix("hsl(").and_then(|c| c.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return None;
        }
        let h: f64 = parts[0].parse().ok()?;
        let s: f64 = parts[1].strip_suffix('%')?.parse().ok()?;
        let l: f64 = parts[2].strip_suffix('%')?.parse().ok()?;
        return Some(hsl_to_rgb(h, s / 100.0, l / 100.0));
    }
    None
}

/// Whether the string is a CSS custom-property reference
fn is_css_var(color: &str) -> bool {
    color.trim_start().starts_with("var(")
}

/// Convert RGB to HSL (hue in degrees, saturation/lightness in 0..=1)
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if (max - r).abs() < f64::EPSILON {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) * 60.0
    } else if (max - g).abs() < f64::EPSILON {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };

    (h, s, l)
}

/// Convert HSL (hue in degrees, saturation/lightness in 0..=1) to RGB
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;

    if s.abs() < f64::EPSILON {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f64| -> u8 {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round() as u8
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

// =============================================================================
// Color Math
// =============================================================================

/// Blend an opacity into a color, producing an `rgba(...)` string
///
/// CSS custom-property references are wrapped rather than resolved, on
/// the assumption that the property holds an `r, g, b` triplet.
///
/// # Examples
/// ```
/// use app_ui::theme::apply_opacity;
///
/// assert_eq!(apply_opacity("#000000", 0.5), "rgba(0, 0, 0, 0.5)");
/// ```
pub fn apply_opacity(color: &str, opacity: f64) -> String {
    let opacity = opacity.clamp(0.0, 1.0);

    if is_css_var(color) {
        return format!("rgba({}, {})", color.trim(), opacity);
    }
    match parse_color(color) {
        Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {opacity})"),
        None => color.to_string(),
    }
}

/// Shift each channel by `amount`, clamping to the valid range
///
/// # Examples
/// ```
/// use app_ui::theme::adjust_brightness;
///
/// assert_eq!(adjust_brightness("#000000", 30), "#1e1e1e");
/// ```
pub fn adjust_brightness(color: &str, amount: i32) -> String {
    match parse_color(color) {
        Some((r, g, b)) => {
            let shift = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
            rgb_to_hex(shift(r), shift(g), shift(b))
        }
        None => color.to_string(),
    }
}

/// Whether a color reads as dark (by perceived luminance)
///
/// # Examples
/// ```
/// use app_ui::theme::is_color_dark;
///
/// assert!(is_color_dark("#000000"));
/// assert!(!is_color_dark("#ffffff"));
/// ```
pub fn is_color_dark(color: &str) -> bool {
    match parse_color(color) {
        Some((r, g, b)) => {
            let luminance =
                (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
            luminance < 0.5
        }
        None => false,
    }
}

/// Mix a color toward a target by `weight` (0 keeps the color, 1 is the target)
fn mix(color: (u8, u8, u8), target: (u8, u8, u8), weight: f64) -> (u8, u8, u8) {
    let blend = |c: u8, t: u8| -> u8 {
        (c as f64 + (t as f64 - c as f64) * weight).round().clamp(0.0, 255.0) as u8
    };
    (blend(color.0, target.0), blend(color.1, target.1), blend(color.2, target.2))
}

/// Generate a 50..900 shade palette from a base color
///
/// Lighter shades mix toward white, darker shades toward black; 500 is
/// the base itself. Returns `(shade, hex)` pairs in ascending order.
pub fn generate_palette(base: &str) -> Vec<(u16, String)> {
    const WHITE: (u8, u8, u8) = (255, 255, 255);
    const BLACK: (u8, u8, u8) = (0, 0, 0);

    let Some(rgb) = parse_color(base) else {
        return Vec::new();
    };

    let steps: [(u16, (u8, u8, u8), f64); 10] = [
        (50, WHITE, 0.95),
        (100, WHITE, 0.88),
        (200, WHITE, 0.72),
        (300, WHITE, 0.55),
        (400, WHITE, 0.28),
        (500, WHITE, 0.0),
        (600, BLACK, 0.12),
        (700, BLACK, 0.28),
        (800, BLACK, 0.45),
        (900, BLACK, 0.62),
    ];

    steps
        .into_iter()
        .map(|(shade, target, weight)| {
            let (r, g, b) = mix(rgb, target, weight);
            (shade, rgb_to_hex(r, g, b))
        })
        .collect()
}

/// Generate `count` visually distinct chart colors by rotating the hue
/// of the base color
pub fn generate_chart_colors(base: &str, count: usize) -> Vec<String> {
    let Some((r, g, b)) = parse_color(base) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let (h, s, l) = rgb_to_hsl(r, g, b);
    let step = 360.0 / count as f64;

    (0..count)
        .map(|i| {
            let (r, g, b) = hsl_to_rgb(h + step * i as f64, s, l);
            rgb_to_hex(r, g, b)
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
