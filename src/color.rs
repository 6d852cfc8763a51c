//! Percentage-of-target color coding for the tracking grid.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Neutral cell for days with no intake.
pub const EMPTY: &str = "#1f1f27";
/// Saturated cell at 130% of target and beyond.
pub const OVER_LIMIT: &str = "#991b1b";
/// Inert cell outside the reference month.
pub const OUT_OF_MONTH: &str = "#121218";

const ANCHOR_LOW: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
const ANCHOR_MID: Rgb = Rgb::new(0xec, 0x48, 0x99);
const ANCHOR_HIGH: Rgb = Rgb::new(0xef, 0x44, 0x44);

/// Parses a `#rrggbb` hex triplet.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Per-channel linear blend, `a` at t=0 through `b` at t=1.
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let channel = |x: u8, y: u8| -> u8 {
        let blended = f64::from(x) * (1.0 - t) + f64::from(y) * t;
        blended.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// Display color for a percentage of the daily target.
///
/// Fixed endpoints below 0 and at 130+, a low→mid blend over 0..=100 and a
/// mid→high blend over 100..130. `pct` arrives pre-clamped to [0, 200].
pub fn color_for(pct: f64) -> String {
    if pct <= 0.0 {
        return EMPTY.to_string();
    }
    if pct >= 130.0 {
        return OVER_LIMIT.to_string();
    }
    if pct > 100.0 {
        let t = ((pct - 100.0) / 30.0).min(1.0);
        return mix(ANCHOR_HIGH, ANCHOR_MID, 1.0 - t).css();
    }
    mix(ANCHOR_LOW, ANCHOR_MID, pct / 100.0).css()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_triplets() {
        assert_eq!(parse_hex("#ec4899"), Some(Rgb::new(236, 72, 153)));
        assert_eq!(parse_hex("ec4899"), Some(Rgb::new(236, 72, 153)));
        assert_eq!(parse_hex("#ec48"), None);
        assert_eq!(parse_hex("#zz4899"), None);
    }

    #[test]
    fn zero_and_below_is_the_empty_color() {
        assert_eq!(color_for(0.0), EMPTY);
        assert_eq!(color_for(-5.0), EMPTY);
    }

    #[test]
    fn full_target_is_the_mid_anchor() {
        assert_eq!(color_for(100.0), ANCHOR_MID.css());
    }

    #[test]
    fn over_limit_saturates_at_130() {
        assert_eq!(color_for(130.0), OVER_LIMIT);
        assert_eq!(color_for(200.0), OVER_LIMIT);
    }

    #[test]
    fn midpoint_lies_strictly_between_low_and_mid_per_channel() {
        let half = mix(ANCHOR_LOW, ANCHOR_MID, 0.5);
        assert_eq!(color_for(50.0), half.css());
        let between = |lo: u8, hi: u8, v: u8| {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            lo < v && v < hi
        };
        assert!(between(ANCHOR_LOW.r, ANCHOR_MID.r, half.r));
        assert!(between(ANCHOR_LOW.g, ANCHOR_MID.g, half.g));
        assert!(between(ANCHOR_LOW.b, ANCHOR_MID.b, half.b));
    }

    #[test]
    fn blend_above_100_moves_toward_the_high_anchor() {
        // Just past target the cell still sits at the mid anchor; just
        // under the limit it has reached the high anchor.
        assert_eq!(color_for(100.0 + 1e-9), ANCHOR_MID.css());
        assert_eq!(color_for(129.9999), ANCHOR_HIGH.css());
        assert_ne!(color_for(115.0), color_for(105.0));
    }
}
