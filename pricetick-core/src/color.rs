//! Price color policy
//!
//! Picks the price color from the direction of the last move and dims
//! every color at night. Dimming never changes which color was picked.

use crate::config::Palette;

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u32);

impl Color {
    /// Create from packed 0xRRGGBB (upper byte ignored)
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Create from channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Packed value
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Channels as (r, g, b)
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// Scale every channel by `factor`, truncating each one
    pub fn darker(self, factor: f64) -> Self {
        let (r, g, b) = self.channels();
        let scale = |c: u8| (f64::from(c) * factor) as u8;
        Self::from_rgb(scale(r), scale(g), scale(b))
    }
}

/// Direction of the last price move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trend {
    /// First value, unchanged, or not comparable
    Flat,
    /// Higher than the previous value
    Up,
    /// Lower than the previous value
    Down,
}

impl Trend {
    /// Classify a move
    pub fn classify(previous: Option<f64>, current: f64) -> Self {
        match previous {
            Some(prev) if current > prev => Trend::Up,
            Some(prev) if current < prev => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

/// Colors for the three slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorSet {
    /// Price slot
    pub price: Color,
    /// High slot
    pub high: Color,
    /// Low slot
    pub low: Color,
}

/// Check whether `hour` falls in the dimmed window
pub fn is_night(hour: u8, night_start_hour: u8) -> bool {
    hour >= night_start_hour
}

/// Apply night dimming to a single color
pub fn shade(color: Color, night: bool, dim_factor: f64) -> Color {
    if night {
        color.darker(dim_factor)
    } else {
        color
    }
}

/// Select slot colors for a fresh quote
pub fn select(
    palette: &Palette,
    previous: Option<f64>,
    current: f64,
    night: bool,
    dim_factor: f64,
) -> ColorSet {
    let price = match Trend::classify(previous, current) {
        Trend::Up => palette.up,
        Trend::Down => palette.down,
        Trend::Flat => palette.neutral,
    };

    ColorSet {
        price: shade(price, night, dim_factor),
        high: shade(palette.high, night, dim_factor),
        low: shade(palette.low, night, dim_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTOR: f64 = 0.1;

    fn dim_by_hand(rgb: u32) -> u32 {
        let r = (((rgb >> 16) & 0xFF) as f64 * FACTOR) as u32;
        let g = (((rgb >> 8) & 0xFF) as f64 * FACTOR) as u32;
        let b = ((rgb & 0xFF) as f64 * FACTOR) as u32;
        (r << 16) | (g << 8) | b
    }

    #[test]
    fn test_darker_truncates_each_channel() {
        // 0xA3 = 163 -> 16, 0x6C = 108 -> 10
        assert_eq!(Color::new(0xA36C00).darker(FACTOR), Color::new(0x100A00));
        assert_eq!(Color::new(0xFFFFFF).darker(0.5), Color::new(0x7F7F7F));
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::classify(None, 100.0), Trend::Flat);
        assert_eq!(Trend::classify(Some(100.0), 101.0), Trend::Up);
        assert_eq!(Trend::classify(Some(100.0), 99.0), Trend::Down);
        assert_eq!(Trend::classify(Some(100.0), 100.0), Trend::Flat);
    }

    #[test]
    fn test_first_value_is_neutral() {
        let palette = Palette::default();
        let set = select(&palette, None, 50_000.0, false, FACTOR);
        assert_eq!(set.price, palette.neutral);
    }

    #[test]
    fn test_equal_price_neutral_day_and_night() {
        let palette = Palette::default();
        let day = select(&palette, Some(50_000.0), 50_000.0, false, FACTOR);
        let night = select(&palette, Some(50_000.0), 50_000.0, true, FACTOR);
        assert_eq!(day.price, palette.neutral);
        assert_eq!(night.price.rgb(), dim_by_hand(palette.neutral.rgb()));
    }

    #[test]
    fn test_up_move_day_and_night() {
        let palette = Palette::default();
        let day = select(&palette, Some(50_000.0), 50_500.0, is_night(10, 21), FACTOR);
        assert_eq!(day.price, palette.up);

        let night = select(&palette, Some(50_000.0), 50_500.0, is_night(22, 21), FACTOR);
        assert_eq!(night.price.rgb(), dim_by_hand(palette.up.rgb()));
    }

    #[test]
    fn test_down_move() {
        let palette = Palette::default();
        let set = select(&palette, Some(50_000.0), 49_000.0, false, FACTOR);
        assert_eq!(set.price, palette.down);
    }

    #[test]
    fn test_high_low_fixed() {
        let palette = Palette::default();
        for previous in [None, Some(1.0), Some(1e9)] {
            let set = select(&palette, previous, 100.0, false, FACTOR);
            assert_eq!(set.high, palette.high);
            assert_eq!(set.low, palette.low);
        }
        let night = select(&palette, None, 100.0, true, FACTOR);
        assert_eq!(night.high.rgb(), dim_by_hand(palette.high.rgb()));
        assert_eq!(night.low.rgb(), dim_by_hand(palette.low.rgb()));
    }

    #[test]
    fn test_night_boundary() {
        assert!(!is_night(20, 21));
        assert!(is_night(21, 21));
        assert!(is_night(23, 21));
        assert!(!is_night(0, 21));
    }
}
