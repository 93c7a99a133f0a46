//! Matrix display abstractions
//!
//! The panel is a 64x32 RGB matrix with three text labels. Glyph rendering,
//! fonts, label placement and scaling belong to the platform; the core only
//! sets text and colors per slot.

/// Text slots on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// Last traded price (large font, middle)
    Price,
    /// 24h high (small font, top)
    High,
    /// 24h low (small font, bottom)
    Low,
}

impl Slot {
    /// All slots, top to bottom
    pub const ALL: [Slot; 3] = [Slot::High, Slot::Price, Slot::Low];

    /// Row index in top-to-bottom order
    pub fn row(self) -> usize {
        match self {
            Slot::High => 0,
            Slot::Price => 1,
            Slot::Low => 2,
        }
    }
}

/// Matrix display with fixed text slots
pub trait MatrixDisplay {
    /// Replace the text of a slot
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Set the color of a slot as packed 0xRRGGBB
    fn set_color(&mut self, slot: Slot, rgb: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_all_order() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.row(), i);
        }
    }
}
