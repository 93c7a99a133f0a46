//! Digit-rollover transition
//!
//! Produces the frames shown when the price text changes. Positions whose
//! new character is a digit and differs from the old one spin through the
//! digits above the target before settling; everything else switches
//! immediately. The last frame is always the exact target.

use crate::format::{pad_left, Text};

/// Frame generator for one price transition
///
/// Yields `steps` animation frames followed by the padded target text.
#[derive(Debug, Clone)]
pub struct Rollover {
    /// Old text, left-padded to the common width
    old: Text,
    /// New text, left-padded to the common width
    new: Text,
    /// Number of animation frames
    steps: u8,
    /// Next frame to produce (`steps` is the settle frame)
    next: u8,
    /// Settle frame already produced
    finished: bool,
}

impl Rollover {
    /// Prepare a transition
    ///
    /// An absent `old` (first render) is treated as empty text.
    pub fn new(old: Option<&str>, new: &str, steps: u8) -> Self {
        let old = old.unwrap_or("");
        let width = old.chars().count().max(new.chars().count());

        Self {
            old: pad_left(old, width),
            new: pad_left(new, width),
            steps,
            next: 0,
            finished: false,
        }
    }

    /// Number of animation frames before the settle frame
    pub fn steps(&self) -> u8 {
        self.steps
    }

    /// Compose the frame for `step`
    pub fn frame(&self, step: u8) -> Text {
        let last = step.saturating_add(1) >= self.steps;
        let rolling = u32::from(step % 10);

        let mut out = Text::new();
        for (old, new) in self.old.chars().zip(self.new.chars()) {
            let shown = match new.to_digit(10) {
                Some(target) if old != new => {
                    if rolling <= target || last {
                        new
                    } else {
                        char::from_digit(rolling, 10).unwrap_or(new)
                    }
                }
                _ => new,
            };
            let _ = out.push(shown);
        }
        out
    }
}

impl Iterator for Rollover {
    type Item = Text;

    fn next(&mut self) -> Option<Text> {
        if self.finished {
            return None;
        }
        if self.next < self.steps {
            let frame = self.frame(self.next);
            self.next += 1;
            Some(frame)
        } else {
            self.finished = true;
            Some(self.new.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn frames(old: Option<&str>, new: &str) -> Vec<Text> {
        Rollover::new(old, new, 10).collect()
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frames(Some("1000$"), "1200$").len(), 11);
        assert_eq!(Rollover::new(Some("1"), "2", 0).count(), 1);
    }

    #[test]
    fn test_final_frame_exact() {
        let all = frames(Some("1000$"), "1200$");
        assert_eq!(all.last().map(|f| f.as_str()), Some("1200$"));
        // Last animation frame also settles
        assert_eq!(all[9].as_str(), "1200$");
    }

    #[test]
    fn test_equal_positions_show_new() {
        let old = "1000$";
        let new = "1200$";
        for frame in frames(Some(old), new) {
            for (i, (shown, (o, n))) in frame
                .chars()
                .zip(old.chars().zip(new.chars()))
                .enumerate()
            {
                if o == n {
                    assert_eq!(shown, n, "position {} in {}", i, frame);
                }
            }
        }
    }

    #[test]
    fn test_digit_spins_above_target() {
        let all = frames(Some("1000$"), "1200$");
        // Steps 0..=2 show the target digit, 3..=8 spin, 9 settles
        assert_eq!(all[0].as_str(), "1200$");
        assert_eq!(all[2].as_str(), "1200$");
        assert_eq!(all[3].as_str(), "1300$");
        assert_eq!(all[8].as_str(), "1800$");
    }

    #[test]
    fn test_first_render_pads_old() {
        let all = frames(None, "65'000$");
        assert_eq!(all[7].as_str(), "77'777$");
        assert_eq!(all[10].as_str(), "65'000$");
        for frame in &all {
            assert_eq!(frame.chars().nth(2), Some('\''));
        }
    }

    #[test]
    fn test_width_change() {
        let all = frames(Some("999$"), "1'000$");
        for frame in &all {
            assert_eq!(frame.len(), 6);
        }
        assert_eq!(all.last().map(|f| f.as_str()), Some("1'000$"));
    }

    #[test]
    fn test_shrinking_text_is_padded() {
        let all = frames(Some("1'000$"), "999$");
        assert_eq!(all.last().map(|f| f.as_str()), Some("  999$"));
    }
}
