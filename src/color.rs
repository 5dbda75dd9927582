//! RGB color with saturating channel arithmetic

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 255]`
///
/// `scale` and `add` saturate each channel at 255. There is no lower clamp;
/// callers keep intensity sums non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}
impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `s`, saturating at 255
    pub fn scale(&self, s: f64) -> Self {
        Self {
            r: (self.r * s).min(255.0),
            g: (self.g * s).min(255.0),
            b: (self.b * s).min(255.0),
        }
    }

    /// Channel-wise sum, saturating at 255
    pub fn add(&self, other: &Self) -> Self {
        Self {
            r: (self.r + other.r).min(255.0),
            g: (self.g + other.g).min(255.0),
            b: (self.b + other.b).min(255.0),
        }
    }

    /// Round the channels into raster bytes
    pub fn to_bytes(&self) -> [u8; 3] {
        [byte(self.r), byte(self.g), byte(self.b)]
    }
}

fn byte(channel: f64) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_saturates_at_255() {
        let c = Color::new(200.0, 100.0, 0.0).scale(2.0);
        assert_eq!(c, Color::new(255.0, 200.0, 0.0));
    }

    #[test]
    fn add_saturates_at_255() {
        let c = Color::new(200.0, 100.0, 0.0).add(&Color::new(100.0, 100.0, 5.0));
        assert_eq!(c, Color::new(255.0, 200.0, 5.0));
    }

    #[test]
    fn scale_keeps_fractional_channels() {
        let c = Color::new(255.0, 0.0, 0.0).scale(0.2);
        assert_eq!(c, Color::new(255.0 * 0.2, 0.0, 0.0));
    }

    #[test]
    fn bytes_round_and_clamp() {
        assert_eq!(Color::new(254.6, -3.0, 300.0).to_bytes(), [255, 0, 255]);
        assert_eq!(Color::new(255.0 * 0.2, 0.0, 0.0).to_bytes(), [51, 0, 0]);
    }
}
