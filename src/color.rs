use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const BLACK: PackedColor = PackedColor(0x000000);
    pub const WHITE: PackedColor = PackedColor(0xFFFFFF);

    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        PackedColor(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::from_channels(rng.gen(), rng.gen(), rng.gen())
    }

    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn channels(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }

    /// Channels in `[0, 1]` as `[r, g, b, a]`, alpha always 1.0.
    pub fn normalized(self) -> [f32; 4] {
        [
            self.red() as f32 / 255.0,
            self.green() as f32 / 255.0,
            self.blue() as f32 / 255.0,
            1.0,
        ]
    }

    /// Every channel multiplied by `intensity`, clamped to `[0, 1]`.
    pub fn scaled(self, intensity: f64) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * k).round() as u8;
        Self::from_channels(scale(self.red()), scale(self.green()), scale(self.blue()))
    }
}

impl From<u32> for PackedColor {
    fn from(value: u32) -> Self {
        PackedColor(value & 0xFFFFFF)
    }
}

impl fmt::Display for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_decomposition() {
        let color = PackedColor(0x12AB7F);
        assert_eq!(color.channels(), (0x12, 0xAB, 0x7F));

        for packed in [0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0x808080, 0x010203] {
            let color = PackedColor(packed);
            let (r, g, b) = color.channels();
            assert_eq!(((r as u32) << 16) | ((g as u32) << 8) | b as u32, packed);
        }
    }

    #[test]
    fn test_normalized_channels() {
        assert_eq!(PackedColor(0xFF0000).normalized(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(PackedColor::BLACK.normalized(), [0.0, 0.0, 0.0, 1.0]);

        for packed in (0..=0xFFFFFFu32).step_by(0x10101) {
            for channel in PackedColor(packed).normalized() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_scaled() {
        assert_eq!(PackedColor(0xFF8000).scaled(0.5), PackedColor(0x804000));
        assert_eq!(PackedColor(0xFFFFFF).scaled(0.0), PackedColor::BLACK);
        assert_eq!(PackedColor(0x102030).scaled(3.0), PackedColor(0x102030));
    }

    #[test]
    fn test_from_masks_high_bits() {
        assert_eq!(PackedColor::from(0xFF123456), PackedColor(0x123456));
        assert_eq!(PackedColor(0x0A0B0C).to_string(), "#0A0B0C");
    }
}
