use crate::color::PackedColor;
use crate::layout::PixelLocation;
use crate::location::{Bounds, Location};
use std::sync::atomic::{AtomicU32, Ordering};

/// In-memory WS281x strip. Colors are stored per pixel as packed RGB so
/// animations can write while the window polls.
pub struct EmulatedStrip {
    pixels: Vec<AtomicU32>,
    locations: Vec<Location>,
}

impl EmulatedStrip {
    pub fn new(layout: &[PixelLocation]) -> Self {
        Self {
            pixels: layout.iter().map(|_| AtomicU32::new(0)).collect(),
            locations: layout.iter().map(PixelLocation::location).collect(),
        }
    }

    pub fn num_pixels(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel_color(&self, index: usize) -> Option<PackedColor> {
        self.pixels
            .get(index)
            .map(|p| PackedColor(p.load(Ordering::Relaxed)))
    }

    pub fn set_pixel_color(&self, index: usize, color: PackedColor) {
        if let Some(p) = self.pixels.get(index) {
            p.store(color.0 & 0xFFFFFF, Ordering::Relaxed);
        }
    }

    pub fn fill(&self, color: PackedColor) {
        for p in &self.pixels {
            p.store(color.0 & 0xFFFFFF, Ordering::Relaxed);
        }
    }

    pub fn colors(&self) -> Vec<PackedColor> {
        (0..self.num_pixels())
            .filter_map(|i| self.pixel_color(i))
            .collect()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::spiral_layout;

    #[test]
    fn test_strip_colors() {
        let strip = EmulatedStrip::new(&spiral_layout(8, 22.0));
        assert_eq!(strip.num_pixels(), 8);
        assert_eq!(strip.pixel_color(3), Some(PackedColor::BLACK));
        assert_eq!(strip.pixel_color(8), None);

        strip.set_pixel_color(3, PackedColor(0x00FF00));
        strip.set_pixel_color(42, PackedColor(0x00FF00));
        assert_eq!(strip.pixel_color(3), Some(PackedColor(0x00FF00)));

        strip.fill(PackedColor(0x123456));
        assert!(strip.colors().iter().all(|c| *c == PackedColor(0x123456)));
    }
}
