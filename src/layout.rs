//! Spiral placement of the emulated pixels.
//!
//! Pixel `i` sits at polar coordinates `r = scale * sqrt(i + 3)`,
//! `t = 2.5 * sqrt(i + 3)`, shifted by the center offset on both axes so the
//! whole spiral lands in positive window coordinates.

use crate::location::Location;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: f64 = 22.0;

/// Margin added around the outermost ring.
const MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelLocation {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl PixelLocation {
    pub fn location(&self) -> Location {
        Location::new(self.x, self.y)
    }
}

pub fn center_offset(num_pixels: usize, scale: f64) -> f64 {
    scale * (num_pixels as f64).sqrt() + MARGIN
}

/// Side length of the square pane that holds the spiral.
pub fn pane_size(num_pixels: usize, scale: f64) -> f64 {
    scale * (num_pixels as f64).sqrt() * 2.0 + 50.0
}

pub fn spiral_position(index: usize, scale: f64, center_offset: f64) -> PixelLocation {
    let s = ((index + 3) as f64).sqrt();
    let t = 2.5 * s;
    let r = scale * s;
    PixelLocation {
        index,
        x: r * t.cos() + center_offset,
        y: r * t.sin() + center_offset,
    }
}

pub fn spiral_layout(num_pixels: usize, scale: f64) -> Vec<PixelLocation> {
    let offset = center_offset(num_pixels, scale);
    (0..num_pixels)
        .map(|i| spiral_position(i, scale, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_layout_length_and_order() {
        for n in [1, 2, 10, 57, 300] {
            let layout = spiral_layout(n, DEFAULT_SCALE);
            assert_eq!(layout.len(), n);
            assert!(layout.iter().enumerate().all(|(i, p)| p.index == i));
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(spiral_layout(64, DEFAULT_SCALE), spiral_layout(64, DEFAULT_SCALE));
    }

    #[test]
    fn test_single_pixel() {
        assert!(approx(center_offset(1, DEFAULT_SCALE), 42.0));

        let layout = spiral_layout(1, DEFAULT_SCALE);
        assert_eq!(layout.len(), 1);
        let p = layout[0];
        let r = DEFAULT_SCALE * 3f64.sqrt();
        let t = 2.5 * 3f64.sqrt();
        assert!(approx(p.x, r * t.cos() + 42.0));
        assert!(approx(p.y, r * t.sin() + 42.0));
        assert!(approx(p.location().distance_to(&Location::new(42.0, 42.0)), r));
    }

    #[test]
    fn test_ten_pixels() {
        let offset = center_offset(10, 22.0);
        assert!((offset - 89.57).abs() < 0.01);

        let layout = spiral_layout(10, 22.0);
        let first = spiral_position(0, 22.0, offset);
        assert_eq!(layout[0], first);
        let s = 3f64.sqrt();
        assert!(approx(first.x, 22.0 * s * (2.5 * s).cos() + offset));
    }

    #[test]
    fn test_position_depends_on_pixel_count() {
        let small = spiral_layout(4, DEFAULT_SCALE);
        let large = spiral_layout(16, DEFAULT_SCALE);
        let shift = center_offset(16, DEFAULT_SCALE) - center_offset(4, DEFAULT_SCALE);
        assert!(approx(large[2].x - small[2].x, shift));
        assert!(approx(large[2].y - small[2].y, shift));
    }

    #[test]
    fn test_pane_size() {
        assert!(approx(pane_size(100, 22.0), 490.0));
    }
}
