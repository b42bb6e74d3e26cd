use crate::color::PackedColor;
use crate::layout::PixelLocation;
use crate::poller::ColorBatch;
use iced::widget::canvas::{self, event, Frame, Geometry, Path, Program};
use iced::{mouse, Color, Point, Rectangle, Renderer, Theme};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub position: Point,
    pub packed: PackedColor,
    pub color: Color,
}

impl Marker {
    pub fn new(location: &PixelLocation, packed: PackedColor) -> Self {
        Self {
            index: location.index,
            position: Point::new(location.x as f32, location.y as f32),
            packed,
            color: to_color(packed),
        }
    }

    pub fn set_color(&mut self, packed: PackedColor) {
        self.packed = packed;
        self.color = to_color(packed);
    }

    fn contains(&self, point: Point, radius: f32) -> bool {
        self.position.distance(point) <= radius
    }
}

pub fn to_color(packed: PackedColor) -> Color {
    let [r, g, b, a] = packed.normalized();
    Color::from_rgba(r, g, b, a)
}

/// Applies one poll batch. Indices without a marker are ignored.
pub fn apply_batch(markers: &mut [Marker], batch: &ColorBatch) {
    for (index, packed) in batch {
        if let Some(marker) = markers.get_mut(*index) {
            marker.set_color(*packed);
        }
    }
}

/// Canvas drawing one circle per marker on a black pane.
pub struct LedSpiral<'a, Message> {
    markers: &'a [Marker],
    radius: f32,
    on_click: fn(usize) -> Message,
}

impl<'a, Message> LedSpiral<'a, Message> {
    pub fn new(markers: &'a [Marker], radius: f32, on_click: fn(usize) -> Message) -> Self {
        Self {
            markers,
            radius,
            on_click,
        }
    }

    fn marker_at(&self, point: Point) -> Option<&Marker> {
        // later circles are drawn on top
        self.markers.iter().rev().find(|m| m.contains(point, self.radius))
    }
}

impl<'a, Message> Program<Message> for LedSpiral<'a, Message> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(marker) = cursor.position_in(bounds).and_then(|p| self.marker_at(p)) {
                return (event::Status::Captured, Some((self.on_click)(marker.index)));
            }
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::BLACK);

        for marker in self.markers {
            let circle = Path::circle(marker.position, self.radius);
            frame.fill(&circle, marker.color);
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::spiral_layout;

    fn markers(n: usize) -> Vec<Marker> {
        spiral_layout(n, 22.0)
            .iter()
            .map(|l| Marker::new(l, PackedColor::BLACK))
            .collect()
    }

    #[test]
    fn test_marker_follows_location() {
        let layout = spiral_layout(3, 22.0);
        let marker = Marker::new(&layout[2], PackedColor(0xFF0000));
        assert_eq!(marker.index, 2);
        assert_eq!(marker.position, Point::new(layout[2].x as f32, layout[2].y as f32));
        assert_eq!(marker.color, Color::from_rgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_apply_batch_updates_only_batch() {
        let mut markers = markers(12);
        let batch = vec![(5, PackedColor(0x00FF00)), (6, PackedColor(0x0000FF)), (40, PackedColor::WHITE)];
        apply_batch(&mut markers, &batch);

        assert_eq!(markers[5].packed, PackedColor(0x00FF00));
        assert_eq!(markers[6].color, Color::from_rgba(0.0, 0.0, 1.0, 1.0));
        assert!(markers
            .iter()
            .filter(|m| m.index != 5 && m.index != 6)
            .all(|m| m.packed == PackedColor::BLACK));
        assert_eq!(markers.len(), 12);
    }

    #[test]
    fn test_hit_test() {
        let markers = markers(4);
        let on_click: fn(usize) -> usize = |i| i;
        let spiral = LedSpiral::new(&markers, 20.0, on_click);
        let target = markers[1].position;
        assert_eq!(spiral.marker_at(target).map(|m| m.index), Some(1));
        assert!(spiral.marker_at(Point::new(-100.0, -100.0)).is_none());
    }
}
