//! Leaf widgets: bar gauges and indicator lamps.

use glam::{Vec2, Vec4};

use super::{LayoutContext, Widget};
use crate::render::ui::uirenderer::{DrawCommand, UIRenderer};

/// A horizontal bar showing a value.
///
/// A centred gauge shows `-1.0..=1.0` growing from the middle, otherwise `0.0..=1.0` grows
/// from the left edge.
pub struct Gauge {
    pub size: Vec2,
    pub value: f32,
    pub centered: bool,
    pub fill: Vec4,
    pub background: Vec4,
    bounds: [Vec2; 2],
}

impl Gauge {
    pub fn new(size: Vec2, value: f32, centered: bool, fill: Vec4, background: Vec4) -> Self {
        Self {
            size,
            value,
            centered,
            fill,
            background,
            bounds: [Vec2::ZERO; 2],
        }
    }

    /// The filled part of the bar, or `None` when there is nothing to fill.
    pub fn fill_rect(&self) -> Option<[Vec2; 2]> {
        let [min, max] = self.bounds;
        let width = max.x - min.x;
        let (from, to) = if self.centered {
            let middle = min.x + width / 2.0;
            let end = middle + self.value.clamp(-1.0, 1.0) * width / 2.0;
            (middle.min(end), middle.max(end))
        } else {
            (min.x, min.x + self.value.clamp(0.0, 1.0) * width)
        };
        (to > from).then_some([Vec2::new(from, min.y), Vec2::new(to, max.y)])
    }
}

impl Widget for Gauge {
    fn size_hint(&self) -> Vec2 {
        self.size
    }

    fn layout(&mut self, ctx: &LayoutContext) -> Vec2 {
        self.bounds = [ctx.cursor, ctx.cursor + self.size];
        self.size
    }

    fn bounds(&self) -> [Vec2; 2] {
        self.bounds
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        ui_renderer.add_command(DrawCommand {
            rect: self.bounds,
            color: self.background,
        });
        if let Some(rect) = self.fill_rect() {
            ui_renderer.add_command(DrawCommand {
                rect,
                color: self.fill,
            });
        }
    }
}

/// A lamp that is either lit or dim.
pub struct Indicator {
    pub size: Vec2,
    pub lit: bool,
    pub on_color: Vec4,
    pub off_color: Vec4,
    bounds: [Vec2; 2],
}

impl Indicator {
    pub fn new(size: Vec2, lit: bool, on_color: Vec4, off_color: Vec4) -> Self {
        Self {
            size,
            lit,
            on_color,
            off_color,
            bounds: [Vec2::ZERO; 2],
        }
    }

    pub fn color(&self) -> Vec4 {
        if self.lit { self.on_color } else { self.off_color }
    }
}

impl Widget for Indicator {
    fn size_hint(&self) -> Vec2 {
        self.size
    }

    fn layout(&mut self, ctx: &LayoutContext) -> Vec2 {
        self.bounds = [ctx.cursor, ctx.cursor + self.size];
        self.size
    }

    fn bounds(&self) -> [Vec2; 2] {
        self.bounds
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        ui_renderer.add_command(DrawCommand {
            rect: self.bounds,
            color: self.color(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out(value: f32, centered: bool) -> Gauge {
        let mut gauge = Gauge::new(Vec2::new(100.0, 10.0), value, centered, Vec4::ONE, Vec4::ZERO);
        gauge.layout(&LayoutContext {
            max_size: Vec2::ZERO,
            cursor: Vec2::new(10.0, 20.0),
        });
        gauge
    }

    #[test]
    fn test_fill_from_left() {
        let rect = laid_out(0.25, false).fill_rect().unwrap();
        assert_eq!(rect, [Vec2::new(10.0, 20.0), Vec2::new(35.0, 30.0)]);
        assert!(laid_out(0.0, false).fill_rect().is_none());
        assert_eq!(laid_out(3.0, false).fill_rect().unwrap()[1].x, 110.0);
    }

    #[test]
    fn test_fill_from_middle() {
        let rect = laid_out(-0.5, true).fill_rect().unwrap();
        assert_eq!(rect, [Vec2::new(35.0, 20.0), Vec2::new(60.0, 30.0)]);
        let rect = laid_out(1.0, true).fill_rect().unwrap();
        assert_eq!(rect, [Vec2::new(60.0, 20.0), Vec2::new(110.0, 30.0)]);
    }

    #[test]
    fn test_indicator_color() {
        let mut lamp = Indicator::new(Vec2::ONE, false, Vec4::ONE, Vec4::ZERO);
        assert_eq!(lamp.color(), Vec4::ZERO);
        lamp.lit = true;
        assert_eq!(lamp.color(), Vec4::ONE);
    }
}
