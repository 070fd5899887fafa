//! Containers that line up their children along one axis.

use glam::{Vec2, Vec4};

use super::{LayoutContext, Widget};
use crate::render::ui::uirenderer::{DrawCommand, UIRenderer};

/// Placement of children across the main axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Splits a vector into its (main, cross) components.
    fn split(self, v: Vec2) -> (f32, f32) {
        match self {
            Direction::Horizontal => (v.x, v.y),
            Direction::Vertical => (v.y, v.x),
        }
    }

    fn join(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Direction::Horizontal => Vec2::new(main, cross),
            Direction::Vertical => Vec2::new(cross, main),
        }
    }
}

/// Children laid out one after another, with an optional background.
pub struct Container {
    direction: Direction,
    pub widgets: Vec<Box<dyn Widget>>,
    pub spacing: f32,
    pub alignment: Alignment,
    /// Left, top, right and bottom padding.
    pub padding: Vec4,
    pub background: Option<Vec4>,
    bounds: [Vec2; 2],
}

impl Container {
    fn new(direction: Direction, spacing: f32, alignment: Alignment, padding: Vec4) -> Self {
        Self {
            direction,
            widgets: Vec::new(),
            spacing,
            alignment,
            padding,
            background: None,
            bounds: [Vec2::ZERO; 2],
        }
    }

    /// Children stacked top to bottom.
    pub fn column(spacing: f32, alignment: Alignment, padding: Vec4) -> Self {
        Self::new(Direction::Vertical, spacing, alignment, padding)
    }

    /// Children placed left to right.
    pub fn row(spacing: f32, alignment: Alignment, padding: Vec4) -> Self {
        Self::new(Direction::Horizontal, spacing, alignment, padding)
    }

    pub fn with_background(mut self, color: Vec4) -> Self {
        self.background = Some(color);
        self
    }

    pub fn add_widget<T: Widget + 'static>(&mut self, widget: T) {
        self.widgets.push(Box::new(widget));
    }

    fn padding_before(&self) -> Vec2 {
        Vec2::new(self.padding.x, self.padding.y)
    }

    fn padding_total(&self) -> Vec2 {
        Vec2::new(self.padding.x + self.padding.z, self.padding.y + self.padding.w)
    }
}

impl Widget for Container {
    fn size_hint(&self) -> Vec2 {
        let (mut main, mut cross) = (0.0f32, 0.0f32);
        for widget in &self.widgets {
            let (m, c) = self.direction.split(widget.size_hint());
            main += m;
            cross = cross.max(c);
        }
        main += self.spacing * self.widgets.len().saturating_sub(1) as f32;
        self.direction.join(main, cross) + self.padding_total()
    }

    fn layout(&mut self, ctx: &LayoutContext) -> Vec2 {
        let size = self.size_hint().max(ctx.max_size);
        self.bounds = [ctx.cursor, ctx.cursor + size];

        let origin = ctx.cursor + self.padding_before();
        let (_, inner_cross) = self.direction.split(size - self.padding_total());
        let mut main_cursor = 0.0;

        for widget in self.widgets.iter_mut() {
            let hint = widget.size_hint();
            let (main, cross) = self.direction.split(hint);
            let cross_offset = match self.alignment {
                Alignment::Start => 0.0,
                Alignment::Center => (inner_cross - cross) / 2.0,
                Alignment::End => inner_cross - cross,
            };
            widget.layout(&LayoutContext {
                max_size: hint,
                cursor: origin + self.direction.join(main_cursor, cross_offset),
            });
            main_cursor += main + self.spacing;
        }

        size
    }

    fn bounds(&self) -> [Vec2; 2] {
        self.bounds
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        if let Some(color) = self.background {
            ui_renderer.add_command(DrawCommand {
                rect: self.bounds,
                color,
            });
        }
        for widget in &self.widgets {
            widget.draw(ui_renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::widgets::Indicator;

    fn lamp() -> Indicator {
        Indicator::new(Vec2::splat(10.0), false, Vec4::ONE, Vec4::ZERO)
    }

    #[test]
    fn test_row_places_children_side_by_side() {
        let mut row = Container::row(5.0, Alignment::Start, Vec4::new(1.0, 2.0, 3.0, 4.0));
        row.add_widget(lamp());
        row.add_widget(lamp());
        assert_eq!(row.size_hint(), Vec2::new(1.0 + 10.0 + 5.0 + 10.0 + 3.0, 2.0 + 10.0 + 4.0));

        row.layout(&LayoutContext {
            max_size: Vec2::ZERO,
            cursor: Vec2::new(100.0, 50.0),
        });
        assert_eq!(row.widgets[0].bounds(), [Vec2::new(101.0, 52.0), Vec2::new(111.0, 62.0)]);
        assert_eq!(row.widgets[1].bounds()[0], Vec2::new(116.0, 52.0));
    }

    #[test]
    fn test_column_centres_narrow_children() {
        let mut column = Container::column(0.0, Alignment::Center, Vec4::ZERO);
        let mut wide = Container::row(0.0, Alignment::Start, Vec4::ZERO);
        wide.add_widget(lamp());
        wide.add_widget(lamp());
        column.add_widget(wide);
        column.add_widget(lamp());

        let size = column.layout(&LayoutContext {
            max_size: Vec2::ZERO,
            cursor: Vec2::ZERO,
        });
        assert_eq!(size, Vec2::new(20.0, 20.0));
        assert_eq!(column.widgets[1].bounds()[0], Vec2::new(5.0, 10.0));
    }
}
