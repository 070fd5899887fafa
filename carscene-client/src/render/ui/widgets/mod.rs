//! The [`Widget`] trait and the widgets the overlay is built from.

use glam::Vec2;

use super::uirenderer::UIRenderer;

/// Where a widget may place itself.
pub struct LayoutContext {
    pub max_size: Vec2,
    pub cursor: Vec2,
}

pub trait Widget {
    /// The size the widget would like to have.
    fn size_hint(&self) -> Vec2;

    /// Positions the widget within `ctx` and returns the size it took.
    fn layout(&mut self, ctx: &LayoutContext) -> Vec2;

    /// Top-left and bottom-right corners assigned by the last [`Widget::layout`].
    fn bounds(&self) -> [Vec2; 2];

    fn draw(&self, ui_renderer: &mut UIRenderer);
}

pub mod containers;
pub mod gauge;

pub use containers::*;
pub use gauge::*;
