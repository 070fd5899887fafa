//! The car's dashboard in the bottom-left corner of the window.

use carscene_core::{
    Car,
    car::{
        MAX_SPEED, MAX_STEERING_ANGLE,
        pose::{BLINKER_OFF, BLINKER_ON, FRONT_LIGHT_OFF, FRONT_LIGHT_ON},
    },
};
use glam::{Vec2, Vec4};

use super::{
    uirenderer::UIRenderer,
    widgets::{Alignment, Container, Gauge, Indicator, LayoutContext, Widget},
};

const MARGIN: f32 = 16.0;
const GAUGE_SIZE: Vec2 = Vec2::new(220.0, 14.0);
const LAMP_SIZE: Vec2 = Vec2::new(24.0, 14.0);

const PANEL: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.45);
const TRACK: Vec4 = Vec4::new(0.2, 0.2, 0.2, 0.8);
const SPEED_FILL: Vec4 = Vec4::new(0.3, 0.8, 0.3, 1.0);
const REVERSE_FILL: Vec4 = Vec4::new(0.9, 0.6, 0.2, 1.0);
const STEERING_FILL: Vec4 = Vec4::new(0.3, 0.6, 0.9, 1.0);
const BRAKE_ON: Vec4 = Vec4::new(0.9, 0.1, 0.1, 1.0);
const BRAKE_OFF: Vec4 = Vec4::new(0.3, 0.05, 0.05, 1.0);

/// Whether the left or right blinker lamp is lit right now.
pub fn blinker_lit(car: &Car, left: bool) -> bool {
    car.controls.blinker_activated(left) && car.blinker_on()
}

/// Builds the widget tree for the current state of `car`.
///
/// The speed gauge fills from the middle, right for forward and left for reverse. Below it is
/// the steering gauge, then a lamp row: left blinker, headlight, brake, right blinker.
pub fn build(car: &Car) -> Container {
    let controls = &car.controls;
    let speed_fill = if controls.speed < 0.0 { REVERSE_FILL } else { SPEED_FILL };
    let blinker = |left: bool| Indicator::new(LAMP_SIZE, blinker_lit(car, left), BLINKER_ON, BLINKER_OFF);

    let mut lamps = Container::row(8.0, Alignment::Center, Vec4::ZERO);
    lamps.add_widget(blinker(true));
    lamps.add_widget(Indicator::new(
        LAMP_SIZE,
        controls.headlight_on,
        FRONT_LIGHT_ON,
        FRONT_LIGHT_OFF,
    ));
    lamps.add_widget(Indicator::new(LAMP_SIZE, controls.braking, BRAKE_ON, BRAKE_OFF));
    lamps.add_widget(blinker(false));

    let mut panel = Container::column(8.0, Alignment::Center, Vec4::splat(10.0)).with_background(PANEL);
    panel.add_widget(Gauge::new(
        GAUGE_SIZE,
        controls.speed / MAX_SPEED,
        true,
        speed_fill,
        TRACK,
    ));
    // Positive steering turns right.
    panel.add_widget(Gauge::new(
        GAUGE_SIZE,
        controls.steering_angle / MAX_STEERING_ANGLE,
        true,
        STEERING_FILL,
        TRACK,
    ));
    panel.add_widget(lamps);
    panel
}

/// Lays out the dashboard against the bottom-left corner of a `screen`-sized window.
pub fn layout(car: &Car, screen: Vec2) -> Container {
    let mut panel = build(car);
    let size = panel.size_hint();
    panel.layout(&LayoutContext {
        max_size: size,
        cursor: Vec2::new(MARGIN, screen.y - size.y - MARGIN),
    });
    panel
}

pub fn draw(car: &Car, screen: Vec2, ui_renderer: &mut UIRenderer) {
    layout(car, screen).draw(ui_renderer);
    ui_renderer.finish();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_sits_in_bottom_left_corner() {
        let panel = layout(&Car::new(), Vec2::new(1280.0, 720.0));
        let [min, max] = panel.bounds();
        assert_eq!(min.x, MARGIN);
        assert_eq!(max.y, 720.0 - MARGIN);
        assert_eq!(panel.widgets.len(), 3);
    }

    #[test]
    fn test_blinker_lamp_follows_flash_phase() {
        let mut car = Car::new();
        car.controls.toggle_left_blinker();
        car.update(0.1);
        assert!(!blinker_lit(&car, true));
        for _ in 0..4 {
            car.update(0.1);
        }
        assert!(blinker_lit(&car, true));
        assert!(!blinker_lit(&car, false));
    }
}
