//! V5 Brain display output.
//!
//! [`DisplayDriver`] makes the Brain screen an `embedded-graphics`
//! [`DrawTarget`], and [`BrainNotifier`] puts the replay indicator on any
//! such target while passing text and rumble through to another
//! [`Notifier`], usually the controller.
//!
//! # Example
//!
//! ```ignore
//! use retrace::{
//!     display::{BrainNotifier, DisplayDriver},
//!     peripherals::make_cloneable,
//! };
//!
//! let controller = make_cloneable(peripherals.primary_controller);
//! let notifier = BrainNotifier::new(controller.clone(), DisplayDriver::new(peripherals.display));
//! ```

use core::{convert::Infallible, fmt::Debug};

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{Rgb888, RgbColor},
    primitives::Rectangle,
};
use log::warn;
use vexide::{
    color::Color,
    display::{Display, Rect},
};

use crate::peripherals::{Indicator, Notifier, StatusLine};

/// The replay status graphic.
pub mod indicator;

/// The Brain screen as an `embedded-graphics` draw target.
pub struct DisplayDriver {
    display: Display,
}

impl DisplayDriver {
    pub fn new(display: Display) -> Self { Self { display } }
}

impl OriginDimensions for DisplayDriver {
    fn size(&self) -> Size {
        Size::new(
            Display::HORIZONTAL_RESOLUTION as u32,
            Display::VERTICAL_RESOLUTION as u32,
        )
    }
}

impl DrawTarget for DisplayDriver {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = self.size();
        for Pixel(point, color) in pixels {
            let inside = (0..size.width as i32).contains(&point.x)
                && (0..size.height as i32).contains(&point.y);
            if inside {
                let corner = [point.x as i16, point.y as i16];
                self.display.fill(&Rect::new(corner, corner), to_color(color));
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if let Some(end) = area.bottom_right() {
            let start = area.top_left;
            self.display.fill(
                &Rect::new([start.x as i16, start.y as i16], [end.x as i16, end.y as i16]),
                to_color(color),
            );
        }
        Ok(())
    }
}

fn to_color(color: Rgb888) -> Color { Color::new(color.r(), color.g(), color.b()) }

/// Sends text and rumble to one notifier and draws the indicator on a
/// display.
///
/// Redraws only when the indicator changes.
pub struct BrainNotifier<N, D> {
    text:    N,
    display: D,
    shown:   Option<Indicator>,
}

impl<N: Notifier, D: DrawTarget<Color = Rgb888>> BrainNotifier<N, D> {
    pub fn new(text: N, display: D) -> Self {
        Self {
            text,
            display,
            shown: None,
        }
    }

    pub fn display(&self) -> &D { &self.display }
}

impl<N, D> Notifier for BrainNotifier<N, D>
where
    N: Notifier,
    D: DrawTarget<Color = Rgb888>,
    D::Error: Debug,
{
    fn status(&mut self, line: StatusLine, text: &str) { self.text.status(line, text); }

    fn rumble(&mut self, pattern: &str) { self.text.rumble(pattern); }

    fn indicator(&mut self, indicator: Indicator) {
        if self.shown == Some(indicator) {
            return;
        }
        match indicator::draw_indicator(&mut self.display, indicator) {
            Ok(()) => self.shown = Some(indicator),
            Err(e) => warn!("Display Draw Error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::{indicator::DOT_CENTER, *};
    use crate::peripherals::mock::MockNotifier;

    fn notifier() -> BrainNotifier<MockNotifier, SimulatorDisplay<Rgb888>> {
        BrainNotifier::new(MockNotifier::default(), SimulatorDisplay::new(Size::new(480, 240)))
    }

    #[test]
    fn colors_keep_their_channels() {
        assert_eq!(to_color(Rgb888::new(12, 200, 255)), Color::new(12, 200, 255));
        assert_eq!(to_color(Rgb888::BLACK), Color::new(0, 0, 0));
    }

    #[test]
    fn text_and_rumble_pass_through() {
        let mut brain = notifier();
        brain.status(StatusLine::Secondary, "SAVED TO SD!");
        brain.rumble(".");
        assert!(brain.text.said("SAVED TO SD!"));
        assert_eq!(brain.text.rumbles, ["."]);
        assert!(brain.text.indicators.is_empty());
    }

    #[test]
    fn indicator_is_drawn_once_per_change() {
        let mut brain = notifier();
        brain.indicator(Indicator::Playing { lit: true });
        assert_eq!(brain.display().get_pixel(DOT_CENTER), Rgb888::GREEN);

        Pixel(DOT_CENTER, Rgb888::BLUE).draw(&mut brain.display).unwrap();
        brain.indicator(Indicator::Playing { lit: true });
        assert_eq!(brain.display().get_pixel(DOT_CENTER), Rgb888::BLUE);

        brain.indicator(Indicator::Playing { lit: false });
        assert_ne!(brain.display().get_pixel(DOT_CENTER), Rgb888::BLUE);
    }
}
