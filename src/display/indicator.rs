//! The status graphic in the top-right corner of the Brain screen.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_9X15},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::peripherals::Indicator;

/// The region the indicator owns. It is cleared on every draw.
pub const AREA: Rectangle = Rectangle::new(Point::new(350, 0), Size::new(130, 50));

/// Center of the status dot.
pub const DOT_CENTER: Point = Point::new(460, 20);

/// Diameter of the status dot.
pub const DOT_DIAMETER: u32 = 31;

/// Top-left corner of the label.
pub const LABEL_ORIGIN: Point = Point::new(360, 10);

const DARK_RED: Rgb888 = Rgb888::new(100, 0, 0);
const DARK_GREEN: Rgb888 = Rgb888::new(0, 100, 0);

/// The dot color and label for an indicator, or `None` for a blank area.
pub fn appearance(indicator: Indicator) -> Option<(Rgb888, String<16>)> {
    let mut label = String::new();
    let color = match indicator {
        Indicator::Off => return None,
        Indicator::Recording { lit } => {
            let _ = label.push_str("REC");
            if lit { Rgb888::RED } else { DARK_RED }
        }
        Indicator::Playing { lit } => {
            let _ = label.push_str("PLAY");
            if lit { Rgb888::GREEN } else { DARK_GREEN }
        }
        Indicator::Loaded { frames } => {
            let _ = write!(label, "{} frm", frames);
            Rgb888::YELLOW
        }
    };
    Some((color, label))
}

/// Clears [`AREA`] and draws `indicator` into it.
///
/// # Errors
///
/// Returns the draw target's error.
pub fn draw_indicator<D>(target: &mut D, indicator: Indicator) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    AREA.into_styled(PrimitiveStyle::with_fill(Rgb888::BLACK))
        .draw(target)?;

    if let Some((color, label)) = appearance(indicator) {
        Circle::with_center(DOT_CENTER, DOT_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)?;
        Text::with_baseline(
            &label,
            LABEL_ORIGIN,
            MonoTextStyle::new(&FONT_9X15, color),
            Baseline::Top,
        )
        .draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;

    fn screen() -> SimulatorDisplay<Rgb888> {
        let mut display = SimulatorDisplay::new(Size::new(480, 240));
        display.clear(Rgb888::WHITE).unwrap();
        display
    }

    fn label_pixels(display: &SimulatorDisplay<Rgb888>, color: Rgb888) -> usize {
        Rectangle::new(LABEL_ORIGIN, Size::new(80, 15))
            .points()
            .filter(|p| display.get_pixel(*p) == color)
            .count()
    }

    #[test]
    fn recording_blinks_between_two_reds() {
        let mut display = screen();

        draw_indicator(&mut display, Indicator::Recording { lit: true }).unwrap();
        assert_eq!(display.get_pixel(DOT_CENTER), Rgb888::RED);
        assert!(label_pixels(&display, Rgb888::RED) > 0);

        draw_indicator(&mut display, Indicator::Recording { lit: false }).unwrap();
        assert_eq!(display.get_pixel(DOT_CENTER), DARK_RED);
    }

    #[test]
    fn playing_is_green() {
        let mut display = screen();
        draw_indicator(&mut display, Indicator::Playing { lit: true }).unwrap();
        assert_eq!(display.get_pixel(DOT_CENTER), Rgb888::GREEN);
    }

    #[test]
    fn loaded_shows_the_frame_count() {
        assert_eq!(
            appearance(Indicator::Loaded { frames: 15000 }).map(|(_, label)| label),
            Some(String::try_from("15000 frm").unwrap())
        );

        let mut display = screen();
        draw_indicator(&mut display, Indicator::Loaded { frames: 750 }).unwrap();
        assert_eq!(display.get_pixel(DOT_CENTER), Rgb888::YELLOW);
        assert!(label_pixels(&display, Rgb888::YELLOW) > 0);
    }

    #[test]
    fn off_clears_only_its_own_area() {
        let mut display = screen();
        draw_indicator(&mut display, Indicator::Recording { lit: true }).unwrap();
        draw_indicator(&mut display, Indicator::Off).unwrap();

        assert!(AREA.points().all(|p| display.get_pixel(p) == Rgb888::BLACK));
        assert_eq!(display.get_pixel(Point::new(349, 20)), Rgb888::WHITE);
        assert_eq!(display.get_pixel(Point::new(460, 50)), Rgb888::WHITE);
    }
}
