//! The V5 controller as an [`InputSource`] and a [`Notifier`].
//!
//! Sticks are read as signed stick units and the seven tracked buttons are
//! packed into a [`Buttons`] mask:
//!
//! | Button | Action          |
//! |--------|-----------------|
//! | R1     | intake forward  |
//! | R2     | intake reverse  |
//! | L1     | outtake forward |
//! | L2     | outtake reverse |
//! | X      | mid-scoring     |
//! | A      | descore         |
//! | B      | unloader        |
//!
//! Status text is written to the first two lines of the controller screen.
//! The controller has no room for graphics, so indicator updates are
//! ignored; pair it with a
//! [`BrainNotifier`](crate::display::BrainNotifier) to show them.

use heapless::String;
use log::warn;
use vexide::{
    controller::{ButtonState, ControllerState},
    prelude::Controller,
};

use super::{Indicator, InputSnapshot, InputSource, Notifier, StatusLine};
use crate::replay::frame::Buttons;

/// Characters that fit on one line of the controller screen.
pub const SCREEN_COLUMNS: usize = 19;

/// A physical controller button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

/// Which physical button sets each tracked bit.
pub const BUTTON_MAP: [(ControllerButton, Buttons); 7] = [
    (ControllerButton::ButtonR1, Buttons::INTAKE_FORWARD),
    (ControllerButton::ButtonR2, Buttons::INTAKE_REVERSE),
    (ControllerButton::ButtonL1, Buttons::OUTTAKE_FORWARD),
    (ControllerButton::ButtonL2, Buttons::OUTTAKE_REVERSE),
    (ControllerButton::ButtonX, Buttons::MID_SCORING),
    (ControllerButton::ButtonA, Buttons::DESCORE),
    (ControllerButton::ButtonB, Buttons::UNLOADER),
];

impl InputSource for Controller {
    fn read(&mut self) -> InputSnapshot { snapshot(&get_state(self)) }
}

impl Notifier for Controller {
    fn status(&mut self, line: StatusLine, text: &str) {
        let row = match line {
            StatusLine::Primary => 0,
            StatusLine::Secondary => 1,
        };
        self.try_set_text(pad_line(text).as_str(), row, 0)
            .unwrap_or_else(|e| {
                warn!("Controller Screen Error: {}", e);
            });
    }

    fn rumble(&mut self, pattern: &str) {
        self.try_rumble(pattern).unwrap_or_else(|e| {
            warn!("Controller Rumble Error: {}", e);
        });
    }

    fn indicator(&mut self, _indicator: Indicator) {}
}

/// Converts a controller state into the sticks and tracked buttons.
pub fn snapshot(state: &ControllerState) -> InputSnapshot {
    let buttons = BUTTON_MAP
        .iter()
        .filter(|(button, _)| get_button_state(state, *button).is_pressed())
        .fold(Buttons::empty(), |mask, (_, bit)| mask | *bit);

    InputSnapshot {
        left:  stick_units(state.left_stick.y()),
        right: stick_units(state.right_stick.y()),
        buttons,
    }
}

/// Scales a -1.0 to 1.0 stick reading to -127 to 127.
pub fn stick_units(value: f64) -> i8 { (value * 127.0).round().clamp(-127.0, 127.0) as i8 }

/// Truncates or space-pads `text` to exactly one screen line, so a short
/// message fully replaces a longer one.
pub fn pad_line(text: &str) -> String<SCREEN_COLUMNS> {
    let mut line = String::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    while line.push(' ').is_ok() {}
    line
}

fn get_button_state(state: &ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}

fn get_state(controller: &Controller) -> ControllerState {
    controller.state().unwrap_or_else(|e| {
        warn!("Controller State Error: {}", e);
        ControllerState::default()
    })
}
