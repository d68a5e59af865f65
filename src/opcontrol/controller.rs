use log::debug;

use crate::{
    config::ReplayConfig,
    peripherals::{Devices, InputSnapshot},
    replay::{frame::Buttons, toggles::ToggleTable},
};

/// Tank drive plus button toggles.
///
/// Holds its own [`ToggleTable`], separate from the one replay uses, so a
/// replay always starts from every toggle off regardless of what the
/// driver left latched.
#[derive(Debug, Clone, Default)]
pub struct DriverControl {
    toggles:  ToggleTable,
    previous: Buttons,
    deadband: i8,
}

impl DriverControl {
    /// Creates a driver control that ignores stick values smaller than `deadband`.
    pub fn new(deadband: i8) -> Self {
        Self {
            deadband,
            ..Self::default()
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Self { Self::new(config.deadband) }

    pub fn toggles(&self) -> &ToggleTable { &self.toggles }

    /// Reads the input once, drives, and fires toggles for newly pressed
    /// buttons. Returns the raw input that was read.
    pub fn update(&mut self, devices: &mut Devices) -> InputSnapshot {
        let input = devices.input.read();
        devices.drive.drive(
            apply_deadband(input.left, self.deadband),
            apply_deadband(input.right, self.deadband),
        );

        let pressed = input.buttons.rising(self.previous);
        if !pressed.is_empty() {
            let fired = self.toggles.fire(pressed, devices.mechanisms.as_mut());
            debug!("Driver Toggled {} Mechanisms: {:?}", fired, pressed);
        }
        self.previous = input.buttons;
        input
    }
}

/// Zeroes `value` when its magnitude is below `deadband`.
pub fn apply_deadband(value: i8, deadband: i8) -> i8 {
    if value.unsigned_abs() < deadband.unsigned_abs() { 0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        peripherals::{Piston, mock::MockRobot},
        replay::toggles::Toggle,
    };

    #[test]
    fn deadband_zeroes_small_values_only() {
        assert_eq!(apply_deadband(7, 8), 0);
        assert_eq!(apply_deadband(-7, 8), 0);
        assert_eq!(apply_deadband(8, 8), 8);
        assert_eq!(apply_deadband(-128, 8), -128);
        assert_eq!(apply_deadband(3, 0), 3);
    }

    #[test]
    fn sticks_tank_drive_through_the_deadband() {
        let robot = MockRobot::new();
        let mut devices = robot.devices();
        let mut driver = DriverControl::new(8);

        robot.hold(5, -100, Buttons::empty());
        let input = driver.update(&mut devices);

        assert_eq!((input.left, input.right), (5, -100));
        assert_eq!(robot.drive.borrow().commands, [(0, -100)]);
    }

    #[test]
    fn holding_a_button_toggles_once() {
        let robot = MockRobot::new();
        let mut devices = robot.devices();
        let mut driver = DriverControl::from_config(&ReplayConfig::default());

        robot.hold(0, 0, Buttons::DESCORE);
        driver.update(&mut devices);
        driver.update(&mut devices);
        robot.hold(0, 0, Buttons::empty());
        driver.update(&mut devices);
        robot.hold(0, 0, Buttons::DESCORE);
        driver.update(&mut devices);

        assert_eq!(robot.mechanisms.borrow().pistons, [
            (Piston::Descore, true),
            (Piston::Descore, false)
        ]);
        assert!(!driver.toggles().is_on(Toggle::Descore));
    }

    #[test]
    fn presses_toggle_the_same_way_replay_does() {
        let robot = MockRobot::new();
        let mut devices = robot.devices();
        let mut driver = DriverControl::new(8);

        robot.hold(0, 0, Buttons::INTAKE_FORWARD | Buttons::MID_SCORING);
        driver.update(&mut devices);

        let mech = robot.mechanisms.borrow();
        assert_eq!(mech.intake, [127, -127]);
        assert_eq!(mech.outtake, [-127]);
        assert_eq!(mech.pistons, [(Piston::MidScoring, true)]);
    }
}
