//! Latched toggle state for the button-driven mechanisms.
//!
//! Every tracked button flips its own latch on a rising edge. The latches
//! are independent: intake forward and intake reverse are two toggles that
//! both write the intake, so whichever fired last decides what it does.
//! Driver control and playback share this logic so a replay drives the
//! mechanisms exactly the way the driver did.

use crate::{
    peripherals::{Mechanisms, Piston},
    replay::frame::Buttons,
};

/// Full power, in stick units.
const FULL: i8 = 127;

/// A mechanism action bound to one tracked button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    IntakeForward,
    IntakeReverse,
    OuttakeForward,
    OuttakeReverse,
    MidScoring,
    Descore,
    Unloader,
}

impl Toggle {
    /// Every toggle, in button-bit order.
    pub const ALL: [Toggle; 7] = [
        Toggle::IntakeForward,
        Toggle::IntakeReverse,
        Toggle::OuttakeForward,
        Toggle::OuttakeReverse,
        Toggle::MidScoring,
        Toggle::Descore,
        Toggle::Unloader,
    ];

    /// The button that fires this toggle.
    pub fn button(self) -> Buttons {
        match self {
            Toggle::IntakeForward => Buttons::INTAKE_FORWARD,
            Toggle::IntakeReverse => Buttons::INTAKE_REVERSE,
            Toggle::OuttakeForward => Buttons::OUTTAKE_FORWARD,
            Toggle::OuttakeReverse => Buttons::OUTTAKE_REVERSE,
            Toggle::MidScoring => Buttons::MID_SCORING,
            Toggle::Descore => Buttons::DESCORE,
            Toggle::Unloader => Buttons::UNLOADER,
        }
    }

    fn index(self) -> usize { self as usize }

    /// Commands the mechanisms for this toggle being latched `on` or off.
    pub fn apply(self, on: bool, mechanisms: &mut dyn Mechanisms) {
        match self {
            Toggle::IntakeForward => mechanisms.set_intake(if on { FULL } else { 0 }),
            Toggle::IntakeReverse => mechanisms.set_intake(if on { -FULL } else { 0 }),
            Toggle::OuttakeForward => mechanisms.set_outtake(if on { FULL } else { 0 }),
            Toggle::OuttakeReverse => mechanisms.set_outtake(if on { -FULL } else { 0 }),
            Toggle::MidScoring => {
                mechanisms.set_piston(Piston::MidScoring, on);
                // Mid-scoring feeds both rollers backwards.
                if on {
                    mechanisms.set_intake(-FULL);
                    mechanisms.set_outtake(-FULL);
                }
            }
            Toggle::Descore => mechanisms.set_piston(Piston::Descore, on),
            Toggle::Unloader => mechanisms.set_piston(Piston::Unloader, on),
        }
    }
}

/// The latched state of every [`Toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleTable {
    latched: [bool; Toggle::ALL.len()],
}

impl ToggleTable {
    pub fn new() -> Self { Self::default() }

    /// Whether `toggle` is currently latched on.
    pub fn is_on(&self, toggle: Toggle) -> bool { self.latched[toggle.index()] }

    /// Flips `toggle` and returns its new state.
    pub fn flip(&mut self, toggle: Toggle) -> bool {
        let state = &mut self.latched[toggle.index()];
        *state = !*state;
        *state
    }

    /// Unlatches every toggle without commanding any mechanism.
    pub fn reset(&mut self) { self.latched = [false; Toggle::ALL.len()]; }

    /// Flips and applies every toggle whose button is in `pressed`.
    ///
    /// Toggles fire in button-bit order. Returns how many fired.
    pub fn fire(&mut self, pressed: Buttons, mechanisms: &mut dyn Mechanisms) -> usize {
        let mut fired = 0;
        for toggle in Toggle::ALL {
            if pressed.contains(toggle.button()) {
                let on = self.flip(toggle);
                toggle.apply(on, mechanisms);
                fired += 1;
            }
        }
        fired
    }
}
