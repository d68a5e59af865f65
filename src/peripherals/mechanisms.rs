//! The robot's scoring mechanisms as [`Mechanisms`].
//!
//! # Example
//!
//! ```ignore
//! use retrace::peripherals::mechanisms::Subsystems;
//!
//! let subsystems = Subsystems::new(
//!     [Motor::new(peripherals.port_5, Gearset::Blue, Direction::Forward)],
//!     [Motor::new(peripherals.port_6, Gearset::Blue, Direction::Reverse)],
//!     AdiDigitalOut::new(peripherals.adi_a),
//!     AdiDigitalOut::new(peripherals.adi_b),
//!     AdiDigitalOut::new(peripherals.adi_c),
//! );
//! ```

use std::{cell::RefCell, rc::Rc};

use log::warn;
use vexide::prelude::{AdiDigitalOut, Motor};

use super::{Mechanisms, Piston, to_volts};

/// Intake and outtake motor groups plus the three pneumatic pistons.
///
/// Every device sits in its own `Rc<RefCell<_>>`, so a clone of the
/// `Subsystems` can be handed to both driver control and the replay engine.
#[derive(Clone)]
pub struct Subsystems {
    pub intake:      Rc<RefCell<dyn AsMut<[Motor]>>>,
    pub outtake:     Rc<RefCell<dyn AsMut<[Motor]>>>,
    pub mid_scoring: Rc<RefCell<AdiDigitalOut>>,
    pub descore:     Rc<RefCell<AdiDigitalOut>>,
    pub unloader:    Rc<RefCell<AdiDigitalOut>>,
}

impl Subsystems {
    pub fn new<I: AsMut<[Motor]> + 'static, O: AsMut<[Motor]> + 'static>(
        intake: I,
        outtake: O,
        mid_scoring: AdiDigitalOut,
        descore: AdiDigitalOut,
        unloader: AdiDigitalOut,
    ) -> Self {
        Self {
            intake:      Rc::new(RefCell::new(intake)),
            outtake:     Rc::new(RefCell::new(outtake)),
            mid_scoring: Rc::new(RefCell::new(mid_scoring)),
            descore:     Rc::new(RefCell::new(descore)),
            unloader:    Rc::new(RefCell::new(unloader)),
        }
    }

    fn piston(&self, piston: Piston) -> &Rc<RefCell<AdiDigitalOut>> {
        match piston {
            Piston::MidScoring => &self.mid_scoring,
            Piston::Descore => &self.descore,
            Piston::Unloader => &self.unloader,
        }
    }
}

impl Mechanisms for Subsystems {
    fn set_intake(&mut self, power: i8) { set_group(&self.intake, power); }

    fn set_outtake(&mut self, power: i8) { set_group(&self.outtake, power); }

    fn set_piston(&mut self, piston: Piston, extended: bool) {
        if let Ok(mut device) = self.piston(piston).try_borrow_mut() {
            let result = if extended { device.set_high() } else { device.set_low() };
            result.unwrap_or_else(|e| {
                warn!("ADI Set Level Error: {}", e);
            });
        }
    }
}

fn set_group(group: &Rc<RefCell<dyn AsMut<[Motor]>>>, power: i8) {
    if let Ok(mut motors) = group.try_borrow_mut() {
        for motor in motors.as_mut() {
            motor.set_voltage(to_volts(power)).unwrap_or_else(|e| {
                warn!("Motor Set Voltage Error: {}", e);
            });
        }
    }
}
