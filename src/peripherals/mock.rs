//! Recording stand-ins for the robot's devices, used by unit tests.

use std::{
    cell::{Cell, RefCell},
    future::{self, Future},
    rc::Rc,
    time::Duration,
};

use super::*;

#[derive(Default)]
pub struct MockInput {
    pub next:  InputSnapshot,
    pub reads: usize,
}

impl InputSource for MockInput {
    fn read(&mut self) -> InputSnapshot {
        self.reads += 1;
        self.next
    }
}

#[derive(Default)]
pub struct MockImu {
    pub heading: f64,
    pub zeroed:  usize,
}

impl HeadingSensor for MockImu {
    fn heading(&mut self) -> f64 { self.heading }

    fn zero(&mut self) {
        self.heading = 0.0;
        self.zeroed += 1;
    }
}

#[derive(Default)]
pub struct MockDrive {
    pub commands: Vec<(i8, i8)>,
}

impl DriveOutput for MockDrive {
    fn drive(&mut self, left: i8, right: i8) { self.commands.push((left, right)); }
}

#[derive(Default)]
pub struct MockMechanisms {
    pub intake:  Vec<i8>,
    pub outtake: Vec<i8>,
    pub pistons: Vec<(Piston, bool)>,
}

impl MockMechanisms {
    pub fn is_untouched(&self) -> bool {
        self.intake.is_empty() && self.outtake.is_empty() && self.pistons.is_empty()
    }
}

impl Mechanisms for MockMechanisms {
    fn set_intake(&mut self, power: i8) { self.intake.push(power); }

    fn set_outtake(&mut self, power: i8) { self.outtake.push(power); }

    fn set_piston(&mut self, piston: Piston, extended: bool) {
        self.pistons.push((piston, extended));
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub messages:   Vec<(StatusLine, String)>,
    pub rumbles:    Vec<String>,
    pub indicators: Vec<Indicator>,
}

impl MockNotifier {
    pub fn said(&self, text: &str) -> bool { self.messages.iter().any(|(_, m)| m.starts_with(text)) }
}

impl Notifier for MockNotifier {
    fn status(&mut self, line: StatusLine, text: &str) {
        self.messages.push((line, text.to_string()));
    }

    fn rumble(&mut self, pattern: &str) { self.rumbles.push(pattern.to_string()); }

    fn indicator(&mut self, indicator: Indicator) { self.indicators.push(indicator); }
}

/// Shared handles to one set of mock devices.
#[derive(Clone, Default)]
pub struct MockRobot {
    pub input:      Rc<RefCell<MockInput>>,
    pub imu:        Rc<RefCell<MockImu>>,
    pub drive:      Rc<RefCell<MockDrive>>,
    pub mechanisms: Rc<RefCell<MockMechanisms>>,
    pub notifier:   Rc<RefCell<MockNotifier>>,
}

impl MockRobot {
    pub fn new() -> Self { Self::default() }

    pub fn devices(&self) -> Devices {
        Devices {
            input:      Box::new(self.input.clone()),
            imu:        Box::new(self.imu.clone()),
            drive:      Box::new(self.drive.clone()),
            mechanisms: Box::new(self.mechanisms.clone()),
            notifier:   Box::new(self.notifier.clone()),
        }
    }

    pub fn hold(&self, left: i8, right: i8, buttons: Buttons) {
        self.input.borrow_mut().next = InputSnapshot {
            left,
            right,
            buttons,
        };
    }
}

/// A clock that only moves when something sleeps on it.
///
/// Every sleep advances time by the requested duration plus `lag`, which
/// simulates a control loop that runs slower than it asks to.
#[derive(Clone, Default)]
pub struct ManualClock {
    now:    Rc<Cell<Duration>>,
    lag:    Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn starting_at(now: Duration) -> Self {
        let clock = Self::default();
        clock.now.set(now);
        clock
    }

    pub fn advance(&self, by: Duration) { self.now.set(self.now.get() + by); }

    pub fn set_lag(&self, lag: Duration) { self.lag.set(lag); }

    pub fn sleeps(&self) -> Vec<Duration> { self.sleeps.borrow().clone() }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration { self.now.get() }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration + self.lag.get());
        future::ready(())
    }
}
