use std::{future::Future, time::Duration};

use vexide::time::{sleep, user_uptime};

use super::Clock;

/// Time since the user program started, and vexide's async timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct VexClock;

impl Clock for VexClock {
    fn now(&self) -> Duration { user_uptime() }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> { sleep(duration) }
}
