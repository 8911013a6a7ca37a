// Author: Dustin Pilgrim
// License: MIT

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The workout clock.
///
/// Owned by the daemon loop and polled from its `select!`, so `disarm()`
/// takes effect before the loop can observe another tick. There is never more
/// than one live interval.
#[derive(Debug)]
pub struct Clock {
    period: Duration,
    interval: Option<Interval>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Clock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Starts ticking; the first tick lands one full period from now.
    /// No-op if already armed.
    pub fn arm(&mut self) {
        if self.is_armed() {
            return;
        }

        let mut iv = interval_at(Instant::now() + self.period, self.period);
        iv.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(iv);

        crate::sdebug!("Clock", "armed ({}ms)", self.period.as_millis());
    }

    /// Drops the interval. Any pending tick is gone with it.
    pub fn disarm(&mut self) {
        if self.interval.take().is_some() {
            crate::sdebug!("Clock", "disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick. Never resolves while disarmed.
    ///
    /// Cancel-safe: dropping the future does not lose or duplicate a tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(iv) => {
                iv.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
