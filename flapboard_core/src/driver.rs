//! Async player: drives a [`Scheduler`] from a tokio interval on the current
//! task. Single-threaded and cooperative; the scheduler itself is never
//! shared.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{BoardError, Result};
use crate::scheduler::Scheduler;

/// Advance `scheduler` once per `tick` until `done` returns true. Returns the
/// number of ticks taken.
pub async fn play<F>(scheduler: &mut Scheduler, tick: Duration, mut done: F) -> Result<u64>
where
    F: FnMut(&Scheduler) -> bool,
{
    if tick.is_zero() {
        return Err(BoardError::InvalidTiming("driver tick must be positive"));
    }
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    let mut last = Instant::now();
    let mut ticks = 0;
    while !done(scheduler) {
        interval.tick().await;
        let now = Instant::now();
        scheduler.advance(now - last);
        last = now;
        ticks += 1;
        tokio::task::yield_now().await;
    }
    Ok(ticks)
}

/// Blocking wrapper around [`play`] on a fresh current-thread runtime.
pub fn play_blocking<F>(scheduler: &mut Scheduler, tick: Duration, done: F) -> Result<u64>
where
    F: FnMut(&Scheduler) -> bool,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| BoardError::Runtime(e.to_string()))?;
    runtime.block_on(play(scheduler, tick, done))
}
