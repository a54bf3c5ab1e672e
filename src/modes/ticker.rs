//! Real-time [`Scheduler`] backed by tokio timers
//!
//! The scheduling half lives inside the session; the driving half is polled
//! by the mode's `select!` loop. They share the active timer through a
//! `watch` channel, so a reschedule takes effect the next time the loop
//! polls the driver, and the old interval is dropped rather than left
//! running.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::session::{Scheduler, TimerHandle};

type ActiveTimer = Option<(TimerHandle, Duration)>;

/// Create a connected scheduler/driver pair
pub fn tick_channel() -> (TokioScheduler, TickDriver) {
    let (tx, rx) = watch::channel(None);
    (
        TokioScheduler {
            next_id: 0,
            active: None,
            tx,
        },
        TickDriver { rx, timer: None },
    )
}

pub struct TokioScheduler {
    next_id: u64,
    active: Option<TimerHandle>,
    tx: watch::Sender<ActiveTimer>,
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.active = Some(handle);
        self.tx.send_replace(Some((handle, period)));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active == Some(handle) {
            self.active = None;
            self.tx.send_replace(None);
        }
    }
}

pub struct TickDriver {
    rx: watch::Receiver<ActiveTimer>,
    timer: Option<(TimerHandle, Interval)>,
}

impl TickDriver {
    /// Wait for the next tick of the active timer
    ///
    /// Never resolves while no timer is scheduled. Cancel safe.
    pub async fn tick(&mut self) -> TimerHandle {
        if self.rx.has_changed().unwrap_or(false) {
            let active = *self.rx.borrow_and_update();
            self.timer = active.map(|(handle, period)| {
                // First tick one full period from now
                let mut timer = interval_at(Instant::now() + period, period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                (handle, timer)
            });
        }

        match self.timer.as_mut() {
            Some((handle, timer)) => {
                timer.tick().await;
                *handle
            }
            None => std::future::pending().await,
        }
    }
}
