use std::time::Duration;

/// Identifies one installed repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Timer primitives the session drives its tick loop with
///
/// The session never holds more than one live handle: a new schedule is
/// always preceded by a `cancel` of the old one.
pub trait Scheduler {
    /// Install a timer firing every `period` until cancelled
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Stop a timer; cancelling a handle that is not live is a no-op
    fn cancel(&mut self, handle: TimerHandle);
}

/// A call made against a [`ManualScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCall {
    Schedule(TimerHandle, Duration),
    Cancel(TimerHandle),
}

/// Scheduler with no clock: it only records what it was asked to do
///
/// Whoever owns it decides when ticks happen, which keeps the session
/// testable without real time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Option<(TimerHandle, Duration)>,
    calls: Vec<SchedulerCall>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live timer and its period, if any
    pub fn active(&self) -> Option<(TimerHandle, Duration)> {
        self.active
    }

    pub fn active_handle(&self) -> Option<TimerHandle> {
        self.active.map(|(handle, _)| handle)
    }

    pub fn active_period(&self) -> Option<Duration> {
        self.active.map(|(_, period)| period)
    }

    pub fn calls(&self) -> &[SchedulerCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.active = Some((handle, period));
        self.calls.push(SchedulerCall::Schedule(handle, period));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active_handle() == Some(handle) {
            self.active = None;
        }
        self.calls.push(SchedulerCall::Cancel(handle));
    }
}
