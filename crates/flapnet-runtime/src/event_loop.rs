use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::LoopEvent;

/// Largest number of ticks delivered in one batch.
///
/// When the loop falls further behind than this, the excess ticks are dropped and the
/// schedule restarts from the current instant.
pub const MAX_CATCH_UP: u32 = 8;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every tick batch or terminal event.
    #[default]
    OnDirty,
    /// Redraw at a fixed interval whether or not anything changed.
    Interval(Duration),
}

impl RenderMode {
    /// `Interval` mode from a frame rate in frames per second.
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Decides which event is due next and waits for it.
///
/// Ticks follow a fixed schedule: each tick is due exactly one interval after the previous
/// one was due, not after it was delivered.
#[derive(Debug)]
pub(crate) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick_at: Instant,
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl EventLoop {
    fn starting_at(now: Instant) -> Self {
        Self {
            tick_interval: None,
            next_tick_at: now,
            render_mode: RenderMode::default(),
            last_render: now,
            // the first frame is drawn before any tick
            dirty: true,
        }
    }

    pub(crate) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Sets the tick interval; the first tick is due immediately. `None` or a zero interval
    /// disables ticks.
    pub(crate) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.schedule_ticks(interval, Instant::now());
    }

    fn schedule_ticks(&mut self, interval: Option<Duration>, now: Instant) {
        self.tick_interval = interval.filter(|i| !i.is_zero());
        self.next_tick_at = now;
    }

    pub(crate) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick batch or a render is due, or a terminal event arrives.
    pub(crate) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(LoopEvent::Terminal(event::read()?));
        }
    }

    /// Returns the tick batch or render due at `now`, ticks first.
    fn due_event(&mut self, now: Instant) -> Option<LoopEvent> {
        if let Some(interval) = self.tick_interval
            && now >= self.next_tick_at
        {
            let behind = now.duration_since(self.next_tick_at).as_nanos() / interval.as_nanos();
            let due = u32::try_from(behind).unwrap_or(u32::MAX).saturating_add(1);
            let ticks = if due > MAX_CATCH_UP {
                self.next_tick_at = now + interval;
                MAX_CATCH_UP
            } else {
                self.next_tick_at += interval * due;
                due
            };
            self.dirty = true;
            return Some(LoopEvent::Tick(ticks));
        }

        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(LoopEvent::Render);
        }
        None
    }

    /// How long to wait for terminal input before the next scheduled event.
    ///
    /// `None` means nothing is scheduled and the loop may block on input.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|_| self.next_tick_at);
        let next_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Interval(interval) => Some(self.last_render + interval),
        };
        let deadline = [next_tick, next_render].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}
