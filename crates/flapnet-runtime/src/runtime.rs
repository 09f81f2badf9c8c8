use std::time::Duration;

use crate::{
    App,
    event::LoopEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Owns the event loop and runs an [`App`] in the terminal.
#[derive(Debug, Default)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Sets the interval between ticks and restarts the tick schedule. `None` stops ticking.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Takes over the terminal and runs `app` until [`App::should_exit`] returns `true` or
    /// [`App::update`] fails.
    ///
    /// The exit condition is checked before every event, so an exit requested by a key press
    /// is honored before the next tick.
    pub fn run<A>(mut self, app: &mut A) -> Result<(), A::Error>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick(ticks) => app.update(&mut self, ticks)?,
                    LoopEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    LoopEvent::Terminal(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
