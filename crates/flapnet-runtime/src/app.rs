use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// A terminal application driven by [`Runtime::run`].
pub trait App {
    /// Error returned by [`App::update`]. Terminal failures are converted into it.
    type Error: From<std::io::Error>;

    /// Called once before the first event. Configure the tick interval and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Checked before every event; the loop ends as soon as this returns `true`.
    fn should_exit(&self) -> bool;

    /// Handles key presses, resizes and other terminal input.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by `ticks` fixed-interval steps.
    ///
    /// `ticks` is greater than one only when the loop fell behind schedule.
    fn update(&mut self, runtime: &mut Runtime, ticks: u32) -> Result<(), Self::Error>;
}
