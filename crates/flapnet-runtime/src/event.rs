use crossterm::event::Event;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum LoopEvent {
    /// One or more tick intervals elapsed.
    Tick(u32),
    Render,
    Terminal(Event),
}
