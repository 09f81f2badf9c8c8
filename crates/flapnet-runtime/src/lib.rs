//! Fixed-interval tick and render loop for terminal applications.
//!
//! A [`Runtime`] owns the terminal for the duration of [`Runtime::run`] and feeds an [`App`]
//! three kinds of events: simulation ticks on a fixed cadence, render requests, and terminal
//! input. Ticks that fall behind are reported in batches so a slow frame never changes how
//! many simulation steps happen per second of wall time.

pub use self::{
    app::App,
    event_loop::{MAX_CATCH_UP, RenderMode},
    runtime::Runtime,
};

mod app;
mod event;
mod event_loop;
mod runtime;
