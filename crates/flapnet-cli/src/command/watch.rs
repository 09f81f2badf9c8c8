use crossterm::event::{Event, KeyCode};
use flapnet_runtime::{App, Runtime};
use flapnet_training::TrainingSession;
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
};

use crate::{command::session::SessionArg, ui::Scene};

/// Simulation steps per tick while fast-forwarding.
const FAST_FORWARD_STEPS: u32 = 20;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    #[clap(flatten)]
    session: SessionArg,
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let (session, seed) = arg.session.start()?;
    let mut app = WatchApp::new(session);
    Runtime::new().run(&mut app)?;

    let mut session = app.session;
    session.quit()?;
    eprintln!(
        "Stopped after {} generations (seed {seed})",
        session.population().generation()
    );
    if let Some(path) = session.champion_path() {
        eprintln!("  Champion: {}", path.display());
    }
    Ok(())
}

#[derive(Debug)]
struct WatchApp {
    session: TrainingSession<Pcg32>,
    scene: Scene,
    fast_forward: bool,
    is_exiting: bool,
}

impl WatchApp {
    fn new(session: TrainingSession<Pcg32>) -> Self {
        let mut scene = Scene::new("flapnet", &session.config().world);
        session.world().redraw(&mut scene);
        Self {
            session,
            scene,
            fast_forward: false,
            is_exiting: false,
        }
    }

    fn status_line(&self) -> Line<'static> {
        let world = self.session.world();
        let survival = world
            .live_agents()
            .first()
            .map_or(0, flapnet_engine::Agent::survival_ticks);
        let mut status = format!(
            "Generation {} | alive {}/{} | lr {:.2} | survived {survival}",
            self.session.population().generation(),
            world.live_agents().len(),
            self.session.config().cohort_size + 1,
            self.session.learning_rate(),
        );
        if let Some(report) = self.session.last_report() {
            status += &format!(
                " | last champion {} (mean {:.1})",
                report.champion_survival, report.mean_survival
            );
        }
        if self.fast_forward {
            status += " | FAST";
        }
        Line::from(status)
    }
}

impl App for WatchApp {
    type Error = anyhow::Error;

    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.session.config().tick_interval()));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('q') => self.is_exiting = true,
                KeyCode::Char('t') => self.fast_forward = !self.fast_forward,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = Text::from("Controls: T (Fast-forward) | Q (Save & Quit)")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let [scene_area, status_area, help_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&self.scene, scene_area);
        frame.render_widget(self.status_line(), status_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, ticks: u32) -> anyhow::Result<()> {
        let steps = if self.fast_forward {
            ticks * FAST_FORWARD_STEPS
        } else {
            ticks
        };
        for _ in 0..steps {
            self.session.step(&mut self.scene)?;
        }
        Ok(())
    }
}
