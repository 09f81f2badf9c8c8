use std::path::PathBuf;

use anyhow::Context as _;
use crossterm::event::{Event, KeyCode};
use flapnet_engine::{ManualPilot, World};
use flapnet_runtime::{App, Runtime};
use flapnet_training::TrainingConfig;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
};

use crate::{ui::Scene, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// JSON training configuration to take the world settings from
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the pipe layout (drawn from the OS when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config: TrainingConfig = match &arg.config {
        Some(path) => util::read_json_file("training config", path)?,
        None => TrainingConfig::default(),
    };
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let world = World::new(config.world.clone()).context("Invalid world configuration")?;

    let mut app = PlayApp::new(world, Pcg32::seed_from_u64(seed));
    let mut runtime = Runtime::new();
    runtime.set_tick_interval(Some(config.tick_interval()));
    runtime.run(&mut app)?;

    eprintln!("Best run: {} ticks (seed {seed})", app.best);
    Ok(())
}

#[derive(Debug)]
struct PlayApp {
    world: World<ManualPilot>,
    scene: Scene,
    rng: Pcg32,
    best: u64,
    is_exiting: bool,
}

impl PlayApp {
    fn new(world: World<ManualPilot>, rng: Pcg32) -> Self {
        let mut app = Self {
            scene: Scene::new("flapnet", world.config()),
            world,
            rng,
            best: 0,
            is_exiting: false,
        };
        app.restart();
        app
    }

    fn restart(&mut self) {
        let _ = self.world.take_dead();
        self.world.reset_obstacles(&mut self.scene);
        self.world.spawn_cohort([ManualPilot::new()], &mut self.scene);
    }

    fn score(&self) -> u64 {
        self.world
            .live_agents()
            .iter()
            .chain(self.world.dead_agents())
            .map(flapnet_engine::Agent::survival_ticks)
            .max()
            .unwrap_or(0)
    }
}

impl App for PlayApp {
    type Error = anyhow::Error;

    fn init(&mut self, _runtime: &mut Runtime) {}

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let is_over = self.world.is_extinct();
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char(' ') | KeyCode::Up if !is_over => {
                    for agent in self.world.live_agents_mut() {
                        agent.pilot_mut().request_ascend();
                    }
                }
                KeyCode::Char('r') if is_over => self.restart(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = if self.world.is_extinct() {
            "Game over! Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: Space / ↑ (Flap) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let status = Line::from(format!("Score {} | Best {}", self.score(), self.best));

        let [scene_area, status_area, help_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&self.scene, scene_area);
        frame.render_widget(status, status_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, ticks: u32) -> anyhow::Result<()> {
        for _ in 0..ticks {
            if self.world.is_extinct() {
                break;
            }
            self.world.step(&mut self.rng, &mut self.scene);
        }
        self.best = self.best.max(self.score());
        Ok(())
    }
}
