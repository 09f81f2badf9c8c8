use flapnet_engine::NullRenderer;
use flapnet_training::{GenerationReport, StepOutcome};

use crate::command::session::SessionArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Number of generations to train
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Stop early once a single generation lasts this many ticks
    #[arg(long)]
    tick_limit: Option<u64>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        session,
        generations,
        tick_limit,
    } = arg;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (mut session, seed) = session.start()?;
    let path = session
        .champion_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    eprintln!("Training {generations} generations (seed {seed}, champion {path})");

    let mut generation_start = 0;
    let mut completed = 0;
    while completed < *generations {
        match session.step(&mut NullRenderer)? {
            StepOutcome::Ticked(tick) => {
                if tick_limit.is_some_and(|limit| tick.tick - generation_start >= limit) {
                    eprintln!(
                        "Generation #{} reached {} ticks, stopping",
                        session.population().generation(),
                        tick.tick - generation_start,
                    );
                    break;
                }
            }
            StepOutcome::GenerationCompleted { tick, report } => {
                generation_start = tick.tick;
                completed += 1;
                if let Some(report) = report {
                    print_report(&report);
                }
            }
            StepOutcome::GenerationStarted | StepOutcome::Stopped => {}
        }
    }
    session.quit()?;

    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Generations: {}", session.population().generation());
    if let Some(report) = session.last_report() {
        eprintln!("  Last champion survival: {} ticks", report.champion_survival);
    }
    eprintln!("  Champion: {path}");

    Ok(())
}

fn print_report(report: &GenerationReport) {
    let GenerationReport {
        generation,
        cohort_size,
        learning_rate,
        champion_survival,
        min_survival,
        max_survival,
        mean_survival,
    } = report;
    eprintln!(
        "Generation #{generation:4} (lr {learning_rate:.2}, {cohort_size} agents): \
         champion {champion_survival:5} | min {min_survival:5} | max {max_survival:5} | \
         mean {mean_survival:8.1}"
    );
}
