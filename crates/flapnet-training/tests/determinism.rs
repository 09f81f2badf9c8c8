use flapnet_controller::{Controller, HIDDEN_LEN};
use flapnet_engine::{EntityId, NullRenderer, OBSERVATION_LEN, TargetPolicy};
use flapnet_training::{
    LearningRateSchedule, Population, StepOutcome, TrainingConfig, TrainingSession,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

/// Deaths per tick plus the champion after every generation.
#[derive(Debug, Default, PartialEq)]
struct Trace {
    deaths: Vec<(u64, Vec<EntityId>)>,
    champions: Vec<Controller>,
}

fn run(seed: u64, ticks: usize) -> Trace {
    let mut session = TrainingSession::new(
        TrainingConfig::default(),
        Population::default(),
        Pcg32::seed_from_u64(seed),
    )
    .unwrap();

    let mut trace = Trace::default();
    for _ in 0..ticks {
        match session.step(&mut NullRenderer).unwrap() {
            StepOutcome::Ticked(tick) => {
                if !tick.deaths.is_empty() {
                    trace.deaths.push((tick.tick, tick.deaths));
                }
            }
            StepOutcome::GenerationCompleted { tick, .. } => {
                trace.deaths.push((tick.tick, tick.deaths));
                trace.champions.push(session.population().champion().clone());
            }
            StepOutcome::GenerationStarted | StepOutcome::Stopped => unreachable!(),
        }
    }
    trace
}

#[test]
fn test_same_seed_same_history() {
    let a = run(2024, 600);
    let b = run(2024, 600);
    assert!(!a.champions.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_different_history() {
    let a = run(1, 600);
    let b = run(2, 600);
    assert_ne!(a, b);
}

#[test]
fn test_champion_survived_longest() {
    let mut session = TrainingSession::new(
        TrainingConfig::default(),
        Population::default(),
        Pcg32::seed_from_u64(99),
    )
    .unwrap();
    let mut generations = 0;
    while generations < 5 {
        if let StepOutcome::GenerationCompleted { report, .. } =
            session.step(&mut NullRenderer).unwrap()
        {
            let report = report.unwrap();
            assert_eq!(report.cohort_size, 21);
            assert_eq!(report.champion_survival, report.max_survival);
            assert!(report.min_survival <= report.max_survival);
            generations += 1;
        }
    }
    assert_eq!(session.population().generation(), 5);
}

/// Deaths per tick as raw entity ids, and the champion survival of each generation.
type Reference = (Vec<(u64, Vec<u64>)>, Vec<u64>);

/// Runs `generations` generations of a two-mutant cohort without mutation noise.
fn reference_run(
    champion: Controller,
    target_policy: TargetPolicy,
    generations: usize,
) -> Reference {
    let mut config = TrainingConfig {
        cohort_size: 2,
        schedule: LearningRateSchedule::Fixed { rate: 0.0 },
        ..TrainingConfig::default()
    };
    config.world.target_policy = target_policy;
    let mut session =
        TrainingSession::new(config, Population::new(champion), Pcg32::seed_from_u64(17))
            .unwrap();

    let (mut deaths, mut survivals) = (vec![], vec![]);
    while survivals.len() < generations {
        let (tick, report) = match session.step(&mut NullRenderer).unwrap() {
            StepOutcome::Ticked(tick) => (tick, None),
            StepOutcome::GenerationCompleted { tick, report } => (tick, report),
            StepOutcome::GenerationStarted | StepOutcome::Stopped => unreachable!(),
        };
        if !tick.deaths.is_empty() {
            deaths.push((tick.tick, tick.deaths.iter().map(|id| id.get()).collect()));
        }
        if let Some(report) = report {
            survivals.push(report.champion_survival);
        }
    }
    (deaths, survivals)
}

/// Ascends whenever the bird is below the top edge of the target pipe.
fn hovering_controller() -> Controller {
    let mut w1 = [[0.0; OBSERVATION_LEN]; HIDDEN_LEN];
    w1[0][1] = 1.0;
    let mut w2 = [[0.0; HIDDEN_LEN]; 2];
    w2[1][0] = 1.0;
    Controller::from_parameters(w1, [0.0; HIDDEN_LEN], w2, [0.0; 2])
}

// Entity ids: obstacles 0-3 and birds 4-6 in the first generation, then four obstacles and
// three birds per reset (7-10 / 11-13, 14-17 / 18-20).

#[test]
fn test_falling_cohort_matches_reference() {
    // y = 250 + 8t leaves the 500 px world once y + 5 > 500
    let expected = (
        vec![(31, vec![4, 5, 6]), (62, vec![11, 12, 13]), (93, vec![18, 19, 20])],
        vec![31, 31, 31],
    );
    assert_eq!(
        reference_run(Controller::zeroed(), TargetPolicy::NearestAhead, 3),
        expected
    );
}

#[test]
fn test_hovering_cohort_matches_reference() {
    // Tracking the bottom pipe (top edge at y = 350) the bird settles into a 322..=354 cycle
    // and hits that pipe when it reaches the bird at x = 140 on tick 86.
    let expected = (
        vec![(86, vec![4, 5, 6]), (172, vec![11, 12, 13]), (258, vec![18, 19, 20])],
        vec![86, 86, 86],
    );
    assert_eq!(
        reference_run(hovering_controller(), TargetPolicy::NearestAhead, 3),
        expected
    );
}

#[test]
fn test_first_in_list_target_changes_reference() {
    // The top pipe starts at y = 0, so the bird always sees itself below it and climbs 32 px
    // per tick until y - 5 < 0 on tick 8.
    let expected = (vec![(8, vec![4, 5, 6]), (16, vec![11, 12, 13])], vec![8, 8]);
    assert_eq!(
        reference_run(hovering_controller(), TargetPolicy::FirstInList, 2),
        expected
    );
}
