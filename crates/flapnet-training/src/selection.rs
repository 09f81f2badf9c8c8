use std::cmp::Ordering;

use flapnet_engine::{Agent, Pilot};

/// Picks the fittest agent of a finished cohort.
///
/// Agents are ranked by survival ticks. On equal survival the agent whose last observation had
/// the smaller vertical gap to its target wins, i.e. the one that died closer to the pipe
/// opening. Agents are folded in order starting from the first, and a challenger only replaces
/// the incumbent when strictly better, so full ties keep the earliest agent.
///
/// Returns `None` for an empty slice; callers keep their previous champion in that case.
#[must_use]
pub fn select_fittest<P>(dead: &[Agent<P>]) -> Option<&Agent<P>>
where
    P: Pilot,
{
    let (first, rest) = dead.split_first()?;
    let fittest = rest.iter().fold(first, |incumbent, challenger| {
        if is_fitter(challenger, incumbent) {
            challenger
        } else {
            incumbent
        }
    });
    Some(fittest)
}

fn is_fitter<P>(challenger: &Agent<P>, incumbent: &Agent<P>) -> bool
where
    P: Pilot,
{
    match challenger.survival_ticks().cmp(&incumbent.survival_ticks()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (challenger.last_observation(), incumbent.last_observation()) {
            (Some(c), Some(i)) => c.vertical_gap < i.vertical_gap,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use flapnet_engine::{Bird, EntityId, NullPilot, Obstacle, Side, WorldConfig};

    use super::*;

    /// An agent that observed a target at the top of the screen from height `y`, then survived
    /// `ticks` ticks.
    fn agent(id: u64, y: f32, ticks: u64) -> Agent<NullPilot> {
        let config = WorldConfig::default();
        let target = Obstacle::new(500.0, 0.0, 40.0, 100.0, Side::Bottom);
        let mut agent = Agent::new(EntityId::new(id), Bird::at(&config, 100.0, y), NullPilot);
        agent.act(&config, Some(&target));
        for _ in 0..ticks {
            agent.step_physics(&config);
        }
        agent
    }

    fn unobserved(id: u64) -> Agent<NullPilot> {
        let config = WorldConfig::default();
        Agent::new(EntityId::new(id), Bird::spawn(&config), NullPilot)
    }

    fn fittest_id(dead: &[Agent<NullPilot>]) -> u64 {
        select_fittest(dead).unwrap().id().get()
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(select_fittest::<NullPilot>(&[]).is_none());
    }

    #[test]
    fn test_single_agent_wins() {
        assert_eq!(fittest_id(&[agent(7, 200.0, 3)]), 7);
    }

    #[test]
    fn test_longest_survival_wins() {
        let dead = [agent(0, 100.0, 10), agent(1, 300.0, 42), agent(2, 50.0, 41)];
        assert_eq!(fittest_id(&dead), 1);
    }

    #[test]
    fn test_tie_broken_by_smaller_vertical_gap() {
        let dead = [agent(0, 300.0, 30), agent(1, 120.0, 30), agent(2, 200.0, 30)];
        assert_eq!(fittest_id(&dead), 1);
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let dead = [agent(0, 200.0, 30), agent(1, 200.0, 30), agent(2, 200.0, 30)];
        assert_eq!(fittest_id(&dead), 0);
    }

    #[test]
    fn test_missing_observation_never_breaks_ties() {
        let dead = [unobserved(0), agent(1, 0.0, 0)];
        assert_eq!(fittest_id(&dead), 0);
        let dead = [agent(0, 400.0, 0), unobserved(1)];
        assert_eq!(fittest_id(&dead), 0);
    }
}
