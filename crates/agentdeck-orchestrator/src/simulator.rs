use crate::config::SimulationConfig;
use crate::types::{Agent, AgentStatus};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Bounds for one status tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusParams {
    /// Workload moves by at most this many units per tick, either way.
    pub workload_jitter: f64,
    /// Efficiency moves by at most this many units per tick, either way.
    pub efficiency_jitter: f64,
    /// Chance that an agent's status is redrawn.
    pub status_change_probability: f64,
}

impl Default for StatusParams {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for StatusParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            workload_jitter: config.workload_jitter,
            efficiency_jitter: config.efficiency_jitter,
            status_change_probability: config.status_change_probability,
        }
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-bound..=bound)
}

/// Produce the next roster from `agents`.
///
/// Workload and efficiency get a bounded random delta and are re-clamped;
/// with `status_change_probability` an agent's status is replaced by a
/// uniformly drawn one. `last_active` moves to `now` only for agents whose
/// resulting status is `active`.
pub fn simulate_status<R: Rng + ?Sized>(
    agents: &[Agent],
    rng: &mut R,
    params: &StatusParams,
    now: DateTime<Utc>,
) -> Vec<Agent> {
    agents
        .iter()
        .map(|agent| {
            let mut next = agent.clone();
            next.set_workload(agent.workload + jitter(rng, params.workload_jitter));
            next.set_efficiency(agent.efficiency + jitter(rng, params.efficiency_jitter));
            if rng.gen_bool(params.status_change_probability.clamp(0.0, 1.0)) {
                if let Some(status) = AgentStatus::ALL.choose(rng) {
                    next.status = *status;
                }
            }
            if next.is_active() {
                next.last_active = now;
            }
            next
        })
        .collect()
}
