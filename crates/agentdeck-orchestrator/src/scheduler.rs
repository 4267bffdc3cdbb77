use crate::config::SimulationConfig;
use crate::state::DashboardEvent;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The three periodic simulation timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    /// Agent status perturbation.
    Status,
    /// Random interaction generation.
    Interaction,
    /// Risk recomputation.
    Risk,
}

impl TickKind {
    /// Event the tick dispatches.
    pub fn event(self) -> DashboardEvent {
        match self {
            TickKind::Status => DashboardEvent::StatusTick,
            TickKind::Interaction => DashboardEvent::InteractionTick,
            TickKind::Risk => DashboardEvent::RiskTick,
        }
    }
}

/// A timer firing every `period`, first at `period` after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTick {
    /// Which simulator this timer drives.
    pub kind: TickKind,
    /// Firing interval; never zero inside a scheduler.
    pub period: Duration,
    next_due: Duration,
}

impl PeriodicTick {
    /// Timer firing first at `period`.
    pub fn new(kind: TickKind, period: Duration) -> Self {
        Self {
            kind,
            period,
            next_due: period,
        }
    }
}

/// A tick that fell due, with its offset from scheduler start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTick {
    /// Timer that fired.
    pub kind: TickKind,
    /// Offset from scheduler start.
    pub at: Duration,
}

/// Deterministic clock for the periodic simulators.
///
/// Holds virtual elapsed time only; callers advance it explicitly, which lets
/// tests and the `simulate` command replay an hour of ticks in microseconds.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    ticks: Vec<PeriodicTick>,
    elapsed: Duration,
}

impl TickScheduler {
    /// Build a scheduler from explicit timers. Zero periods are dropped.
    pub fn new(ticks: Vec<PeriodicTick>) -> Self {
        let ticks = ticks
            .into_iter()
            .filter(|t| {
                let keep = !t.period.is_zero();
                if !keep {
                    tracing::warn!(kind = ?t.kind, "Dropping tick with zero period");
                }
                keep
            })
            .collect();
        Self {
            ticks,
            elapsed: Duration::ZERO,
        }
    }

    /// Status, interaction and risk timers with the configured periods.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(vec![
            PeriodicTick::new(TickKind::Status, config.status_interval()),
            PeriodicTick::new(TickKind::Interaction, config.interaction_interval()),
            PeriodicTick::new(TickKind::Risk, config.risk_interval()),
        ])
    }

    /// Virtual time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of live timers.
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    /// Move virtual time forward and return every tick that fell due, in firing
    /// order. Ticks due at the same instant keep registration order.
    pub fn advance(&mut self, by: Duration) -> Vec<DueTick> {
        let target = self.elapsed.saturating_add(by);
        let mut due = Vec::new();
        for (order, tick) in self.ticks.iter_mut().enumerate() {
            while tick.next_due <= target {
                due.push((tick.next_due, order, tick.kind));
                tick.next_due += tick.period;
            }
        }
        due.sort_by_key(|(at, order, _)| (*at, *order));
        self.elapsed = target;
        due.into_iter()
            .map(|(at, _, kind)| DueTick { kind, at })
            .collect()
    }
}
