use crate::config::DeckConfig;
use crate::export::DashboardSnapshot;
use crate::scheduler::TickScheduler;
use crate::state::{DashboardEvent, DashboardState, EventOutcome};
use agentdeck_core::DeckResult;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{info, warn};

/// Where event timestamps come from.
#[derive(Debug, Clone, Copy)]
enum Clock {
    /// Wall clock.
    System,
    /// Virtual time: `start` plus scheduler elapsed.
    Virtual { start: DateTime<Utc> },
}

fn shift(start: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(by)
        .ok()
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(start)
}

/// Owns the dashboard state together with its RNG, scheduler and clock.
///
/// All mutation funnels through [`DeckEngine::dispatch`], so a given seed and
/// event sequence always yields the same state.
#[derive(Debug)]
pub struct DeckEngine {
    state: DashboardState,
    rng: StdRng,
    scheduler: TickScheduler,
    clock: Clock,
    events_applied: u64,
}

impl DeckEngine {
    /// Engine stamped with wall-clock time. Seeded from config, or entropy.
    pub fn new(config: &DeckConfig) -> Self {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build(config, rng, Clock::System)
    }

    /// Fully deterministic engine: fixed seed and virtual clock starting at `start`.
    pub fn deterministic(config: &DeckConfig, seed: u64, start: DateTime<Utc>) -> Self {
        Self::build(
            config,
            StdRng::seed_from_u64(seed),
            Clock::Virtual { start },
        )
    }

    fn build(config: &DeckConfig, mut rng: StdRng, clock: Clock) -> Self {
        let now = match clock {
            Clock::System => Utc::now(),
            Clock::Virtual { start } => start,
        };
        let state = DashboardState::new(config, &mut rng, now);
        Self {
            state,
            rng,
            scheduler: TickScheduler::from_config(&config.simulation),
            clock,
            events_applied: 0,
        }
    }

    /// Current time: wall clock, or start plus virtual elapsed time.
    pub fn now(&self) -> DateTime<Utc> {
        match self.clock {
            Clock::System => Utc::now(),
            Clock::Virtual { start } => shift(start, self.scheduler.elapsed()),
        }
    }

    /// Read-only view of the store.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Events applied since construction.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Apply one event at the current clock time.
    pub fn dispatch(&mut self, event: DashboardEvent) -> DeckResult<EventOutcome> {
        let now = self.now();
        self.dispatch_at(event, now)
    }

    fn dispatch_at(
        &mut self,
        event: DashboardEvent,
        now: DateTime<Utc>,
    ) -> DeckResult<EventOutcome> {
        let kind = event.kind();
        match self.state.apply(event, &mut self.rng, now) {
            Ok(outcome) => {
                self.events_applied += 1;
                Ok(outcome)
            }
            Err(e) => {
                warn!(event = kind, error = %e, "Event rejected");
                Err(e)
            }
        }
    }

    /// Advance virtual time, applying every periodic tick that fell due.
    ///
    /// Each tick is stamped with its own due time. Returns the number of ticks run.
    pub fn advance(&mut self, by: Duration) -> DeckResult<usize> {
        let due = self.scheduler.advance(by);
        for tick in &due {
            let at = match self.clock {
                Clock::System => Utc::now(),
                Clock::Virtual { start } => shift(start, tick.at),
            };
            self.dispatch_at(tick.kind.event(), at)?;
        }
        Ok(due.len())
    }

    /// Run `count` rounds of status and interaction ticks, with a risk tick
    /// every tenth round.
    pub fn run_rounds(&mut self, count: u32) -> DeckResult<()> {
        for round in 1..=count {
            self.dispatch(DashboardEvent::StatusTick)?;
            self.dispatch(DashboardEvent::InteractionTick)?;
            if round % 10 == 0 {
                self.dispatch(DashboardEvent::RiskTick)?;
            }
        }
        info!(
            rounds = count,
            interactions = self.state.interactions.len(),
            "Simulation rounds complete"
        );
        Ok(())
    }

    /// Capture everything on screen at the current clock time.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::capture(&self.state, self.now())
    }

    /// Give up the engine, keeping the final state.
    pub fn into_state(self) -> DashboardState {
        self.state
    }
}
