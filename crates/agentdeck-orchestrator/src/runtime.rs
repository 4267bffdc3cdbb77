//! Live runtime: one task owns the engine and serialises every event.
//!
//! Periodic ticks, user commands and delayed synergy completions all arrive on
//! the same queue, so no two mutations ever interleave. Subscribers receive a
//! fresh [`DashboardSnapshot`] after each applied event.

use crate::config::{DeckConfig, SimulationConfig};
use crate::engine::DeckEngine;
use crate::export::DashboardSnapshot;
use crate::state::{DashboardEvent, EventOutcome};
use agentdeck_core::{DeckError, DeckResult};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

const QUEUE_DEPTH: usize = 64;

type Reply = oneshot::Sender<DeckResult<EventOutcome>>;

#[derive(Debug)]
struct Envelope {
    event: DashboardEvent,
    reply: Option<Reply>,
}

/// Handle to a running dashboard.
///
/// Dropping the handle also stops the loop, but only [`DeckRuntime::shutdown`]
/// waits for it to finish.
pub struct DeckRuntime {
    events: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<DashboardSnapshot>,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<DeckEngine>,
    synergy_delay: Duration,
}

impl DeckRuntime {
    /// Spawn the event loop. Must be called inside a tokio runtime.
    pub fn start(config: &DeckConfig) -> Self {
        Self::with_engine(DeckEngine::new(config), &config.simulation)
    }

    /// Spawn the event loop around an existing engine.
    pub fn with_engine(engine: DeckEngine, simulation: &SimulationConfig) -> Self {
        let (events, rx) = mpsc::channel(QUEUE_DEPTH);
        let (snapshot_tx, snapshots) = watch::channel(engine.snapshot());
        let (stop, stop_rx) = oneshot::channel();
        let periods = [
            simulation.status_interval(),
            simulation.interaction_interval(),
            simulation.risk_interval(),
        ];
        info!(
            status_ms = simulation.status_interval_ms,
            interaction_ms = simulation.interaction_interval_ms,
            risk_ms = simulation.risk_interval_ms,
            "Dashboard runtime starting"
        );
        let handle = tokio::spawn(event_loop(engine, rx, stop_rx, snapshot_tx, periods));
        Self {
            events,
            snapshots,
            stop: Some(stop),
            handle,
            synergy_delay: simulation.synergy_delay(),
        }
    }

    /// Queue an event and wait for its outcome.
    pub async fn dispatch(&self, event: DashboardEvent) -> DeckResult<EventOutcome> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Envelope {
                event,
                reply: Some(reply),
            })
            .await
            .map_err(|_| DeckError::Runtime("Dashboard runtime has stopped".to_string()))?;
        rx.await
            .map_err(|_| DeckError::Runtime("Dashboard runtime dropped the reply".to_string()))?
    }

    /// Queue an event without waiting.
    pub async fn send(&self, event: DashboardEvent) -> DeckResult<()> {
        self.events
            .send(Envelope { event, reply: None })
            .await
            .map_err(|_| DeckError::Runtime("Dashboard runtime has stopped".to_string()))
    }

    /// Mark a synergy completed after the simulated processing delay.
    ///
    /// Returns immediately; the completion is queued like any other event and
    /// is silently dropped if the runtime shuts down first.
    pub fn implement_synergy(&self, key: impl Into<String>) -> JoinHandle<()> {
        let events = self.events.clone();
        let delay = self.synergy_delay;
        let key = key.into();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let event = DashboardEvent::ImplementSynergy { key };
            if events.send(Envelope { event, reply: None }).await.is_err() {
                debug!("Runtime stopped before synergy completion");
            }
        })
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    /// Stop all timers and the event loop, returning the final engine.
    ///
    /// No tick or queued event is applied once this resolves.
    pub async fn shutdown(mut self) -> DeckResult<DeckEngine> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let engine = self
            .handle
            .await
            .map_err(|e| DeckError::Runtime(format!("Event loop panicked: {e}")))?;
        info!(events = engine.events_applied(), "Dashboard runtime stopped");
        Ok(engine)
    }
}

async fn event_loop(
    mut engine: DeckEngine,
    mut rx: mpsc::Receiver<Envelope>,
    mut stop: oneshot::Receiver<()>,
    snapshots: watch::Sender<DashboardSnapshot>,
    [status, interaction, risk]: [Duration; 3],
) -> DeckEngine {
    let timer = |period: Duration| {
        let period = period.max(Duration::from_millis(1));
        let mut t = interval_at(Instant::now() + period, period);
        t.set_missed_tick_behavior(MissedTickBehavior::Delay);
        t
    };
    let mut status_timer = timer(status);
    let mut interaction_timer = timer(interaction);
    let mut risk_timer = timer(risk);

    loop {
        let (event, reply) = tokio::select! {
            biased;
            _ = &mut stop => break,
            msg = rx.recv() => match msg {
                Some(Envelope { event, reply }) => (event, reply),
                None => break,
            },
            _ = status_timer.tick() => (DashboardEvent::StatusTick, None),
            _ = interaction_timer.tick() => (DashboardEvent::InteractionTick, None),
            _ = risk_timer.tick() => (DashboardEvent::RiskTick, None),
        };

        let result = engine.dispatch(event);
        if matches!(result, Ok(EventOutcome::Applied)) {
            snapshots.send_replace(engine.snapshot());
        }
        match reply {
            Some(reply) => {
                if reply.send(result).is_err() {
                    warn!("Caller went away before receiving the outcome");
                }
            }
            None => {
                if let Err(e) = result {
                    debug!(error = %e, "Queued event failed");
                }
            }
        }
    }
    engine
}
