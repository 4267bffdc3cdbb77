//! Simulation and scoring engine behind the AgentDeck dashboard.
//!
//! Models a roster of role-specialised agents, perturbs their metrics on
//! periodic ticks, logs interactions between them, scores project risk and
//! cross-project synergy, and computes the geometry the canvas renders.
//!
//! # Main types
//!
//! - [`DashboardState`]: The single owned store; all mutation goes through [`DashboardEvent`]s.
//! - [`DeckEngine`]: State plus seeded RNG, tick scheduler and clock.
//! - [`DeckRuntime`]: Tokio event loop driving the engine on real timers.
//! - [`TickScheduler`]: Deterministic virtual-time scheduler for the periodic ticks.
//! - [`DashboardSnapshot`]: Serializable export of everything on screen.

/// Canvas node, edge and zone geometry.
pub mod canvas;
/// TOML configuration.
pub mod config;
/// Engine combining state, RNG, scheduler and clock.
pub mod engine;
/// Snapshot export and import.
pub mod export;
/// Interaction generation and the bounded interaction log.
pub mod interactions;
/// Aggregate dashboard statistics.
pub mod monitor;
/// Built-in agent roster and sample projects.
pub mod profiles;
/// Risk prediction and risk lifecycle.
pub mod risk;
/// Async runtime with timers and a single event queue.
pub mod runtime;
/// Deterministic periodic tick scheduler.
pub mod scheduler;
/// Agent status and metric perturbation.
pub mod simulator;
/// Dashboard state store and events.
pub mod state;
/// Cross-project synergy and resource allocation.
pub mod synergy;
/// Shared domain types (Agent, ProjectRisk, Project, etc.).
pub mod types;
/// Voice transcript interpretation.
pub mod voice;

pub use canvas::{layout, CanvasLayout, CanvasParams};
pub use config::{DeckConfig, RiskModel};
pub use engine::DeckEngine;
pub use export::{export_json, parse_snapshot, read_snapshot, write_snapshot, DashboardSnapshot};
pub use interactions::{generate_interaction, InteractionLog, NewInteraction};
pub use monitor::DashboardStats;
pub use profiles::{default_projects, default_roster};
pub use risk::{advance_risk, RiskAnalysis, RiskPredictor, TrendDirection};
pub use runtime::DeckRuntime;
pub use scheduler::{DueTick, PeriodicTick, TickKind, TickScheduler};
pub use simulator::{simulate_status, StatusParams};
pub use state::{DashboardEvent, DashboardState, EventOutcome};
pub use synergy::{allocate_resources, analyze_synergies, implement_synergy, ResourceAllocation};
pub use types::{
    Agent, AgentInteraction, AgentRole, AgentStatus, CrossProjectSynergy, DisplayMode,
    InteractionType, Priority, Project, ProjectRisk, RiskStatus, Severity, VoiceCommand,
    VoiceIntent,
};
pub use voice::{interpret, is_actionable};
