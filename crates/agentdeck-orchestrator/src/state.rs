use crate::canvas::{layout, CanvasLayout, CanvasParams};
use crate::config::DeckConfig;
use crate::interactions::{generate_interaction, InteractionLog, NewInteraction};
use crate::monitor::DashboardStats;
use crate::profiles::{default_projects, default_roster};
use crate::risk::{advance_risk, RiskAnalysis, RiskPredictor};
use crate::simulator::{simulate_status, StatusParams};
use crate::synergy::{allocate_resources, analyze_synergies, implement_synergy, ResourceAllocation};
use crate::types::{
    Agent, CrossProjectSynergy, DisplayMode, InteractionType, Priority, Project, RiskStatus,
    VoiceCommand, VoiceIntent,
};
use crate::voice::{interpret, is_actionable};
use agentdeck_core::DeckResult;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

/// Something that can happen to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Perturb agent workload, efficiency and status.
    StatusTick,
    /// Maybe log a new interaction between two active agents.
    InteractionTick,
    /// Recompute the risk catalog.
    RiskTick,
    /// Recompute per-agent resource allocations.
    RefreshAllocations,
    /// User-created interaction.
    RecordInteraction(NewInteraction),
    /// Select an agent on the canvas, or clear the selection.
    SelectAgent(Option<String>),
    /// Switch the canvas display mode.
    SetMode(DisplayMode),
    /// Move a risk forward in its lifecycle.
    AdvanceRisk {
        /// Risk to move.
        risk_id: String,
        /// Target status; must not be behind the current one.
        status: RiskStatus,
    },
    /// Mark the synergy with this joined-project-ids key as completed.
    ImplementSynergy {
        /// Project ids joined with `-`.
        key: String,
    },
    /// Interpret and possibly act on a transcript.
    Voice {
        /// Raw utterance.
        transcript: String,
    },
}

impl DashboardEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::StatusTick => "status_tick",
            DashboardEvent::InteractionTick => "interaction_tick",
            DashboardEvent::RiskTick => "risk_tick",
            DashboardEvent::RefreshAllocations => "refresh_allocations",
            DashboardEvent::RecordInteraction(_) => "record_interaction",
            DashboardEvent::SelectAgent(_) => "select_agent",
            DashboardEvent::SetMode(_) => "set_mode",
            DashboardEvent::AdvanceRisk { .. } => "advance_risk",
            DashboardEvent::ImplementSynergy { .. } => "implement_synergy",
            DashboardEvent::Voice { .. } => "voice",
        }
    }
}

/// Whether applying an event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// State changed.
    Applied,
    /// The event was a no-op.
    Unchanged,
}

/// Tunables derived from [`DeckConfig`] once at construction.
#[derive(Debug, Clone)]
pub struct StateSettings {
    /// Status perturbation bounds.
    pub status: StatusParams,
    /// Chance an interaction tick logs anything.
    pub interaction_probability: f64,
    /// Risk predictor.
    pub predictor: RiskPredictor,
    /// Canvas sizing.
    pub canvas: CanvasParams,
    /// Voice commands must score strictly above this.
    pub confidence_threshold: f64,
    /// Cap on synergy opportunities.
    pub max_synergies: usize,
    /// Allocation perturbation half-width.
    pub allocation_jitter: f64,
}

impl From<&DeckConfig> for StateSettings {
    fn from(config: &DeckConfig) -> Self {
        Self {
            status: StatusParams::from(&config.simulation),
            interaction_probability: config.simulation.interaction_probability,
            predictor: RiskPredictor::new(config.risk.model),
            canvas: CanvasParams::from(&config.canvas),
            confidence_threshold: config.voice.confidence_threshold,
            max_synergies: config.synergy.max_opportunities,
            allocation_jitter: config.synergy.allocation_jitter,
        }
    }
}

/// The single owned store behind the dashboard.
///
/// Every mutation goes through [`DashboardState::apply`]; a failing event
/// leaves the state exactly as it was.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Roster in catalog order.
    pub agents: Vec<Agent>,
    /// Bounded interaction log.
    pub interactions: InteractionLog,
    /// Latest risk analysis.
    pub risk: RiskAnalysis,
    /// Projects fed to the synergy and allocation analyzers.
    pub projects: Vec<Project>,
    /// Synergy opportunities, highest impact first.
    pub synergies: Vec<CrossProjectSynergy>,
    /// Last computed allocations, one per agent.
    pub allocations: Vec<ResourceAllocation>,
    /// Agent id focused in the detail panel.
    pub selected_agent: Option<String>,
    pub mode: DisplayMode,
    /// Most recent interpreted voice command.
    pub last_voice_command: Option<VoiceCommand>,
    settings: StateSettings,
}

impl DashboardState {
    /// Build the initial state from the role catalog and configured projects.
    pub fn new<R: Rng + ?Sized>(config: &DeckConfig, rng: &mut R, now: DateTime<Utc>) -> Self {
        let settings = StateSettings::from(config);
        let projects = if config.projects.is_empty() {
            default_projects()
        } else {
            config.projects.clone()
        };
        let agents = default_roster(now);
        let interactions = InteractionLog::new(config.simulation.interaction_retention);
        let risk = settings
            .predictor
            .analyze(&agents, interactions.entries(), &[], rng, now);
        let synergies = analyze_synergies(&projects, settings.max_synergies);
        let allocations =
            allocate_resources(&agents, &projects, rng, settings.allocation_jitter);
        info!(
            agents = agents.len(),
            projects = projects.len(),
            synergies = synergies.len(),
            "Dashboard state initialised"
        );
        Self {
            agents,
            interactions,
            risk,
            projects,
            synergies,
            allocations,
            selected_agent: None,
            mode: config.canvas.display_mode(),
            last_voice_command: None,
            settings,
        }
    }

    /// Settings derived from the config.
    pub fn settings(&self) -> &StateSettings {
        &self.settings
    }

    /// Apply one event.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: DashboardEvent,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> DeckResult<EventOutcome> {
        let kind = event.kind();
        let outcome = match event {
            DashboardEvent::StatusTick => {
                self.agents = simulate_status(&self.agents, rng, &self.settings.status, now);
                EventOutcome::Applied
            }
            DashboardEvent::InteractionTick => {
                match generate_interaction(
                    &self.agents,
                    rng,
                    self.settings.interaction_probability,
                    now,
                ) {
                    Some(interaction) => {
                        debug!(content = %interaction.content, "New interaction");
                        self.interactions.push(interaction);
                        EventOutcome::Applied
                    }
                    None => EventOutcome::Unchanged,
                }
            }
            DashboardEvent::RiskTick => {
                self.risk = self.settings.predictor.analyze(
                    &self.agents,
                    self.interactions.entries(),
                    &self.risk.risks,
                    rng,
                    now,
                );
                EventOutcome::Applied
            }
            DashboardEvent::RefreshAllocations => {
                self.allocations = allocate_resources(
                    &self.agents,
                    &self.projects,
                    rng,
                    self.settings.allocation_jitter,
                );
                EventOutcome::Applied
            }
            DashboardEvent::RecordInteraction(request) => {
                let recorded = self.interactions.record_manual(request, rng, now)?;
                info!(id = %recorded.id, "Interaction recorded");
                EventOutcome::Applied
            }
            DashboardEvent::SelectAgent(None) => {
                self.selected_agent = None;
                EventOutcome::Applied
            }
            DashboardEvent::SelectAgent(Some(id)) => {
                if self.agents.iter().any(|a| a.id == id) {
                    self.selected_agent = Some(id);
                    EventOutcome::Applied
                } else {
                    warn!(agent = %id, "Ignoring selection of unknown agent");
                    EventOutcome::Unchanged
                }
            }
            DashboardEvent::SetMode(mode) => {
                self.mode = mode;
                EventOutcome::Applied
            }
            DashboardEvent::AdvanceRisk { risk_id, status } => {
                advance_risk(&mut self.risk.risks, &risk_id, status)?;
                info!(risk = %risk_id, %status, "Risk status advanced");
                EventOutcome::Applied
            }
            DashboardEvent::ImplementSynergy { key } => {
                if implement_synergy(&mut self.synergies, &key) {
                    info!(synergy = %key, "Synergy implemented");
                    EventOutcome::Applied
                } else {
                    warn!(synergy = %key, "No synergy matches key");
                    EventOutcome::Unchanged
                }
            }
            DashboardEvent::Voice { transcript } => self.handle_voice(&transcript, rng, now),
        };
        debug!(event = kind, ?outcome, "Event applied");
        Ok(outcome)
    }

    fn handle_voice<R: Rng + ?Sized>(
        &mut self,
        transcript: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> EventOutcome {
        let command = interpret(transcript, &self.agents, rng, now);
        if is_actionable(&command, self.settings.confidence_threshold) {
            match command.intent {
                VoiceIntent::ResolveConflict => self.mode = DisplayMode::Conflict,
                VoiceIntent::ScheduleHandoff => self.schedule_voice_handoff(&command, rng, now),
                VoiceIntent::ShowAgentStatus
                | VoiceIntent::CheckProgress
                | VoiceIntent::Unknown => {}
            }
        } else {
            debug!(confidence = command.confidence, "Voice command below threshold");
        }
        self.last_voice_command = Some(command);
        EventOutcome::Applied
    }

    /// Record a pending handoff between the first two agents named in the command.
    fn schedule_voice_handoff<R: Rng + ?Sized>(
        &mut self,
        command: &VoiceCommand,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        let named: Vec<&Agent> = command
            .entities
            .iter()
            .filter_map(|entity| self.agents.iter().find(|a| &a.name == entity))
            .collect();
        if let [from, to, ..] = named.as_slice() {
            let request = NewInteraction {
                from_agent: from.id.clone(),
                to_agent: to.id.clone(),
                interaction_type: InteractionType::Handoff,
                content: format!("Voice-scheduled handoff from {} to {}", from.name, to.name),
                priority: Priority::Medium,
            };
            if let Err(e) = self.interactions.record_manual(request, rng, now) {
                warn!(error = %e, "Voice handoff rejected");
            }
        }
    }

    /// Aggregates over the current roster and log.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.agents, self.interactions.entries())
    }

    /// Canvas geometry for the current mode.
    pub fn canvas(&self) -> CanvasLayout {
        layout(
            &self.agents,
            self.interactions.entries(),
            self.mode,
            &self.settings.canvas,
        )
    }

    /// Selected agent, if the id still resolves.
    pub fn selected(&self) -> Option<&Agent> {
        let id = self.selected_agent.as_deref()?;
        self.agents.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{ImplementationEffort, InteractionStatus};
    use agentdeck_core::DeckError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh(seed: u64) -> (DashboardState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = DashboardState::new(&DeckConfig::default(), &mut rng, Utc::now());
        (state, rng)
    }

    #[test]
    fn test_initial_state() {
        let (state, _) = fresh(1);
        assert_eq!(state.agents.len(), 11);
        assert!(state.interactions.is_empty());
        assert_eq!(state.risk.risks.len(), 3);
        assert!(!state.synergies.is_empty());
        assert_eq!(state.allocations.len(), 11);
        assert_eq!(state.mode, DisplayMode::Collaboration);
    }

    #[test]
    fn test_same_seed_same_history() {
        let (mut a, mut rng_a) = fresh(2);
        let (mut b, mut rng_b) = fresh(2);
        let now = Utc::now();
        for _ in 0..30 {
            for event in [DashboardEvent::StatusTick, DashboardEvent::InteractionTick] {
                a.apply(event.clone(), &mut rng_a, now).unwrap();
                b.apply(event, &mut rng_b, now).unwrap();
            }
        }
        assert_eq!(a.agents, b.agents);
        assert_eq!(a.interactions, b.interactions);
    }

    #[test]
    fn test_interaction_log_capped_through_events() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut config = DeckConfig::default();
        config.simulation.interaction_probability = 1.0;
        config.simulation.status_change_probability = 0.0;
        let mut state = DashboardState::new(&config, &mut rng, Utc::now());
        for _ in 0..40 {
            state
                .apply(DashboardEvent::InteractionTick, &mut rng, Utc::now())
                .unwrap();
            assert!(state.interactions.len() <= 10);
        }
        assert_eq!(state.interactions.len(), 10);
    }

    #[test]
    fn test_failed_event_leaves_state_untouched() {
        let (mut state, mut rng) = fresh(4);
        let id = state.risk.risks[0].id.clone();
        state
            .apply(
                DashboardEvent::AdvanceRisk {
                    risk_id: id.clone(),
                    status: RiskStatus::Resolved,
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        let before = state.risk.clone();
        let err = state
            .apply(
                DashboardEvent::AdvanceRisk {
                    risk_id: id,
                    status: RiskStatus::Identified,
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DeckError::InvalidTransition(_)));
        assert_eq!(state.risk, before);
    }

    #[test]
    fn test_resolved_risk_survives_risk_tick() {
        let (mut state, mut rng) = fresh(5);
        let id = state.risk.risks[2].id.clone();
        state
            .apply(
                DashboardEvent::AdvanceRisk {
                    risk_id: id.clone(),
                    status: RiskStatus::Resolved,
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        state
            .apply(DashboardEvent::RiskTick, &mut rng, Utc::now())
            .unwrap();
        let risk = state.risk.risks.iter().find(|r| r.id == id).unwrap();
        assert_eq!(risk.status, RiskStatus::Resolved);
    }

    #[test]
    fn test_implement_synergy_event() {
        let (mut state, mut rng) = fresh(6);
        let key = state.synergies[0].key();
        let outcome = state
            .apply(
                DashboardEvent::ImplementSynergy { key: key.clone() },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(outcome, EventOutcome::Applied);
        assert_eq!(
            state.synergies[0].implementation_effort,
            ImplementationEffort::Completed
        );
        let outcome = state
            .apply(
                DashboardEvent::ImplementSynergy {
                    key: "nope".to_string(),
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(outcome, EventOutcome::Unchanged);
    }

    #[test]
    fn test_select_agent() {
        let (mut state, mut rng) = fresh(7);
        let id = state.agents[4].id.clone();
        state
            .apply(DashboardEvent::SelectAgent(Some(id.clone())), &mut rng, Utc::now())
            .unwrap();
        assert_eq!(state.selected().map(|a| a.id.as_str()), Some(id.as_str()));
        let outcome = state
            .apply(
                DashboardEvent::SelectAgent(Some("agent-ghost".into())),
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(outcome, EventOutcome::Unchanged);
        assert_eq!(state.selected_agent.as_deref(), Some(id.as_str()));
        state
            .apply(DashboardEvent::SelectAgent(None), &mut rng, Utc::now())
            .unwrap();
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_voice_resolve_conflict_switches_mode() {
        let (mut state, mut rng) = fresh(8);
        state
            .apply(
                DashboardEvent::Voice {
                    transcript: "please resolve the conflict".into(),
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(state.mode, DisplayMode::Conflict);
        assert_eq!(
            state.last_voice_command.as_ref().map(|c| c.intent),
            Some(VoiceIntent::ResolveConflict)
        );
    }

    #[test]
    fn test_voice_handoff_records_pending_interaction() {
        let (mut state, mut rng) = fresh(9);
        state
            .apply(
                DashboardEvent::Voice {
                    transcript: "schedule handoff from Jordan to Morgan".into(),
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        let entry = &state.interactions.entries()[0];
        assert_eq!(entry.interaction_type, InteractionType::Handoff);
        assert_eq!(entry.status, InteractionStatus::Pending);
        assert_eq!(entry.from_agent, "agent-backend-developer");
        assert_eq!(entry.to_agent, "agent-qa-engineer");
    }

    #[test]
    fn test_voice_handoff_follows_spoken_direction() {
        let (mut state, mut rng) = fresh(9);
        for transcript in [
            "schedule handoff from Morgan to Jordan",
            "schedule the same handoff from Morgan to Jordan",
        ] {
            state
                .apply(
                    DashboardEvent::Voice {
                        transcript: transcript.into(),
                    },
                    &mut rng,
                    Utc::now(),
                )
                .unwrap();
            let entry = &state.interactions.entries()[0];
            assert_eq!(entry.from_agent, "agent-qa-engineer");
            assert_eq!(entry.to_agent, "agent-backend-developer");
        }
    }

    #[test]
    fn test_unknown_voice_does_nothing_but_record() {
        let (mut state, mut rng) = fresh(10);
        let mode = state.mode;
        state
            .apply(
                DashboardEvent::Voice {
                    transcript: "banana".into(),
                },
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(state.mode, mode);
        assert!(state.interactions.is_empty());
        assert_eq!(
            state.last_voice_command.as_ref().map(|c| c.intent),
            Some(VoiceIntent::Unknown)
        );
    }

    #[test]
    fn test_canvas_follows_mode() {
        let (mut state, mut rng) = fresh(11);
        state
            .apply(
                DashboardEvent::SetMode(DisplayMode::Performance),
                &mut rng,
                Utc::now(),
            )
            .unwrap();
        let canvas = state.canvas();
        assert_eq!(canvas.mode, DisplayMode::Performance);
        for (node, agent) in canvas.nodes.iter().zip(&state.agents) {
            assert!((node.size_modifier - (0.75 + agent.efficiency / 200.0)).abs() < 1e-9);
        }
    }
}
