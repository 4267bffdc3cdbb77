use crate::types::{
    agent_name, seeded_uuid, Agent, AgentInteraction, InteractionStatus, InteractionType, Priority,
};
use agentdeck_core::{DeckError, DeckResult};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most-recent-first interaction history with a fixed retention cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLog {
    entries: Vec<AgentInteraction>,
    retention: usize,
}

impl InteractionLog {
    /// Create an empty log. A zero cap is raised to one.
    pub fn new(retention: usize) -> Self {
        Self {
            entries: Vec::new(),
            retention: retention.max(1),
        }
    }

    /// Insert at the front and drop the oldest entries beyond the cap.
    pub fn push(&mut self, interaction: AgentInteraction) {
        self.entries.insert(0, interaction);
        self.entries.truncate(self.retention);
    }

    /// Insert a user-created interaction.
    ///
    /// Agent ids are not checked against the roster; a dangling id simply
    /// renders as "unknown". Self-interactions are rejected.
    pub fn record_manual<R: Rng + ?Sized>(
        &mut self,
        request: NewInteraction,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> DeckResult<AgentInteraction> {
        if request.from_agent == request.to_agent {
            return Err(DeckError::InvalidInteraction(format!(
                "agent '{}' cannot interact with itself",
                request.from_agent
            )));
        }
        let interaction = AgentInteraction {
            id: seeded_uuid(rng),
            from_agent: request.from_agent,
            to_agent: request.to_agent,
            interaction_type: request.interaction_type,
            content: request.content,
            timestamp: now,
            status: InteractionStatus::Pending,
            priority: request.priority,
        };
        self.push(interaction.clone());
        Ok(interaction)
    }

    /// Retained interactions, newest first.
    pub fn entries(&self) -> &[AgentInteraction] {
        &self.entries
    }

    /// Number of retained interactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained interactions.
    pub fn retention(&self) -> usize {
        self.retention
    }
}

/// A user-initiated interaction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInteraction {
    /// Initiating agent id.
    pub from_agent: String,
    /// Receiving agent id.
    pub to_agent: String,
    /// Kind of exchange.
    pub interaction_type: InteractionType,
    /// Free-text description.
    pub content: String,
    /// Urgency.
    pub priority: Priority,
}

fn describe(interaction_type: InteractionType, from: &str, to: &str, task: &str) -> String {
    match interaction_type {
        InteractionType::Handoff => format!("{from} handed off \"{task}\" to {to}"),
        InteractionType::Collaboration => format!("{from} and {to} are pairing on \"{task}\""),
        InteractionType::Review => format!("{from} requested a review of \"{task}\" from {to}"),
        InteractionType::Feedback => format!("{from} shared feedback on \"{task}\" with {to}"),
        InteractionType::ConflictResolution => {
            format!("{from} and {to} are resolving a disagreement over \"{task}\"")
        }
    }
}

/// Maybe create a new interaction between two distinct active agents.
///
/// Returns `None` when the probability draw fails or fewer than two agents
/// are `active`.
pub fn generate_interaction<R: Rng + ?Sized>(
    agents: &[Agent],
    rng: &mut R,
    probability: f64,
    now: DateTime<Utc>,
) -> Option<AgentInteraction> {
    if !rng.gen_bool(probability.clamp(0.0, 1.0)) {
        return None;
    }
    let active: Vec<&Agent> = agents.iter().filter(|a| a.is_active()).collect();
    if active.len() < 2 {
        tracing::debug!(active = active.len(), "Not enough active agents for an interaction");
        return None;
    }
    let mut pair = active.choose_multiple(rng, 2);
    let (from, to) = (*pair.next()?, *pair.next()?);

    let interaction_type = *InteractionType::ALL.choose(rng)?;
    let priority = *Priority::ALL.choose(rng)?;
    let task = from.current_task.as_deref().unwrap_or("current sprint work");
    let content = describe(
        interaction_type,
        agent_name(agents, &from.id),
        agent_name(agents, &to.id),
        task,
    );

    Some(AgentInteraction {
        id: seeded_uuid(rng),
        from_agent: from.id.clone(),
        to_agent: to.id.clone(),
        interaction_type,
        content,
        timestamp: now,
        status: InteractionStatus::InProgress,
        priority,
    })
}
