use crate::types::{Agent, AgentInteraction, InteractionType};
use serde::{Deserialize, Serialize};

/// Aggregate figures shown in the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Roster size.
    pub total_agents: usize,
    /// Agents in the `Active` status.
    pub active_agents: usize,
    /// Sum of completed tasks across the roster.
    pub total_tasks_completed: u64,
    /// Mean efficiency, one decimal place.
    pub average_efficiency: f64,
    /// Percent of logged interactions that are cooperative.
    pub collaboration_score: u8,
}

fn is_cooperative(kind: InteractionType) -> bool {
    matches!(
        kind,
        InteractionType::Collaboration | InteractionType::Handoff | InteractionType::Review
    )
}

impl DashboardStats {
    /// Aggregate the roster and interaction log.
    pub fn compute(agents: &[Agent], interactions: &[AgentInteraction]) -> Self {
        let average_efficiency = if agents.is_empty() {
            0.0
        } else {
            let mean = agents.iter().map(|a| a.efficiency).sum::<f64>() / agents.len() as f64;
            (mean * 10.0).round() / 10.0
        };
        let collaboration_score = if interactions.is_empty() {
            0
        } else {
            let cooperative = interactions
                .iter()
                .filter(|i| is_cooperative(i.interaction_type))
                .count();
            (100.0 * cooperative as f64 / interactions.len() as f64).round() as u8
        };
        Self {
            total_agents: agents.len(),
            active_agents: agents.iter().filter(|a| a.is_active()).count(),
            total_tasks_completed: agents
                .iter()
                .map(|a| u64::from(a.total_tasks_completed))
                .sum(),
            average_efficiency,
            collaboration_score,
        }
    }
}
