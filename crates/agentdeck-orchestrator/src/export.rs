use crate::monitor::DashboardStats;
use crate::risk::RiskAnalysis;
use crate::state::DashboardState;
use crate::synergy::ResourceAllocation;
use crate::types::{Agent, AgentInteraction, CrossProjectSynergy, DisplayMode};
use agentdeck_core::DeckResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Point-in-time copy of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Full roster with current metrics.
    pub agents: Vec<Agent>,
    /// Retained interactions, newest first.
    pub interactions: Vec<AgentInteraction>,
    /// Latest risk analysis.
    pub risks: RiskAnalysis,
    /// Aggregates at capture time.
    pub stats: DashboardStats,
    /// Synergy opportunities.
    pub synergies: Vec<CrossProjectSynergy>,
    /// Last computed resource allocations.
    pub allocations: Vec<ResourceAllocation>,
    /// Display mode in effect.
    #[serde(default)]
    pub mode: DisplayMode,
    /// Agent focused in the detail panel, if any.
    #[serde(default)]
    pub selected_agent: Option<String>,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Copy the current state.
    pub fn capture(state: &DashboardState, now: DateTime<Utc>) -> Self {
        Self {
            agents: state.agents.clone(),
            interactions: state.interactions.entries().to_vec(),
            risks: state.risk.clone(),
            stats: state.stats(),
            synergies: state.synergies.clone(),
            allocations: state.allocations.clone(),
            mode: state.mode,
            selected_agent: state.selected_agent.clone(),
            timestamp: now,
        }
    }

    /// Compact one-line summary for logs and the CLI.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp,
            "total_agents": self.stats.total_agents,
            "active_agents": self.stats.active_agents,
            "average_efficiency": self.stats.average_efficiency,
            "collaboration_score": self.stats.collaboration_score,
            "interactions": self.interactions.len(),
            "overall_risk_score": self.risks.overall_risk_score,
            "trend": self.risks.trend_direction,
            "synergies": self.synergies.len(),
        })
    }
}

/// Pretty-printed JSON document of the snapshot.
pub fn export_json(snapshot: &DashboardSnapshot) -> DeckResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a document produced by [`export_json`].
pub fn parse_snapshot(raw: &str) -> DeckResult<DashboardSnapshot> {
    Ok(serde_json::from_str(raw)?)
}

/// Write the snapshot to `path`, creating parent directories as needed.
pub async fn write_snapshot(snapshot: &DashboardSnapshot, path: &Path) -> DeckResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = export_json(snapshot)?;
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), agents = snapshot.agents.len(), "Snapshot exported");
    Ok(())
}

/// Read and parse a snapshot file.
pub async fn read_snapshot(path: &Path) -> DeckResult<DashboardSnapshot> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_snapshot(&raw)
}
