use crate::config::RiskModel;
use crate::types::{
    clamp_percent, Agent, AgentInteraction, InteractionType, ProjectRisk, RiskStatus, RiskType,
    Severity,
};
use agentdeck_core::{DeckError, DeckResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction the aggregate risk score is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Overall score above 60.
    Increasing,
    /// Overall score between 40 and 60.
    Stable,
    /// Overall score below 40.
    Decreasing,
}

impl TrendDirection {
    /// `increasing` strictly above 60, `decreasing` strictly below 40.
    pub fn from_score(score: u8) -> Self {
        if score > 60 {
            TrendDirection::Increasing
        } else if score < 40 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// Label for how soon the next risk is expected to materialize.
pub fn next_risk_window(score: u8) -> &'static str {
    if score > 70 {
        "1-2 days"
    } else if score > 50 {
        "3-5 days"
    } else {
        "1-2 weeks"
    }
}

/// `round(mean(probability) * mean(impact) / 100)`, or 0 for no risks.
pub fn overall_risk_score(risks: &[ProjectRisk]) -> u8 {
    if risks.is_empty() {
        return 0;
    }
    let n = risks.len() as f64;
    let mean_probability = risks.iter().map(|r| f64::from(r.probability)).sum::<f64>() / n;
    let mean_impact = risks.iter().map(|r| f64::from(r.impact)).sum::<f64>() / n;
    (mean_probability * mean_impact / 100.0).round() as u8
}

/// Result of one predictor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Predicted risks, highest score first.
    pub risks: Vec<ProjectRisk>,
    /// Aggregate score, `[0, 100]`.
    pub overall_risk_score: u8,
    /// Derived from the overall score.
    pub trend_direction: TrendDirection,
    /// Label such as `"3-5 days"`.
    pub next_risk_window: String,
    /// Percent, within `[85, 95]`.
    pub confidence_level: u8,
    /// When the predictor ran.
    pub generated_at: DateTime<Utc>,
}

impl RiskAnalysis {
    /// Build the aggregate fields from a finished risk list.
    pub fn from_risks(risks: Vec<ProjectRisk>, confidence_level: u8, now: DateTime<Utc>) -> Self {
        let overall = overall_risk_score(&risks);
        Self {
            risks,
            overall_risk_score: overall,
            trend_direction: TrendDirection::from_score(overall),
            next_risk_window: next_risk_window(overall).to_string(),
            confidence_level,
            generated_at: now,
        }
    }

    /// Analysis with no risks.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::from_risks(Vec::new(), 90, now)
    }
}

struct RiskTemplate {
    risk_type: RiskType,
    base_probability: u8,
    base_impact: u8,
    description: &'static str,
    mitigation: &'static [&'static str],
    early_warnings: &'static [&'static str],
    timeline: &'static str,
}

const CATALOG: [RiskTemplate; 3] = [
    RiskTemplate {
        risk_type: RiskType::ResourceConstraint,
        base_probability: 75,
        base_impact: 80,
        description: "Several agents are running close to full capacity; upcoming work may stall.",
        mitigation: &[
            "Rebalance tasks toward agents below 60% workload",
            "Defer low-priority backlog items",
            "Schedule a capacity review with the project manager",
        ],
        early_warnings: &[
            "Average task time rising",
            "Handoffs waiting in pending state",
            "Workload above 80% for consecutive ticks",
        ],
        timeline: "Next 1-2 weeks",
    },
    RiskTemplate {
        risk_type: RiskType::TechnicalDebt,
        base_probability: 60,
        base_impact: 70,
        description: "Efficiency is drifting down, pointing at accumulating shortcuts in the codebase.",
        mitigation: &[
            "Reserve 20% of sprint capacity for refactoring",
            "Add review gates on hot paths",
        ],
        early_warnings: &[
            "Efficiency below 75% on implementation roles",
            "Growing review queue",
        ],
        timeline: "Next sprint",
    },
    RiskTemplate {
        risk_type: RiskType::CommunicationBreakdown,
        base_probability: 45,
        base_impact: 65,
        description: "Some agents have not exchanged work recently and conflicts are surfacing.",
        mitigation: &[
            "Pair isolated agents on the next handoff",
            "Run a short conflict-resolution sync",
            "Publish decision logs for shared components",
        ],
        early_warnings: &[
            "Agents with no interactions this window",
            "Rising share of conflict-resolution interactions",
        ],
        timeline: "Next 3-5 days",
    },
];

const SIMULATED_JITTER: i16 = 10;
const OVERLOAD_THRESHOLD: f64 = 80.0;
const LOW_EFFICIENCY_THRESHOLD: f64 = 75.0;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values.iter().copied());
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

fn percent(value: f64) -> u8 {
    clamp_percent(value).round() as u8
}

/// Telemetry summary the `telemetry` model scores from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Telemetry {
    mean_workload: f64,
    overloaded_share: f64,
    efficiency_shortfall: f64,
    efficiency_spread: f64,
    interaction_density: f64,
    conflict_share: f64,
    isolated_share: f64,
}

impl Telemetry {
    fn measure(agents: &[Agent], interactions: &[AgentInteraction]) -> Self {
        let n = agents.len().max(1) as f64;
        let efficiencies: Vec<f64> = agents.iter().map(|a| a.efficiency).collect();
        let conflicts = interactions
            .iter()
            .filter(|i| i.interaction_type == InteractionType::ConflictResolution)
            .count();
        let isolated = agents
            .iter()
            .filter(|a| !interactions.iter().any(|i| i.involves(&a.id)))
            .count();
        Self {
            mean_workload: mean(agents.iter().map(|a| a.workload)),
            overloaded_share: agents
                .iter()
                .filter(|a| a.workload > OVERLOAD_THRESHOLD)
                .count() as f64
                / n,
            efficiency_shortfall: if agents.is_empty() {
                0.0
            } else {
                100.0 - mean(efficiencies.iter().copied())
            },
            efficiency_spread: std_dev(&efficiencies),
            interaction_density: (interactions.len() as f64 / n).min(1.0),
            conflict_share: if interactions.is_empty() {
                0.0
            } else {
                conflicts as f64 / interactions.len() as f64
            },
            isolated_share: isolated as f64 / n,
        }
    }

    /// (probability, impact) for a catalog entry.
    fn score(&self, risk_type: RiskType) -> (u8, u8) {
        match risk_type {
            RiskType::ResourceConstraint => (
                percent(self.mean_workload),
                percent(50.0 + 50.0 * self.overloaded_share),
            ),
            RiskType::TechnicalDebt => (
                percent(2.0 * self.efficiency_shortfall + self.efficiency_spread),
                percent(40.0 + self.efficiency_shortfall + 2.0 * self.efficiency_spread),
            ),
            RiskType::CommunicationBreakdown => (
                percent(70.0 * (1.0 - self.interaction_density) + 30.0 * self.conflict_share),
                percent(40.0 + 40.0 * self.conflict_share + 20.0 * self.isolated_share),
            ),
            // Not part of the catalog; scored neutrally.
            _ => (50, 50),
        }
    }
}

/// Agents that drive a given risk.
fn affected_agents(
    risk_type: RiskType,
    agents: &[Agent],
    interactions: &[AgentInteraction],
) -> Vec<String> {
    agents
        .iter()
        .filter(|a| match risk_type {
            RiskType::ResourceConstraint => a.workload > OVERLOAD_THRESHOLD,
            RiskType::TechnicalDebt => a.efficiency < LOW_EFFICIENCY_THRESHOLD,
            RiskType::CommunicationBreakdown => !interactions.iter().any(|i| i.involves(&a.id)),
            _ => false,
        })
        .map(|a| a.id.clone())
        .collect()
}

fn jittered<R: Rng + ?Sized>(rng: &mut R, base: u8) -> u8 {
    let delta = rng.gen_range(-SIMULATED_JITTER..=SIMULATED_JITTER);
    (i16::from(base) + delta).clamp(0, 100) as u8
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Recomputes the risk catalog wholesale on every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskPredictor {
    model: RiskModel,
}

impl RiskPredictor {
    /// Predictor for the given model.
    pub fn new(model: RiskModel) -> Self {
        Self { model }
    }

    /// Model in use.
    pub fn model(&self) -> RiskModel {
        self.model
    }

    /// Run the predictor.
    ///
    /// `previous` carries risk statuses across runs: a risk the user already
    /// moved to `mitigating` or `resolved` keeps that status.
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        agents: &[Agent],
        interactions: &[AgentInteraction],
        previous: &[ProjectRisk],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> RiskAnalysis {
        let telemetry = Telemetry::measure(agents, interactions);
        let risks: Vec<ProjectRisk> = CATALOG
            .iter()
            .map(|template| {
                let (probability, impact) = match self.model {
                    RiskModel::Simulated => (
                        jittered(rng, template.base_probability),
                        jittered(rng, template.base_impact),
                    ),
                    RiskModel::Telemetry => telemetry.score(template.risk_type),
                };
                let score = ProjectRisk::compute_score(probability, impact);
                let id = format!("risk-{}", template.risk_type.as_str().replace('_', "-"));
                let status = previous
                    .iter()
                    .find(|r| r.id == id)
                    .map_or(RiskStatus::Identified, |r| r.status);
                ProjectRisk {
                    id,
                    risk_type: template.risk_type,
                    severity: Severity::from_score(score),
                    probability,
                    impact,
                    score,
                    description: template.description.to_string(),
                    affected_agents: affected_agents(template.risk_type, agents, interactions),
                    mitigation: strings(template.mitigation),
                    early_warnings: strings(template.early_warnings),
                    timeline: template.timeline.to_string(),
                    status,
                }
            })
            .collect();

        let confidence = rng.gen_range(85..=95);
        let analysis = RiskAnalysis::from_risks(risks, confidence, now);
        tracing::debug!(
            model = ?self.model,
            overall = analysis.overall_risk_score,
            trend = ?analysis.trend_direction,
            "Risk analysis complete"
        );
        analysis
    }
}

/// Move a risk forward along `identified → mitigating → resolved`.
///
/// Re-applying the current status is a no-op; moving backwards is rejected
/// and leaves the risk unchanged.
pub fn advance_risk(risks: &mut [ProjectRisk], id: &str, target: RiskStatus) -> DeckResult<()> {
    let risk = risks
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| DeckError::unknown("risk", id))?;
    if target < risk.status {
        return Err(DeckError::InvalidTransition(format!(
            "risk '{id}' cannot move from {} back to {target}",
            risk.status
        )));
    }
    risk.status = target;
    Ok(())
}
