use crate::types::{
    clamp_percent, Agent, CrossProjectSynergy, ImplementationEffort, Priority, Project,
    ProjectStatus, SynergyType,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const KNOWLEDGE_GAP: u8 = 30;
const MAX_PROJECTS_PER_AGENT: usize = 3;
const ALLOCATION_EFFICIENCY_NOISE: f64 = 5.0;
const BOTTLENECK_EFFICIENCY: f64 = 75.0;

fn priority_weight(priority: Priority) -> u32 {
    match priority {
        Priority::High => 40,
        Priority::Medium => 25,
        Priority::Low => 10,
    }
}

fn type_bonus(synergy_type: SynergyType) -> u32 {
    match synergy_type {
        SynergyType::TechnicalSynergy => 15,
        SynergyType::SharedResources => 12,
        SynergyType::KnowledgeTransfer => 10,
        SynergyType::MarketSynergy => 5,
    }
}

fn effort_for(agents: u32) -> ImplementationEffort {
    match agents {
        0..=5 => ImplementationEffort::Low,
        6..=9 => ImplementationEffort::Medium,
        _ => ImplementationEffort::High,
    }
}

fn timeline_for(effort: ImplementationEffort) -> &'static str {
    match effort {
        ImplementationEffort::Low => "1-2 weeks",
        ImplementationEffort::Medium => "3-4 weeks",
        ImplementationEffort::High => "1-2 months",
        ImplementationEffort::Completed => "done",
    }
}

fn classify(a: &Project, b: &Project) -> SynergyType {
    if a.project_type == b.project_type {
        SynergyType::TechnicalSynergy
    } else if a.progress.abs_diff(b.progress) >= KNOWLEDGE_GAP {
        SynergyType::KnowledgeTransfer
    } else if a.status == ProjectStatus::Active && b.status == ProjectStatus::Active {
        SynergyType::SharedResources
    } else {
        SynergyType::MarketSynergy
    }
}

fn pitch(synergy_type: SynergyType, a: &Project, b: &Project) -> (String, String) {
    match synergy_type {
        SynergyType::TechnicalSynergy => (
            format!(
                "{} and {} share a {} stack; extract common components",
                a.name, b.name, a.project_type
            ),
            "Less duplicated code and a single place to fix defects".to_string(),
        ),
        SynergyType::KnowledgeTransfer => {
            let (ahead, behind) = if a.progress >= b.progress { (a, b) } else { (b, a) };
            (
                format!(
                    "Carry lessons from {} ({}%) into {} ({}%)",
                    ahead.name, ahead.progress, behind.name, behind.progress
                ),
                "Shorter ramp-up and fewer repeated mistakes".to_string(),
            )
        }
        SynergyType::SharedResources => (
            format!("Pool specialists between {} and {}", a.name, b.name),
            "Higher utilization of scarce roles across both projects".to_string(),
        ),
        SynergyType::MarketSynergy => (
            format!("Position {} and {} as a combined offering", a.name, b.name),
            "Shared launch effort and cross-selling potential".to_string(),
        ),
    }
}

fn pair_synergy(a: &Project, b: &Project) -> CrossProjectSynergy {
    let synergy_type = classify(a, b);
    let mean_progress = (u32::from(a.progress) + u32::from(b.progress)) / 2;
    let impact = priority_weight(a.priority)
        + priority_weight(b.priority)
        + type_bonus(synergy_type)
        + (100 - mean_progress.min(100)) / 10;
    let effort = effort_for(a.agents_assigned + b.agents_assigned);
    let (opportunity, benefit) = pitch(synergy_type, a, b);
    CrossProjectSynergy {
        project_ids: vec![a.id.clone(), b.id.clone()],
        synergy_type,
        opportunity,
        benefit,
        impact_score: impact.min(100) as u8,
        implementation_effort: effort,
        timeline: timeline_for(effort).to_string(),
    }
}

/// Portfolio-wide pooling once three or more projects are in flight.
fn portfolio_synergy(in_flight: &[&Project]) -> Option<CrossProjectSynergy> {
    if in_flight.len() < 3 {
        return None;
    }
    let weights: u32 = in_flight.iter().map(|p| priority_weight(p.priority)).sum();
    let impact = weights / in_flight.len() as u32 * 2 + type_bonus(SynergyType::SharedResources);
    Some(CrossProjectSynergy {
        project_ids: in_flight.iter().map(|p| p.id.clone()).collect(),
        synergy_type: SynergyType::SharedResources,
        opportunity: format!(
            "Run a shared platform squad across {} in-flight projects",
            in_flight.len()
        ),
        benefit: "One roadmap for infrastructure, tooling and release process".to_string(),
        impact_score: impact.min(100) as u8,
        implementation_effort: ImplementationEffort::High,
        timeline: timeline_for(ImplementationEffort::High).to_string(),
    })
}

/// Find cross-project opportunities among projects that are not completed.
///
/// Sorted by impact, highest first, and capped at `max_opportunities`.
pub fn analyze_synergies(
    projects: &[Project],
    max_opportunities: usize,
) -> Vec<CrossProjectSynergy> {
    let open: Vec<&Project> = projects.iter().filter(|p| p.is_open()).collect();
    let mut synergies: Vec<CrossProjectSynergy> = open
        .iter()
        .enumerate()
        .flat_map(|(i, a)| open[i + 1..].iter().map(move |b| pair_synergy(a, b)))
        .collect();

    let in_flight: Vec<&Project> = open
        .iter()
        .copied()
        .filter(|p| matches!(p.status, ProjectStatus::Active | ProjectStatus::Planning))
        .collect();
    synergies.extend(portfolio_synergy(&in_flight));

    synergies.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
    synergies.truncate(max_opportunities);
    synergies
}

/// Mark every synergy whose joined project ids equal `key` as completed.
///
/// Returns whether anything matched; non-matching synergies are untouched.
pub fn implement_synergy(synergies: &mut [CrossProjectSynergy], key: &str) -> bool {
    let mut matched = false;
    for synergy in synergies.iter_mut().filter(|s| s.key() == key) {
        synergy.implementation_effort = ImplementationEffort::Completed;
        matched = true;
    }
    matched
}

/// Chance that an agent throttles its projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottleneckRisk {
    /// Efficiency at or above the bottleneck threshold.
    Low,
    /// Efficiency below the bottleneck threshold.
    Medium,
}

/// Share of an agent's time assigned to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectShare {
    /// Project receiving the share.
    pub project_id: String,
    /// Percent of the agent's time.
    pub percentage: u8,
}

/// Per-agent allocation recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    /// Agent the recommendation is for.
    pub agent_id: String,
    /// Current workload.
    pub current_allocation: f64,
    /// Workload after rebalancing.
    pub recommended_allocation: f64,
    /// Projected efficiency.
    pub efficiency: f64,
    /// `round(current * efficiency / 100)`.
    pub utilization: f64,
    /// Derived from the projected efficiency.
    pub bottleneck_risk: BottleneckRisk,
    /// Percentages sum to exactly 100 when non-empty.
    pub project_distribution: Vec<ProjectShare>,
}

/// Split 100 across `weights` with the largest-remainder method.
fn distribute(weights: &[u32]) -> Vec<u8> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return vec![0; weights.len()];
    }
    let exact: Vec<f64> = weights
        .iter()
        .map(|w| f64::from(*w) * 100.0 / f64::from(total))
        .collect();
    let mut shares: Vec<u8> = exact.iter().map(|e| e.floor() as u8).collect();
    let assigned: u32 = shares.iter().map(|s| u32::from(*s)).sum();
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for &idx in order.iter().cycle().take((100 - assigned) as usize) {
        shares[idx] += 1;
    }
    shares
}

fn noise<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound <= 0.0 {
        0.0
    } else {
        rng.gen_range(-bound..=bound)
    }
}

/// Recommend allocations for every agent.
///
/// Agents are spread over one to three active or planning projects; the
/// resulting distribution always sums to 100, or is empty when no project
/// can take work.
pub fn allocate_resources<R: Rng + ?Sized>(
    agents: &[Agent],
    projects: &[Project],
    rng: &mut R,
    allocation_jitter: f64,
) -> Vec<ResourceAllocation> {
    let assignable: Vec<&Project> = projects
        .iter()
        .filter(|p| matches!(p.status, ProjectStatus::Active | ProjectStatus::Planning))
        .collect();

    agents
        .iter()
        .map(|agent| {
            let current = agent.workload;
            let recommended = clamp_percent(current + noise(rng, allocation_jitter));
            let efficiency =
                clamp_percent(agent.efficiency + noise(rng, ALLOCATION_EFFICIENCY_NOISE));
            let utilization = (current * efficiency / 100.0).round();

            let project_distribution = if assignable.is_empty() {
                Vec::new()
            } else {
                let count = rng.gen_range(1..=assignable.len().min(MAX_PROJECTS_PER_AGENT));
                let chosen: Vec<&&Project> = assignable.choose_multiple(rng, count).collect();
                let weights: Vec<u32> = chosen.iter().map(|_| rng.gen_range(1..=100)).collect();
                chosen
                    .iter()
                    .zip(distribute(&weights))
                    .map(|(project, percentage)| ProjectShare {
                        project_id: project.id.clone(),
                        percentage,
                    })
                    .collect()
            };

            ResourceAllocation {
                agent_id: agent.id.clone(),
                current_allocation: current,
                recommended_allocation: recommended,
                efficiency,
                utilization,
                bottleneck_risk: if efficiency < BOTTLENECK_EFFICIENCY {
                    BottleneckRisk::Medium
                } else {
                    BottleneckRisk::Low
                },
                project_distribution,
            }
        })
        .collect()
}
