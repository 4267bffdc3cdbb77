use crate::types::{DisplayMode, Project};
use agentdeck_core::{DeckError, DeckResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration, usually loaded from `agentdeck.toml`.
///
/// Every section is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Tick intervals and jitter.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Risk model selection.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Canvas sizing and initial mode.
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Voice command gating.
    #[serde(default)]
    pub voice: VoiceConfig,
    /// Synergy and allocation tunables.
    #[serde(default)]
    pub synergy: SynergyConfig,
    /// Overrides the built-in sample project list when non-empty.
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Tick intervals and perturbation bounds for the simulators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Status tick period.
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
    /// Interaction tick period.
    #[serde(default = "default_interaction_interval_ms")]
    pub interaction_interval_ms: u64,
    /// Risk tick period.
    #[serde(default = "default_risk_interval_ms")]
    pub risk_interval_ms: u64,
    /// Interactions kept in the log, newest first.
    #[serde(default = "default_interaction_retention")]
    pub interaction_retention: usize,
    /// Chance per status tick that an agent switches status.
    #[serde(default = "default_status_change_probability")]
    pub status_change_probability: f64,
    /// Chance per interaction tick that an interaction is logged.
    #[serde(default = "default_interaction_probability")]
    pub interaction_probability: f64,
    /// Half-width of the uniform workload perturbation.
    #[serde(default = "default_workload_jitter")]
    pub workload_jitter: f64,
    /// Half-width of the uniform efficiency perturbation.
    #[serde(default = "default_efficiency_jitter")]
    pub efficiency_jitter: f64,
    /// Simulated processing time before a synergy is marked completed.
    #[serde(default = "default_synergy_delay_ms")]
    pub synergy_delay_ms: u64,
}

fn default_status_interval_ms() -> u64 {
    3_000
}
fn default_interaction_interval_ms() -> u64 {
    3_000
}
fn default_risk_interval_ms() -> u64 {
    30_000
}
fn default_interaction_retention() -> usize {
    10
}
fn default_status_change_probability() -> f64 {
    0.2
}
fn default_interaction_probability() -> f64 {
    0.3
}
fn default_workload_jitter() -> f64 {
    10.0
}
fn default_efficiency_jitter() -> f64 {
    5.0
}
fn default_synergy_delay_ms() -> u64 {
    2_000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            status_interval_ms: default_status_interval_ms(),
            interaction_interval_ms: default_interaction_interval_ms(),
            risk_interval_ms: default_risk_interval_ms(),
            interaction_retention: default_interaction_retention(),
            status_change_probability: default_status_change_probability(),
            interaction_probability: default_interaction_probability(),
            workload_jitter: default_workload_jitter(),
            efficiency_jitter: default_efficiency_jitter(),
            synergy_delay_ms: default_synergy_delay_ms(),
        }
    }
}

impl SimulationConfig {
    /// [`Self::status_interval_ms`] as a [`Duration`].
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    /// [`Self::interaction_interval_ms`] as a [`Duration`].
    pub fn interaction_interval(&self) -> Duration {
        Duration::from_millis(self.interaction_interval_ms)
    }

    /// [`Self::risk_interval_ms`] as a [`Duration`].
    pub fn risk_interval(&self) -> Duration {
        Duration::from_millis(self.risk_interval_ms)
    }

    /// [`Self::synergy_delay_ms`] as a [`Duration`].
    pub fn synergy_delay(&self) -> Duration {
        Duration::from_millis(self.synergy_delay_ms)
    }
}

/// Which risk derivation the predictor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskModel {
    /// Fixed catalog with re-randomized scores on every run.
    #[default]
    Simulated,
    /// Scores derived from workload, efficiency and interaction telemetry.
    Telemetry,
}

/// `[risk]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub model: RiskModel,
}

/// `[canvas]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Node edge length in canvas units.
    #[serde(default = "default_base_size")]
    pub base_size: f64,
    /// Collaboration zone radius.
    #[serde(default = "default_zone_radius")]
    pub zone_radius: f64,
    /// Initial display mode; unknown names fall back to `standard`.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_base_size() -> f64 {
    60.0
}
fn default_zone_radius() -> f64 {
    80.0
}
fn default_mode() -> String {
    "collaboration".to_string()
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            base_size: default_base_size(),
            zone_radius: default_zone_radius(),
            mode: default_mode(),
        }
    }
}

impl CanvasConfig {
    /// Parsed [`Self::mode`].
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::parse_mode(&self.mode)
    }
}

/// `[voice]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Commands must score strictly above this to be acted on.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

fn default_confidence_threshold() -> f64 {
    0.7
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// `[synergy]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynergyConfig {
    /// Cap on reported synergy opportunities.
    #[serde(default = "default_max_opportunities")]
    pub max_opportunities: usize,
    /// Half-width of the recommended-allocation perturbation.
    #[serde(default = "default_allocation_jitter")]
    pub allocation_jitter: f64,
}

fn default_max_opportunities() -> usize {
    6
}
fn default_allocation_jitter() -> f64 {
    10.0
}

impl Default for SynergyConfig {
    fn default() -> Self {
        Self {
            max_opportunities: default_max_opportunities(),
            allocation_jitter: default_allocation_jitter(),
        }
    }
}

impl DeckConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> DeckResult<Self> {
        let config: DeckConfig =
            toml::from_str(s).map_err(|e| DeckError::Config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk. A missing file yields the defaults.
    pub async fn load(path: &Path) -> DeckResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&raw)
    }

    /// Reject values the simulators cannot work with.
    pub fn validate(&self) -> DeckResult<()> {
        let sim = &self.simulation;
        for (name, p) in [
            ("status_change_probability", sim.status_change_probability),
            ("interaction_probability", sim.interaction_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(DeckError::Config(format!(
                    "simulation.{name} must be within [0, 1], got {p}"
                )));
            }
        }
        for (name, ms) in [
            ("status_interval_ms", sim.status_interval_ms),
            ("interaction_interval_ms", sim.interaction_interval_ms),
            ("risk_interval_ms", sim.risk_interval_ms),
        ] {
            if ms == 0 {
                return Err(DeckError::Config(format!(
                    "simulation.{name} must be greater than zero"
                )));
            }
        }
        if sim.interaction_retention == 0 {
            return Err(DeckError::Config(
                "simulation.interaction_retention must be at least 1".to_string(),
            ));
        }
        if sim.workload_jitter < 0.0 || sim.efficiency_jitter < 0.0 {
            return Err(DeckError::Config(
                "simulation jitter bounds must be non-negative".to_string(),
            ));
        }
        if self.canvas.base_size <= 0.0 {
            return Err(DeckError::Config(
                "canvas.base_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.voice.confidence_threshold) {
            return Err(DeckError::Config(
                "voice.confidence_threshold must be within [0, 1]".to_string(),
            ));
        }
        check_project_ids(&self.projects)
    }
}

/// Project ids must be unique and must not make two synergy keys collide.
fn check_project_ids(projects: &[Project]) -> DeckResult<()> {
    let mut ids = HashSet::new();
    for project in projects {
        if !ids.insert(project.id.as_str()) {
            return Err(DeckError::Config(format!(
                "duplicate project id '{}'",
                project.id
            )));
        }
    }

    let mut keys: HashSet<String> = HashSet::new();
    let all: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    if all.len() >= 3 {
        keys.insert(all.join("-"));
    }
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            let key = format!("{a}-{b}");
            if !keys.insert(key.clone()) {
                return Err(DeckError::Config(format!(
                    "project ids '{a}' and '{b}' produce ambiguous synergy key '{key}'"
                )));
            }
        }
    }
    Ok(())
}
