//! Canvas geometry for the agent network view.
//!
//! Nothing here draws; the host renders the boxes, lines and zones this
//! module computes.

use crate::config::CanvasConfig;
use crate::types::{
    Agent, AgentInteraction, AgentStatus, DisplayMode, InteractionStatus, InteractionType,
    Location, Priority,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest collaboration-mode size modifier.
pub const MAX_COLLABORATION_MODIFIER: f64 = 1.5;

const ZONE_FILL: &str = "rgba(16, 185, 129, 0.1)";

/// Sizing inputs for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasParams {
    /// Node edge length before the mode modifier.
    pub base_size: f64,
    /// Collaboration zone radius.
    pub zone_radius: f64,
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self::from(&CanvasConfig::default())
    }
}

impl From<&CanvasConfig> for CanvasParams {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            base_size: config.base_size,
            zone_radius: config.zone_radius,
        }
    }
}

/// Axis-aligned box in canvas coordinates; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Bounds {
    /// Square of side `size` centred on `center`.
    pub fn centered(center: Location, size: f64) -> Self {
        Self {
            x: center.x - size / 2.0,
            y: center.y - size / 2.0,
            width: size,
            height: size,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Data shown when hovering an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Agent display name.
    pub name: String,
    /// Role title.
    pub role: String,
    /// Current activity.
    pub status: AgentStatus,
    /// Percent of capacity in use.
    pub workload: f64,
    /// Percent efficiency.
    pub efficiency: f64,
    /// Task in progress, if any.
    pub current_task: Option<String>,
}

/// Rendered box for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    /// Agent this node draws.
    pub agent_id: String,
    /// Agent location.
    pub center: Location,
    /// Mode-dependent scale applied to the base size.
    pub size_modifier: f64,
    /// Hit box.
    pub bounds: Bounds,
    /// Hover data.
    pub tooltip: Tooltip,
}

/// Connection colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    /// Conflicts and high-priority work.
    Red,
    /// Collaboration and low-priority work.
    Green,
    /// Medium priority.
    Amber,
    /// Default.
    Blue,
}

impl EdgeColor {
    /// CSS hex colour.
    pub fn hex(&self) -> &'static str {
        match self {
            EdgeColor::Red => "#ef4444",
            EdgeColor::Green => "#10b981",
            EdgeColor::Amber => "#f59e0b",
            EdgeColor::Blue => "#3b82f6",
        }
    }
}

/// Line drawn for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    /// Interaction this edge draws.
    pub interaction_id: Uuid,
    /// Centre of the initiating agent.
    pub from: Location,
    /// Centre of the receiving agent.
    pub to: Location,
    /// Mode-dependent colour.
    pub color: EdgeColor,
    /// Pending interactions are drawn dashed.
    pub dashed: bool,
}

/// Translucent highlight around a collaborating agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Collaborating agent.
    pub agent_id: String,
    /// Agent location.
    pub center: Location,
    /// Zone radius in canvas units.
    pub radius: f64,
    /// CSS fill colour.
    pub fill: String,
}

/// Everything the canvas renders for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasLayout {
    pub mode: DisplayMode,
    /// One per agent, in roster order.
    pub nodes: Vec<NodeGeometry>,
    /// One per interaction whose endpoints both resolve.
    pub edges: Vec<EdgeGeometry>,
    /// Only populated in collaboration mode.
    pub zones: Vec<Zone>,
}

impl CanvasLayout {
    /// Id of the topmost agent whose box contains `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&str> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.bounds.contains(x, y))
            .map(|n| n.agent_id.as_str())
    }
}

/// Visual size multiplier for `agent` under `mode`.
pub fn size_modifier(agent: &Agent, interactions: &[AgentInteraction], mode: DisplayMode) -> f64 {
    match mode {
        DisplayMode::Performance => 0.75 + (agent.efficiency / 100.0) * 0.5,
        DisplayMode::Collaboration => {
            let count = interactions.iter().filter(|i| i.involves(&agent.id)).count();
            (1.0 + 0.1 * count as f64).min(MAX_COLLABORATION_MODIFIER)
        }
        DisplayMode::Conflict | DisplayMode::Standard => 1.0,
    }
}

/// Connection colour for `interaction` under `mode`.
pub fn edge_color(interaction: &AgentInteraction, mode: DisplayMode) -> EdgeColor {
    match (mode, interaction.interaction_type) {
        (DisplayMode::Conflict, InteractionType::ConflictResolution) => EdgeColor::Red,
        (DisplayMode::Collaboration, InteractionType::Collaboration) => EdgeColor::Green,
        (DisplayMode::Performance, _) => match interaction.priority {
            Priority::High => EdgeColor::Red,
            Priority::Medium => EdgeColor::Amber,
            Priority::Low => EdgeColor::Green,
        },
        _ => EdgeColor::Blue,
    }
}

/// Compute node boxes, connection lines and (in collaboration mode) zones.
///
/// Interactions whose endpoints do not resolve to a roster agent are skipped.
pub fn layout(
    agents: &[Agent],
    interactions: &[AgentInteraction],
    mode: DisplayMode,
    params: &CanvasParams,
) -> CanvasLayout {
    let nodes = agents
        .iter()
        .map(|agent| {
            let modifier = size_modifier(agent, interactions, mode);
            NodeGeometry {
                agent_id: agent.id.clone(),
                center: agent.location,
                size_modifier: modifier,
                bounds: Bounds::centered(agent.location, params.base_size * modifier),
                tooltip: Tooltip {
                    name: agent.name.clone(),
                    role: agent.role.label().to_string(),
                    status: agent.status,
                    workload: agent.workload,
                    efficiency: agent.efficiency,
                    current_task: agent.current_task.clone(),
                },
            }
        })
        .collect();

    let locate = |id: &str| agents.iter().find(|a| a.id == id).map(|a| a.location);
    let edges = interactions
        .iter()
        .filter_map(|interaction| {
            let (Some(from), Some(to)) =
                (locate(&interaction.from_agent), locate(&interaction.to_agent))
            else {
                tracing::debug!(
                    interaction = %interaction.id,
                    "Skipping connection with an unknown endpoint"
                );
                return None;
            };
            Some(EdgeGeometry {
                interaction_id: interaction.id,
                from,
                to,
                color: edge_color(interaction, mode),
                dashed: interaction.status == InteractionStatus::Pending,
            })
        })
        .collect();

    let zones = if mode == DisplayMode::Collaboration {
        agents
            .iter()
            .filter(|agent| {
                interactions.iter().any(|i| {
                    i.interaction_type == InteractionType::Collaboration && i.involves(&agent.id)
                })
            })
            .map(|agent| Zone {
                agent_id: agent.id.clone(),
                center: agent.location,
                radius: params.zone_radius,
                fill: ZONE_FILL.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    CanvasLayout {
        mode,
        nodes,
        edges,
        zones,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::profiles::default_roster;
    use chrono::Utc;

    fn interaction(
        from: &str,
        to: &str,
        kind: InteractionType,
        status: InteractionStatus,
        priority: Priority,
    ) -> AgentInteraction {
        AgentInteraction {
            id: Uuid::new_v4(),
            from_agent: from.into(),
            to_agent: to.into(),
            interaction_type: kind,
            content: String::new(),
            timestamp: Utc::now(),
            status,
            priority,
        }
    }

    #[test]
    fn test_performance_modifier_range() {
        let mut agent = default_roster(Utc::now()).remove(0);
        agent.efficiency = 100.0;
        assert!((size_modifier(&agent, &[], DisplayMode::Performance) - 1.25).abs() < 1e-12);
        agent.efficiency = 0.0;
        assert!((size_modifier(&agent, &[], DisplayMode::Performance) - 0.75).abs() < 1e-12);
        agent.efficiency = 50.0;
        assert!((size_modifier(&agent, &[], DisplayMode::Performance) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_collaboration_modifier_is_capped() {
        let roster = default_roster(Utc::now());
        let me = &roster[0];
        let other = &roster[1];
        let make = |n: usize| -> Vec<AgentInteraction> {
            (0..n)
                .map(|_| {
                    interaction(
                        &me.id,
                        &other.id,
                        InteractionType::Review,
                        InteractionStatus::Completed,
                        Priority::Low,
                    )
                })
                .collect()
        };
        assert!((size_modifier(me, &make(0), DisplayMode::Collaboration) - 1.0).abs() < 1e-12);
        assert!((size_modifier(me, &make(3), DisplayMode::Collaboration) - 1.3).abs() < 1e-9);
        assert_eq!(size_modifier(me, &make(6), DisplayMode::Collaboration), 1.5);
        assert_eq!(size_modifier(me, &make(9), DisplayMode::Collaboration), 1.5);
        assert_eq!(size_modifier(me, &make(9), DisplayMode::Conflict), 1.0);
        assert_eq!(size_modifier(me, &make(9), DisplayMode::Standard), 1.0);
    }

    #[test]
    fn test_edge_colour_table() {
        let conflict = interaction(
            "a",
            "b",
            InteractionType::ConflictResolution,
            InteractionStatus::InProgress,
            Priority::Low,
        );
        let collab = interaction(
            "a",
            "b",
            InteractionType::Collaboration,
            InteractionStatus::InProgress,
            Priority::High,
        );
        assert_eq!(edge_color(&conflict, DisplayMode::Conflict), EdgeColor::Red);
        assert_eq!(edge_color(&conflict, DisplayMode::Collaboration), EdgeColor::Blue);
        assert_eq!(edge_color(&collab, DisplayMode::Collaboration), EdgeColor::Green);
        assert_eq!(edge_color(&collab, DisplayMode::Conflict), EdgeColor::Blue);
        assert_eq!(edge_color(&collab, DisplayMode::Performance), EdgeColor::Red);
        assert_eq!(edge_color(&conflict, DisplayMode::Performance), EdgeColor::Green);
        assert_eq!(edge_color(&collab, DisplayMode::Standard), EdgeColor::Blue);
        assert_eq!(EdgeColor::Red.hex(), "#ef4444");
    }

    #[test]
    fn test_layout_geometry_and_dashes() {
        let roster = default_roster(Utc::now());
        let log = vec![
            interaction(
                &roster[0].id,
                &roster[1].id,
                InteractionType::Handoff,
                InteractionStatus::Pending,
                Priority::Medium,
            ),
            interaction(
                &roster[2].id,
                &roster[3].id,
                InteractionType::Review,
                InteractionStatus::Completed,
                Priority::Medium,
            ),
        ];
        let canvas = layout(&roster, &log, DisplayMode::Standard, &CanvasParams::default());
        assert_eq!(canvas.nodes.len(), roster.len());
        let first = &canvas.nodes[0];
        assert_eq!(first.bounds.width, 60.0);
        assert_eq!(first.bounds.x, roster[0].location.x - 30.0);
        assert_eq!(first.tooltip.name, roster[0].name);
        assert_eq!(canvas.edges.len(), 2);
        assert!(canvas.edges[0].dashed);
        assert!(!canvas.edges[1].dashed);
        assert_eq!(canvas.edges[0].from, roster[0].location);
        assert_eq!(canvas.edges[0].to, roster[1].location);
        assert!(canvas.zones.is_empty());
    }

    #[test]
    fn test_dangling_endpoints_are_skipped() {
        let roster = default_roster(Utc::now());
        let log = vec![interaction(
            &roster[0].id,
            "agent-ghost",
            InteractionType::Feedback,
            InteractionStatus::InProgress,
            Priority::Low,
        )];
        let canvas = layout(&roster, &log, DisplayMode::Collaboration, &CanvasParams::default());
        assert!(canvas.edges.is_empty());
        assert_eq!(canvas.nodes.len(), roster.len());
    }

    #[test]
    fn test_zones_only_in_collaboration_mode() {
        let roster = default_roster(Utc::now());
        let log = vec![
            interaction(
                &roster[0].id,
                &roster[1].id,
                InteractionType::Collaboration,
                InteractionStatus::InProgress,
                Priority::Low,
            ),
            interaction(
                &roster[2].id,
                &roster[3].id,
                InteractionType::Review,
                InteractionStatus::InProgress,
                Priority::Low,
            ),
        ];
        let params = CanvasParams::default();
        let canvas = layout(&roster, &log, DisplayMode::Collaboration, &params);
        let ids: Vec<&str> = canvas.zones.iter().map(|z| z.agent_id.as_str()).collect();
        assert_eq!(ids, vec![roster[0].id.as_str(), roster[1].id.as_str()]);
        assert!(canvas.zones.iter().all(|z| z.radius == 80.0));
        assert!(layout(&roster, &log, DisplayMode::Performance, &params)
            .zones
            .is_empty());
    }

    #[test]
    fn test_hit_test_selects_agent() {
        let roster = default_roster(Utc::now());
        let canvas = layout(&roster, &[], DisplayMode::Standard, &CanvasParams::default());
        let target = &roster[5];
        assert_eq!(
            canvas.hit_test(target.location.x + 10.0, target.location.y - 10.0),
            Some(target.id.as_str())
        );
        assert_eq!(canvas.hit_test(-500.0, -500.0), None);
    }
}
