use crate::types::{
    Agent, AgentRole, AgentStatus, Location, Personality, Priority, Project, ProjectStatus,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Static seed data for one catalog entry.
struct RoleSeed {
    role: AgentRole,
    name: &'static str,
    status: AgentStatus,
    workload: f64,
    efficiency: f64,
    expertise: f64,
    tasks_completed: u32,
    average_task_time: f64,
    current_task: Option<&'static str>,
    traits: &'static [&'static str],
    communication_style: &'static str,
    working_style: &'static str,
    collaboration_role: &'static str,
    decision_making: &'static str,
    stress_responses: &'static [&'static str],
}

const CATALOG: [RoleSeed; 11] = [
    RoleSeed {
        role: AgentRole::ProjectManager,
        name: "Alex Morgan",
        status: AgentStatus::Active,
        workload: 72.0,
        efficiency: 88.0,
        expertise: 85.0,
        tasks_completed: 142,
        average_task_time: 45.0,
        current_task: Some("Sprint planning for Q3 roadmap"),
        traits: &["organized", "decisive", "empathetic"],
        communication_style: "direct",
        working_style: "structured",
        collaboration_role: "coordinator",
        decision_making: "consensus",
        stress_responses: &["re-prioritizes", "delegates"],
    },
    RoleSeed {
        role: AgentRole::TechLead,
        name: "Sam Chen",
        status: AgentStatus::Active,
        workload: 81.0,
        efficiency: 91.0,
        expertise: 94.0,
        tasks_completed: 203,
        average_task_time: 62.0,
        current_task: Some("Reviewing service boundaries"),
        traits: &["analytical", "mentoring", "pragmatic"],
        communication_style: "technical",
        working_style: "deep-focus",
        collaboration_role: "architect",
        decision_making: "data-driven",
        stress_responses: &["simplifies scope", "pairs with team"],
    },
    RoleSeed {
        role: AgentRole::FrontendDeveloper,
        name: "Riley Park",
        status: AgentStatus::Busy,
        workload: 66.0,
        efficiency: 84.0,
        expertise: 78.0,
        tasks_completed: 167,
        average_task_time: 38.0,
        current_task: Some("Dashboard component refactor"),
        traits: &["creative", "detail-oriented"],
        communication_style: "visual",
        working_style: "iterative",
        collaboration_role: "implementer",
        decision_making: "intuitive",
        stress_responses: &["asks for feedback"],
    },
    RoleSeed {
        role: AgentRole::BackendDeveloper,
        name: "Jordan Blake",
        status: AgentStatus::Active,
        workload: 77.0,
        efficiency: 86.0,
        expertise: 88.0,
        tasks_completed: 189,
        average_task_time: 51.0,
        current_task: Some("Payment API integration"),
        traits: &["methodical", "reliable"],
        communication_style: "concise",
        working_style: "structured",
        collaboration_role: "implementer",
        decision_making: "data-driven",
        stress_responses: &["writes more tests", "goes quiet"],
    },
    RoleSeed {
        role: AgentRole::FullstackDeveloper,
        name: "Casey Rivera",
        status: AgentStatus::Collaborating,
        workload: 69.0,
        efficiency: 82.0,
        expertise: 80.0,
        tasks_completed: 155,
        average_task_time: 47.0,
        current_task: Some("User onboarding flow"),
        traits: &["versatile", "curious"],
        communication_style: "collaborative",
        working_style: "flexible",
        collaboration_role: "bridge",
        decision_making: "experimental",
        stress_responses: &["context switches", "asks for help"],
    },
    RoleSeed {
        role: AgentRole::DevopsEngineer,
        name: "Taylor Quinn",
        status: AgentStatus::Active,
        workload: 58.0,
        efficiency: 90.0,
        expertise: 87.0,
        tasks_completed: 131,
        average_task_time: 33.0,
        current_task: Some("CI pipeline caching"),
        traits: &["systematic", "calm"],
        communication_style: "concise",
        working_style: "automation-first",
        collaboration_role: "enabler",
        decision_making: "risk-averse",
        stress_responses: &["automates", "documents"],
    },
    RoleSeed {
        role: AgentRole::QaEngineer,
        name: "Morgan Lee",
        status: AgentStatus::ProblemSolving,
        workload: 74.0,
        efficiency: 79.0,
        expertise: 76.0,
        tasks_completed: 174,
        average_task_time: 29.0,
        current_task: Some("Regression suite for checkout"),
        traits: &["skeptical", "thorough"],
        communication_style: "precise",
        working_style: "checklist",
        collaboration_role: "gatekeeper",
        decision_making: "evidence-based",
        stress_responses: &["escalates early"],
    },
    RoleSeed {
        role: AgentRole::UiUxDesigner,
        name: "Avery Santos",
        status: AgentStatus::Idle,
        workload: 41.0,
        efficiency: 85.0,
        expertise: 82.0,
        tasks_completed: 98,
        average_task_time: 56.0,
        current_task: None,
        traits: &["empathetic", "creative"],
        communication_style: "visual",
        working_style: "exploratory",
        collaboration_role: "advocate",
        decision_making: "user-centered",
        stress_responses: &["sketches alternatives"],
    },
    RoleSeed {
        role: AgentRole::DataScientist,
        name: "Drew Patel",
        status: AgentStatus::Active,
        workload: 63.0,
        efficiency: 87.0,
        expertise: 90.0,
        tasks_completed: 87,
        average_task_time: 74.0,
        current_task: Some("Churn prediction model"),
        traits: &["analytical", "patient"],
        communication_style: "explanatory",
        working_style: "deep-focus",
        collaboration_role: "advisor",
        decision_making: "data-driven",
        stress_responses: &["narrows hypotheses"],
    },
    RoleSeed {
        role: AgentRole::SecuritySpecialist,
        name: "Jamie Novak",
        status: AgentStatus::Busy,
        workload: 70.0,
        efficiency: 92.0,
        expertise: 93.0,
        tasks_completed: 112,
        average_task_time: 58.0,
        current_task: Some("Dependency vulnerability audit"),
        traits: &["vigilant", "principled"],
        communication_style: "formal",
        working_style: "methodical",
        collaboration_role: "reviewer",
        decision_making: "risk-averse",
        stress_responses: &["tightens controls"],
    },
    RoleSeed {
        role: AgentRole::ProductOwner,
        name: "Reese Holland",
        status: AgentStatus::Active,
        workload: 65.0,
        efficiency: 83.0,
        expertise: 79.0,
        tasks_completed: 121,
        average_task_time: 40.0,
        current_task: Some("Backlog grooming"),
        traits: &["visionary", "persuasive"],
        communication_style: "storytelling",
        working_style: "outcome-driven",
        collaboration_role: "decision maker",
        decision_making: "value-based",
        stress_responses: &["cuts scope", "re-negotiates dates"],
    },
];

const GRID_COLUMNS: usize = 4;
const GRID_ORIGIN: (f64, f64) = (120.0, 100.0);
const GRID_SPACING: (f64, f64) = (180.0, 160.0);

/// Canvas location of the `index`-th catalog entry.
fn grid_location(index: usize) -> Location {
    let col = (index % GRID_COLUMNS) as f64;
    let row = (index / GRID_COLUMNS) as f64;
    Location::new(
        GRID_ORIGIN.0 + col * GRID_SPACING.0,
        GRID_ORIGIN.1 + row * GRID_SPACING.1,
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Build the initial roster: one agent per role, in catalog order.
pub fn default_roster(now: DateTime<Utc>) -> Vec<Agent> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, seed)| Agent {
            id: format!("agent-{}", seed.role.as_str().replace('_', "-")),
            name: seed.name.to_string(),
            role: seed.role,
            status: seed.status,
            workload: seed.workload,
            efficiency: seed.efficiency,
            expertise: seed.expertise,
            location: grid_location(index),
            personality: Personality {
                traits: strings(seed.traits),
                communication_style: seed.communication_style.to_string(),
                working_style: seed.working_style.to_string(),
                collaboration_role: seed.collaboration_role.to_string(),
                decision_making: seed.decision_making.to_string(),
                stress_responses: strings(seed.stress_responses),
            },
            total_tasks_completed: seed.tasks_completed,
            average_task_time: seed.average_task_time,
            last_active: now,
            current_task: seed.current_task.map(str::to_string),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    status: ProjectStatus,
    progress: u8,
    priority: Priority,
    agents_assigned: u32,
    deadline: (i32, u32, u32),
    project_type: &str,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        status,
        progress,
        priority,
        agents_assigned,
        deadline: NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2)
            .unwrap_or_default(),
        project_type: project_type.to_string(),
    }
}

/// Sample project list used when the configuration does not supply one.
pub fn default_projects() -> Vec<Project> {
    vec![
        project(
            "proj-1",
            "E-commerce Platform",
            ProjectStatus::Active,
            68,
            Priority::High,
            6,
            (2026, 12, 15),
            "web",
        ),
        project(
            "proj-2",
            "Mobile Banking App",
            ProjectStatus::Active,
            34,
            Priority::High,
            5,
            (2027, 2, 28),
            "mobile",
        ),
        project(
            "proj-3",
            "Analytics Dashboard",
            ProjectStatus::Planning,
            12,
            Priority::Medium,
            3,
            (2027, 4, 1),
            "web",
        ),
        project(
            "proj-4",
            "Internal Design System",
            ProjectStatus::Completed,
            100,
            Priority::Low,
            2,
            (2026, 9, 30),
            "library",
        ),
        project(
            "proj-5",
            "Customer Support Bot",
            ProjectStatus::OnHold,
            45,
            Priority::Medium,
            2,
            (2027, 6, 30),
            "ai",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roster_covers_every_role_once() {
        let roster = default_roster(Utc::now());
        assert_eq!(roster.len(), AgentRole::ALL.len());
        let roles: HashSet<AgentRole> = roster.iter().map(|a| a.role).collect();
        assert_eq!(roles.len(), 11);
    }

    #[test]
    fn test_roster_ids_unique_and_metrics_bounded() {
        let roster = default_roster(Utc::now());
        let ids: HashSet<&str> = roster.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), roster.len());
        for agent in &roster {
            assert!((0.0..=100.0).contains(&agent.workload));
            assert!((0.0..=100.0).contains(&agent.efficiency));
            assert!((0.0..=100.0).contains(&agent.expertise));
        }
    }

    #[test]
    fn test_roster_has_multiple_active_agents() {
        let roster = default_roster(Utc::now());
        assert!(roster.iter().filter(|a| a.is_active()).count() >= 2);
    }

    #[test]
    fn test_grid_locations_distinct() {
        let roster = default_roster(Utc::now());
        let first = roster[0].location;
        let fifth = roster[4].location;
        assert_eq!(first, Location::new(120.0, 100.0));
        assert_eq!(fifth, Location::new(120.0, 260.0));
    }

    #[test]
    fn test_default_projects() {
        let projects = default_projects();
        assert_eq!(projects.len(), 5);
        assert_eq!(projects[0].deadline.to_string(), "2026-12-15");
        assert!(projects.iter().any(|p| !p.is_open()));
    }
}
