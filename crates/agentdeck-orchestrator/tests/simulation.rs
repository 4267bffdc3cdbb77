#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentdeck_orchestrator::risk::next_risk_window;
use agentdeck_orchestrator::{
    export_json, parse_snapshot, read_snapshot, write_snapshot, DashboardEvent, DeckConfig,
    DeckEngine, DeckRuntime, DisplayMode, NewInteraction, ProjectRisk, RiskModel, RiskStatus,
    TrendDirection,
};
use agentdeck_orchestrator::types::{InteractionType, Priority, Severity};
use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use std::time::Duration;

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap()
}

#[test]
fn test_hour_of_ticks_keeps_invariants() {
    let mut engine = DeckEngine::deterministic(&DeckConfig::default(), 2024, start());
    for _ in 0..60 {
        engine.advance(Duration::from_secs(60)).unwrap();
        let state = engine.state();

        assert_eq!(state.agents.len(), 11);
        for agent in &state.agents {
            assert!((0.0..=100.0).contains(&agent.workload), "{}", agent.workload);
            assert!((0.0..=100.0).contains(&agent.efficiency), "{}", agent.efficiency);
        }

        assert!(state.interactions.len() <= 10);
        let ids: HashSet<_> = state.interactions.entries().iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), state.interactions.len());
        for pair in state.interactions.entries().windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        for interaction in state.interactions.entries() {
            assert_ne!(interaction.from_agent, interaction.to_agent);
        }

        for risk in &state.risk.risks {
            assert_eq!(
                risk.score,
                ProjectRisk::compute_score(risk.probability, risk.impact)
            );
            assert!(risk.score <= 100);
            assert_eq!(risk.severity, Severity::from_score(risk.score));
        }
        let analysis = &state.risk;
        assert_eq!(
            analysis.trend_direction,
            TrendDirection::from_score(analysis.overall_risk_score)
        );
        assert_eq!(
            analysis.next_risk_window,
            next_risk_window(analysis.overall_risk_score)
        );
        assert!((85..=95).contains(&analysis.confidence_level));

        for allocation in &state.allocations {
            if !allocation.project_distribution.is_empty() {
                let total: u32 = allocation
                    .project_distribution
                    .iter()
                    .map(|s| u32::from(s.percentage))
                    .sum();
                assert_eq!(total, 100);
            }
        }
    }
}

#[test]
fn test_telemetry_model_is_deterministic_for_same_state() {
    let mut config = DeckConfig::default();
    config.risk.model = RiskModel::Telemetry;
    let mut a = DeckEngine::deterministic(&config, 8, start());
    let mut b = DeckEngine::deterministic(&config, 8, start());
    a.advance(Duration::from_secs(300)).unwrap();
    b.advance(Duration::from_secs(300)).unwrap();
    assert_eq!(a.state().risk, b.state().risk);
}

#[test]
fn test_user_events_interleave_with_ticks() {
    let mut engine = DeckEngine::deterministic(&DeckConfig::default(), 31, start());
    engine.advance(Duration::from_secs(10)).unwrap();
    engine
        .dispatch(DashboardEvent::RecordInteraction(NewInteraction {
            from_agent: "agent-product-owner".into(),
            to_agent: "agent-project-manager".into(),
            interaction_type: InteractionType::Feedback,
            content: "Scope looks right for the sprint".into(),
            priority: Priority::High,
        }))
        .unwrap();
    assert_eq!(
        engine.state().interactions.entries()[0].content,
        "Scope looks right for the sprint"
    );

    let risk_id = engine.state().risk.risks[0].id.clone();
    engine
        .dispatch(DashboardEvent::AdvanceRisk {
            risk_id: risk_id.clone(),
            status: RiskStatus::Mitigating,
        })
        .unwrap();
    engine.advance(Duration::from_secs(90)).unwrap();
    let risk = engine
        .state()
        .risk
        .risks
        .iter()
        .find(|r| r.id == risk_id)
        .unwrap();
    assert_eq!(risk.status, RiskStatus::Mitigating);
}

#[tokio::test]
async fn test_snapshot_file_round_trip() {
    let mut engine = DeckEngine::deterministic(&DeckConfig::default(), 5, start());
    engine.advance(Duration::from_secs(300)).unwrap();
    engine.dispatch(DashboardEvent::RefreshAllocations).unwrap();
    let snapshot = engine.snapshot();
    assert!(!snapshot.allocations.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.json");
    write_snapshot(&snapshot, &path).await.unwrap();
    let loaded = read_snapshot(&path).await.unwrap();
    assert_eq!(loaded.agents, snapshot.agents);
    assert_eq!(loaded.interactions, snapshot.interactions);
    assert_eq!(loaded.risks, snapshot.risks);
    assert_eq!(loaded.synergies, snapshot.synergies);
    assert_eq!(loaded.allocations, snapshot.allocations);
    assert_eq!(loaded, snapshot);

    let text = export_json(&loaded).unwrap();
    assert_eq!(parse_snapshot(&text).unwrap(), snapshot);
}

#[tokio::test(start_paused = true)]
async fn test_runtime_is_quiet_after_shutdown() {
    let mut config = DeckConfig::default();
    config.simulation.seed = Some(12);
    let runtime = DeckRuntime::start(&config);
    let mut updates = runtime.subscribe();

    runtime
        .send(DashboardEvent::SetMode(DisplayMode::Conflict))
        .await
        .unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().mode, DisplayMode::Conflict);

    tokio::time::sleep(Duration::from_secs(7)).await;
    let engine = runtime.shutdown().await.unwrap();
    let applied = engine.events_applied();
    assert!(applied >= 5);

    let _ = updates.borrow_and_update();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(engine.events_applied(), applied);
    assert!(updates.changed().await.is_err());
}
