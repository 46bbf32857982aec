//! End-to-end orchestration tests.
//!
//! Exercise the public surface the way an embedding service would: build a
//! catalog, bind handlers, run tasks and workflows, then read statistics.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use maestro_core::{MaestroError, Priority, TaskRequest};
use maestro_orchestrator::*;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn desc(name: &str) -> AgentDescriptor {
    AgentDescriptor::new(name, AgentCategory::Operations)
}

/// Reports which dependency results it received.
fn reporter() -> Arc<dyn AgentHandler> {
    handler_fn(|task, deps| async move {
        let keys: BTreeSet<String> = deps.keys().cloned().collect();
        Ok(json!({ "agent": task.agent_name, "deps": keys }))
    })
}

fn always_fails() -> Arc<dyn AgentHandler> {
    handler_fn(|task, _| async move {
        Err::<serde_json::Value, _>(MaestroError::handler(format!(
            "{} is down",
            task.agent_name
        )))
    })
}

fn dep_keys(result: &maestro_core::TaskResult) -> Vec<String> {
    serde_json::from_value(result.data.clone().unwrap()["deps"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Scenario: B depends on A, B reads A's result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_dependency_result_visible_to_primary() {
    let a = handler_fn(|_, _| async { Ok(json!({ "occupancy": 0.82 })) });
    let b = handler_fn(|_, deps| async move {
        let forecast = deps
            .get("A")
            .and_then(|r| r.data.as_ref())
            .and_then(|d| d["occupancy"].as_f64())
            .ok_or_else(|| MaestroError::handler("forecast missing"))?;
        Ok::<_, MaestroError>(json!({ "rate": (100.0 * (1.0 + forecast)).round() }))
    });

    let orch = Orchestrator::builder()
        .agent(desc("A"), a)
        .unwrap()
        .agent(desc("B"), b)
        .unwrap()
        .depends_on("B", ["A"])
        .build()
        .unwrap();

    let result = orch.run(TaskRequest::new("B", "quote", json!({}))).await;
    assert!(result.success, "B failed: {:?}", result.error);
    assert_eq!(result.data.unwrap()["rate"], 182.0);

    let ledger = orch.ledger().snapshot();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].agent_name, "A");
    assert_eq!(ledger[1].agent_name, "B");
}

// ---------------------------------------------------------------------------
// Ledger growth is 1 + |deps| per run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_ledger_growth_per_run() {
    let orch = Orchestrator::builder()
        .agent(desc("a"), reporter())
        .unwrap()
        .agent(desc("b"), reporter())
        .unwrap()
        .agent(desc("c"), reporter())
        .unwrap()
        .agent(desc("leaf"), reporter())
        .unwrap()
        .depends_on("c", ["a", "b"])
        .build()
        .unwrap();

    orch.run(TaskRequest::new("leaf", "t", json!({}))).await;
    assert_eq!(orch.ledger().len(), 1);

    orch.run(TaskRequest::new("c", "t", json!({}))).await;
    assert_eq!(orch.ledger().len(), 1 + 3);

    orch.run(TaskRequest::new("nobody", "t", json!({}))).await;
    assert_eq!(orch.ledger().len(), 1 + 3 + 1);
}

// ---------------------------------------------------------------------------
// Dependency fan-out is order independent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_dependency_order_does_not_change_keys() {
    let orders: [[&str; 4]; 3] = [
        ["d1", "d2", "bad", "d3"],
        ["d3", "bad", "d2", "d1"],
        ["bad", "d1", "d3", "d2"],
    ];

    let mut key_sets = Vec::new();
    for order in orders {
        let orch = Orchestrator::builder()
            .agent(desc("d1"), reporter())
            .unwrap()
            .agent(desc("d2"), reporter())
            .unwrap()
            .agent(desc("d3"), reporter())
            .unwrap()
            .agent(desc("bad"), always_fails())
            .unwrap()
            .agent(desc("p"), reporter())
            .unwrap()
            .depends_on("p", order)
            .build()
            .unwrap();

        let result = orch.run(TaskRequest::new("p", "t", json!({}))).await;
        assert!(result.success);
        key_sets.push(dep_keys(&result));
    }

    assert_eq!(key_sets[0], vec!["d1", "d2", "d3"]);
    assert!(key_sets.iter().all(|k| *k == key_sets[0]));
}

// ---------------------------------------------------------------------------
// Scenario: workflow A, B, C where B always fails
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_workflow_continues_past_failed_step() {
    let orch = Orchestrator::builder()
        .agent(desc("A"), reporter())
        .unwrap()
        .agent(desc("B"), always_fails())
        .unwrap()
        .agent(desc("C"), reporter())
        .unwrap()
        .workflow(
            WorkflowDefinition::new("pipeline")
                .step("A", Priority::High)
                .step("B", Priority::Medium)
                .step("C", Priority::Low),
        )
        .unwrap()
        .build()
        .unwrap();

    let report = orch.execute_workflow("pipeline", json!({})).await.unwrap();
    assert_eq!(report.workflow_name, "pipeline");
    assert_eq!(report.total_steps, 3);
    assert_eq!(report.success_count, 2);
    assert_eq!(report.failure_count, 1);

    let order: Vec<&str> = report.results.iter().map(|r| r.agent_name.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert_eq!(report.results[1].error.as_deref(), Some("B is down"));
    assert!(report.results[2].success);
    assert_eq!(
        report.total_duration_ms,
        report.results.iter().map(|r| r.duration_ms).sum::<u64>()
    );
}

// ---------------------------------------------------------------------------
// Workflow steps run strictly in sequence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_workflow_steps_do_not_overlap() {
    let log = Arc::new(parking_lot::Mutex::new(Vec::<String>::new()));

    let tracing_handler = |log: Arc<parking_lot::Mutex<Vec<String>>>| {
        handler_fn(move |task, _| {
            let log = Arc::clone(&log);
            async move {
                log.lock().push(format!("start {}", task.agent_name));
                tokio::time::sleep(Duration::from_millis(20)).await;
                log.lock().push(format!("end {}", task.agent_name));
                Ok(json!(null))
            }
        })
    };

    let orch = Orchestrator::builder()
        .agent(desc("s1"), tracing_handler(Arc::clone(&log)))
        .unwrap()
        .agent(desc("s2"), tracing_handler(Arc::clone(&log)))
        .unwrap()
        .workflow(
            WorkflowDefinition::new("seq")
                .step("s1", Priority::Medium)
                .step("s2", Priority::Medium),
        )
        .unwrap()
        .build()
        .unwrap();

    orch.execute_workflow("seq", json!({})).await.unwrap();
    assert_eq!(
        *log.lock(),
        vec!["start s1", "end s1", "start s2", "end s2"]
    );
}

// ---------------------------------------------------------------------------
// Statistics mirror the ledger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_stats_track_ledger() {
    let orch = Orchestrator::builder()
        .agent(desc("ok"), reporter())
        .unwrap()
        .agent(desc("bad"), always_fails())
        .unwrap()
        .agent(desc("p"), reporter())
        .unwrap()
        .depends_on("p", ["ok", "bad"])
        .build()
        .unwrap();

    for _ in 0..3 {
        orch.run(TaskRequest::new("p", "t", json!({}))).await;
    }

    let stats = orch.global_stats();
    assert_eq!(stats.total_executions, orch.ledger().len());
    assert_eq!(stats.total_executions, 9);
    assert_eq!(stats.failed, 3);
    assert_eq!(stats.successful, 6);
    assert_eq!(orch.global_stats(), stats);

    let by_agent = orch.stats_by_agent();
    assert_eq!(by_agent["bad"].failures, 3);
    assert_eq!(by_agent["ok"].successes, 3);
    assert_eq!(by_agent["p"].executions, 3);
}

// ---------------------------------------------------------------------------
// Concurrent callers share one orchestrator
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_runs_share_ledger() {
    let orch = Arc::new(
        Orchestrator::builder()
            .agent(desc("a"), reporter())
            .unwrap()
            .agent(desc("b"), reporter())
            .unwrap()
            .depends_on("b", ["a"])
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move {
                orch.run(TaskRequest::new("b", "burst", json!({ "n": i })))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().success);
    }
    assert_eq!(orch.ledger().len(), 40);
    assert_eq!(orch.stats_by_agent()["a"].executions, 20);
}

// ---------------------------------------------------------------------------
// Default catalog with generic handlers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_default_catalog_booking_optimization() {
    let mut builder = default_catalog().into_builder().unwrap();
    for name in builder.unbound_agents() {
        builder = builder.handler(name, reporter());
    }
    let orch = builder.build().unwrap();

    let report = orch
        .execute_workflow("booking_optimization", json!({ "property": "porto-02" }))
        .await
        .unwrap();
    assert_eq!(report.total_steps, 3);
    assert_eq!(report.success_count, 3);

    // demand_forecast (0 deps) + pricing_optimizer (2 deps) + booking_optimizer (2 deps)
    assert_eq!(orch.ledger().len(), 1 + 3 + 3);

    let pricing = &report.results[1];
    assert_eq!(dep_keys(pricing), vec!["demand_forecast", "market_intelligence"]);

    let description = orch.describe("demand_forecast").unwrap();
    assert!(description.dependents.contains(&"pricing_optimizer".to_string()));
    assert!(orch.estimate_workflow("booking_optimization").unwrap().estimated_duration_ms > 0);
}
