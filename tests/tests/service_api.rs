//! Orchestrator service integration tests
//!
//! Exercises the message-passing surface end to end: a spawned service task
//! owns the orchestrator, and every interaction goes through the channel.

use integration_tests::{init_test_logging, three_tier_scenario, DEFAULT_TEST_TIMEOUT};
use mecsim_common::{ClockConfig, Position, TaskCategory, WorkloadConfig};
use mecsim_offload::{
    ComputeNode, Device, DeviceId, NodeId, Orchestrator, OrchestratorMessage,
    OrchestratorResponse, OrchestratorService, PlacementResult, RandomTaskGenerator, TaskSpec,
    DEFAULT_CHANNEL_CAPACITY,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;

fn spawn_service(
    orchestrator: Orchestrator,
) -> (mpsc::Sender<OrchestratorMessage>, JoinHandle<()>) {
    let mut service = OrchestratorService::new(orchestrator);
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
    let handle = tokio::spawn(async move { service.run(rx).await });
    (tx, handle)
}

async fn ask(
    tx: &mpsc::Sender<OrchestratorMessage>,
    build: impl FnOnce(oneshot::Sender<OrchestratorResponse>) -> OrchestratorMessage,
) -> OrchestratorResponse {
    let (resp_tx, resp_rx) = oneshot::channel();
    tx.send(build(resp_tx)).await.expect("Failed to send message");
    timeout(DEFAULT_TEST_TIMEOUT, resp_rx)
        .await
        .expect("Timed out waiting for the service")
        .expect("Service dropped the response channel")
}

/// Test a full scenario run driven entirely over the channel
#[tokio::test]
async fn test_full_run_through_the_service() {
    init_test_logging();

    let scenario = three_tier_scenario();
    let orch = Orchestrator::from_scenario(&scenario).expect("Failed to build orchestrator");
    let (tx, handle) = spawn_service(orch);

    // Run the whole scenario in one batch.
    let response = ask(&tx, |resp_tx| OrchestratorMessage::RunCycles {
        count: 20,
        response_tx: Some(resp_tx),
    })
    .await;
    let reports = match response {
        OrchestratorResponse::Cycles(reports) => reports,
        other => panic!("unexpected response: {other:?}"),
    };
    assert_eq!(reports.len(), 20);
    assert_eq!(reports[0].cycle, 0);
    assert_eq!(reports[19].cycle, 19);

    // The summary agrees with the per-cycle reports.
    let response = ask(&tx, |resp_tx| OrchestratorMessage::QuerySummary {
        response_tx: resp_tx,
    })
    .await;
    let summary = match response {
        OrchestratorResponse::Summary(summary) => summary,
        other => panic!("unexpected response: {other:?}"),
    };
    assert_eq!(summary.cycles_run, 20);
    let generated: u64 = reports.iter().map(|r| r.generated).sum();
    assert_eq!(summary.tasks_generated, generated);

    drop(tx);
    handle.await.expect("Service task panicked");
}

/// Test building a topology and placing a task over messages alone
#[tokio::test]
async fn test_topology_built_over_messages() {
    init_test_logging();

    let clock = ClockConfig {
        cycle_duration_ms: 100,
        total_cycles: 10,
    };
    let generator = RandomTaskGenerator::new(&WorkloadConfig::default(), 0)
        .expect("Failed to build generator");
    let orch = Orchestrator::new(clock, Box::new(generator));
    let (tx, handle) = spawn_service(orch);

    // Register a device and an edge node covering it.
    let response = ask(&tx, |resp_tx| OrchestratorMessage::RegisterDevice {
        device: Device::new(DeviceId::new(1), Position::new(0.0, 0.0)),
        response_tx: Some(resp_tx),
    })
    .await;
    assert!(matches!(response, OrchestratorResponse::Ok));

    let edge = ComputeNode::edge(
        NodeId::new(10),
        "edge-10",
        Position::new(3.0, 4.0),
        10.0,
        10.0,
    )
    .expect("Failed to build edge node");
    let response = ask(&tx, |resp_tx| OrchestratorMessage::RegisterNode {
        node: edge,
        response_tx: Some(resp_tx),
    })
    .await;
    assert!(matches!(response, OrchestratorResponse::Ok));

    // The submitted task lands on the edge node 5 units away.
    let response = ask(&tx, |resp_tx| OrchestratorMessage::SubmitTask {
        device_id: DeviceId::new(1),
        spec: TaskSpec::new(TaskCategory::InteractiveVideo, 8.0, 4.0, 50.0),
        response_tx: Some(resp_tx),
    })
    .await;
    match response {
        OrchestratorResponse::Placement(placement) => {
            assert_eq!(placement, PlacementResult::Assigned(NodeId::new(10)));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    drop(tx);
    handle.await.expect("Service task panicked");
}

/// Test that a run over the service matches a direct run of the same scenario
#[tokio::test]
async fn test_service_run_matches_direct_run() {
    init_test_logging();

    let scenario = three_tier_scenario();

    // Direct: drive the orchestrator in this task.
    let mut direct = Orchestrator::from_scenario(&scenario).expect("Failed to build orchestrator");
    direct.run(20);
    let direct_summary = direct.summary();

    // Service: the identical scenario behind the channel.
    let orch = Orchestrator::from_scenario(&scenario).expect("Failed to build orchestrator");
    let (tx, handle) = spawn_service(orch);

    let response = ask(&tx, |resp_tx| OrchestratorMessage::RunCycles {
        count: 20,
        response_tx: Some(resp_tx),
    })
    .await;
    assert!(matches!(response, OrchestratorResponse::Cycles(_)));

    let response = ask(&tx, |resp_tx| OrchestratorMessage::QuerySummary {
        response_tx: resp_tx,
    })
    .await;
    let service_summary = match response {
        OrchestratorResponse::Summary(summary) => summary,
        other => panic!("unexpected response: {other:?}"),
    };
    assert_eq!(service_summary, direct_summary);

    drop(tx);
    handle.await.expect("Service task panicked");
}

/// Test that a bad submission surfaces as an error response, not a crash
#[tokio::test]
async fn test_unknown_device_reported_over_the_channel() {
    init_test_logging();

    let scenario = three_tier_scenario();
    let orch = Orchestrator::from_scenario(&scenario).expect("Failed to build orchestrator");
    let (tx, handle) = spawn_service(orch);

    let response = ask(&tx, |resp_tx| OrchestratorMessage::SubmitTask {
        device_id: DeviceId::new(4242),
        spec: TaskSpec::new(TaskCategory::SensorTelemetry, 0.2, 0.3, 200.0),
        response_tx: Some(resp_tx),
    })
    .await;
    match response {
        OrchestratorResponse::Error { message } => {
            assert!(message.contains("D-4242"), "message was: {message}");
        }
        other => panic!("unexpected response: {other:?}"),
    }

    // The service is still healthy afterwards.
    let response = ask(&tx, |resp_tx| OrchestratorMessage::QuerySummary {
        response_tx: resp_tx,
    })
    .await;
    assert!(matches!(response, OrchestratorResponse::Summary(_)));

    drop(tx);
    handle.await.expect("Service task panicked");
}
