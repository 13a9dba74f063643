// End-to-end scenarios wiring the real engine against real subprocesses.

use std::sync::Arc;

use oj_core::application::{Engine, EngineConfig, FlowStore, JobStore};
use oj_core::domain::{Flow, JobState, Step};
use oj_core::port::id_provider::UuidProvider;
use oj_core::port::time_provider::SystemTimeProvider;
use oj_process::SubprocessStepRunner;

async fn start_engine(flows: Vec<Flow>) -> Engine {
    let flow_store = FlowStore::new();
    for flow in flows {
        flow_store.create(flow).await.unwrap();
    }
    Engine::start(
        flow_store,
        JobStore::new(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(SubprocessStepRunner::new()),
        EngineConfig::default(),
    )
}

async fn wait_for_terminal(engine: &Engine, job_id: &str) -> oj_core::domain::JobInfo {
    for _ in 0..200 {
        if let Some(job) = engine.get_job(job_id).await {
            if job.state.is_terminal() {
                return job;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("job {job_id} did not reach a terminal state in time");
}

// S1: a two-step flow runs to completion, recording input/output per step.
#[tokio::test]
async fn multi_step_flow_succeeds() {
    let flow = Flow::new(
        "p.foo",
        vec![
            Step::new(vec!["true".to_string()]),
            Step::new(vec!["echo".to_string(), "hi".to_string()]),
        ],
        None,
    );
    let engine = start_engine(vec![flow]).await;

    let job_id = engine.start_job("p.foo").await.unwrap();
    assert!(job_id.starts_with("p.foo:"));

    let job = wait_for_terminal(&engine, &job_id).await;
    assert_eq!(job.state, JobState::Succeeded);
    assert_eq!(job.steps.len(), 2);
    assert_eq!(job.steps[0].input, "true");
    assert_eq!(job.steps[1].input, "echo hi");
    assert_eq!(String::from_utf8_lossy(&job.steps[1].output).trim(), "hi");
}

// S2: a failing command marks the job Failed with an annotated error banner.
#[tokio::test]
async fn failing_step_marks_job_failed() {
    let flow = Flow::new("p.bad", vec![Step::new(vec!["false".to_string()])], None);
    let engine = start_engine(vec![flow]).await;

    let job_id = engine.start_job("p.bad").await.unwrap();
    let job = wait_for_terminal(&engine, &job_id).await;

    assert_eq!(job.state, JobState::Failed);
    assert!(String::from_utf8_lossy(&job.steps[0].output).starts_with("Step failed with error:\n  "));
}

// S3: an empty step fails without spawning anything.
#[tokio::test]
async fn empty_step_fails() {
    let flow = Flow::new("p.empty", vec![Step::new(vec![])], None);
    let engine = start_engine(vec![flow]).await;

    let job_id = engine.start_job("p.empty").await.unwrap();
    let job = wait_for_terminal(&engine, &job_id).await;

    assert_eq!(job.state, JobState::Failed);
    assert!(String::from_utf8_lossy(&job.steps[0].output).contains("Step is empty"));
}

// S4: starting an unknown flow is rejected without creating a job.
#[tokio::test]
async fn unknown_flow_is_rejected() {
    let engine = start_engine(vec![]).await;
    let err = engine.start_job("nonexistent").await.unwrap_err();
    assert_eq!(
        err,
        oj_core::application::EngineError::FlowNotFound("nonexistent".into())
    );
}

// S6: concurrent start_job calls for the same flow each get a distinct,
// independently resolvable job.
#[tokio::test]
async fn concurrent_starts_are_independent() {
    let flow = Flow::new("p.par", vec![Step::new(vec!["true".to_string()])], None);
    let engine = Arc::new(start_engine(vec![flow]).await);

    let mut handles = Vec::new();
    for _ in 0..12 {
        let engine = engine.clone();
        handles.push(tokio::spawn(
            async move { engine.start_job("p.par").await.unwrap() },
        ));
    }

    let mut ids = std::collections::HashSet::new();
    for h in handles {
        ids.insert(h.await.unwrap());
    }
    assert_eq!(ids.len(), 12);

    for id in ids {
        let job = wait_for_terminal(&engine, &id).await;
        assert_eq!(job.state, JobState::Succeeded);
        assert_eq!(job.steps.len(), 1);
    }
}
