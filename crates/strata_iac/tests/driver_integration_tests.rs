//! Integration tests for the infrastructure driver.
//!
//! The driver runs against the in-memory backend, the native translator and
//! backend-lookup discovery, so every operation goes through real
//! collaborators end to end.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use strata_backend::{
    BackendError, DeploymentLocation, ExecutionContext, InMemoryStackBackend, PropertyMap,
    StackOutput, StackRecord, StaticLocationResolver,
};
use strata_iac::{
    ErrorKind, FailureCode, InfrastructureDriver, InfrastructureError, TaskStatus,
};
use strata_templates::{BackendLookupDiscovery, NativeTemplateTranslator};

const TEMPLATE: &str = r#"
heat_template_version: 2016-10-14
parameters:
  image:
    type: string
  flavor:
    type: string
resources:
  server:
    type: OS::Nova::Server
    properties:
      image: { get_param: image }
      flavor: { get_param: flavor }
"#;

fn driver_with(backend: &InMemoryStackBackend) -> InfrastructureDriver {
    let resolver = StaticLocationResolver::new()
        .with_context(ExecutionContext::new("core", Arc::new(backend.clone())));
    InfrastructureDriver::new(
        Arc::new(resolver),
        Arc::new(NativeTemplateTranslator::new()),
        Arc::new(BackendLookupDiscovery::new()),
    )
}

fn core() -> DeploymentLocation {
    DeploymentLocation::new("core").with_type("Openstack")
}

/// Test create, poll, complete and delete for one stack.
#[tokio::test]
async fn test_full_lifecycle() {
    let backend = InMemoryStackBackend::new().with_next_id("stack-1");
    let driver = driver_with(&backend);

    let mut props = PropertyMap::new();
    props.insert("image".to_string(), json!("ubuntu-22.04"));
    props.insert("flavor".to_string(), json!("m1.small"));
    props.insert("unused".to_string(), json!("dropped"));

    let created = driver.create_infrastructure(TEMPLATE, &props, &core()).await.unwrap();
    assert_eq!(created.infrastructure_id, "stack-1");
    assert_eq!(created.request_id, created.infrastructure_id);

    let forwarded = backend.get_method_calls("create_stack")[0]
        .parameters
        .clone()
        .unwrap();
    assert_eq!(forwarded.len(), 2);
    assert!(!forwarded.contains_key("unused"));

    let task = driver
        .get_infrastructure_task(&created.infrastructure_id, &created.request_id, &core())
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(task.outputs.is_none());

    backend.set_stack(
        StackRecord::new("stack-1", "CREATE_COMPLETE")
            .with_output(StackOutput::new("address", "10.0.0.9")),
    );
    let task = driver
        .get_infrastructure_task("stack-1", "stack-1", &core())
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Complete);
    assert_eq!(
        task.outputs.as_ref().and_then(|o| o.get("address")).map(|s| s.as_str()),
        Some("10.0.0.9")
    );

    let deleted = driver.delete_infrastructure("stack-1", &core()).await.unwrap();
    assert_eq!(deleted.infrastructure_id, "stack-1");
    assert_eq!(deleted.request_id, "stack-1");

    let task = driver
        .get_infrastructure_task("stack-1", "stack-1", &core())
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
}

/// Test the status mapping over every action and phase the backend emits.
#[tokio::test]
async fn test_status_mapping_is_total() {
    let backend = InMemoryStackBackend::new();
    let driver = driver_with(&backend);

    let cases = [
        ("IN_PROGRESS", TaskStatus::InProgress),
        ("COMPLETE", TaskStatus::Complete),
        ("FAILED", TaskStatus::Failed),
    ];

    for action in ["CREATE", "DELETE", "UPDATE"] {
        for (phase, expected) in cases {
            let status = format!("{}_{}", action, phase);
            backend.set_stack(StackRecord::new("1", status.clone()));

            let task = driver.get_infrastructure_task("1", "1", &core()).await.unwrap();
            assert_eq!(task.status, expected, "status {}", status);
            assert_eq!(task.failure_details.is_some(), expected == TaskStatus::Failed);
            assert!(task.outputs.is_none());
        }
    }

    for status in ["", "INIT_COMPLETED", "CREATE_SOMETHING_NEW", "complete"] {
        backend.set_stack(StackRecord::new("1", status));
        let task = driver.get_infrastructure_task("1", "1", &core()).await.unwrap();
        assert_eq!(task.status, TaskStatus::Unknown, "status {:?}", status);
    }
}

/// Test the failed-stack scenarios.
#[tokio::test]
async fn test_failed_stack_details() {
    let backend = InMemoryStackBackend::new()
        .with_stack(StackRecord::new("1", "CREATE_FAILED").with_reason("For the test"))
        .with_stack(StackRecord::new("2", "DELETE_FAILED"));
    let driver = driver_with(&backend);

    let task = driver.get_infrastructure_task("1", "1", &core()).await.unwrap();
    let details = task.failure_details.unwrap();
    assert_eq!(details.failure_code, FailureCode::InfrastructureError);
    assert_eq!(details.description.as_deref(), Some("For the test"));

    let task = driver.get_infrastructure_task("2", "2", &core()).await.unwrap();
    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.failure_details.unwrap().description, None);
}

/// Test that polling unchanged state twice yields equal tasks.
#[tokio::test]
async fn test_polling_is_idempotent() {
    let backend = InMemoryStackBackend::new().with_stack(
        StackRecord::new("1", "UPDATE_COMPLETE")
            .with_output(StackOutput::new("outputA", "valueA")),
    );
    let driver = driver_with(&backend);

    let first = driver.get_infrastructure_task("1", "1", &core()).await.unwrap();
    let second = driver.get_infrastructure_task("1", "1", &core()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(backend.get_method_calls("get_stack").len(), 2);
}

/// Test that the request id is echoed and not used for lookup.
#[tokio::test]
async fn test_request_id_is_echoed() {
    let backend =
        InMemoryStackBackend::new().with_stack(StackRecord::new("1", "CREATE_IN_PROGRESS"));
    let driver = driver_with(&backend);

    let task = driver.get_infrastructure_task("1", "req-9", &core()).await.unwrap();
    assert_eq!(task.infrastructure_id, "1");
    assert_eq!(task.request_id, "req-9");
    assert_eq!(backend.get_method_calls("get_stack")[0].stack_id.as_deref(), Some("1"));
}

/// Test find against an existing stack.
#[tokio::test]
async fn test_find_existing_stack() {
    let backend = InMemoryStackBackend::new().with_stack(
        StackRecord::new("1", "CREATE_COMPLETE")
            .with_name("test")
            .with_output(StackOutput::new("test", "1")),
    );
    let driver = driver_with(&backend);

    let found = driver.find_infrastructure(TEMPLATE, "test", &core()).await.unwrap();

    let mut expected = HashMap::new();
    expected.insert("test".to_string(), "1".to_string());
    assert_eq!(found.infrastructure_id, "1");
    assert_eq!(found.outputs, expected);
}

/// Test that absence and invalid templates stay distinct on find.
#[tokio::test]
async fn test_find_error_kinds() {
    let backend = InMemoryStackBackend::new();
    let driver = driver_with(&backend);

    let missing = driver.find_infrastructure(TEMPLATE, "ghost", &core()).await.unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert!(missing.is_client_error());

    let invalid = driver
        .find_infrastructure("tosca_template", "ghost", &core())
        .await
        .unwrap_err();
    assert_eq!(invalid.kind(), ErrorKind::InvalidTemplate);
    assert_eq!(invalid.to_string(), "Template must be a mapping");
    assert_eq!(backend.call_count(), 1);
}

/// Test that backend failures pass through unchanged.
#[tokio::test]
async fn test_backend_failures_pass_through() {
    let backend = InMemoryStackBackend::new().simulate_failure("connection refused");
    let driver = driver_with(&backend);

    let err = driver
        .create_infrastructure(TEMPLATE, &PropertyMap::new(), &core())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InfrastructureError::Backend(BackendError::Unavailable(ref msg)) if msg == "connection refused"
    ));

    let err = driver.delete_infrastructure("1", &core()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert!(!err.is_client_error());
}

/// Test that an unknown location is a backend error.
#[tokio::test]
async fn test_unknown_location() {
    let driver = driver_with(&InMemoryStackBackend::new());

    let err = driver
        .get_infrastructure_task("1", "1", &DeploymentLocation::new("elsewhere"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InfrastructureError::Backend(BackendError::UnknownLocation(_))
    ));
}

/// Test that one driver can serve concurrent calls.
#[tokio::test]
async fn test_concurrent_creates() {
    let backend = InMemoryStackBackend::new();
    let driver = Arc::new(driver_with(&backend));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let driver = driver.clone();
            tokio::spawn(async move {
                driver
                    .create_infrastructure(TEMPLATE, &PropertyMap::new(), &core())
                    .await
                    .map(|r| r.infrastructure_id)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(backend.stack_count(), 8);
}
