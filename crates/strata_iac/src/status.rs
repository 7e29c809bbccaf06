//! Backend stack status normalization.
//!
//! Backend statuses have the form `<ACTION>_<PHASE>`, e.g.
//! `CREATE_IN_PROGRESS` or `DELETE_FAILED`. Only the phase decides the task
//! status, so new actions need no changes here. Anything without a known
//! phase suffix normalizes to [`TaskStatus::Unknown`].

use tracing::warn;

use strata_backend::StackRecord;

use crate::model::{FailureDetails, InfrastructureTask, TaskStatus};

/// Progress phase of a backend stack status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackPhase {
    InProgress,
    Complete,
    Failed,
}

impl StackPhase {
    const SUFFIXES: [(&'static str, StackPhase); 3] = [
        ("_IN_PROGRESS", StackPhase::InProgress),
        ("_COMPLETE", StackPhase::Complete),
        ("_FAILED", StackPhase::Failed),
    ];

    pub fn task_status(&self) -> TaskStatus {
        match self {
            StackPhase::InProgress => TaskStatus::InProgress,
            StackPhase::Complete => TaskStatus::Complete,
            StackPhase::Failed => TaskStatus::Failed,
        }
    }
}

/// A backend status split into action and phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackStatus {
    pub action: String,
    pub phase: StackPhase,
}

impl StackStatus {
    /// Split a raw status string. Returns `None` for anything that is not a
    /// non-empty action followed by a known phase suffix.
    pub fn parse(raw: &str) -> Option<Self> {
        StackPhase::SUFFIXES.iter().find_map(|(suffix, phase)| {
            raw.strip_suffix(suffix)
                .filter(|action| !action.is_empty())
                .map(|action| StackStatus {
                    action: action.to_string(),
                    phase: *phase,
                })
        })
    }
}

/// Map a raw backend status to a task status.
pub fn task_status(raw: &str) -> TaskStatus {
    StackStatus::parse(raw)
        .map(|s| s.phase.task_status())
        .unwrap_or(TaskStatus::Unknown)
}

/// Build the task snapshot for a stack.
///
/// Failure details are only attached to failed stacks and outputs are only
/// read from complete ones.
pub fn task_from_stack(
    record: &StackRecord,
    infrastructure_id: impl Into<String>,
    request_id: impl Into<String>,
) -> InfrastructureTask {
    let status = task_status(&record.stack_status);

    let (failure_details, outputs) = match status {
        TaskStatus::Failed => (
            Some(FailureDetails::infrastructure_error(
                record.stack_status_reason.clone(),
            )),
            None,
        ),
        TaskStatus::Complete => (None, record.output_map()),
        TaskStatus::InProgress => (None, None),
        TaskStatus::Unknown => {
            warn!(
                "Unrecognised stack status '{}' for stack {}",
                record.stack_status, record.id
            );
            (None, None)
        }
    };

    InfrastructureTask {
        infrastructure_id: infrastructure_id.into(),
        request_id: request_id.into(),
        status,
        failure_details,
        outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FailureCode;
    use strata_backend::StackOutput;

    const ACTIONS: [&str; 3] = ["CREATE", "DELETE", "UPDATE"];

    #[test]
    fn test_parse_splits_action_and_phase() {
        let status = StackStatus::parse("CREATE_IN_PROGRESS").unwrap();
        assert_eq!(status.action, "CREATE");
        assert_eq!(status.phase, StackPhase::InProgress);

        let status = StackStatus::parse("ROLLBACK_FAILED").unwrap();
        assert_eq!(status.action, "ROLLBACK");
        assert_eq!(status.phase, StackPhase::Failed);
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!(StackStatus::parse("COMPLETE").is_none());
        assert!(StackStatus::parse("_FAILED").is_none());
        assert!(StackStatus::parse("CREATE_PENDING").is_none());
        assert!(StackStatus::parse("").is_none());
        assert!(StackStatus::parse("create_complete").is_none());
    }

    #[test]
    fn test_every_action_phase_pair_maps() {
        for action in ACTIONS {
            assert_eq!(task_status(&format!("{}_IN_PROGRESS", action)), TaskStatus::InProgress);
            assert_eq!(task_status(&format!("{}_COMPLETE", action)), TaskStatus::Complete);
            assert_eq!(task_status(&format!("{}_FAILED", action)), TaskStatus::Failed);
        }
    }

    #[test]
    fn test_new_actions_need_no_changes() {
        assert_eq!(task_status("SUSPEND_COMPLETE"), TaskStatus::Complete);
        assert_eq!(task_status("SNAPSHOT_IN_PROGRESS"), TaskStatus::InProgress);
        assert_eq!(task_status("CHECK_FAILED"), TaskStatus::Failed);
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        assert_eq!(task_status("INIT"), TaskStatus::Unknown);
        assert_eq!(task_status("CREATE_PAUSED"), TaskStatus::Unknown);

        let task = task_from_stack(
            &StackRecord::new("1", "CREATE_PAUSED")
                .with_reason("paused")
                .with_output(StackOutput::new("a", "b")),
            "1",
            "1",
        );
        assert_eq!(task.status, TaskStatus::Unknown);
        assert!(task.failure_details.is_none());
        assert!(task.outputs.is_none());
    }

    #[test]
    fn test_in_progress_ignores_outputs_and_reason() {
        for action in ACTIONS {
            let record = StackRecord::new("1", format!("{}_IN_PROGRESS", action))
                .with_reason("working")
                .with_output(StackOutput::new("a", "b"));
            let task = task_from_stack(&record, "1", "1");

            assert_eq!(task.status, TaskStatus::InProgress);
            assert!(task.failure_details.is_none());
            assert!(task.outputs.is_none());
        }
    }

    #[test]
    fn test_complete_folds_outputs() {
        let record = StackRecord::new("1", "UPDATE_COMPLETE")
            .with_output(StackOutput::new("outputA", "valueA"))
            .with_output(StackOutput::new("outputB", "valueB"));
        let task = task_from_stack(&record, "1", "2");

        assert_eq!(task.status, TaskStatus::Complete);
        assert!(task.failure_details.is_none());
        assert_eq!(task.request_id, "2");
        let outputs = task.outputs.unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs["outputA"], "valueA");
        assert_eq!(outputs["outputB"], "valueB");
    }

    #[test]
    fn test_complete_without_outputs_is_none() {
        let empty = StackRecord::new("1", "CREATE_COMPLETE").with_outputs(Vec::new());
        assert!(task_from_stack(&empty, "1", "1").outputs.is_none());

        let missing = StackRecord::new("1", "DELETE_COMPLETE");
        assert!(task_from_stack(&missing, "1", "1").outputs.is_none());
    }

    #[test]
    fn test_failed_carries_reason_verbatim() {
        for action in ACTIONS {
            let record = StackRecord::new("1", format!("{}_FAILED", action))
                .with_reason("For the test")
                .with_output(StackOutput::new("a", "b"));
            let task = task_from_stack(&record, "1", "1");

            assert_eq!(task.status, TaskStatus::Failed);
            let details = task.failure_details.unwrap();
            assert_eq!(details.failure_code, FailureCode::InfrastructureError);
            assert_eq!(details.description.as_deref(), Some("For the test"));
            assert!(task.outputs.is_none());
        }
    }

    #[test]
    fn test_failed_without_reason_has_no_description() {
        let task = task_from_stack(&StackRecord::new("1", "CREATE_FAILED"), "1", "1");
        let details = task.failure_details.unwrap();
        assert_eq!(details.failure_code, FailureCode::InfrastructureError);
        assert!(details.description.is_none());
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let record = StackRecord::new("1", "CREATE_COMPLETE")
            .with_output(StackOutput::new("outputA", "valueA"));
        assert_eq!(task_from_stack(&record, "1", "1"), task_from_stack(&record, "1", "1"));
    }
}
