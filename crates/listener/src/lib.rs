//! auto-assign trigger event source infrastructure.
//!
//! Turns the GitHub Actions runner environment into a [`pipeline::Invocation`]:
//! `GITHUB_EVENT_NAME` supplies the event name, and the JSON file at
//! `GITHUB_EVENT_PATH` supplies the sub-action and the pull request or issue.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File access and payload deserialization live here. The
//! [`pipeline`] crate sees only [`pipeline::Invocation`] and
//! [`pipeline::EventPayload`].

mod environment;
mod event;

pub use environment::RunnerEnvironment;
pub use event::{load_event, parse_event};

use pipeline::{AutoAssignError, Invocation};

/// Loads the invocation described by `env`.
///
/// # Errors
///
/// Returns [`AutoAssignError::EventError`] if `GITHUB_EVENT_NAME` or
/// `GITHUB_EVENT_PATH` is unset, or the event file cannot be read or decoded.
pub async fn load_invocation(env: &RunnerEnvironment) -> Result<Invocation, AutoAssignError> {
    let event_name = env
        .event_name
        .as_deref()
        .ok_or_else(|| AutoAssignError::event("GITHUB_EVENT_NAME is not set"))?;
    let path = env
        .event_path
        .as_deref()
        .ok_or_else(|| AutoAssignError::event("GITHUB_EVENT_PATH is not set"))?;
    load_event(event_name, path).await
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pipeline::{EventName, EventPayload};

    use super::*;

    fn env_for(event_name: Option<&str>, path: Option<&std::path::Path>) -> RunnerEnvironment {
        RunnerEnvironment {
            event_name: event_name.map(str::to_string),
            event_path: path.map(|p| p.to_path_buf()),
            repository: Some("octo-org/widgets".to_string()),
            api_url: None,
            debug: false,
        }
    }

    #[tokio::test]
    async fn loads_event_file_from_runner_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "action": "edited", "issue": {{ "number": 9, "title": "Docs", "labels": [{{ "name": "docs" }}] }} }}"#
        )
        .unwrap();

        let invocation = load_invocation(&env_for(Some("issues"), Some(file.path())))
            .await
            .unwrap();
        assert_eq!(invocation.trigger.event, EventName::Issues);
        assert!(matches!(invocation.payload, Some(EventPayload::Issue(_))));
    }

    #[tokio::test]
    async fn missing_event_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        let err = load_invocation(&env_for(Some("issues"), Some(&path)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Could not read event file"));
    }

    #[tokio::test]
    async fn unset_event_name_is_an_error() {
        let err = load_invocation(&env_for(None, None)).await.unwrap_err();
        assert!(err.to_string().contains("GITHUB_EVENT_NAME"));
    }
}
