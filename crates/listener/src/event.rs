//! Decoding of the workflow event file (`GITHUB_EVENT_PATH`).

use std::path::Path;

use pipeline::{
    AutoAssignError, EventPayload, Invocation, IssueNumber, IssuePayload, LabelName, Login,
    PullRequestPayload, Trigger,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EventFile {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    pull_request: Option<PullRequestObject>,
    #[serde(default)]
    issue: Option<IssueObject>,
}

#[derive(Debug, Deserialize)]
struct PullRequestObject {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    labels: Vec<LabelObject>,
    #[serde(default)]
    user: Option<UserObject>,
}

#[derive(Debug, Deserialize)]
struct IssueObject {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    labels: Vec<LabelObject>,
    #[serde(default)]
    user: Option<UserObject>,
}

#[derive(Debug, Deserialize)]
struct LabelObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserObject {
    login: String,
}

fn labels(objects: Vec<LabelObject>) -> Vec<LabelName> {
    objects
        .into_iter()
        .filter_map(|l| LabelName::new(l.name))
        .collect()
}

fn author(user: Option<UserObject>) -> Option<Login> {
    user.and_then(|u| Login::new(u.login))
}

/// Decodes an event file body into an [`Invocation`].
///
/// A body with neither `pull_request` nor `issue` yields an invocation without
/// payload; `pull_request` wins when both are present.
///
/// # Errors
///
/// Returns [`AutoAssignError::EventError`] if the body is not valid JSON or a
/// payload object lacks its `number`.
pub fn parse_event(event_name: &str, body: &str) -> Result<Invocation, AutoAssignError> {
    let file: EventFile = serde_json::from_str(body)
        .map_err(|e| AutoAssignError::event(format!("Malformed event payload: {e}")))?;

    let trigger = Trigger::new(event_name, file.action.as_deref().unwrap_or_default());

    let payload = match (file.pull_request, file.issue) {
        (Some(pr), _) => Some(EventPayload::PullRequest(PullRequestPayload {
            number: IssueNumber::new(pr.number),
            title: pr.title,
            draft: pr.draft,
            labels: labels(pr.labels),
            author: author(pr.user),
        })),
        (None, Some(issue)) => Some(EventPayload::Issue(IssuePayload {
            number: IssueNumber::new(issue.number),
            title: issue.title,
            labels: labels(issue.labels),
            author: author(issue.user),
        })),
        (None, None) => None,
    };

    debug!(event = %trigger.event, action = %trigger.action, has_payload = payload.is_some(), "decoded event");
    Ok(Invocation::new(trigger, payload))
}

/// Reads and decodes the event file at `path`.
///
/// # Errors
///
/// Returns [`AutoAssignError::EventError`] if the file cannot be read or
/// decoded.
pub async fn load_event(event_name: &str, path: &Path) -> Result<Invocation, AutoAssignError> {
    let body = tokio::fs::read_to_string(path).await.map_err(|e| {
        AutoAssignError::event(format!(
            "Could not read event file '{}': {e}",
            path.display()
        ))
    })?;
    parse_event(event_name, &body)
}

#[cfg(test)]
mod tests {
    use pipeline::{EventAction, EventName};

    use super::*;

    const PULL_REQUEST_OPENED: &str = r#"{
        "action": "opened",
        "number": 12,
        "pull_request": {
            "number": 12,
            "title": "Add widget",
            "draft": true,
            "labels": [{ "id": 1, "name": "feature" }, { "id": 2, "name": "needs review" }],
            "user": { "login": "octocat", "id": 583231 }
        },
        "repository": { "full_name": "octo-org/widgets" }
    }"#;

    #[test]
    fn pull_request_event_yields_pull_request_payload() {
        let invocation = parse_event("pull_request", PULL_REQUEST_OPENED).unwrap();
        assert_eq!(invocation.trigger.event, EventName::PullRequest);
        assert_eq!(invocation.trigger.action, EventAction::Opened);

        let Some(EventPayload::PullRequest(pr)) = invocation.payload else {
            panic!("expected a pull request payload");
        };
        assert_eq!(pr.number.as_u64(), 12);
        assert!(pr.draft);
        assert_eq!(
            pr.labels,
            vec![
                LabelName::new("feature").unwrap(),
                LabelName::new("needs review").unwrap()
            ]
        );
        assert_eq!(pr.author, Login::new("octocat"));
    }

    #[test]
    fn issue_event_yields_issue_payload() {
        let body = r#"{ "action": "labeled", "issue": { "number": 5, "title": "Broken", "labels": [] } }"#;
        let invocation = parse_event("issues", body).unwrap();
        let Some(EventPayload::Issue(issue)) = invocation.payload else {
            panic!("expected an issue payload");
        };
        assert_eq!(issue.number.as_u64(), 5);
        assert_eq!(issue.author, None);
    }

    #[test]
    fn draft_defaults_to_false() {
        let body = r#"{ "action": "opened", "pull_request": { "number": 3, "title": "x" } }"#;
        let invocation = parse_event("pull_request_target", body).unwrap();
        assert!(!invocation.payload.unwrap().is_draft());
    }

    #[test]
    fn unknown_event_has_unsupported_trigger() {
        let invocation = parse_event("push", r#"{ "ref": "refs/heads/main" }"#).unwrap();
        assert_eq!(invocation.trigger.event, EventName::Other("push".to_string()));
        assert!(invocation.payload.is_none());
        assert!(invocation.subject().is_none());
    }

    #[test]
    fn malformed_json_is_an_event_error() {
        let err = parse_event("pull_request", "{ not json").unwrap_err();
        assert!(matches!(err, AutoAssignError::EventError { .. }));
    }

    #[test]
    fn payload_without_number_is_an_event_error() {
        let err = parse_event("issues", r#"{ "action": "opened", "issue": { "title": "x" } }"#)
            .unwrap_err();
        assert!(matches!(err, AutoAssignError::EventError { .. }));
    }
}
