//! REST request and response bodies.
//!
//! Only the fields the adapter reads are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

/// `GET /repos/{owner}/{repo}/issues/{number}`
#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    #[serde(default)]
    pub assignees: Vec<UserRef>,
}

/// `GET /repos/{owner}/{repo}/pulls/{number}/requested_reviewers`
#[derive(Debug, Clone, Deserialize)]
pub struct RequestedReviewersResponse {
    #[serde(default)]
    pub users: Vec<UserRef>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// Error body GitHub returns with 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// `POST /repos/{owner}/{repo}/pulls/{number}/requested_reviewers`
#[derive(Debug, Clone, Serialize)]
pub struct RequestReviewersBody {
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
}

/// `POST /repos/{owner}/{repo}/issues/{number}/assignees`
#[derive(Debug, Clone, Serialize)]
pub struct AddAssigneesBody {
    pub assignees: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn issue_response_reads_assignees_and_ignores_other_fields() {
        let body = json!({
            "number": 7,
            "title": "Widget broken",
            "assignees": [{ "login": "alice", "id": 1 }, { "login": "bob", "id": 2 }],
            "labels": [{ "name": "bug" }]
        });
        let issue: IssueResponse = serde_json::from_value(body).unwrap();
        let logins: Vec<&str> = issue.assignees.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob"]);
    }

    #[test]
    fn missing_assignees_default_to_empty() {
        let issue: IssueResponse = serde_json::from_value(json!({ "number": 7 })).unwrap();
        assert!(issue.assignees.is_empty());
    }

    #[test]
    fn requested_reviewers_reads_users_and_team_slugs() {
        let body = json!({
            "users": [{ "login": "alice" }],
            "teams": [{ "name": "Core Team", "slug": "core-team" }]
        });
        let requested: RequestedReviewersResponse = serde_json::from_value(body).unwrap();
        assert_eq!(requested.users[0].login, "alice");
        assert_eq!(requested.teams[0].slug, "core-team");
    }

    #[test]
    fn request_reviewers_body_shape() {
        let body = RequestReviewersBody {
            reviewers: vec!["alice".to_string()],
            team_reviewers: vec![],
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "reviewers": ["alice"], "team_reviewers": [] })
        );
    }
}
