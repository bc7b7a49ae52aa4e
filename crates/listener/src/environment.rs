//! The GitHub Actions runner environment.
//!
//! Built from a lookup function rather than read from the process environment
//! directly, so tests can supply a plain map.

use std::path::PathBuf;

use pipeline::{AutoAssignError, RepositoryId};
use serde::Serialize;

/// Runner variables the action reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerEnvironment {
    /// `GITHUB_EVENT_NAME`
    pub event_name: Option<String>,
    /// `GITHUB_EVENT_PATH`
    pub event_path: Option<PathBuf>,
    /// `GITHUB_REPOSITORY`
    pub repository: Option<String>,
    /// `GITHUB_API_URL`, if set. The REST adapter falls back to the public
    /// endpoint otherwise.
    pub api_url: Option<String>,
    /// `RUNNER_DEBUG=1` or `ACTIONS_STEP_DEBUG=true`.
    pub debug: bool,
}

impl RunnerEnvironment {
    /// Reads every runner variable through `lookup`. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            event_name: get("GITHUB_EVENT_NAME"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            repository: get("GITHUB_REPOSITORY"),
            api_url: get("GITHUB_API_URL"),
            debug: get("RUNNER_DEBUG").is_some_and(|v| v == "1")
                || get("ACTIONS_STEP_DEBUG").is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }

    /// Reads the real process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// The target repository.
    ///
    /// # Errors
    ///
    /// Returns [`AutoAssignError::ConfigurationError`] if `GITHUB_REPOSITORY`
    /// is unset.
    pub fn repository(&self) -> Result<RepositoryId, AutoAssignError> {
        self.repository
            .as_deref()
            .and_then(RepositoryId::new)
            .ok_or_else(|| AutoAssignError::configuration("GITHUB_REPOSITORY is not set"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> RunnerEnvironment {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        RunnerEnvironment::from_lookup(|name| map.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_when_unset() {
        let env = env(&[]);
        assert_eq!(env.event_name, None);
        assert_eq!(env.api_url, None);
        assert!(!env.debug);
        assert!(env.repository().is_err());
    }

    #[test]
    fn reads_runner_variables() {
        let env = env(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_EVENT_PATH", "/home/runner/work/_temp/_github_workflow/event.json"),
            ("GITHUB_REPOSITORY", "octo-org/widgets"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
            ("RUNNER_DEBUG", "1"),
        ]);
        assert_eq!(env.event_name.as_deref(), Some("pull_request"));
        assert_eq!(env.repository().unwrap().as_str(), "octo-org/widgets");
        assert_eq!(env.api_url.as_deref(), Some("https://ghe.example.com/api/v3"));
        assert!(env.debug);
    }

    #[test]
    fn step_debug_secret_enables_debug() {
        assert!(env(&[("ACTIONS_STEP_DEBUG", "TRUE")]).debug);
        assert!(!env(&[("ACTIONS_STEP_DEBUG", "false")]).debug);
    }
}
