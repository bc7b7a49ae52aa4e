//! auto-assign action entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Wire observability**: configure `tracing-subscriber` from `RUST_LOG`
//!    or the runner's debug switch. Every `tracing` span and event emitted by
//!    the workspace crates flows through this subscriber.
//! 2. **Load the event**: read the runner environment and the event file via
//!    [`listener`]. Events the action does not handle end here, silently.
//! 3. **Parse configuration**: read the action inputs into a
//!    [`pipeline::Configuration`].
//! 4. **Screen**: apply the draft and skip-keyword guards, which need no
//!    GitHub data. A skip here needs neither a token nor a repository.
//! 5. **Construct infrastructure**: create the [`github::GitHubClient`] and
//!    run the [`pipeline::Pipeline`] against it.
//! 6. **Report**: exit 0 on completion (skips included). On any error, log it,
//!    write an `::error::` workflow command and exit 1.

mod observability;
mod workflow;

use std::process::ExitCode;

use anyhow::Context;
use github::GitHubClient;
use listener::RunnerEnvironment;
use pipeline::{Configuration, Outcome, Pipeline};
use tracing::{debug, error, info};

use crate::observability::LogFormat;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env = RunnerEnvironment::from_process();
    let format = LogFormat::parse(std::env::var("AUTO_ASSIGN_LOG_FORMAT").ok().as_deref());
    observability::init(env.debug, format);

    match run(&env, |name| std::env::var(name).ok()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("An error has occurred: {e}");
            error!(error = ?e, "auto-assign failed");
            println!("{}", workflow::error_command(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

/// Runs one invocation. `lookup` reads the process environment for the action
/// inputs and the token.
///
/// The token and the repository are only required once the guards that need
/// no GitHub data have let the event through.
async fn run<F>(env: &RunnerEnvironment, lookup: F) -> anyhow::Result<Outcome>
where
    F: Fn(&str) -> Option<String>,
{
    let invocation = listener::load_invocation(env)
        .await
        .context("Failed to load the triggering event")?;

    debug!("event: {}", invocation.trigger.event);
    debug!("action: {}", invocation.trigger.action);

    if invocation.subject().is_none() {
        debug!("event is not handled by this action");
        return Ok(Outcome::NotApplicable);
    }

    let config = Configuration::from_inputs(|name| workflow::read_input(&lookup, name))?;

    let outcome = match invocation.screen(&config) {
        Some(outcome) => outcome,
        None => {
            let token = workflow::read_token(&lookup).context(
                "No GitHub token: set the GITHUB_TOKEN input or environment variable",
            )?;
            let repository = env.repository()?;
            let api_url = env.api_url.as_deref().unwrap_or(github::DEFAULT_API_URL);
            let client = GitHubClient::new(api_url, &token, &repository)?;

            Pipeline::new(&client).run(&invocation, &config).await?
        }
    };

    info!(
        invocation = %invocation.id,
        action = %serde_json::to_string(&outcome.action())?,
        "auto-assign finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use pipeline::{Action, SkipReason};
    use tempfile::NamedTempFile;

    use super::*;

    fn event_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn runner(file: &NamedTempFile, repository: Option<&str>) -> RunnerEnvironment {
        RunnerEnvironment {
            event_name: Some("pull_request".to_string()),
            event_path: Some(file.path().to_path_buf()),
            repository: repository.map(str::to_string),
            api_url: None,
            debug: false,
        }
    }

    fn inputs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[tokio::test]
    async fn draft_pull_request_is_skipped_without_a_token() {
        let file = event_file(
            r#"{"action":"opened","pull_request":{"number":1,"title":"x","draft":true}}"#,
        );
        let outcome = run(&runner(&file, None), inputs(&[("INPUT_REVIEWERS", "alice")]))
            .await
            .unwrap();
        assert_eq!(outcome.action(), Action::Skip(SkipReason::draft()));
    }

    #[tokio::test]
    async fn skip_keyword_is_skipped_without_a_token() {
        let file = event_file(
            r#"{"action":"opened","pull_request":{"number":1,"title":"WIP: x","draft":false}}"#,
        );
        let outcome = run(
            &runner(&file, Some("not-a-repository")),
            inputs(&[("INPUT_SKIPKEYWORDS", "wip")]),
        )
        .await
        .unwrap();
        assert_eq!(outcome.action(), Action::Skip(SkipReason::skip_keywords()));
    }

    #[tokio::test]
    async fn unhandled_action_needs_no_inputs() {
        let file = event_file(r#"{"action":"closed","pull_request":{"number":1,"title":"x"}}"#);
        let outcome = run(&runner(&file, None), inputs(&[("INPUT_SKIPDRAFT", "maybe")]))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::NotApplicable);
    }

    #[tokio::test]
    async fn missing_token_fails_once_github_is_needed() {
        let file = event_file(
            r#"{"action":"opened","pull_request":{"number":1,"title":"x","draft":false}}"#,
        );
        let err = run(&runner(&file, Some("octo-org/widgets")), inputs(&[]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No GitHub token"));
    }
}
