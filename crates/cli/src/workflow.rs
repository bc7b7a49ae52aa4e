//! GitHub Actions workflow commands and input naming.
//!
//! The runner exposes action inputs as `INPUT_<NAME>` variables and reads
//! `::command::` lines from stdout.

/// Environment variable that carries the action input `name`.
///
/// Mirrors the runner's convention: spaces become `_` and the name is
/// upper-cased (`numberOfReviewers` → `INPUT_NUMBEROFREVIEWERS`).
pub fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Reads the action input `name` through the environment `lookup`.
pub fn read_input<F>(lookup: F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&input_variable(name))
}

/// The token for the REST API: the `GITHUB_TOKEN` input, or the
/// `GITHUB_TOKEN` variable when the input is blank.
pub fn read_token<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    read_input(&lookup, "GITHUB_TOKEN")
        .filter(|t| !t.trim().is_empty())
        .or_else(|| lookup("GITHUB_TOKEN"))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// An `::error::` command that marks the step as failed in the job log.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_variables_are_upper_cased() {
        assert_eq!(input_variable("numberOfReviewers"), "INPUT_NUMBEROFREVIEWERS");
        assert_eq!(input_variable("GITHUB_TOKEN"), "INPUT_GITHUB_TOKEN");
        assert_eq!(input_variable("skip draft"), "INPUT_SKIP_DRAFT");
    }

    #[test]
    fn token_input_wins_over_environment_variable() {
        let lookup = |name: &str| match name {
            "INPUT_GITHUB_TOKEN" => Some("ghs_input".to_string()),
            "GITHUB_TOKEN" => Some("ghs_env".to_string()),
            _ => None,
        };
        assert_eq!(read_token(lookup).as_deref(), Some("ghs_input"));
    }

    #[test]
    fn blank_token_input_falls_back_to_environment_variable() {
        let lookup = |name: &str| match name {
            "INPUT_GITHUB_TOKEN" => Some("  ".to_string()),
            "GITHUB_TOKEN" => Some("ghs_env\n".to_string()),
            _ => None,
        };
        assert_eq!(read_token(lookup).as_deref(), Some("ghs_env"));
        assert_eq!(read_token(|_| None), None);
    }

    #[test]
    fn error_command_escapes_newlines_and_percent() {
        assert_eq!(
            error_command("100% failed\nsee log"),
            "::error::100%25 failed%0Asee log"
        );
    }
}
