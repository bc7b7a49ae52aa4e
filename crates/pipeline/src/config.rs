//! Action configuration and input parsing.
//!
//! [`Configuration`] is read once per invocation. The parser never touches the
//! process environment itself: callers hand in a lookup function that maps an
//! input name (e.g. `"numberOfReviewers"`) to its raw value, which keeps the
//! parser testable with a plain `HashMap`.
//!
//! ## Input types
//!
//! | Type | Accepted values |
//! |------|-----------------|
//! | boolean | `true`, `True`, `TRUE`, `false`, `False`, `FALSE` |
//! | int | non-negative decimal integer |
//! | words | separated by whitespace and/or commas |
//! | stringArray | a JSON array of strings, or items separated by newlines and/or commas |
//!
//! Blank values are treated as absent and fall back to the default.

use serde::Serialize;

use crate::{AutoAssignError, LabelName, Login, ReviewerCandidate, SelectionLimit};

/// Immutable per-invocation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Skip draft pull requests. Defaults to `true`.
    pub skip_draft: bool,
    /// Request reviews at all. Defaults to `true`.
    pub add_reviewers: bool,
    /// Assign users at all. Defaults to `true`.
    pub add_assignees: bool,
    pub reviewers: Vec<ReviewerCandidate>,
    pub assignees: Vec<Login>,
    pub number_of_reviewers: SelectionLimit,
    pub number_of_assignees: SelectionLimit,
    /// Case-insensitive title substrings that cause a skip.
    pub skip_keywords: Vec<String>,
    pub include_labels: Vec<LabelName>,
    pub exclude_labels: Vec<LabelName>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            skip_draft: true,
            add_reviewers: true,
            add_assignees: true,
            reviewers: Vec::new(),
            assignees: Vec::new(),
            number_of_reviewers: SelectionLimit::default(),
            number_of_assignees: SelectionLimit::default(),
            skip_keywords: Vec::new(),
            include_labels: Vec::new(),
            exclude_labels: Vec::new(),
        }
    }
}

impl Configuration {
    /// Parses every input through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`AutoAssignError::ConfigurationError`] if a boolean or integer
    /// input holds a value of the wrong type.
    pub fn from_inputs<F>(lookup: F) -> Result<Self, AutoAssignError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let inputs = Inputs { lookup };
        let defaults = Self::default();

        Ok(Self {
            skip_draft: inputs.boolean("skipDraft")?.unwrap_or(defaults.skip_draft),
            add_reviewers: inputs
                .boolean("addReviewers")?
                .unwrap_or(defaults.add_reviewers),
            add_assignees: inputs
                .boolean("addAssignees")?
                .unwrap_or(defaults.add_assignees),
            reviewers: inputs
                .words("reviewers")
                .iter()
                .filter_map(|w| ReviewerCandidate::parse(w))
                .collect(),
            assignees: inputs
                .words("assignees")
                .into_iter()
                .filter_map(Login::new)
                .collect(),
            number_of_reviewers: inputs
                .int("numberOfReviewers")?
                .unwrap_or(defaults.number_of_reviewers),
            number_of_assignees: inputs
                .int("numberOfAssignees")?
                .unwrap_or(defaults.number_of_assignees),
            skip_keywords: inputs.words("skipKeywords"),
            include_labels: inputs
                .string_array("includeLabels")?
                .into_iter()
                .filter_map(LabelName::new)
                .collect(),
            exclude_labels: inputs
                .string_array("excludeLabels")?
                .into_iter()
                .filter_map(LabelName::new)
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Typed readers over the raw lookup
// ---------------------------------------------------------------------------

struct Inputs<F> {
    lookup: F,
}

impl<F> Inputs<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn boolean(&self, name: &str) -> Result<Option<bool>, AutoAssignError> {
        let Some(value) = self.raw(name) else {
            return Ok(None);
        };
        match value.as_str() {
            "true" | "True" | "TRUE" => Ok(Some(true)),
            "false" | "False" | "FALSE" => Ok(Some(false)),
            _ => Err(AutoAssignError::configuration(format!(
                "Input '{name}' must be one of true|True|TRUE|false|False|FALSE, got '{value}'"
            ))),
        }
    }

    fn int(&self, name: &str) -> Result<Option<SelectionLimit>, AutoAssignError> {
        let Some(value) = self.raw(name) else {
            return Ok(None);
        };
        value
            .parse::<u32>()
            .map(|n| Some(SelectionLimit::new(n)))
            .map_err(|_| {
                AutoAssignError::configuration(format!(
                    "Input '{name}' must be a non-negative integer, got '{value}'"
                ))
            })
    }

    fn words(&self, name: &str) -> Vec<String> {
        self.raw(name)
            .map(|value| {
                value
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn string_array(&self, name: &str) -> Result<Vec<String>, AutoAssignError> {
        let Some(value) = self.raw(name) else {
            return Ok(Vec::new());
        };

        if value.starts_with('[') {
            let items: Vec<String> = serde_json::from_str(&value).map_err(|e| {
                AutoAssignError::configuration(format!(
                    "Input '{name}' is not a valid JSON array of strings: {e}"
                ))
            })?;
            return Ok(items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect());
        }

        Ok(value
            .split(|c: char| c == '\n' || c == ',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::TeamSlug;

    fn parse(pairs: &[(&str, &str)]) -> Result<Configuration, AutoAssignError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Configuration::from_inputs(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_inputs_are_absent() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Configuration::default());
        assert!(config.skip_draft);
        assert!(config.add_reviewers);
        assert!(config.add_assignees);
        assert!(config.number_of_reviewers.is_unlimited());
    }

    #[test]
    fn blank_inputs_count_as_absent() {
        let config = parse(&[("skipDraft", "  "), ("numberOfReviewers", "")]).unwrap();
        assert!(config.skip_draft);
        assert!(config.number_of_reviewers.is_unlimited());
    }

    #[test]
    fn booleans_accept_the_yaml_core_spellings() {
        for (raw, expected) in [("false", false), ("False", false), ("TRUE", true)] {
            let config = parse(&[("skipDraft", raw)]).unwrap();
            assert_eq!(config.skip_draft, expected, "input {raw}");
        }
    }

    #[test]
    fn invalid_boolean_is_a_configuration_error() {
        let err = parse(&[("addAssignees", "yes")]).unwrap_err();
        assert!(matches!(err, AutoAssignError::ConfigurationError { .. }));
        assert!(err.to_string().contains("addAssignees"));
    }

    #[test]
    fn invalid_integer_is_a_configuration_error() {
        assert!(parse(&[("numberOfAssignees", "-1")]).is_err());
        assert!(parse(&[("numberOfAssignees", "two")]).is_err());
        let config = parse(&[("numberOfAssignees", "2")]).unwrap();
        assert_eq!(config.number_of_assignees, SelectionLimit::new(2));
    }

    #[test]
    fn words_split_on_whitespace_and_commas() {
        let config = parse(&[
            ("reviewers", "alice, bob\ncarol   octo-org/core-team"),
            ("skipKeywords", "wip,do-not-review"),
        ])
        .unwrap();

        assert_eq!(
            config.reviewers,
            vec![
                ReviewerCandidate::User(Login::new("alice").unwrap()),
                ReviewerCandidate::User(Login::new("bob").unwrap()),
                ReviewerCandidate::User(Login::new("carol").unwrap()),
                ReviewerCandidate::Team {
                    org: "octo-org".to_string(),
                    slug: TeamSlug::new("core-team").unwrap(),
                },
            ]
        );
        assert_eq!(config.skip_keywords, vec!["wip", "do-not-review"]);
    }

    #[test]
    fn string_arrays_keep_spaces_inside_items() {
        let config = parse(&[
            ("includeLabels", "needs review\nbug"),
            ("excludeLabels", r#"["do not merge", "wontfix"]"#),
        ])
        .unwrap();

        let names = |labels: &[LabelName]| -> Vec<String> {
            labels.iter().map(|l| l.as_str().to_string()).collect()
        };
        assert_eq!(names(&config.include_labels), vec!["needs review", "bug"]);
        assert_eq!(names(&config.exclude_labels), vec!["do not merge", "wontfix"]);
    }

    #[test]
    fn malformed_json_array_is_rejected() {
        let err = parse(&[("includeLabels", "[\"bug\"")]).unwrap_err();
        assert!(err.to_string().contains("includeLabels"));
    }
}
