// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences of a [Cucumber] run, as consumed by a [`Writer`].
//!
//! The top-level enum here is [`Event`]. Structural events describe the
//! document being executed ([`Event::Feature`], [`Event::Scenario`],
//! [`Event::Step`], ...), while execution events report outcomes
//! ([`Event::StepResult`], [`Event::BeforeHook`], [`Event::AfterHook`]).
//!
//! A [`Runner`] announces a [`Step`] before reporting its result, so writers
//! have to correlate the two themselves.
//!
//! [`Runner`]: crate::Runner
//! [`Writer`]: crate::Writer
//! [Cucumber]: https://cucumber.io

use derive_more::with_trait::Display;

/// Keyword, name and optional free-text description of a [Feature],
/// [Rule], [Background], [Scenario] or [Scenario Outline].
///
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
/// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
/// [Rule]: https://cucumber.io/docs/gherkin/reference#rule
/// [Scenario]: https://cucumber.io/docs/gherkin/reference#example
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Heading {
    /// Keyword as written in the source (`Feature`, `Scenario`, ...).
    pub keyword: String,

    /// Name following the keyword.
    pub name: String,

    /// Free-text description below the keyword line, if any.
    pub description: Option<String>,
}

impl Heading {
    /// Creates a new [`Heading`] without a description.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Attaches the given `description` to this [`Heading`].
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the description, unless it's missing or blank.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

impl From<&gherkin::Feature> for Heading {
    fn from(feature: &gherkin::Feature) -> Self {
        Self {
            keyword: feature.keyword.clone(),
            name: feature.name.clone(),
            description: feature.description.clone(),
        }
    }
}

impl From<&gherkin::Rule> for Heading {
    fn from(rule: &gherkin::Rule) -> Self {
        Self {
            keyword: rule.keyword.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
        }
    }
}

impl From<&gherkin::Background> for Heading {
    fn from(background: &gherkin::Background) -> Self {
        Self {
            keyword: background.keyword.clone(),
            name: background.name.clone(),
            description: background.description.clone(),
        }
    }
}

impl From<&gherkin::Scenario> for Heading {
    fn from(scenario: &gherkin::Scenario) -> Self {
        Self {
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            description: scenario.description.clone(),
        }
    }
}

/// Single executable line of a scenario.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Keyword including its trailing separator (`"Given "`).
    pub keyword: String,

    /// Text following the keyword.
    pub text: String,
}

impl Step {
    /// Creates a new [`Step`].
    ///
    /// A single space is appended to the `keyword` if it doesn't already end
    /// with whitespace, so that `keyword` and `text` can be concatenated.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        let mut keyword = keyword.into();
        if !keyword.ends_with(char::is_whitespace) {
            keyword.push(' ');
        }
        Self {
            keyword,
            text: text.into(),
        }
    }
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        Self::new(step.keyword.clone(), step.value.clone())
    }
}

/// [Examples] block of a [Scenario Outline].
///
/// The first row of [`Examples::rows`] is the header naming the columns,
/// every following row is a data row.
///
/// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Examples {
    /// Keyword as written in the source (`Examples`, `Scenarios`).
    pub keyword: String,

    /// Optional name following the keyword.
    pub name: Option<String>,

    /// Header row followed by data rows.
    pub rows: Vec<Vec<String>>,
}

impl Examples {
    /// Creates new [`Examples`] out of the `header` and data `rows`.
    #[must_use]
    pub fn new<H, R, C>(keyword: impl Into<String>, header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let header = header.into_iter().map(Into::into).collect();
        Self {
            keyword: keyword.into(),
            name: None,
            rows: std::iter::once(header)
                .chain(
                    rows.into_iter()
                        .map(|r| r.into_iter().map(Into::into).collect()),
                )
                .collect(),
        }
    }

    /// Returns the header row, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Returns the data rows (everything after the header).
    #[must_use]
    pub fn data(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

impl From<&gherkin::Examples> for Examples {
    fn from(examples: &gherkin::Examples) -> Self {
        Self {
            keyword: examples.keyword.clone(),
            name: examples.name.clone().filter(|n| !n.trim().is_empty()),
            rows: examples
                .table
                .as_ref()
                .map(|t| t.rows.clone())
                .unwrap_or_default(),
        }
    }
}

/// Outcome of executing a single [`Step`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    /// [`Step`] passed.
    #[display("passed")]
    Passed,

    /// [`Step`] failed its assertion.
    #[display("failed")]
    Failed,

    /// No step definition matches the [`Step`].
    #[display("undefined")]
    Undefined,

    /// [`Step`] wasn't executed because an earlier one didn't pass.
    #[display("skipped")]
    Skipped,

    /// Any other error (ambiguous match, pending step, ...).
    #[display("error")]
    Error,
}

/// Error reported for a [`Step`] or a hook.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{message}")]
pub struct Failure {
    /// Short message, suitable for rendering inline.
    pub message: String,

    /// Full error text (location, captured output, ...), meant for the
    /// diagnostic channel only.
    pub details: String,
}

impl Failure {
    /// Creates a new [`Failure`] whose details are the `message` itself.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            details: message.clone(),
            message,
        }
    }

    /// Replaces the details of this [`Failure`].
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

/// Result of a [`Step`], reported after the [`Step`] was announced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepResult {
    /// [`Status`] of the [`Step`].
    pub status: Status,

    /// [`Failure`] of the [`Step`], if any.
    pub error: Option<Failure>,
}

impl StepResult {
    /// Creates a new [`StepResult`] without an error.
    #[must_use]
    pub const fn new(status: Status) -> Self {
        Self {
            status,
            error: None,
        }
    }

    /// Creates a [`Status::Passed`] [`StepResult`].
    #[must_use]
    pub const fn passed() -> Self {
        Self::new(Status::Passed)
    }

    /// Creates a [`Status::Failed`] [`StepResult`] with the given [`Failure`].
    #[must_use]
    pub const fn failed(error: Failure) -> Self {
        Self {
            status: Status::Failed,
            error: Some(error),
        }
    }
}

/// Top-level event of a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// [Feature] started.
    ///
    /// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
    Feature(Heading),

    /// [Rule] started.
    ///
    /// [Rule]: https://cucumber.io/docs/gherkin/reference#rule
    Rule(Heading),

    /// [Background] started.
    ///
    /// [Background]: https://cucumber.io/docs/gherkin/reference#background
    Background(Heading),

    /// [Scenario Outline] announced, before its [`Event::Examples`].
    ///
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    ScenarioOutline(Heading),

    /// [`Examples`] of the last [`Event::ScenarioOutline`].
    Examples(Examples),

    /// Ordinary scenario started.
    Scenario(Heading),

    /// Scenario instantiated from the next data row of the [`Examples`] of
    /// the last [`Event::ScenarioOutline`] started. Exactly one is emitted
    /// per data row.
    Example(Heading),

    /// [`Step`] announced. Its result arrives later as
    /// [`Event::StepResult`].
    Step(Step),

    /// Before hook finished, with its [`Failure`] if it failed.
    BeforeHook(Option<Failure>),

    /// After hook finished, with its [`Failure`] if it failed.
    AfterHook(Option<Failure>),

    /// Result of the oldest announced [`Step`] not resolved yet.
    StepResult(StepResult),

    /// Current [Feature] finished.
    ///
    /// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
    FeatureFinished,

    /// Run finished, with snippets for undefined steps.
    RunFinished(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keyword_gets_trailing_space() {
        assert_eq!(Step::new("Given", "x").keyword, "Given ");
        assert_eq!(Step::new("Given ", "x").keyword, "Given ");
        assert_eq!(Step::new("* ", "x").keyword, "* ");
    }

    #[test]
    fn blank_description_is_omitted() {
        let heading = Heading::new("Feature", "f").with_description("  \n ");
        assert_eq!(heading.description(), None);

        let heading = Heading::new("Feature", "f").with_description("text");
        assert_eq!(heading.description(), Some("text"));
    }

    #[test]
    fn examples_split_header_from_data() {
        let examples = Examples::new("Examples", ["a", "b"], [["1", "2"]]);
        assert_eq!(examples.header(), Some(&["a".into(), "b".into()][..]));
        assert_eq!(examples.data(), &[vec!["1".to_owned(), "2".to_owned()]]);

        let empty = Examples::default();
        assert_eq!(empty.header(), None);
        assert!(empty.data().is_empty());
    }

    #[test]
    fn failure_details_default_to_message() {
        let failure = Failure::new("boom");
        assert_eq!(failure.details, "boom");
        assert_eq!(failure.with_details("trace").details, "trace");
    }
}
