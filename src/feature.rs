// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`gherkin::Scenario`] extension.

use std::{
    iter,
    path::{Path, PathBuf},
};

use derive_more::with_trait::{Display, Error};
use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;
use sealed::sealed;

/// Helper methods to operate on [`gherkin::Scenario`]s.
#[sealed]
pub trait Ext {
    /// Indicates whether this is a [Scenario Outline][1], i.e. has
    /// [`Examples`][2] to be expanded.
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    /// [2]: https://cucumber.io/docs/gherkin/reference#examples
    #[must_use]
    fn is_outline(&self) -> bool;

    /// Expands [Scenario Outline][1] [`Examples`][2] into one
    /// [`gherkin::Scenario`] per data row, in declaration order.
    ///
    /// So this one:
    /// ```gherkin
    /// Scenario Outline: eating
    ///   Given there are <start> cucumbers
    ///   When I eat <eat> cucumbers
    ///
    ///   Examples:
    ///     | start | eat |
    ///     |    12 |   5 |
    ///     |    20 |   4 |
    /// ```
    ///
    /// Will be expanded as:
    /// ```gherkin
    /// Scenario Outline: eating
    ///   Given there are 12 cucumbers
    ///   When I eat 5 cucumbers
    ///
    /// Scenario Outline: eating
    ///   Given there are 20 cucumbers
    ///   When I eat 4 cucumbers
    /// ```
    ///
    /// Templates are substituted in the name, step texts, docstrings and
    /// step tables. [`Examples`][2] without a table expand into nothing.
    ///
    /// # Errors
    ///
    /// If a template names a column missing from its [`Examples`][2].
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    /// [2]: https://cucumber.io/docs/gherkin/reference#examples
    fn expand_examples(
        &self,
        path: Option<&Path>,
    ) -> Result<Vec<gherkin::Scenario>, ExpandExamplesError>;
}

#[sealed]
impl Ext for gherkin::Scenario {
    fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }

    fn expand_examples(
        &self,
        path: Option<&Path>,
    ) -> Result<Vec<gherkin::Scenario>, ExpandExamplesError> {
        /// [`Regex`] matching placeholders [`Examples`] should expand into.
        ///
        /// [`Examples`]: gherkin::Examples
        static TEMPLATE_REGEX: &Lazy<Regex> = regex!(r"<([^>\s]+)>");

        let rows = self.examples.iter().filter_map(|ex| {
            let (header, data) = ex.table.as_ref()?.rows.split_first()?;
            Some(data.iter().map(move |row| (header, row, ex)))
        });

        rows.flatten()
            .map(|(header, row, examples)| {
                let replace_templates = |text: &str, pos| {
                    let mut err = None;
                    let replaced = TEMPLATE_REGEX
                        .replace_all(text, |cap: &regex::Captures<'_>| {
                            let name = &cap[1];
                            header
                                .iter()
                                .zip(row)
                                .find_map(|(k, v)| (k == name).then_some(v))
                                .map_or_else(
                                    || {
                                        err = Some(ExpandExamplesError {
                                            pos,
                                            name: name.to_owned(),
                                            path: path.map(Path::to_path_buf),
                                        });
                                        String::new()
                                    },
                                    Clone::clone,
                                )
                        })
                        .into_owned();
                    err.map_or(Ok(replaced), Err)
                };

                let mut expanded = self.clone();
                expanded.examples.clear();
                expanded.tags.extend(examples.tags.iter().cloned());
                expanded.name =
                    replace_templates(&expanded.name, expanded.position)?;
                for step in &mut expanded.steps {
                    let pos = step.position;
                    for value in iter::once(&mut step.value)
                        .chain(step.docstring.iter_mut())
                        .chain(step.table.iter_mut().flat_map(|t| {
                            t.rows.iter_mut().flat_map(|r| r.iter_mut())
                        }))
                    {
                        *value = replace_templates(value, pos)?;
                    }
                }
                Ok(expanded)
            })
            .collect()
    }
}

/// Error of [Scenario Outline][1] expansion encountering an unknown template.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug, Display, Error)]
#[display(
    "Failed to resolve <{name}> at {}:{}:{}",
    path.as_deref().map(Path::display).map(|p| p.to_string()).unwrap_or_default(),
    pos.line,
    pos.col,
)]
pub struct ExpandExamplesError {
    /// Position of the unknown template.
    pub pos: gherkin::LineCol,

    /// Name of the unknown template.
    pub name: String,

    /// [`Path`] to the `.feature` file, if present.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use crate::parser;

    use super::*;

    fn scenario(source: &str) -> gherkin::Scenario {
        parser::Basic
            .parse_str(source)
            .unwrap()
            .scenarios
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn plain_scenario_is_not_outline() {
        let s = scenario("Feature: f\n  Scenario: s\n    Given x\n");
        assert!(!s.is_outline());
        assert!(s.expand_examples(None).unwrap().is_empty());
    }

    #[test]
    fn expands_every_row_of_every_block() {
        let s = scenario(
            "Feature: f\n\
             \n  Scenario Outline: eat <eat>\
             \n    Given there are <start> cucumbers\
             \n    When I eat <eat> cucumbers\
             \n\
             \n    Examples:\
             \n      | start | eat |\
             \n      |    12 |   5 |\
             \n      |    20 |   4 |\
             \n\
             \n    @tagged\
             \n    Examples:\
             \n      | eat | start |\
             \n      |   1 |     2 |\n",
        );
        assert!(s.is_outline());

        let expanded = s.expand_examples(None).unwrap();
        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].name, "eat 5");
        assert_eq!(expanded[0].steps[0].value, "there are 12 cucumbers");
        assert_eq!(expanded[1].steps[1].value, "I eat 4 cucumbers");
        assert_eq!(expanded[2].steps[0].value, "there are 2 cucumbers");
        assert_eq!(expanded[2].tags, ["tagged"]);
        assert!(expanded.iter().all(|s| s.examples.is_empty()));
    }

    #[test]
    fn unknown_template_errors() {
        let s = scenario(
            "Feature: f\n\
             \n  Scenario Outline: o\
             \n    Given <missing>\
             \n\
             \n    Examples:\
             \n      | a |\
             \n      | 1 |\n",
        );
        let err = s.expand_examples(Some(Path::new("f.feature"))).unwrap_err();
        assert_eq!(err.name, "missing");
        assert!(err.to_string().starts_with("Failed to resolve <missing> at f.feature:"));
    }
}
