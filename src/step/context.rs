// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution context of a [`Step`] function.
//!
//! [`Step`]: super::Step

use std::str::FromStr;

/// Name of a capturing group, if it has one.
pub type CaptureName = Option<String>;

/// Context for a [`Step`] function execution.
///
/// [`Step`]: super::Step
#[derive(Clone, Debug)]
pub struct Context {
    /// [`Step`] matched to a [`Step`] function.
    ///
    /// [`Step`]: gherkin::Step
    pub step: gherkin::Step,

    /// [`Regex`] matches of a [`Step::value`], the whole match first.
    ///
    /// [`Regex`]: regex::Regex
    /// [`Step::value`]: gherkin::Step::value
    pub matches: Vec<(CaptureName, String)>,
}

impl Context {
    /// Returns the value of the capturing group at `index` (`0` is the whole
    /// match).
    #[must_use]
    pub fn get_capture(&self, index: usize) -> Option<&str> {
        self.matches.get(index).map(|(_, value)| value.as_str())
    }

    /// Returns the value of the capturing group named `name`.
    #[must_use]
    pub fn get_named_capture(&self, name: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses the value of the capturing group at `index`.
    ///
    /// # Panics
    ///
    /// If there is no such group, or its value doesn't parse. Panicking fails
    /// the running step.
    #[allow(clippy::panic)]
    #[must_use]
    pub fn parse<T>(&self, index: usize) -> T
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.get_capture(index) else {
            panic!("no capturing group {index} in `{}`", self.step.value);
        };
        value.parse().unwrap_or_else(|e| {
            panic!("failed to parse capture {index} `{value}`: {e}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let feature = crate::parser::Basic
            .parse_str("Feature: f\n  Scenario: s\n    Given I have 5 cucumbers\n")
            .unwrap();
        Context {
            step: feature.scenarios[0].steps[0].clone(),
            matches: vec![
                (None, "I have 5 cucumbers".to_owned()),
                (Some("count".to_owned()), "5".to_owned()),
            ],
        }
    }

    #[test]
    fn captures_by_index_and_name() {
        let ctx = context();
        assert_eq!(ctx.get_capture(0), Some("I have 5 cucumbers"));
        assert_eq!(ctx.get_capture(1), Some("5"));
        assert_eq!(ctx.get_capture(2), None);
        assert_eq!(ctx.get_named_capture("count"), Some("5"));
        assert_eq!(ctx.get_named_capture("missing"), None);
    }

    #[test]
    fn parses_captures() {
        assert_eq!(context().parse::<u32>(1), 5);
    }

    #[test]
    #[should_panic(expected = "failed to parse capture 0")]
    fn parse_failure_panics() {
        _ = context().parse::<u32>(0);
    }
}
