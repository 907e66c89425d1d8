// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for executing [`Step`]s.
//!
//! [`Step`]: gherkin::Step

pub mod basic;

use derive_more::with_trait::{Display, From};

use crate::{feature::ExpandExamplesError, parser, writer, Writer};

#[doc(inline)]
pub use self::basic::Basic;

/// Executor of [Gherkin] documents driving a [`Writer`].
///
/// # Order guarantees
///
/// Implementors are expected to emit [`Event`]s in execution order:
/// - a [`Event::Feature`] predates every other [`Event`] of its [Feature],
///   and a single [`Event::FeatureFinished`] is the last one;
/// - a [`Event::Scenario`] (or [`Event::Example`] for an instantiation of a
///   [Scenario Outline]) predates the hooks, [Background] and [`Step`]s of
///   its scenario;
/// - every [`Event::StepResult`] comes after its [`Event::Step`], and
///   results are emitted in the order their [`Step`]s were announced;
/// - exactly one [`Event::Example`] follows an [`Event::ScenarioOutline`]
///   per data row of its [`Event::Examples`], and [`Event::Scenario`] is
///   never used for them;
/// - a single [`Event::RunFinished`] ends the run.
///
/// Scenarios are executed one by one, so [`Event`]s of different scenarios
/// never interleave.
///
/// [`Event`]: crate::Event
/// [`Event::Example`]: crate::Event::Example
/// [`Event::Examples`]: crate::Event::Examples
/// [`Event::Feature`]: crate::Event::Feature
/// [`Event::FeatureFinished`]: crate::Event::FeatureFinished
/// [`Event::RunFinished`]: crate::Event::RunFinished
/// [`Event::Scenario`]: crate::Event::Scenario
/// [`Event::ScenarioOutline`]: crate::Event::ScenarioOutline
/// [`Event::Step`]: crate::Event::Step
/// [`Event::StepResult`]: crate::Event::StepResult
/// [`Step`]: gherkin::Step
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
/// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
pub trait Runner {
    /// Executes the given [Gherkin] `source` with the glue code named `glue`
    /// (or the default one, if [`None`]), reporting to the given `writer`.
    ///
    /// # Errors
    ///
    /// If the `source` can't be parsed or expanded, the `glue` is unknown, or
    /// the `writer` fails. Failing steps and hooks are not errors: they are
    /// reported to the `writer`.
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    fn run(
        &self,
        source: &str,
        glue: Option<&str>,
        writer: &mut dyn Writer,
    ) -> Result<(), Error>;
}

/// [`Runner`] error.
#[derive(Debug, Display, derive_more::with_trait::Error, From)]
pub enum Error {
    /// Failed to parse a [Feature].
    ///
    /// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
    #[display("{_0}")]
    Parse(parser::Error),

    /// Failed to expand [Examples].
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    #[display("Failed to expand examples: {_0}")]
    Expand(ExpandExamplesError),

    /// No glue code registered under the requested name.
    #[display("Unknown glue `{name}`")]
    #[from(ignore)]
    UnknownGlue {
        /// Requested name.
        #[error(not(source))]
        name: String,
    },

    /// [`Writer`] failed.
    #[display("{_0}")]
    Writer(writer::Error),
}

impl Error {
    /// Indicates whether this [`Error`] comes from a [`Writer`], meaning the
    /// rendered output can't be trusted anymore.
    #[must_use]
    pub const fn is_writer(&self) -> bool {
        matches!(self, Self::Writer(_))
    }
}
