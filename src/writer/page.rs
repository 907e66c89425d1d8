// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Static HTML rendering of a [`gherkin::Feature`], without executing it.

use std::{fmt::Display, io};

use crate::{
    event, parser,
    writer::{
        html::{self, Level},
        out::{WritableString, WriteStrExt as _},
    },
};

/// Renderer of a [`gherkin::Feature`] structure for read-only preview.
///
/// Shares heading markup with [`Report`], but keeps no state between calls:
/// rendering the same [`gherkin::Feature`] twice yields identical output.
///
/// [`Report`]: super::Report
#[derive(Clone, Debug, Default)]
pub struct Page<Out = WritableString> {
    output: Out,
}

impl Page {
    /// Renders the given [Gherkin] `source` into a [`String`].
    ///
    /// Invalid `source` is rendered as an error banner followed by the
    /// `source` itself.
    ///
    /// # Errors
    ///
    /// Never, in practice, as the output is in memory.
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    pub fn render(source: &str) -> io::Result<String> {
        let mut page = Self::default();
        page.write_source(source)?;
        Ok(page.into_inner().0)
    }
}

impl<Out> Page<Out> {
    /// Creates a new [`Page`] writing into the given `output`.
    #[must_use]
    pub const fn new(output: Out) -> Self {
        Self { output }
    }

    /// Returns the output of this [`Page`].
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Unwraps the output of this [`Page`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> Page<Out> {
    /// Parses and renders the given [Gherkin] `source`, or renders the parse
    /// error if it's invalid.
    ///
    /// # Errors
    ///
    /// If the output fails to be written.
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    pub fn write_source(&mut self, source: &str) -> io::Result<()> {
        match parser::Basic.parse_str(source) {
            Ok(feature) => self.write_feature(&feature),
            Err(e) => self.write_parse_error(&e, source),
        }
    }

    /// Renders an error banner, followed by the `source` failed to be parsed.
    ///
    /// # Errors
    ///
    /// If the output fails to be written.
    pub fn write_parse_error(
        &mut self,
        error: &impl Display,
        source: &str,
    ) -> io::Result<()> {
        self.output.write_str(format!(
            "<span class='error'>Parse error in Cucumber page: {}</span>\
             <br/><br/>{}",
            html::escape(&error.to_string()),
            html::escape_lines(source),
        ))
    }

    /// Renders the given [`gherkin::Feature`].
    ///
    /// # Errors
    ///
    /// If the output fails to be written.
    pub fn write_feature(&mut self, feature: &gherkin::Feature) -> io::Result<()> {
        html::write_heading(&mut self.output, Level::H3, &feature.into())?;
        if let Some(bg) = &feature.background {
            self.write_background(bg)?;
        }
        for scenario in &feature.scenarios {
            self.write_scenario(scenario)?;
        }
        for rule in &feature.rules {
            html::write_heading(&mut self.output, Level::H4, &rule.into())?;
            if let Some(bg) = &rule.background {
                self.write_background(bg)?;
            }
            for scenario in &rule.scenarios {
                self.write_scenario(scenario)?;
            }
        }
        Ok(())
    }

    fn write_background(&mut self, bg: &gherkin::Background) -> io::Result<()> {
        html::write_heading(&mut self.output, Level::H4, &bg.into())?;
        self.write_steps(&bg.steps)
    }

    fn write_scenario(&mut self, scenario: &gherkin::Scenario) -> io::Result<()> {
        html::write_heading(&mut self.output, Level::H4, &scenario.into())?;
        self.write_steps(&scenario.steps)?;
        for examples in &scenario.examples {
            let examples = event::Examples::from(examples);
            let caption = match &examples.name {
                Some(name) => format!(
                    "{}: {}",
                    html::escape(&examples.keyword),
                    html::escape(name),
                ),
                None => html::escape(&examples.keyword).into_owned(),
            };
            self.output.write_str(format!(
                "<{l}>{caption}</{l}>",
                l = Level::H4,
            ))?;
            html::write_table(&mut self.output, &examples.rows)?;
        }
        Ok(())
    }

    fn write_steps(&mut self, steps: &[gherkin::Step]) -> io::Result<()> {
        for step in steps {
            let ev = event::Step::from(step);
            self.output.write_str(format!(
                "{}{}<br/>",
                html::escape(&ev.keyword),
                html::escape(&ev.text),
            ))?;
            if let Some(docstring) = &step.docstring {
                self.output
                    .write_str(format!("<pre>{}</pre>", html::escape(docstring)))?;
            }
            if let Some(table) = &step.table {
                html::write_table(&mut self.output, &table.rows)?;
            }
        }
        Ok(())
    }
}
