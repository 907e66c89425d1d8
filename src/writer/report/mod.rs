// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution-time HTML [`Writer`].

pub mod queue;

use std::io;

use crate::{
    event::{self, Event, Status},
    writer::{
        html::{self, Level},
        out::{WritableString, WriteStrExt as _},
        Error, Outcome, Stats, Summary, Writer,
    },
};

use self::queue::{Examples, StepQueue};

/// Kind of a hook, for rendering its error banner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Hook {
    Before,
    After,
}

/// [`Writer`] rendering a run into HTML as its [`Event`]s arrive, while
/// tallying step outcomes into [`Stats`].
///
/// Markup goes to the `Out`put, while full texts of failures go to the `Log`,
/// so stack-trace-sized texts never end up in the rendered document.
///
/// Holds the state needed to resolve forward references of the [`Event`]
/// stream:
/// - announced [`event::Step`]s are queued until their
///   [`event::StepResult`]s arrive, and are resolved strictly in FIFO order;
/// - data rows of [`event::Examples`] are queued until the scenarios
///   instantiated from them arrive, exactly one row per scenario.
///
/// A [`Report`] is scoped to a single run and must not be reused.
#[derive(Debug)]
pub struct Report<Out = WritableString, Log = io::Sink> {
    /// Sink of the rendered markup.
    output: Out,

    /// Sink of the failure details.
    log: Log,

    /// Announced [`event::Step`]s awaiting their results.
    steps: StepQueue,

    /// [`event::Examples`] rows awaiting their scenarios.
    examples: Examples,

    /// Outcomes tallied so far.
    stats: Stats,
}

impl Default for Report {
    fn default() -> Self {
        Self::new(WritableString::default(), io::sink())
    }
}

impl<Out, Log> Report<Out, Log> {
    /// Creates a new [`Report`] writing markup into the given `output` and
    /// failure details into the given `log`.
    #[must_use]
    pub fn new(output: Out, log: Log) -> Self {
        Self {
            output,
            log,
            steps: StepQueue::default(),
            examples: Examples::default(),
            stats: Stats::new(),
        }
    }

    /// Returns the markup sink of this [`Report`].
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Returns the failure details sink of this [`Report`].
    #[must_use]
    pub const fn log(&self) -> &Log {
        &self.log
    }

    /// Returns the [`Summary`] of outcomes tallied so far.
    #[must_use]
    pub const fn summary(&self) -> Summary {
        self.stats.summary()
    }

    /// Finishes this [`Report`], returning its sinks and final [`Summary`].
    #[must_use]
    pub fn into_parts(self) -> (Out, Log, Summary) {
        (self.output, self.log, self.stats.summary())
    }
}

impl<Out: io::Write, Log: io::Write> Report<Out, Log> {
    /// Renders a [Feature] heading.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    ///
    /// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
    pub fn on_feature(&mut self, feature: &event::Heading) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        html::write_heading(&mut self.output, Level::H3, feature)?;
        Ok(())
    }

    /// Renders a [Rule] heading.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    ///
    /// [Rule]: https://cucumber.io/docs/gherkin/reference#rule
    pub fn on_rule(&mut self, rule: &event::Heading) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        html::write_heading(&mut self.output, Level::H4, rule)?;
        Ok(())
    }

    /// Renders a [Background] heading.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    ///
    /// [Background]: https://cucumber.io/docs/gherkin/reference#background
    pub fn on_background(
        &mut self,
        background: &event::Heading,
    ) -> Result<(), Error> {
        html::write_heading(&mut self.output, Level::H4, background)?;
        Ok(())
    }

    /// Renders a [Scenario Outline] heading.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    ///
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    pub fn on_scenario_outline(
        &mut self,
        outline: &event::Heading,
    ) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        html::write_heading(&mut self.output, Level::H4, outline)?;
        Ok(())
    }

    /// Queues data rows of the given [`event::Examples`] for the next
    /// scenarios. Renders nothing.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_examples(&mut self, examples: event::Examples) -> Result<(), Error> {
        self.examples.enqueue(examples)
    }

    /// Starts a new ordinary scenario, forgetting every unresolved
    /// [`event::Step`].
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_scenario(&mut self, scenario: &event::Heading) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        self.steps.clear();
        html::write_heading(&mut self.output, Level::H4, scenario)?;
        Ok(())
    }

    /// Starts a new scenario instantiated from [`event::Examples`],
    /// forgetting every unresolved [`event::Step`].
    ///
    /// The next pending row is consumed and rendered as the scenario title,
    /// zipped with its header.
    ///
    /// # Errors
    ///
    /// [`Error::MissingExamplesRow`] if no row is pending. Otherwise, see
    /// [`Writer::handle_event()`].
    pub fn on_example(&mut self, scenario: &event::Heading) -> Result<(), Error> {
        self.steps.clear();
        let row = self.examples.next_row().ok_or_else(|| {
            Error::MissingExamplesRow {
                scenario: scenario.name.clone(),
            }
        })?;
        let title = html::example_title(&row.keyword, &row.header, &row.cells);
        self.output
            .write_str(format!("<{l}>{title}</{l}>", l = Level::H5))?;
        Ok(())
    }

    /// Announces an [`event::Step`]. Renders nothing until its result
    /// arrives.
    pub fn on_step(&mut self, step: event::Step) {
        self.steps.push(step);
    }

    /// Reports the result of a before hook.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_before_hook(
        &mut self,
        error: Option<&event::Failure>,
    ) -> Result<(), Error> {
        self.hook(Hook::Before, error)
    }

    /// Reports the result of an after hook.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_after_hook(
        &mut self,
        error: Option<&event::Failure>,
    ) -> Result<(), Error> {
        self.hook(Hook::After, error)
    }

    /// Resolves the oldest unresolved [`event::Step`] with the given
    /// `result` and renders it.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_step_result(
        &mut self,
        result: &event::StepResult,
    ) -> Result<(), Error> {
        let step = self.steps.pop().ok_or(Error::UnexpectedResult {
            status: result.status,
        })?;

        let outcome = Outcome::from(result.status);
        self.stats.record(outcome);

        let text = format!(
            "{}{}",
            html::escape(&step.keyword),
            html::escape(&step.text),
        );
        if result.status == Status::Undefined {
            self.output.write_str(format!(
                "<span class='{outcome}'>Undefined step: {text}</span><br/>",
            ))?;
        } else {
            self.output.write_str(format!(
                "<span class='{outcome}'>{text}</span><br/>",
            ))?;
        }

        if let Some(failure) = &result.error {
            self.log.write_line(&failure.details)?;
        }
        Ok(())
    }

    /// Separates the finished [Feature] from the next one.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    ///
    /// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
    pub fn on_feature_finished(&mut self) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        self.output.write_str("<br/><br/>")?;
        Ok(())
    }

    /// Finishes the run, rendering the given `snippets` of undefined steps.
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_run_end(&mut self, snippets: &[String]) -> Result<(), Error> {
        self.examples.ensure_consumed()?;
        if !snippets.is_empty() {
            self.output.write_str("<h3>Pending methods</h3>")?;
            for snippet in snippets {
                self.output
                    .write_str(format!("<pre>{}</pre>", html::escape(snippet)))?;
            }
        }
        self.output.flush()?;
        self.log.flush()?;
        Ok(())
    }

    /// Reports a run aborted before completion, due to the given `error`.
    ///
    /// Counts as an exception in the [`Summary`].
    ///
    /// # Errors
    ///
    /// See [`Writer::handle_event()`].
    pub fn on_run_aborted(
        &mut self,
        error: &impl std::fmt::Display,
    ) -> Result<(), Error> {
        self.stats.record(Outcome::Error);
        self.output.write_str(format!(
            "<span class='{}'>Test execution failed: {}</span>",
            Outcome::Error,
            html::escape(&error.to_string()),
        ))?;
        self.log.write_line(&error.to_string())?;
        self.output.flush()?;
        self.log.flush()?;
        Ok(())
    }

    /// Records and renders a hook `error`, if any.
    fn hook(
        &mut self,
        hook: Hook,
        error: Option<&event::Failure>,
    ) -> Result<(), Error> {
        let Some(failure) = error else {
            return Ok(());
        };

        self.stats.record(Outcome::Error);
        // An after banner is broken off from the steps preceding it.
        let (when, br) = match hook {
            Hook::Before => ("before", ""),
            Hook::After => ("after", "<br/>"),
        };
        self.output.write_str(format!(
            "{br}<span class='{}'>Error {when} scenario: {}; \
             see Execution Log for details</span>",
            Outcome::Error,
            html::escape(&failure.message),
        ))?;
        self.log.write_line(&failure.details)?;
        Ok(())
    }
}

impl<Out: io::Write, Log: io::Write> Writer for Report<Out, Log> {
    fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Feature(h) => self.on_feature(&h),
            Event::Rule(h) => self.on_rule(&h),
            Event::Background(h) => self.on_background(&h),
            Event::ScenarioOutline(h) => self.on_scenario_outline(&h),
            Event::Examples(ex) => self.on_examples(ex),
            Event::Scenario(h) => self.on_scenario(&h),
            Event::Example(h) => self.on_example(&h),
            Event::Step(step) => {
                self.on_step(step);
                Ok(())
            }
            Event::BeforeHook(err) => self.on_before_hook(err.as_ref()),
            Event::AfterHook(err) => self.on_after_hook(err.as_ref()),
            Event::StepResult(res) => self.on_step_result(&res),
            Event::FeatureFinished => self.on_feature_finished(),
            Event::RunFinished(snippets) => self.on_run_end(&snippets),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::{Failure, Heading, StepResult};

    use super::*;

    fn report() -> Report<WritableString, WritableString> {
        Report::new(WritableString::default(), WritableString::default())
    }

    #[test]
    fn renders_steps_on_results_only() {
        let mut r = report();
        r.on_step(event::Step::new("Given ", "x"));
        assert_eq!(r.output().0, "");

        r.on_step_result(&StepResult::passed()).unwrap();
        assert_eq!(r.output().0, "<span class='pass'>Given x</span><br/>");
    }

    #[test]
    fn renders_every_status() {
        let mut r = report();
        for (text, status) in [
            ("p", Status::Passed),
            ("f", Status::Failed),
            ("s", Status::Skipped),
            ("u", Status::Undefined),
            ("e", Status::Error),
        ] {
            r.on_step(event::Step::new("* ", text));
            r.on_step_result(&StepResult::new(status)).unwrap();
        }

        assert_eq!(
            r.output().0,
            "<span class='pass'>* p</span><br/>\
             <span class='fail'>* f</span><br/>\
             <span class='ignore'>* s</span><br/>\
             <span class='error'>Undefined step: * u</span><br/>\
             <span class='error'>* e</span><br/>",
        );
        assert_eq!(
            r.summary(),
            Summary {
                pass: 1,
                fail: 1,
                error: 2,
                ignored: 1,
            },
        );
    }

    #[test]
    fn result_without_step_is_rejected() {
        let mut r = report();
        let err = r.on_step_result(&StepResult::passed()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedResult {
                status: Status::Passed,
            },
        ));
        assert_eq!(r.summary().total(), 0);
    }

    #[test]
    fn scenario_forgets_unresolved_steps() {
        let mut r = report();
        r.on_step(event::Step::new("Given ", "template"));
        r.on_scenario(&Heading::new("Scenario", "s")).unwrap();
        r.on_step(event::Step::new("Given ", "real"));
        r.on_step_result(&StepResult::passed()).unwrap();

        assert_eq!(
            r.output().0,
            "<h4>Scenario: s</h4><span class='pass'>Given real</span><br/>",
        );
    }

    #[test]
    fn failure_details_go_to_log() {
        let mut r = report();
        r.on_step(event::Step::new("Then ", "x"));
        r.on_step_result(&StepResult::failed(
            Failure::new("nope").with_details("nope\n  at step.rs:1"),
        ))
        .unwrap();

        assert_eq!(r.output().0, "<span class='fail'>Then x</span><br/>");
        assert_eq!(r.log().0, "nope\n  at step.rs:1\n");
    }

    #[test]
    fn hook_errors_render_banner() {
        let mut r = report();
        r.on_before_hook(None).unwrap();
        r.on_before_hook(Some(&Failure::new("db <down>").with_details("trace")))
            .unwrap();
        r.on_after_hook(Some(&Failure::new("oops"))).unwrap();

        assert_eq!(
            r.output().0,
            "<span class='error'>Error before scenario: db &lt;down&gt;; \
             see Execution Log for details</span>\
             <br/><span class='error'>Error after scenario: oops; \
             see Execution Log for details</span>",
        );
        assert_eq!(r.log().0, "trace\noops\n");
        assert_eq!(r.summary().error, 2);
    }

    #[test]
    fn aborted_run_counts_as_exception() {
        let mut r = report();
        r.on_run_aborted(&"glue <missing>").unwrap();

        assert_eq!(
            r.output().0,
            "<span class='error'>Test execution failed: glue &lt;missing&gt;\
             </span>",
        );
        assert_eq!(r.log().0, "glue <missing>\n");
        assert_eq!(r.summary().error, 1);
    }

    #[test]
    fn snippets_are_listed() {
        let mut r = report();
        r.on_run_end(&[]).unwrap();
        assert_eq!(r.output().0, "");

        r.on_run_end(&["given(r\"^a <b>$\")".to_owned()]).unwrap();
        assert_eq!(
            r.output().0,
            "<h3>Pending methods</h3><pre>given(r&quot;^a &lt;b&gt;$&quot;)</pre>",
        );
    }

    #[test]
    fn outline_rows_become_titles() {
        let mut r = report();
        r.on_scenario_outline(&Heading::new("Scenario Outline", "o")).unwrap();
        r.on_examples(event::Examples::new("Examples", ["a"], [["1"], ["2"]]))
            .unwrap();
        r.on_example(&Heading::new("Scenario Outline", "o")).unwrap();
        r.on_example(&Heading::new("Scenario Outline", "o")).unwrap();
        r.on_scenario(&Heading::new("Scenario", "plain")).unwrap();

        assert_eq!(
            r.output().0,
            "<h4>Scenario Outline: o</h4>\
             <h5>Examples: a = 1</h5>\
             <h5>Examples: a = 2</h5>\
             <h4>Scenario: plain</h4>",
        );
    }

    #[test]
    fn backgrounds_of_examples_keep_rows() {
        let mut r = report();
        r.on_scenario_outline(&Heading::new("Scenario Outline", "o")).unwrap();
        r.on_examples(event::Examples::new("Examples", ["a"], [["1"], ["2"]]))
            .unwrap();
        for _ in 0..2 {
            r.on_example(&Heading::new("Scenario Outline", "o")).unwrap();
            r.on_background(&Heading::new("Background", "b")).unwrap();
        }
        r.on_feature_finished().unwrap();

        assert_eq!(
            r.output().0,
            "<h4>Scenario Outline: o</h4>\
             <h5>Examples: a = 1</h5><h4>Background: b</h4>\
             <h5>Examples: a = 2</h5><h4>Background: b</h4>\
             <br/><br/>",
        );
    }

    #[test]
    fn example_without_row_is_rejected() {
        let mut r = report();
        r.on_examples(event::Examples::new("Examples", ["a"], [["1"]]))
            .unwrap();
        r.on_example(&Heading::new("Scenario Outline", "o")).unwrap();

        let err = r
            .on_example(&Heading::new("Scenario Outline", "o"))
            .unwrap_err();
        assert!(matches!(
            &err,
            Error::MissingExamplesRow { scenario } if scenario == "o",
        ));
        assert_eq!(
            err.to_string(),
            "No examples row left for scenario `o`",
        );
    }

    #[test]
    fn unconsumed_rows_are_rejected() {
        let mut r = report();
        r.on_examples(event::Examples::new("Examples", ["a"], [["1"]]))
            .unwrap();
        assert!(matches!(
            r.on_feature_finished(),
            Err(Error::UnconsumedExamples { remaining: 1 }),
        ));
    }

    #[test]
    fn plain_scenario_rejects_pending_rows() {
        let mut r = report();
        r.on_examples(event::Examples::new("Examples", ["a"], [["1"]]))
            .unwrap();
        assert!(matches!(
            r.on_scenario(&Heading::new("Scenario", "s")),
            Err(Error::UnconsumedExamples { remaining: 1 }),
        ));
    }

    #[test]
    fn results_resolve_in_order_across_hooks() {
        let mut r = report();
        r.handle_event(Event::Step(event::Step::new("Given ", "a")))
            .unwrap();
        r.handle_event(Event::BeforeHook(None)).unwrap();
        r.handle_event(Event::Step(event::Step::new("When ", "b")))
            .unwrap();
        r.handle_event(Event::StepResult(StepResult::passed()))
            .unwrap();
        r.handle_event(Event::AfterHook(Some(Failure::new("late"))))
            .unwrap();
        r.handle_event(Event::StepResult(StepResult::new(Status::Failed)))
            .unwrap();

        assert_eq!(
            r.output().0,
            "<span class='pass'>Given a</span><br/>\
             <br/><span class='error'>Error after scenario: late; \
             see Execution Log for details</span>\
             <span class='fail'>When b</span><br/>",
        );
        assert_eq!(
            r.summary(),
            Summary {
                pass: 1,
                fail: 1,
                error: 1,
                ignored: 0,
            },
        );
    }

    #[test]
    fn sink_failures_propagate() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut r = Report::new(Broken, io::sink());
        let err = r.on_feature(&Heading::new("Feature", "f")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
