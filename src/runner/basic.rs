// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Runner`] implementation.

use std::{
    any::Any,
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    path::Path,
};

use derive_more::with_trait::Debug;
use itertools::Itertools as _;

use crate::{
    event::{Event, Failure, Status, StepResult},
    feature::Ext as _,
    parser,
    runner::{Error, Runner},
    step::{self, Collection},
    Writer, World,
};

/// Default [`Runner`] implementation executing scenarios one by one on the
/// current thread.
///
/// Holds a default [`Collection`] of [`Step`]s and any number of named ones
/// (glue), selectable per run.
///
/// [`Step`]: step::Step
#[derive(Debug)]
pub struct Basic<W> {
    /// [`Collection`] used when no glue is requested.
    steps: Collection<W>,

    /// [`Collection`]s selectable by name.
    #[debug("{:?}", glue.keys().sorted().collect::<Vec<_>>())]
    glue: HashMap<String, Collection<W>>,
}

// Implemented manually to omit redundant `W: Clone` trait bound, imposed by
// `#[derive(Clone)]`.
impl<W> Clone for Basic<W> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            glue: self.glue.clone(),
        }
    }
}

impl<W> Default for Basic<W> {
    fn default() -> Self {
        Self::new(Collection::new())
    }
}

impl<W> Basic<W> {
    /// Creates a new [`Basic`] [`Runner`] executing the given `steps`.
    #[must_use]
    pub fn new(steps: Collection<W>) -> Self {
        Self {
            steps,
            glue: HashMap::new(),
        }
    }

    /// Registers the given `steps` as glue named `name`.
    #[must_use]
    pub fn with_glue(
        mut self,
        name: impl Into<String>,
        steps: Collection<W>,
    ) -> Self {
        _ = self.glue.insert(name.into(), steps);
        self
    }

    /// Returns the [`Collection`] registered as glue named `glue`, or the
    /// default one if `glue` is [`None`] or blank.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownGlue`] if nothing is registered as `glue`.
    pub fn collection(&self, glue: Option<&str>) -> Result<&Collection<W>, Error> {
        match glue.map(str::trim).filter(|g| !g.is_empty()) {
            None => Ok(&self.steps),
            Some(name) => self.glue.get(name).ok_or_else(|| {
                Error::UnknownGlue {
                    name: name.to_owned(),
                }
            }),
        }
    }
}

impl<W: World> Basic<W> {
    /// Executes the given `features` one by one with the glue code named
    /// `glue`, finishing with an [`Event::RunFinished`].
    ///
    /// # Errors
    ///
    /// See [`Runner::run()`].
    pub fn run_features<I>(
        &self,
        features: I,
        glue: Option<&str>,
        writer: &mut dyn Writer,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = gherkin::Feature>,
    {
        let mut execution = Execution {
            steps: self.collection(glue)?,
            writer,
            snippets: Vec::new(),
        };
        for feature in features {
            execution.feature(&feature)?;
        }

        let snippets = execution.snippets;
        execution.writer.handle_event(Event::RunFinished(snippets))?;
        Ok(())
    }
}

impl<W: World> Runner for Basic<W> {
    fn run(
        &self,
        source: &str,
        glue: Option<&str>,
        writer: &mut dyn Writer,
    ) -> Result<(), Error> {
        let feature = parser::Basic.parse_str(source)?;
        self.run_features([feature], glue, writer)
    }
}

/// Single run of [`Basic`].
struct Execution<'r, W> {
    /// [`Collection`] the run uses.
    steps: &'r Collection<W>,

    /// [`Writer`] the run reports to.
    writer: &'r mut dyn Writer,

    /// Snippets of undefined steps, in order of first appearance.
    snippets: Vec<String>,
}

impl<W: World> Execution<'_, W> {
    fn emit(&mut self, event: Event) -> Result<(), Error> {
        Ok(self.writer.handle_event(event)?)
    }

    /// Executes a whole [`gherkin::Feature`].
    fn feature(&mut self, feature: &gherkin::Feature) -> Result<(), Error> {
        tracing::debug!(feature = %feature.name, "running feature");
        self.emit(Event::Feature(feature.into()))?;

        for scenario in &feature.scenarios {
            self.scenario(scenario, feature, None)?;
        }
        for rule in &feature.rules {
            self.emit(Event::Rule(rule.into()))?;
            for scenario in &rule.scenarios {
                self.scenario(scenario, feature, Some(rule))?;
            }
        }

        self.emit(Event::FeatureFinished)
    }

    /// Executes an ordinary [`gherkin::Scenario`], or every instantiation of
    /// a [Scenario Outline].
    ///
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    fn scenario(
        &mut self,
        scenario: &gherkin::Scenario,
        feature: &gherkin::Feature,
        rule: Option<&gherkin::Rule>,
    ) -> Result<(), Error> {
        if !scenario.is_outline() {
            return self.instance(scenario, feature, rule, false);
        }

        self.emit(Event::ScenarioOutline(scenario.into()))?;
        // Announced template steps are discarded by the first instantiation.
        for step in &scenario.steps {
            self.emit(Event::Step(step.into()))?;
        }
        for examples in &scenario.examples {
            self.emit(Event::Examples(examples.into()))?;
        }

        let path = feature.path.as_deref();
        for expanded in scenario.expand_examples(path)? {
            self.instance(&expanded, feature, rule, true)?;
        }
        Ok(())
    }

    /// Executes a single [`gherkin::Scenario`], `example` telling whether it
    /// was instantiated from a row of [`gherkin::Examples`].
    fn instance(
        &mut self,
        scenario: &gherkin::Scenario,
        feature: &gherkin::Feature,
        rule: Option<&gherkin::Rule>,
        example: bool,
    ) -> Result<(), Error> {
        tracing::debug!(scenario = %scenario.name, example, "running scenario");
        self.emit(if example {
            Event::Example(scenario.into())
        } else {
            Event::Scenario(scenario.into())
        })?;

        let steps = self.steps;

        let tags = feature
            .tags
            .iter()
            .chain(rule.iter().flat_map(|r| &r.tags))
            .chain(&scenario.tags)
            .cloned()
            .collect::<Vec<_>>();

        let mut world = match W::new() {
            Ok(world) => Some(world),
            Err(e) => {
                let failure = Failure::new(format!("Failed to create World: {e}"));
                tracing::debug!(scenario = %scenario.name, "{failure}");
                self.emit(Event::BeforeHook(Some(failure)))?;
                None
            }
        };
        let mut failed = world.is_none();

        if let Some(world) = world.as_mut() {
            for hook in steps.before_hooks(&tags) {
                let res = catch(|| (hook.func)(world, scenario));
                let failure = res.err().map(|msg| {
                    Failure::new(msg.clone()).with_details(format!(
                        "Before hook of `{}` panicked: {msg}",
                        scenario.name,
                    ))
                });
                let stop = failure.is_some();
                self.emit(Event::BeforeHook(failure))?;
                if stop {
                    failed = true;
                    break;
                }
            }
        }

        let backgrounds = [
            feature.background.as_ref(),
            rule.and_then(|r| r.background.as_ref()),
        ];
        for background in backgrounds.into_iter().flatten() {
            self.emit(Event::Background(background.into()))?;
            self.run_steps(&background.steps, world.as_mut(), &mut failed, feature)?;
        }
        self.run_steps(&scenario.steps, world.as_mut(), &mut failed, feature)?;

        if let Some(world) = world.as_mut() {
            for hook in steps.after_hooks(&tags) {
                let res = catch(|| (hook.func)(world, scenario));
                let failure = res.err().map(|msg| {
                    Failure::new(msg.clone()).with_details(format!(
                        "After hook of `{}` panicked: {msg}",
                        scenario.name,
                    ))
                });
                self.emit(Event::AfterHook(failure))?;
            }
        }
        Ok(())
    }

    /// Announces the given `steps`, then executes them reporting their
    /// results in the same order.
    fn run_steps(
        &mut self,
        steps: &[gherkin::Step],
        mut world: Option<&mut W>,
        failed: &mut bool,
        feature: &gherkin::Feature,
    ) -> Result<(), Error> {
        for step in steps {
            self.emit(Event::Step(step.into()))?;
        }
        for step in steps {
            let result = self.run_step(step, world.as_deref_mut(), failed, feature);
            tracing::debug!(
                step = %step.value,
                status = %result.status,
                "step finished",
            );
            self.emit(Event::StepResult(result))?;
        }
        Ok(())
    }

    /// Executes a single [`gherkin::Step`].
    ///
    /// Matched steps following a failure are [`Status::Skipped`].
    fn run_step(
        &mut self,
        step: &gherkin::Step,
        world: Option<&mut W>,
        failed: &mut bool,
        feature: &gherkin::Feature,
    ) -> StepResult {
        let location = format!(
            "{}:{}:{}",
            feature
                .path
                .as_deref()
                .map(Path::display)
                .map(|p| p.to_string())
                .unwrap_or_default(),
            step.position.line,
            step.position.col,
        );

        let (func, ctx) = match self.steps.find(step) {
            Ok(Some(found)) => found,
            Ok(None) => {
                *failed = true;
                let snippet = step::snippet(step);
                if !self.snippets.contains(&snippet) {
                    self.snippets.push(snippet);
                }
                return StepResult::new(Status::Undefined);
            }
            Err(e) => {
                *failed = true;
                return StepResult {
                    status: Status::Error,
                    error: Some(
                        Failure::new("Ambiguous step definitions").with_details(
                            format!("Step `{}` at {location}\n{e}", step.value),
                        ),
                    ),
                };
            }
        };

        let Some(world) = world.filter(|_| !*failed) else {
            return StepResult::new(Status::Skipped);
        };
        match catch(|| func(world, &ctx)) {
            Ok(()) => StepResult::passed(),
            Err(msg) => {
                *failed = true;
                StepResult::failed(Failure::new(msg.clone()).with_details(
                    format!("Step `{}` failed at {location}\n{msg}", step.value),
                ))
            }
        }
    }
}

/// Runs the given function, turning its panic into the panic message.
fn catch(f: impl FnOnce()) -> Result<(), String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|e| coerce_error(&*e))
}

/// Coerces the given panic payload into a [`String`].
fn coerce_error(err: &(dyn Any + Send)) -> String {
    err.downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "(Could not resolve panic payload)".to_owned())
}
