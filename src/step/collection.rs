// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Collection`] of [`Step`] functions and [`Hook`]s.

use std::collections::HashMap;

use derive_more::with_trait::Debug;
use gherkin::{tagexpr::TagOperation, StepType};
use itertools::Itertools as _;
use regex::Regex;

use crate::tag::Ext as _;

use super::{
    context::Context, error::AmbiguousMatchError, regex::HashableRegex, Step,
};

/// Alias for a before or after [`Hook`] function.
pub type HookFn<World> = fn(&mut World, &gherkin::Scenario);

/// Before or after hook, optionally limited to [`gherkin::Scenario`]s
/// matching a tag expression.
#[derive(Debug)]
pub struct Hook<World> {
    /// Tag expression a [`gherkin::Scenario`] must match for this [`Hook`] to
    /// run. [`None`] matches every [`gherkin::Scenario`].
    pub filter: Option<TagOperation>,

    /// Hook function.
    #[debug("{func:p}")]
    pub func: HookFn<World>,
}

// Implemented manually to omit redundant `World: Clone` trait bound, imposed by
// `#[derive(Clone)]`.
impl<World> Clone for Hook<World> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            func: self.func,
        }
    }
}

impl<World> Hook<World> {
    /// Indicates whether this [`Hook`] applies to a [`gherkin::Scenario`]
    /// tagged with the given `tags`.
    #[must_use]
    pub fn applies_to(&self, tags: &[String]) -> bool {
        self.filter.as_ref().map_or(true, |op| op.eval(tags.iter()))
    }
}

/// Collection of [`Step`]s and [`Hook`]s.
///
/// Every [`Step`] has to match with exactly 1 [`Regex`].
#[derive(Debug)]
pub struct Collection<World> {
    /// Collection of [Given] [`Step`]s.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[debug("{:?}", given.keys().sorted().collect::<Vec<_>>())]
    given: HashMap<HashableRegex, Step<World>>,

    /// Collection of [When] [`Step`]s.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[debug("{:?}", when.keys().sorted().collect::<Vec<_>>())]
    when: HashMap<HashableRegex, Step<World>>,

    /// Collection of [Then] [`Step`]s.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[debug("{:?}", then.keys().sorted().collect::<Vec<_>>())]
    then: HashMap<HashableRegex, Step<World>>,

    /// Before [`Hook`]s, in registration order.
    before: Vec<Hook<World>>,

    /// After [`Hook`]s, in registration order.
    after: Vec<Hook<World>>,
}

// Implemented manually to omit redundant `World: Clone` trait bound, imposed by
// `#[derive(Clone)]`.
impl<World> Clone for Collection<World> {
    fn clone(&self) -> Self {
        Self {
            given: self.given.clone(),
            when: self.when.clone(),
            then: self.then.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

// Implemented manually to omit redundant `World: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<World> Default for Collection<World> {
    fn default() -> Self {
        Self {
            given: HashMap::new(),
            when: HashMap::new(),
            then: HashMap::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

impl<World> Collection<World> {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [Given] [`Step`] matching the given `regex`.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[must_use]
    pub fn given(mut self, regex: Regex, step: Step<World>) -> Self {
        _ = self.given.insert(regex.into(), step);
        self
    }

    /// Adds a [When] [`Step`] matching the given `regex`.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[must_use]
    pub fn when(mut self, regex: Regex, step: Step<World>) -> Self {
        _ = self.when.insert(regex.into(), step);
        self
    }

    /// Adds a [Then] [`Step`] matching the given `regex`.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[must_use]
    pub fn then(mut self, regex: Regex, step: Step<World>) -> Self {
        _ = self.then.insert(regex.into(), step);
        self
    }

    /// Adds a before [`Hook`], run after the [`World`] creation and before
    /// the first step of every matching [`gherkin::Scenario`].
    ///
    /// [`World`]: crate::World
    #[must_use]
    pub fn before(
        mut self,
        filter: Option<TagOperation>,
        func: HookFn<World>,
    ) -> Self {
        self.before.push(Hook { filter, func });
        self
    }

    /// Adds an after [`Hook`], run after the last step of every matching
    /// [`gherkin::Scenario`], regardless of its outcome.
    #[must_use]
    pub fn after(
        mut self,
        filter: Option<TagOperation>,
        func: HookFn<World>,
    ) -> Self {
        self.after.push(Hook { filter, func });
        self
    }

    /// Returns before [`Hook`]s applying to a [`gherkin::Scenario`] tagged
    /// with the given `tags`.
    pub fn before_hooks<'me>(
        &'me self,
        tags: &'me [String],
    ) -> impl Iterator<Item = &'me Hook<World>> + 'me {
        self.before.iter().filter(move |h| h.applies_to(tags))
    }

    /// Returns after [`Hook`]s applying to a [`gherkin::Scenario`] tagged
    /// with the given `tags`.
    pub fn after_hooks<'me>(
        &'me self,
        tags: &'me [String],
    ) -> impl Iterator<Item = &'me Hook<World>> + 'me {
        self.after.iter().filter(move |h| h.applies_to(tags))
    }

    /// Returns a [`Step`] function matching the given [`gherkin::Step`], if
    /// any.
    ///
    /// # Errors
    ///
    /// If the given [`gherkin::Step`] matches multiple [`Regex`]es.
    pub fn find(
        &self,
        step: &gherkin::Step,
    ) -> Result<Option<(Step<World>, Context)>, AmbiguousMatchError> {
        let collection = match step.ty {
            StepType::Given => &self.given,
            StepType::When => &self.when,
            StepType::Then => &self.then,
        };

        let mut found = collection
            .iter()
            .filter_map(|(re, step_fn)| {
                re.captures(&step.value).map(|caps| (re, caps, *step_fn))
            })
            .collect::<Vec<_>>();

        let (re, captures, step_fn) = match found.len() {
            0 => return Ok(None),
            // Instead of `.unwrap()` to avoid documenting `# Panics`.
            1 => found.pop().unwrap_or_else(|| unreachable!()),
            _ => {
                return Err(AmbiguousMatchError {
                    possible_matches: found
                        .into_iter()
                        .map(|(re, ..)| re.clone())
                        .sorted()
                        .collect(),
                });
            }
        };

        let matches = re
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .zip((0..).map(|i| {
                captures.get(i).map_or_else(String::new, |m| m.as_str().to_owned())
            }))
            .collect();

        Ok(Some((
            step_fn,
            Context {
                step: step.clone(),
                matches,
            },
        )))
    }
}
