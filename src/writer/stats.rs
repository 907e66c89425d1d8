// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome aggregation of a single run.

use derive_more::with_trait::Display;

use crate::event::Status;

/// Category a resolved step or a hook error is counted under.
///
/// [`Display`]s as the CSS class used for rendering it.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    /// Step passed.
    #[display("pass")]
    Pass,

    /// Step failed its assertion.
    #[display("fail")]
    Fail,

    /// Step was skipped.
    #[display("ignore")]
    Ignore,

    /// Undefined step, erroring step or failed hook.
    #[display("error")]
    Error,
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        match status {
            Status::Passed => Self::Pass,
            Status::Failed => Self::Fail,
            Status::Skipped => Self::Ignore,
            Status::Undefined | Status::Error => Self::Error,
        }
    }
}

/// Running tally of [`Outcome`]s.
///
/// Counts only ever increase: there is no way to reset a [`Stats`], a new run
/// needs a new one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    summary: Summary,
}

impl Stats {
    /// Creates an empty [`Stats`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Pass => &mut self.summary.pass,
            Outcome::Fail => &mut self.summary.fail,
            Outcome::Ignore => &mut self.summary.ignored,
            Outcome::Error => &mut self.summary.error,
        };
        *counter += 1;
    }

    /// Returns a snapshot of the current counts.
    #[must_use]
    pub const fn summary(&self) -> Summary {
        self.summary
    }
}

/// Immutable snapshot of [`Stats`], handed to the host as the verdict of a
/// run.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[display(
    "{pass} right, {fail} wrong, {ignored} ignored, {error} exceptions"
)]
pub struct Summary {
    /// Number of passed steps.
    pub pass: usize,

    /// Number of failed steps.
    pub fail: usize,

    /// Number of undefined or erroring steps and failed hooks.
    pub error: usize,

    /// Number of skipped steps.
    pub ignored: usize,
}

impl Summary {
    /// Total number of recorded outcomes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pass + self.fail + self.error + self.ignored
    }

    /// Indicates whether the run should be considered failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.fail > 0 || self.error > 0
    }
}
