// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for rendering [`Event`]s as HTML.
//!
//! [`Event`]: crate::Event

pub mod html;
pub mod out;
pub mod page;
pub mod report;
pub mod stats;

use std::io;

use derive_more::with_trait::{Display, From};

use crate::event::{Event, Status};

#[doc(inline)]
pub use self::{
    page::Page,
    report::Report,
    stats::{Outcome, Stats, Summary},
};

/// Writer of [`Event`]s to some output.
pub trait Writer {
    /// Handles the given [`Event`].
    ///
    /// # Errors
    ///
    /// If the [`Event`] contradicts the previously handled ones, or the output
    /// fails to be written. Either way the rendered output can't be trusted
    /// anymore, so the run should be aborted.
    fn handle_event(&mut self, event: Event) -> Result<(), Error>;
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        (**self).handle_event(event)
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        (**self).handle_event(event)
    }
}

/// Error of a [`Writer`].
#[derive(Debug, Display, derive_more::with_trait::Error, From)]
pub enum Error {
    /// Output failed to be written.
    #[display("Failed to write output: {_0}")]
    Io(io::Error),

    /// [`Event::StepResult`] arrived without an announced [`Event::Step`]
    /// to resolve.
    #[display("Got a `{status}` result with no pending step")]
    #[from(ignore)]
    UnexpectedResult {
        /// [`Status`] of the unexpected result.
        status: Status,
    },

    /// [Examples] rows were left without a scenario to consume them.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    #[display("{remaining} examples row(s) left without a scenario")]
    #[from(ignore)]
    UnconsumedExamples {
        /// Number of rows left.
        remaining: usize,
    },

    /// Scenario instantiated from [Examples] arrived when no row was left
    /// for it.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    #[display("No examples row left for scenario `{scenario}`")]
    #[from(ignore)]
    MissingExamplesRow {
        /// Name of the instantiated scenario.
        scenario: String,
    },

    /// [Examples] row doesn't match its header.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    #[display(
        "Examples row has {cells} cell(s), while its header has {columns} \
         column(s)"
    )]
    #[from(ignore)]
    ExampleArity {
        /// Number of columns in the header.
        columns: usize,

        /// Number of cells in the row.
        cells: usize,
    },
}
