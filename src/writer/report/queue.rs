// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pending state of a [`Report`]: announced steps awaiting their results and
//! [Examples] rows awaiting their scenarios.
//!
//! [`Report`]: super::Report
//! [Examples]: https://cucumber.io/docs/gherkin/reference#examples

use std::{collections::VecDeque, rc::Rc};

use crate::{event, writer::Error};

/// FIFO of announced [`event::Step`]s not resolved yet.
#[derive(Clone, Debug, Default)]
pub struct StepQueue(VecDeque<event::Step>);

impl StepQueue {
    /// Announces a new [`event::Step`].
    pub fn push(&mut self, step: event::Step) {
        self.0.push_back(step);
    }

    /// Takes the oldest unresolved [`event::Step`], if any.
    pub fn pop(&mut self) -> Option<event::Step> {
        self.0.pop_front()
    }

    /// Forgets every unresolved [`event::Step`].
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of unresolved [`event::Step`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether every announced [`event::Step`] is resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Single data row of an [`event::Examples`] table, together with the table's
/// keyword and header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// Keyword of the [`event::Examples`] this row belongs to.
    pub keyword: Rc<str>,

    /// Column names of the [`event::Examples`] this row belongs to.
    pub header: Rc<[String]>,

    /// Cell values, as many as there are columns.
    pub cells: Vec<String>,
}

/// Whether the next scenarios are instantiations of an outline.
#[derive(Clone, Debug, Default)]
pub enum Examples {
    /// Next scenario is an ordinary one.
    #[default]
    None,

    /// Next scenarios consume these rows, one each, in order.
    ///
    /// Never empty: the last consumed row switches back to
    /// [`Examples::None`].
    Pending(VecDeque<Row>),
}

impl Examples {
    /// Queues data rows of the given [`event::Examples`] after the ones
    /// already pending.
    ///
    /// A table without a header row queues nothing.
    ///
    /// # Errors
    ///
    /// [`Error::ExampleArity`] if a data row has a different number of cells
    /// than the header. Nothing is queued in that case.
    pub fn enqueue(&mut self, examples: event::Examples) -> Result<(), Error> {
        let mut rows = examples.rows.into_iter();
        let Some(header) = rows.next() else {
            return Ok(());
        };
        let rows = rows.collect::<Vec<_>>();
        if let Some(row) = rows.iter().find(|r| r.len() != header.len()) {
            return Err(Error::ExampleArity {
                columns: header.len(),
                cells: row.len(),
            });
        }
        if rows.is_empty() {
            return Ok(());
        }

        let keyword = Rc::<str>::from(examples.keyword);
        let header = Rc::<[String]>::from(header);
        let rows = rows.into_iter().map(|cells| Row {
            keyword: Rc::clone(&keyword),
            header: Rc::clone(&header),
            cells,
        });
        match self {
            Self::None => *self = Self::Pending(rows.collect()),
            Self::Pending(pending) => pending.extend(rows),
        }
        Ok(())
    }

    /// Takes the next pending [`Row`], if any.
    pub fn next_row(&mut self) -> Option<Row> {
        let Self::Pending(pending) = self else {
            return None;
        };
        let row = pending.pop_front();
        if pending.is_empty() {
            *self = Self::None;
        }
        row
    }

    /// Number of pending [`Row`]s.
    #[must_use]
    pub fn remaining(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Pending(pending) => pending.len(),
        }
    }

    /// Ensures no [`Row`] is left pending.
    ///
    /// # Errors
    ///
    /// [`Error::UnconsumedExamples`] otherwise.
    pub fn ensure_consumed(&self) -> Result<(), Error> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(Error::UnconsumedExamples { remaining }),
        }
    }
}
