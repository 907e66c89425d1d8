// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bridge between a [Cucumber] scenario runner and a document-oriented
//! test-reporting host.
//!
//! A [`Runner`] executes [Gherkin] documents and emits [`Event`]s in
//! execution order. The [`writer::Report`] consumes them, rendering HTML
//! incrementally and tallying step outcomes into a [`writer::Summary`],
//! which the [`host::TestSystem`] hands over to the host as the verdict of
//! a test page. The same markup is used by [`writer::Page`] to preview a
//! feature file without executing it.
//!
//! [Cucumber]: https://cucumber.io
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::expect_used,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_qualifications
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod event;
pub mod feature;
pub mod host;
pub mod parser;
pub mod runner;
pub mod step;
pub mod tag;
pub mod world;
pub mod writer;

pub use gherkin;

#[doc(inline)]
pub use self::{
    event::Event,
    parser::Parser,
    runner::Runner,
    step::Step,
    world::World,
    writer::Writer,
};
