// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration with a document-oriented test-reporting host.
//!
//! Feature files are exposed as a tree of pages ([`TocPage`]s of
//! directories, [`FeaturePage`]s of files), and executed by a
//! [`TestSystem`] reporting to the host through [`TestSystemListener`]
//! callbacks.

pub mod listener;
pub mod page;
pub mod test_system;
pub mod variables;

use std::io;

use derive_more::with_trait::{Display, From};

use crate::writer;

#[doc(inline)]
pub use self::{
    listener::{Listeners, TestSystemListener},
    page::{
        is_feature_file, Child, FeaturePage, PageFactory, PageType, TestPage,
        TocPage,
    },
    test_system::TestSystem,
    variables::{SharedVariables, SystemVariables, VariableSource, Variables},
};

/// Name of the test system, as reported to the host.
pub const TEST_SYSTEM_NAME: &str = "cucumber";

/// Page variable naming the glue code to execute the page with.
pub const GLUE_VARIABLE: &str = "cucumber.glue";

/// Page variable naming the test system of the page.
pub const TEST_SYSTEM_VARIABLE: &str = "TEST_SYSTEM";

/// [`TestSystem`] error.
#[derive(Debug, Display, derive_more::with_trait::Error, From)]
pub enum Error {
    /// Host failed to accept a callback.
    #[display("Host callback failed: {_0}")]
    Io(io::Error),

    /// Rendered output failed to be written.
    #[display("Failed to write report: {_0}")]
    Report(writer::Error),
}
