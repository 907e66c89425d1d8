// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for parsing [Gherkin] files.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod basic;

use std::sync::Arc;

use derive_more::with_trait::Display;

#[doc(inline)]
pub use self::basic::Basic;

/// Source of parsed [`Feature`]s.
///
/// [`Feature`]: gherkin::Feature
pub trait Parser<I> {
    /// Output [`Iterator`] of parsed [`Feature`]s.
    ///
    /// [`Feature`]: gherkin::Feature
    type Output: Iterator<Item = Result<gherkin::Feature>>;

    /// Parses the given `input` into an [`Iterator`] of [`Feature`]s.
    ///
    /// [`Feature`]: gherkin::Feature
    fn parse(self, input: I) -> Self::Output;
}

/// Result of parsing [Gherkin] files.
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
pub type Result<T> = std::result::Result<T, Error>;

/// [`Parser`] error.
#[derive(Clone, Debug, Display, derive_more::with_trait::Error)]
pub enum Error {
    /// Failed to parse [Gherkin] text.
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    #[display("{_0}")]
    Source(Arc<gherkin::ParseError>),

    /// Failed to read or parse a `.feature` file.
    #[display("Failed to parse feature: {_0}")]
    File(Arc<gherkin::ParseFileError>),

    /// Failed to walk a directory of `.feature` files.
    #[display("Failed to walk features directory: {_0}")]
    Walk(Arc<globwalk::GlobError>),
}

impl From<gherkin::ParseError> for Error {
    fn from(e: gherkin::ParseError) -> Self {
        Self::Source(Arc::new(e))
    }
}

impl From<gherkin::ParseFileError> for Error {
    fn from(e: gherkin::ParseFileError) -> Self {
        Self::File(Arc::new(e))
    }
}

impl From<globwalk::GlobError> for Error {
    fn from(e: globwalk::GlobError) -> Self {
        Self::Walk(Arc::new(e))
    }
}
