// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step matching errors.

use std::fmt;

use derive_more::with_trait::Error;

use super::regex::HashableRegex;

/// Error of a [`gherkin::Step`] matching multiple [`Step`] [`Regex`]es inside a
/// [`Collection`].
///
/// [`Collection`]: super::Collection
/// [`Regex`]: regex::Regex
/// [`Step`]: super::Step
#[derive(Clone, Debug, Error)]
pub struct AmbiguousMatchError {
    /// Possible [`Regex`]es the [`gherkin::Step`] matches, sorted.
    ///
    /// [`Regex`]: regex::Regex
    pub possible_matches: Vec<HashableRegex>,
}

impl fmt::Display for AmbiguousMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Possible matches:")?;
        for re in &self.possible_matches {
            write!(f, "\n{re}")?;
        }
        Ok(())
    }
}
