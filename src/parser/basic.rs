// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Parser`] implementation.

use std::{borrow::Cow, path::Path, vec};

use crate::parser::{Parser, Result};

/// Default [`Parser`].
///
/// Parses a single `.feature` file, or every `.feature` file found
/// recursively in a directory, in path order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Basic;

impl Basic {
    /// Parses the given [Gherkin] `source` text.
    ///
    /// # Errors
    ///
    /// If the `source` isn't valid [Gherkin].
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    pub fn parse_str(self, source: &str) -> Result<gherkin::Feature> {
        // Gherkin grammar requires the last line to be terminated.
        let source = if source.ends_with('\n') {
            Cow::Borrowed(source)
        } else {
            Cow::Owned(format!("{source}\n"))
        };
        Ok(gherkin::Feature::parse(
            source.as_ref(),
            gherkin::GherkinEnv::default(),
        )?)
    }

    /// Parses the `.feature` file at the given `path`.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't valid [Gherkin].
    ///
    /// [Gherkin]: https://cucumber.io/docs/gherkin/reference
    pub fn parse_file(self, path: &Path) -> Result<gherkin::Feature> {
        Ok(gherkin::Feature::parse_path(
            path,
            gherkin::GherkinEnv::default(),
        )?)
    }

    fn walk(self, dir: &Path) -> Result<Vec<Result<gherkin::Feature>>> {
        let walker = globwalk::GlobWalkerBuilder::new(dir, "*.feature")
            .case_insensitive(true)
            .build()?;
        let mut paths = walker
            .filter_map(|entry| {
                entry
                    .map_err(|e| tracing::warn!("skipping entry: {e}"))
                    .ok()
            })
            .filter(|entry| entry.file_type().is_file())
            .map(globwalk::DirEntry::into_path)
            .collect::<Vec<_>>();
        paths.sort();
        Ok(paths.iter().map(|p| self.parse_file(p)).collect())
    }
}

impl<I: AsRef<Path>> Parser<I> for Basic {
    type Output = vec::IntoIter<Result<gherkin::Feature>>;

    fn parse(self, input: I) -> Self::Output {
        let path = input.as_ref();
        let features = if path.is_dir() {
            self.walk(path).unwrap_or_else(|e| vec![Err(e)])
        } else {
            vec![self.parse_file(path)]
        };
        features.into_iter()
    }
}
