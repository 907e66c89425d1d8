// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Feature files exposed as a tree of host pages.

use std::{
    borrow::Cow,
    ffi::OsStr,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use derive_more::with_trait::Display;
use itertools::Itertools as _;
use once_cell::sync::OnceCell;

use crate::{
    host::{SharedVariables, VariableSource, TEST_SYSTEM_NAME, TEST_SYSTEM_VARIABLE},
    writer::{html, Page},
};

/// Kind of a host page.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum PageType {
    /// Page executed as a test.
    #[display("test")]
    Test,

    /// Page grouping other pages.
    #[display("suite")]
    Suite,
}

/// Page of a reporting host, which may be executed as a test.
pub trait TestPage {
    /// Name of this page.
    fn name(&self) -> &str;

    /// Raw content of this page.
    fn content(&self) -> Cow<'_, str>;

    /// Resolves the page variable `name`, if defined.
    fn variable(&self, name: &str) -> Option<String>;
}

/// Single feature file.
pub struct FeaturePage {
    path: PathBuf,
    name: String,
    parent: SharedVariables,
    content: OnceCell<String>,
}

impl fmt::Debug for FeaturePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturePage")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl FeaturePage {
    /// Creates a new [`FeaturePage`] of the file at `path`, resolving
    /// variables through the given `parent`.
    ///
    /// The page is named after the file stem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, parent: SharedVariables) -> Self {
        let path = path.into();
        let name = page_name(&path);
        Self { path, name, parent, content: OnceCell::new() }
    }

    /// Path of the feature file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Always [`PageType::Test`].
    #[must_use]
    pub const fn page_type(&self) -> PageType {
        PageType::Test
    }

    /// Feature files have no children.
    #[must_use]
    pub const fn children(&self) -> &[Child] {
        &[]
    }

    /// Renders the content of this page without executing it.
    ///
    /// # Errors
    ///
    /// Never, in practice, as the output is in memory.
    pub fn html(&self) -> io::Result<String> {
        Page::render(&self.content())
    }

    fn load(&self) -> &str {
        self.content.get_or_init(|| {
            fs::read_to_string(&self.path).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unable to read feature file",
                );
                format!(
                    "<p class='error'>Unable to read feature file {}: {}</p>",
                    html::escape(&self.path.display().to_string()),
                    html::escape(&e.to_string()),
                )
            })
        })
    }
}

impl TestPage for FeaturePage {
    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.load())
    }

    fn variable(&self, name: &str) -> Option<String> {
        if name == TEST_SYSTEM_VARIABLE {
            return Some(TEST_SYSTEM_NAME.into());
        }
        self.parent.variable(name)
    }
}

/// Directory of feature files, listing its contents.
pub struct TocPage {
    path: PathBuf,
    name: String,
    variables: SharedVariables,
}

impl fmt::Debug for TocPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TocPage")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TocPage {
    /// Content of every [`TocPage`], asking the host for a listing.
    pub const CONTENT: &'static str = "!contents";

    /// Creates a new [`TocPage`] of the directory at `path`, resolving
    /// variables through the given `parent`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, parent: SharedVariables) -> Self {
        let path = path.into();
        let name = page_name(&path);
        Self { path, name, variables: parent }
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Always [`PageType::Suite`].
    #[must_use]
    pub const fn page_type(&self) -> PageType {
        PageType::Suite
    }

    /// Lists feature files of this directory sorted by name, followed by
    /// nested directories containing feature files, sorted by name too.
    ///
    /// Children inherit variables of this page.
    ///
    /// # Errors
    ///
    /// If the directory can't be read.
    pub fn children(&self) -> io::Result<Vec<Child>> {
        let paths = fs::read_dir(&self.path)?
            .map(|e| e.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;

        let (features, dirs): (Vec<_>, Vec<_>) = paths
            .into_iter()
            .sorted()
            .filter(|p| is_feature_file(p) || PageFactory::supports(p))
            .partition(|p| is_feature_file(p));

        Ok(features
            .into_iter()
            .map(|p| Child::Feature(FeaturePage::new(p, self.variables.clone())))
            .chain(dirs.into_iter().map(|p| {
                Child::Toc(Self::new(p, self.variables.clone()))
            }))
            .collect())
    }

    /// Renders the listing of [`TocPage::children()`].
    ///
    /// # Errors
    ///
    /// If the directory can't be read.
    pub fn html(&self) -> io::Result<String> {
        let items = self
            .children()?
            .iter()
            .map(|c| format!("<li>{}</li>", html::escape(c.name())))
            .join("");
        Ok(format!("<ul>{items}</ul>"))
    }
}

impl TestPage for TocPage {
    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::CONTENT)
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables.variable(name)
    }
}

/// Child of a [`TocPage`].
#[derive(Debug)]
pub enum Child {
    /// Feature file.
    Feature(FeaturePage),

    /// Nested directory.
    Toc(TocPage),
}

impl Child {
    /// Name of this [`Child`] page.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Feature(p) => p.name(),
            Self::Toc(p) => p.name(),
        }
    }

    /// Kind of this [`Child`] page.
    #[must_use]
    pub const fn page_type(&self) -> PageType {
        match self {
            Self::Feature(p) => p.page_type(),
            Self::Toc(p) => p.page_type(),
        }
    }
}

/// Factory of [`TocPage`]s for directories containing feature files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageFactory;

impl PageFactory {
    /// Indicates whether the given `dir` contains at least one feature file.
    #[must_use]
    pub fn supports(dir: &Path) -> bool {
        fs::read_dir(dir).is_ok_and(|entries| {
            entries.flatten().any(|e| is_feature_file(&e.path()))
        })
    }

    /// Creates a [`TocPage`] of the given `dir`, if [supported].
    ///
    /// [supported]: PageFactory::supports
    #[must_use]
    pub fn make_page(dir: &Path, parent: SharedVariables) -> Option<TocPage> {
        Self::supports(dir).then(|| TocPage::new(dir, parent))
    }
}

/// Indicates whether the given `path` is a feature file.
#[must_use]
pub fn is_feature_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("feature"))
}

fn page_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
