// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Page variables resolution.

use std::{collections::HashMap, env, fmt, sync::Arc};

/// Source of named page variables.
pub trait VariableSource {
    /// Resolves the variable `name`, if defined.
    fn variable(&self, name: &str) -> Option<String>;
}

impl<T: VariableSource + ?Sized> VariableSource for Arc<T> {
    fn variable(&self, name: &str) -> Option<String> {
        (**self).variable(name)
    }
}

/// [`VariableSource`] shared between pages.
pub type SharedVariables = Arc<dyn VariableSource + Send + Sync>;

/// [`VariableSource`] backed by the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemVariables;

impl VariableSource for SystemVariables {
    fn variable(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// [`VariableSource`] defining its own variables, falling back to a parent
/// one for everything else.
#[derive(Clone, Default)]
pub struct Variables {
    values: HashMap<String, String>,
    parent: Option<SharedVariables>,
}

impl fmt::Debug for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variables")
            .field("values", &self.values)
            .field("parent", &self.parent.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Variables {
    /// Creates new [`Variables`] without any parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `parent` to resolve undefined variables through.
    #[must_use]
    pub fn with_parent(mut self, parent: SharedVariables) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Defines the variable `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        _ = self.values.insert(name.into(), value.into());
        self
    }

    /// Wraps these [`Variables`] for sharing between pages.
    #[must_use]
    pub fn shared(self) -> SharedVariables {
        Arc::new(self)
    }
}

impl VariableSource for Variables {
    fn variable(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .cloned()
            .or_else(|| self.parent.as_ref()?.variable(name))
    }
}
