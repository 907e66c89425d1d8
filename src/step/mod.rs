// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions for a [`Collection`] which is used to store [`Step`] [`fn`]s,
//! their [`Regex`] patterns and scenario hooks.
//!
//! [`Regex`]: ::regex::Regex

pub mod collection;
pub mod context;
pub mod error;
pub mod regex;
pub mod snippet;

#[doc(inline)]
pub use self::{
    collection::{Collection, Hook, HookFn},
    context::{CaptureName, Context},
    error::AmbiguousMatchError,
    regex::HashableRegex,
    snippet::snippet,
};

/// Alias for a [`gherkin::Step`] function.
///
/// Panicking inside it fails the [`gherkin::Step`].
pub type Step<World> = fn(&mut World, &Context);
