// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`World`] trait definition.

use std::fmt::Display;

/// Represents a shared user-defined state for a [Cucumber] run.
/// It lives on per-[scenario][0] basis.
///
/// A fresh [`World`] is created before the before hooks of every
/// [scenario][0], so [scenarios][0] can't depend on each other.
///
/// [0]: https://cucumber.io/docs/gherkin/reference#descriptions
/// [Cucumber]: https://cucumber.io
pub trait World: Sized + 'static {
    /// Error of creating a new [`World`] instance.
    type Error: Display;

    /// Creates a new [`World`] instance.
    ///
    /// # Errors
    ///
    /// If the [`World`] can't be set up. The [scenario][0] is then reported
    /// as failed by its before hooks.
    ///
    /// [0]: https://cucumber.io/docs/gherkin/reference#descriptions
    fn new() -> Result<Self, Self::Error>;
}
