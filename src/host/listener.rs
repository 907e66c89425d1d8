// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Test lifecycle callbacks of a reporting host.

use std::{error::Error as StdError, fmt, io};

use crate::{host::TestPage, writer::Summary};

/// Receiver of [`TestSystem`] lifecycle callbacks.
///
/// Every callback does nothing by default.
///
/// [`TestSystem`]: super::TestSystem
pub trait TestSystemListener {
    /// [`TestSystem`] named `name` started.
    ///
    /// # Errors
    ///
    /// If the host fails to accept the callback.
    ///
    /// [`TestSystem`]: super::TestSystem
    fn test_system_started(&mut self, name: &str) -> io::Result<()> {
        _ = name;
        Ok(())
    }

    /// Next chunk of the rendered output of the running test.
    ///
    /// # Errors
    ///
    /// If the host fails to accept the callback.
    fn test_output_chunk(&mut self, chunk: &str) -> io::Result<()> {
        _ = chunk;
        Ok(())
    }

    /// Test of the given `page` started.
    ///
    /// # Errors
    ///
    /// If the host fails to accept the callback.
    fn test_started(&mut self, page: &dyn TestPage) -> io::Result<()> {
        _ = page;
        Ok(())
    }

    /// Test of the given `page` completed with the given [`Summary`].
    ///
    /// # Errors
    ///
    /// If the host fails to accept the callback.
    fn test_complete(
        &mut self,
        page: &dyn TestPage,
        summary: Summary,
    ) -> io::Result<()> {
        _ = (page, summary);
        Ok(())
    }

    /// [`TestSystem`] named `name` stopped, due to the given `error`, if any.
    ///
    /// # Errors
    ///
    /// If the host fails to accept the callback.
    ///
    /// [`TestSystem`]: super::TestSystem
    fn test_system_stopped(
        &mut self,
        name: &str,
        error: Option<&(dyn StdError + 'static)>,
    ) -> io::Result<()> {
        _ = (name, error);
        Ok(())
    }
}

/// [`TestSystemListener`] forwarding every callback to all the registered
/// ones, in registration order.
///
/// Forwarding stops at the first failing [`TestSystemListener`].
#[derive(Default)]
pub struct Listeners(Vec<Box<dyn TestSystemListener + Send>>);

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listeners").field(&self.0.len()).finish()
    }
}

impl Listeners {
    /// Registers a new [`TestSystemListener`].
    pub fn add(&mut self, listener: impl TestSystemListener + Send + 'static) {
        self.0.push(Box::new(listener));
    }

    /// Number of registered [`TestSystemListener`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no [`TestSystemListener`] is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TestSystemListener for Listeners {
    fn test_system_started(&mut self, name: &str) -> io::Result<()> {
        self.0.iter_mut().try_for_each(|l| l.test_system_started(name))
    }

    fn test_output_chunk(&mut self, chunk: &str) -> io::Result<()> {
        self.0.iter_mut().try_for_each(|l| l.test_output_chunk(chunk))
    }

    fn test_started(&mut self, page: &dyn TestPage) -> io::Result<()> {
        self.0.iter_mut().try_for_each(|l| l.test_started(page))
    }

    fn test_complete(
        &mut self,
        page: &dyn TestPage,
        summary: Summary,
    ) -> io::Result<()> {
        self.0.iter_mut().try_for_each(|l| l.test_complete(page, summary))
    }

    fn test_system_stopped(
        &mut self,
        name: &str,
        error: Option<&(dyn StdError + 'static)>,
    ) -> io::Result<()> {
        self.0
            .iter_mut()
            .try_for_each(|l| l.test_system_stopped(name, error))
    }
}
