// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Orchestration of test runs on behalf of a reporting host.

use std::{fmt, io, time::Instant};

use crate::{
    host::{
        Error, Listeners, TestPage, TestSystemListener, GLUE_VARIABLE,
        TEST_SYSTEM_NAME,
    },
    runner,
    writer::{out::Chunked, Report, Summary},
    Runner,
};

/// Test system executing [`TestPage`]s with a [`Runner`], streaming the
/// rendered output and final [`Summary`] of each to its
/// [`TestSystemListener`]s.
pub struct TestSystem<R> {
    name: String,
    runner: R,
    log: Box<dyn io::Write + Send>,
    listeners: Listeners,
    started: bool,
}

impl<R: fmt::Debug> fmt::Debug for TestSystem<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSystem")
            .field("name", &self.name)
            .field("runner", &self.runner)
            .field("listeners", &self.listeners)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl<R> TestSystem<R> {
    /// Creates a new [`TestSystem`] executing pages with the given `runner`.
    ///
    /// Failure details are logged to [`io::stderr()`] by default.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            name: TEST_SYSTEM_NAME.into(),
            runner,
            log: Box::new(io::stderr()),
            listeners: Listeners::default(),
            started: false,
        }
    }

    /// Sets the `name` reported to [`TestSystemListener`]s.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the sink of failure details.
    #[must_use]
    pub fn with_log(mut self, log: impl io::Write + Send + 'static) -> Self {
        self.log = Box::new(log);
        self
    }

    /// Registers a new [`TestSystemListener`].
    pub fn add_listener(
        &mut self,
        listener: impl TestSystemListener + Send + 'static,
    ) {
        self.listeners.add(listener);
    }

    /// Name of this [`TestSystem`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indicates whether [`TestSystem::start()`] has been called.
    #[must_use]
    pub const fn is_successfully_started(&self) -> bool {
        self.started
    }

    /// Starts this [`TestSystem`].
    ///
    /// # Errors
    ///
    /// If a [`TestSystemListener`] fails.
    pub fn start(&mut self) -> Result<(), Error> {
        self.started = true;
        tracing::info!(name = %self.name, "test system started");
        self.listeners.test_system_started(&self.name)?;
        Ok(())
    }

    /// Stops this [`TestSystem`] gracefully.
    ///
    /// # Errors
    ///
    /// If a [`TestSystemListener`] fails.
    pub fn bye(&mut self) -> Result<(), Error> {
        self.kill()
    }

    /// Stops this [`TestSystem`] immediately.
    ///
    /// # Errors
    ///
    /// If a [`TestSystemListener`] fails.
    pub fn kill(&mut self) -> Result<(), Error> {
        tracing::info!(name = %self.name, "test system stopped");
        self.listeners.test_system_stopped(&self.name, None)?;
        Ok(())
    }
}

impl<R: Runner> TestSystem<R> {
    /// Executes the given `page` with the glue code named by its
    /// [`GLUE_VARIABLE`], returning the [`Summary`] of the run.
    ///
    /// [`TestSystemListener::test_complete()`] is called even if the run
    /// fails. Failures to parse or execute the `page` are reported to the
    /// [`TestSystemListener`]s as a single exception, and are not errors.
    ///
    /// # Errors
    ///
    /// If the rendered output can't be written, or a [`TestSystemListener`]
    /// fails.
    pub fn run_tests(&mut self, page: &dyn TestPage) -> Result<Summary, Error> {
        let glue = page.variable(GLUE_VARIABLE);
        self.listeners.test_started(page)?;

        let started_at = Instant::now();
        let content = page.content();
        let (summary, fatal) = {
            let listeners = &mut self.listeners;
            let output = Chunked(|chunk: &str| listeners.test_output_chunk(chunk));
            let mut report = Report::new(output, &mut self.log);

            let fatal = match self.runner.run(&content, glue.as_deref(), &mut report) {
                Ok(()) => None,
                Err(runner::Error::Writer(e)) => Some(e),
                Err(e) => {
                    tracing::warn!(page = page.name(), error = %e, "test execution failed");
                    report.on_run_aborted(&e).err()
                }
            };
            let (_, _, summary) = report.into_parts();
            (summary, fatal)
        };

        self.listeners.test_complete(page, summary)?;
        tracing::info!(
            page = page.name(),
            %summary,
            elapsed = %humantime::format_duration(started_at.elapsed()),
            "test complete",
        );

        match fatal {
            Some(e) => Err(Error::Report(e)),
            None => Ok(summary),
        }
    }
}
