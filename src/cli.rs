// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) of the `cucumber-page` binary.

use std::{env, path::PathBuf};

use tracing_subscriber::EnvFilter;

use crate::writer::Summary;

pub use clap::Parser;

/// Environment variable holding the log filter, used when no
/// `--log-level` is given.
pub const LOG_ENV_VAR: &str = "CUCUMBER_PAGE_LOG";

/// Log filter used when neither `--log-level` nor [`LOG_ENV_VAR`] is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Renders and dry-runs Cucumber feature files as HTML pages.
#[derive(Clone, Debug, Parser)]
#[command(name = "cucumber-page", version)]
pub struct Opts {
    /// Log filter directives, in `tracing-subscriber` `EnvFilter` syntax.
    #[arg(long, global = true, value_name = "filter")]
    pub log_level: Option<String>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Command of the `cucumber-page` binary.
#[derive(Clone, Debug, clap::Subcommand)]
pub enum Command {
    /// Renders a feature file, or lists feature files of a directory,
    /// without executing anything.
    Render {
        /// Feature file or directory.
        path: PathBuf,
    },

    /// Executes feature files without any step definitions, reporting every
    /// step as undefined along with a snippet to implement it.
    DryRun {
        /// Feature file or directory.
        path: PathBuf,

        /// Name of the glue code to execute with.
        #[arg(long, value_name = "name")]
        glue: Option<String>,
    },
}

impl Opts {
    /// Builds the log [`EnvFilter`] out of `--log-level`, [`LOG_ENV_VAR`] or
    /// [`DEFAULT_LOG_LEVEL`], in that order.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        let directives = self
            .log_level
            .clone()
            .or_else(|| env::var(LOG_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
        EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!("Invalid log filter `{directives}`: {e}");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        })
    }
}

/// Installs a global [`tracing`] subscriber writing to stderr, so that
/// stdout carries nothing but the rendered markup.
///
/// Does nothing if a global subscriber is installed already.
pub fn init_logging(opts: &Opts) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(opts.log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    _ = tracing::subscriber::set_global_default(subscriber);
}

/// Logs the [`Summary`] of a finished run, as a warning if it has failed.
pub fn log_summary(summary: Summary) {
    if summary.has_failed() {
        tracing::warn!(%summary, "run finished");
    } else {
        tracing::info!(%summary, "run finished");
    }
}
