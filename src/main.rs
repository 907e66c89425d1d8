// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::Infallible, fs, io, path::Path, sync::Arc};

use anyhow::Context as _;
use cucumber_page::{
    cli::{self, Command, Opts, Parser as _},
    host::{SystemVariables, TestPage as _, TocPage},
    parser::{self, Parser as _},
    runner,
    step::Collection,
    writer::{out::WriteStrExt as _, Page, Report},
    World,
};

/// [`World`] of a dry run, which has no steps to share state between.
#[derive(Debug)]
struct DryRun;

impl World for DryRun {
    type Error = Infallible;

    fn new() -> Result<Self, Infallible> {
        Ok(Self)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    cli::init_logging(&opts);

    match &opts.command {
        Command::Render { path } => render(path),
        Command::DryRun { path, glue } => dry_run(path, glue.as_deref()),
    }
}

fn render(path: &Path) -> anyhow::Result<()> {
    let html = if path.is_dir() {
        let toc = TocPage::new(path, Arc::new(SystemVariables));
        tracing::debug!(page = toc.name(), "rendering contents");
        toc.html()
    } else {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Page::render(&source)
    }
    .with_context(|| format!("failed to render `{}`", path.display()))?;

    io::stdout().lock().write_line(html)?;
    Ok(())
}

fn dry_run(path: &Path, glue: Option<&str>) -> anyhow::Result<()> {
    let features = parser::Basic
        .parse(path)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to parse `{}`", path.display()))?;

    // No step is defined, so any requested glue resolves to nothing either.
    let mut runner = runner::Basic::<DryRun>::default();
    if let Some(name) = glue {
        runner = runner.with_glue(name, Collection::new());
    }

    let mut report = Report::new(io::stdout().lock(), io::stderr().lock());
    runner.run_features(features, glue, &mut report)?;

    cli::log_summary(report.summary());
    Ok(())
}
