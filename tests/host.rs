// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use std::{
    error::Error as StdError,
    fs, io,
    sync::{Arc, Mutex},
};

use cucumber_page::{
    host::{
        self, Child, FeaturePage, PageFactory, PageType, SharedVariables,
        TestPage, TestSystem, TestSystemListener, TocPage, Variables,
        GLUE_VARIABLE, TEST_SYSTEM_VARIABLE,
    },
    writer::Summary,
};

use self::common::{fixture, runner, steps};

/// Records every callback as a line of text.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    output: Arc<Mutex<String>>,
    broken_output: bool,
}

impl Recorder {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn output(&self) -> String {
        self.output.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TestSystemListener for Recorder {
    fn test_system_started(&mut self, name: &str) -> io::Result<()> {
        self.record(format!("started {name}"));
        Ok(())
    }

    fn test_output_chunk(&mut self, chunk: &str) -> io::Result<()> {
        if self.broken_output {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.output.lock().unwrap().push_str(chunk);
        Ok(())
    }

    fn test_started(&mut self, page: &dyn TestPage) -> io::Result<()> {
        self.record(format!("test started {}", page.name()));
        Ok(())
    }

    fn test_complete(
        &mut self,
        page: &dyn TestPage,
        summary: Summary,
    ) -> io::Result<()> {
        self.record(format!("test complete {}: {summary}", page.name()));
        Ok(())
    }

    fn test_system_stopped(
        &mut self,
        name: &str,
        error: Option<&(dyn StdError + 'static)>,
    ) -> io::Result<()> {
        self.record(format!("stopped {name} {}", error.is_none()));
        Ok(())
    }
}

fn vars() -> SharedVariables {
    Variables::new().with("TEST_VAR", "my value").shared()
}

#[test]
fn toc_lists_features_then_directories() {
    let toc = TocPage::new(fixture(""), vars());

    assert_eq!(toc.content(), "!contents");
    assert_eq!(toc.page_type(), PageType::Suite);

    let children = toc.children().unwrap();
    let names = children.iter().map(Child::name).collect::<Vec<_>>();
    assert_eq!(names, ["background", "hooks", "multiply", "nested"]);
    assert_eq!(
        children.iter().map(Child::page_type).collect::<Vec<_>>(),
        [PageType::Test, PageType::Test, PageType::Test, PageType::Suite],
    );

    let Child::Toc(nested) = &children[3] else {
        panic!("`nested` is not a directory page");
    };
    let nested = nested.children().unwrap();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].name(), "divide");

    assert_eq!(
        toc.html().unwrap(),
        "<ul><li>background</li><li>hooks</li><li>multiply</li>\
         <li>nested</li></ul>",
    );
}

#[test]
fn factory_supports_directories_with_features_only() {
    assert!(PageFactory::supports(&fixture("")));
    assert!(PageFactory::supports(&fixture("nested")));
    assert!(!PageFactory::supports(&fixture("multiply.feature")));
    assert!(!PageFactory::supports(&fixture("missing")));
    assert!(PageFactory::make_page(&fixture("missing"), vars()).is_none());

    assert!(host::is_feature_file(&fixture("multiply.feature")));
    assert!(!host::is_feature_file(&fixture("nested")));
}

#[test]
fn directories_without_features_are_not_listed() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("notes.txt"), "nothing").unwrap();
    fs::write(dir.path().join("b.feature"), "Feature: b\n").unwrap();
    fs::write(dir.path().join("a.FEATURE"), "Feature: a\n").unwrap();

    let toc = PageFactory::make_page(dir.path(), vars()).unwrap();
    let names = toc
        .children()
        .unwrap()
        .iter()
        .map(|c| c.name().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn variables_are_inherited() {
    let toc = TocPage::new(fixture(""), vars());
    let children = toc.children().unwrap();
    let Child::Feature(feature) = &children[1] else {
        panic!("`multiply` is not a feature page");
    };

    assert_eq!(toc.variable("TEST_VAR").as_deref(), Some("my value"));
    assert_eq!(feature.variable("TEST_VAR").as_deref(), Some("my value"));
    assert_eq!(toc.variable(TEST_SYSTEM_VARIABLE), None);
    assert_eq!(
        feature.variable(TEST_SYSTEM_VARIABLE).as_deref(),
        Some("cucumber"),
    );
}

#[test]
fn feature_page_renders_statically() {
    let page = FeaturePage::new(fixture("multiply.feature"), vars());

    assert_eq!(page.name(), "multiply");
    assert_eq!(page.path(), fixture("multiply.feature"));
    assert!(page.content().starts_with("Feature: Multiply"));
    assert!(page.html().unwrap().contains("<h4>Scenario: multiply once</h4>"));
}

#[test]
fn runs_pages_through_lifecycle() {
    let recorder = Recorder::default();
    let mut system = TestSystem::new(runner())
        .with_name("name")
        .with_log(io::sink());
    system.add_listener(recorder.clone());

    assert!(!system.is_successfully_started());
    system.start().unwrap();
    assert!(system.is_successfully_started());

    let page = FeaturePage::new(fixture("multiply.feature"), vars());
    let summary = system.run_tests(&page).unwrap();
    system.bye().unwrap();

    assert_eq!(summary, Summary { pass: 8, fail: 1, error: 0, ignored: 0 });
    assert_eq!(
        recorder.calls(),
        [
            "started name",
            "test started multiply",
            "test complete multiply: 8 right, 1 wrong, 0 ignored, 0 exceptions",
            "stopped name true",
        ],
    );
    assert!(recorder.output().contains("<span class='fail'>Then x should equal 5</span>"));
}

#[test]
fn selects_glue_from_page_variable() {
    let recorder = Recorder::default();
    let mut system = TestSystem::new(
        cucumber_page::runner::Basic::default().with_glue("calc", steps()),
    )
    .with_log(io::sink());
    system.add_listener(recorder.clone());

    let page = FeaturePage::new(
        fixture("multiply.feature"),
        Variables::new().with(GLUE_VARIABLE, "calc").shared(),
    );
    let summary = system.run_tests(&page).unwrap();

    assert_eq!(summary.pass, 8);
}

#[test]
fn execution_failure_counts_as_exception() {
    let recorder = Recorder::default();
    let mut system = TestSystem::new(runner()).with_log(io::sink());
    system.add_listener(recorder.clone());

    let page = FeaturePage::new(
        fixture("multiply.feature"),
        Variables::new().with(GLUE_VARIABLE, "missing").shared(),
    );
    let summary = system.run_tests(&page).unwrap();

    assert_eq!(summary, Summary { pass: 0, fail: 0, error: 1, ignored: 0 });
    assert_eq!(
        recorder.output(),
        "<span class='error'>Test execution failed: Unknown glue `missing`\
         </span>",
    );
    assert_eq!(
        recorder.calls().last().map(String::as_str),
        Some("test complete multiply: 0 right, 0 wrong, 0 ignored, 1 exceptions"),
    );
}

#[test]
fn output_failure_is_fatal_after_completion() {
    let recorder = Recorder { broken_output: true, ..Recorder::default() };
    let mut system = TestSystem::new(runner()).with_log(io::sink());
    system.add_listener(recorder.clone());

    let page = FeaturePage::new(fixture("multiply.feature"), vars());
    let err = system.run_tests(&page).unwrap_err();

    assert!(matches!(err, host::Error::Report(_)));
    assert!(recorder.calls().last().unwrap().starts_with("test complete multiply"));
}

#[test]
fn kill_stops_without_error() {
    let recorder = Recorder::default();
    let mut system = TestSystem::new(runner());
    system.add_listener(recorder.clone());

    system.kill().unwrap();

    assert_eq!(system.name(), "cucumber");
    assert_eq!(recorder.calls(), ["stopped cucumber true"]);
}
