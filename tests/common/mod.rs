// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use std::{convert::Infallible, path::PathBuf};

use cucumber_page::{
    gherkin::{self, tagexpr::TagOperation},
    runner,
    step::{Collection, Context},
    World,
};
use regex::Regex;

#[derive(Debug, Default)]
pub struct Calc {
    pub x: i64,
}

impl World for Calc {
    type Error = Infallible;

    fn new() -> Result<Self, Infallible> {
        Ok(Self::default())
    }
}

fn variable(w: &mut Calc, ctx: &Context) {
    w.x = ctx.parse(1);
}

fn multiply(w: &mut Calc, ctx: &Context) {
    w.x *= ctx.parse::<i64>(1);
}

fn check(w: &mut Calc, ctx: &Context) {
    let expected = ctx.parse::<i64>(1);
    assert!(w.x == expected, "x is {}, but should be {expected}", w.x);
}

fn noop(_: &mut Calc, _: &gherkin::Scenario) {}

fn failing_before(_: &mut Calc, _: &gherkin::Scenario) {
    panic!("before hook failed");
}

fn failing_after(_: &mut Calc, _: &gherkin::Scenario) {
    panic!("after hook failed");
}

fn tag(expr: &str) -> Option<TagOperation> {
    Some(expr.parse().unwrap())
}

pub fn steps() -> Collection<Calc> {
    Collection::new()
        .given(Regex::new(r"^a variable x with value (\d+)$").unwrap(), variable)
        .when(Regex::new(r"^I multiply x by (\d+)$").unwrap(), multiply)
        .then(Regex::new(r"^x should equal (\d+)$").unwrap(), check)
        .before(tag("@withBefore"), noop)
        .after(tag("@withAfter"), noop)
        .before(tag("@withFailingBefore"), failing_before)
        .after(tag("@withFailingAfter"), failing_after)
}

pub fn runner() -> runner::Basic<Calc> {
    runner::Basic::new(steps())
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features")
        .join(name)
}

pub fn source(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap()
}
